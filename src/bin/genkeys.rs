//! Generates deterministic input files for hashing experiments: uniform
//! random key sets at the standard sizes, real collision groups found with
//! the actual hash functions (one file per affected scheme), edge-case
//! sets, malformed files for the reader's skip paths, and a probe-stress
//! set.

use std::collections::HashMap;
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use hashlab::hash;
use hashlab::scheme::TABLE_SIZE;
use log::debug;
use log::error;
use log::info;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Parser, Debug)]
#[command(name = "genkeys", version, about = "Generate input files for hashlab")]
struct Args {
    /// Directory the input files are written to.
    #[arg(long, default_value = "input")]
    out_dir: PathBuf,

    /// Seed for the random sets; fixed by default so runs are reproducible.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Sizes matching the load factors the experiments sweep over a 120-slot
/// table (0.3, 0.7, 0.9, 1.0).
const SIZES: &[usize] = &[36, 84, 108, 120];

fn write_keys(dir: &Path, name: &str, keys: &[i32]) -> std::io::Result<()> {
    let path = dir.join(name);
    let mut file = fs::File::create(&path)?;
    for key in keys {
        writeln!(file, "{key}")?;
    }
    info!("wrote {} keys to {}", keys.len(), path.display());
    Ok(())
}

fn write_lines(dir: &Path, name: &str, lines: &[&str]) -> std::io::Result<()> {
    let path = dir.join(name);
    let mut file = fs::File::create(&path)?;
    for line in lines {
        writeln!(file, "{line}")?;
    }
    info!("wrote {} lines to {}", lines.len(), path.display());
    Ok(())
}

/// Unique random 5-6 digit keys.
fn random_keys(rng: &mut StdRng, count: usize) -> Vec<i32> {
    let mut seen = HashSet::new();
    let mut keys = Vec::with_capacity(count);
    while keys.len() < count {
        let value = rng.random_range(10_000..910_000);
        if seen.insert(value) {
            keys.push(value);
        }
    }
    keys
}

/// Scans ascending keys for slots that three keys actually hash to,
/// collecting whole groups until roughly 60 keys are found. Every key in
/// the output is guaranteed to collide with two others under `hash_of`.
fn collision_groups(hash_of: impl Fn(i32) -> usize) -> Vec<i32> {
    let mut groups: HashMap<usize, Vec<i32>> = HashMap::new();
    let mut result = Vec::new();

    for key in 1..30_000 {
        if result.len() >= 60 {
            break;
        }
        let slot = hash_of(key);
        let group = groups.entry(slot).or_default();
        group.push(key);
        if group.len() == 3 {
            debug!("collision group at index {slot}: {group:?}");
            result.extend_from_slice(group);
        }
    }

    result
}

fn generate(args: &Args) -> std::io::Result<()> {
    fs::create_dir_all(&args.out_dir)?;
    let dir = args.out_dir.as_path();
    let mut rng = StdRng::seed_from_u64(args.seed);

    // Fixed-size random sets plus the empty file.
    for &size in SIZES {
        write_keys(dir, &format!("input_{size}.txt"), &random_keys(&mut rng, size))?;
    }
    write_keys(dir, "input_empty.txt", &[])?;

    // Real collision groups per affected scheme. The groups depend only on
    // the hash function, so the three strategies of a method share content
    // but each scheme still gets its own file.
    let division = collision_groups(|key| hash::division_hash(key, 120, TABLE_SIZE));
    for scheme in 1..=3 {
        write_keys(
            dir,
            &format!("division_collisions_scheme{scheme}.txt"),
            &division,
        )?;
    }
    let custom = collision_groups(|key| hash::fibonacci_hash(key, TABLE_SIZE));
    for scheme in 12..=14 {
        write_keys(
            dir,
            &format!("custom_collisions_scheme{scheme}.txt"),
            &custom,
        )?;
    }

    // Edge cases: duplicates, a nearly full table, boundary values, widely
    // spaced keys, and a high-load set seeded with mod-113 collision pairs.
    write_keys(dir, "input_repeated_keys.txt", &vec![999; 60])?;

    let near_capacity: Vec<i32> = (1000..1119).collect();
    write_keys(dir, "input_near_capacity.txt", &near_capacity)?;

    write_keys(
        dir,
        "input_boundary_keys.txt",
        &[i32::MIN, -1, 0, 1, i32::MAX],
    )?;

    write_keys(dir, "input_gaps.txt", &[10, 1000, 10_000, 25_000, 50_000, 100_000])?;

    let mut highload: Vec<i32> = (1..=110).collect();
    let mut base = 1000;
    while highload.len() < 115 {
        highload.push(base);
        highload.push(base + 113);
        base += 500;
    }
    write_keys(dir, "input_highload_collisions.txt", &highload)?;

    // Malformed files: everything the reader must warn about and skip.
    write_lines(
        dir,
        "input_non_integer.txt",
        &["abc", "42", "!", "%%", "NaN", "999"],
    )?;
    write_lines(
        dir,
        "input_corrupt.txt",
        &[
            "", "     ", "@@@@", "NULL", "42a", "a42", "1-23", "123-", "9999,", ",999", "12.34",
        ],
    )?;
    write_lines(
        dir,
        "input_missing_commas.txt",
        &["100 200 300", "400 500", "600", "700\t800", "900|1000"],
    )?;
    write_lines(
        dir,
        "input_overflow.txt",
        &[
            "9223372036854775807",
            "2147483648",
            "-2147483649",
            "-9999999999999999999",
        ],
    )?;

    // Probe stress: 119 keys spread by a large prime, nearly filling the
    // table.
    let stress: Vec<i32> = (0..119).map(|i| 9999 + i * 7919).collect();
    write_keys(dir, "input_probe_stress.txt", &stress)?;

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    match generate(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("cannot write input files: {e}");
            ExitCode::FAILURE
        }
    }
}
