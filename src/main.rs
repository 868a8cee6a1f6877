//! The `hashlab` driver: reads a key file, runs one experiment
//! configuration, and writes the report.

use std::alloc::GlobalAlloc;
use std::alloc::Layout;
use std::alloc::System;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use clap::Parser;
use clap::ValueEnum;
use log::LevelFilter;
use log::debug;
use log::error;
use log::info;

use hashlab::reader;
use hashlab::report;
use hashlab::scheme::TABLE_SIZE;
use hashlab::Config;
use hashlab::HashMethod;
use hashlab::HashTable;
use hashlab::Scheme;
use hashlab::Strategy;

/// Allocator shim counting live and peak heap bytes, so a run can report
/// how much memory the table actually cost.
struct TrackingAllocator;

static ALLOCATED: AtomicUsize = AtomicUsize::new(0);
static PEAK: AtomicUsize = AtomicUsize::new(0);

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            let live = ALLOCATED.fetch_add(layout.size(), Ordering::Relaxed) + layout.size();
            PEAK.fetch_max(live, Ordering::Relaxed);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        ALLOCATED.fetch_sub(layout.size(), Ordering::Relaxed);
    }
}

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator;

fn heap_live() -> usize {
    ALLOCATED.load(Ordering::Relaxed)
}

fn heap_peak() -> usize {
    PEAK.load(Ordering::Relaxed)
}

#[derive(Parser, Debug)]
#[command(name = "hashlab", version, about = "Hash table experimentation driver")]
struct Args {
    /// Predefined scheme to run (1-14).
    #[arg(
        long,
        value_parser = clap::value_parser!(u8).range(1..=14),
        conflicts_with_all = ["hashing", "strategy", "modulus", "bucket", "c1", "c2"]
    )]
    scheme: Option<u8>,

    /// Hash method for a manually configured run.
    #[arg(long, value_enum, requires = "strategy")]
    hashing: Option<MethodArg>,

    /// Collision strategy for a manually configured run.
    #[arg(long, value_enum, requires = "hashing")]
    strategy: Option<StrategyArg>,

    /// Modulus for division hashing.
    #[arg(long = "mod")]
    modulus: Option<u32>,

    /// Render the table in rows of 1 or 3 cells.
    #[arg(long, value_enum, default_value = "1")]
    bucket: BucketArg,

    /// Linear coefficient for quadratic probing.
    #[arg(long, default_value_t = 0.5)]
    c1: f64,

    /// Quadratic coefficient for quadratic probing.
    #[arg(long, default_value_t = 0.5)]
    c2: f64,

    /// Input file, one signed 32-bit integer per line.
    #[arg(long)]
    input: PathBuf,

    /// Output report file.
    #[arg(long)]
    output: PathBuf,

    /// Trace hashing and probing on stderr.
    #[arg(long)]
    debug: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum MethodArg {
    /// Division hashing; requires --mod.
    Division,
    /// Fibonacci (multiplicative) hashing.
    Custom,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StrategyArg {
    Linear,
    Quadratic,
    Chaining,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum BucketArg {
    /// One cell per row group.
    #[value(name = "1")]
    One,
    /// Three cells per row group.
    #[value(name = "3")]
    Three,
}

impl From<BucketArg> for u8 {
    fn from(arg: BucketArg) -> Self {
        match arg {
            BucketArg::One => 1,
            BucketArg::Three => 3,
        }
    }
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Linear => Strategy::Linear,
            StrategyArg::Quadratic => Strategy::Quadratic,
            StrategyArg::Chaining => Strategy::Chaining,
        }
    }
}

/// Resolves the CLI mode into a scheme number (-1 for manual runs) and a
/// table configuration.
fn resolve(args: &Args) -> Result<(i32, Config), String> {
    if let Some(number) = args.scheme {
        // The range is enforced by the value parser.
        let scheme = Scheme::from_number(number).ok_or("unknown scheme")?;
        return Ok((i32::from(number), scheme.config()));
    }

    let (Some(method), Some(strategy)) = (args.hashing, args.strategy) else {
        return Err("specify either --scheme or both --hashing and --strategy".to_string());
    };

    let method = match method {
        MethodArg::Division => {
            let modulus = args
                .modulus
                .ok_or("--mod is required for division hashing")?;
            HashMethod::Division { modulus }
        }
        MethodArg::Custom => HashMethod::Fibonacci,
    };

    Ok((
        -1,
        Config {
            table_size: TABLE_SIZE,
            bucket_size: args.bucket.into(),
            method,
            strategy: strategy.into(),
            c1: args.c1,
            c2: args.c2,
        },
    ))
}

fn init_logger(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.debug);

    let keys = match reader::read_keys(&args.input) {
        Ok(keys) => keys,
        Err(e) => {
            error!("cannot read {}: {e}", args.input.display());
            return ExitCode::FAILURE;
        }
    };
    if keys.is_empty() {
        error!("no valid keys found in {}", args.input.display());
        return ExitCode::FAILURE;
    }

    let (scheme_number, config) = match resolve(&args) {
        Ok(resolved) => resolved,
        Err(msg) => {
            error!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let heap_before = heap_live();
    let mut table = match HashTable::new(config) {
        Ok(table) => table,
        Err(e) => {
            error!("invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    table.metrics_mut().start_timer();
    for &key in &keys {
        debug!("inserting key {key}");
        table.insert(key);
    }
    if let Err(e) = table.metrics_mut().stop_timer() {
        error!("timer failure: {e}");
        return ExitCode::FAILURE;
    }
    let heap_used = heap_peak().saturating_sub(heap_before) as u64;
    table.metrics_mut().set_memory_bytes(heap_used);

    if let Err(e) = report::write_report_to_file(&args.output, scheme_number, &table, &keys) {
        error!("cannot write {}: {e}", args.output.display());
        return ExitCode::FAILURE;
    }

    info!(
        "scheme {scheme_number}: inserted {} of {} keys, report written to {}",
        table.metrics().insertions(),
        keys.len(),
        args.output.display()
    );
    if args.debug {
        debug!("run summary:\n{}", table.metrics());
    }
    ExitCode::SUCCESS
}
