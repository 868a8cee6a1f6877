//! Report formatting: the run summary written for every experiment.
//!
//! The layout is part of the experiment contract (downstream tooling diffs
//! these files): the echoed input wrapped five keys per line, the
//! configuration line, the collision statistics, the rendered table, and the
//! trailing time/memory lines.

use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use crate::error::Error;
use crate::table::HashMethod;
use crate::table::HashTable;
use crate::table::RawTable;
use crate::table::Strategy;

/// Writes the full report for a finished run to `out`.
///
/// `scheme_number` is the predefined scheme id, or -1 for a manually
/// configured run.
pub fn write_report<W: Write>(
    out: &mut W,
    scheme_number: i32,
    table: &HashTable,
    keys: &[i32],
) -> io::Result<()> {
    writeln!(out, "original input:")?;
    for (i, key) in keys.iter().enumerate() {
        write!(out, "{key}")?;
        if i + 1 < keys.len() {
            write!(out, ", ")?;
        }
        if (i + 1) % 5 == 0 {
            writeln!(out)?;
        }
    }
    if keys.len() % 5 != 0 {
        writeln!(out)?;
    }

    let config = table.config();
    let modulo = match config.method {
        HashMethod::Division { modulus } => modulus.to_string(),
        HashMethod::Fibonacci => "N/A".to_string(),
    };
    writeln!(out)?;
    writeln!(
        out,
        "scheme {scheme_number} ({}) - modulo: {modulo}, bucket size: {}, {}",
        config.method, config.bucket_size, config.strategy
    )?;

    let metrics = table.metrics();
    if config.strategy == Strategy::Chaining {
        writeln!(out, "# of collisions: {}", metrics.total_collisions())?;
    } else {
        writeln!(
            out,
            "# of primary collisions: {}, secondary collisions: {}, total collisions: {}",
            metrics.primary_collisions(),
            metrics.secondary_collisions(),
            metrics.total_collisions()
        )?;
    }
    writeln!(
        out,
        "# of comparisons: {}, records inserted: {}, load factor: {:.6}",
        metrics.comparisons(),
        metrics.insertions(),
        metrics.load_factor()
    )?;
    writeln!(out)?;

    match table.raw() {
        RawTable::Open(slots) => {
            let cells: Vec<String> = slots
                .iter()
                .map(|slot| slot.map_or_else(|| "None".to_string(), |k| k.to_string()))
                .collect();
            let per_row = if config.bucket_size == 3 { 3 } else { 5 };
            write_grid(out, &cells, per_row, 8)?;
        }
        RawTable::Chained { chains, pool } => {
            let cells: Vec<String> = chains.iter().map(|chain| chain.render(pool)).collect();
            let per_row = if config.bucket_size == 3 { 3 } else { 5 };
            write_grid(out, &cells, per_row, 20)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Execution Time: {:.6} seconds", metrics.elapsed_secs())?;
    writeln!(out, "Memory Usage: {} bytes", metrics.memory_bytes())
}

/// Writes the report to a file, creating or truncating it.
pub fn write_report_to_file(
    path: impl AsRef<Path>,
    scheme_number: i32,
    table: &HashTable,
    keys: &[i32],
) -> Result<(), Error> {
    let mut out = BufWriter::new(File::create(path)?);
    write_report(&mut out, scheme_number, table, keys)?;
    out.flush()?;
    Ok(())
}

fn write_grid<W: Write>(
    out: &mut W,
    cells: &[String],
    per_row: usize,
    width: usize,
) -> io::Result<()> {
    for (i, cell) in cells.iter().enumerate() {
        write!(out, "{cell:<width$}")?;
        if (i + 1) % per_row == 0 || i + 1 == cells.len() {
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::table::Config;

    fn report_for(config: Config, scheme_number: i32, keys: &[i32]) -> String {
        let mut table = HashTable::new(config).unwrap();
        for &key in keys {
            table.insert(key);
        }
        let mut out = Vec::new();
        write_report(&mut out, scheme_number, &table, keys).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn probing_report_matches_expected_bytes() {
        let config = Config {
            table_size: 10,
            method: HashMethod::Division { modulus: 10 },
            strategy: Strategy::Linear,
            ..Config::default()
        };
        let report = report_for(config, -1, &[2, 12, 22, 3]);

        let expected = "original input:\n\
                        2, 12, 22, 3\n\
                        \n\
                        scheme -1 (division) - modulo: 10, bucket size: 1, linear\n\
                        # of primary collisions: 3, secondary collisions: 2, total collisions: 5\n\
                        # of comparisons: 9, records inserted: 4, load factor: 0.400000\n\
                        \n\
                        None    None    2       12      22      \n\
                        3       None    None    None    None    \n\
                        \n\
                        Execution Time: 0.000000 seconds\n\
                        Memory Usage: 0 bytes\n";
        assert_eq!(report, expected);
    }

    #[test]
    fn input_echo_wraps_five_per_line() {
        let config = Config {
            table_size: 10,
            method: HashMethod::Division { modulus: 10 },
            strategy: Strategy::Linear,
            ..Config::default()
        };
        let report = report_for(config, 1, &[1, 2, 3, 4, 5, 6, 7]);
        assert!(report.starts_with("original input:\n1, 2, 3, 4, 5, \n6, 7\n\nscheme 1 "));
    }

    #[test]
    fn chaining_report_collapses_the_collision_split() {
        let config = Config {
            table_size: 5,
            method: HashMethod::Division { modulus: 5 },
            strategy: Strategy::Chaining,
            ..Config::default()
        };
        let report = report_for(config, 3, &[1, 6, 11]);

        assert!(report.contains("scheme 3 (division) - modulo: 5, bucket size: 1, chaining\n"));
        assert!(report.contains("# of collisions: 2\n"));
        assert!(!report.contains("primary collisions"));
        assert!(report.contains("# of comparisons: 3, records inserted: 3, load factor: 0.600000\n"));
        // One row of five width-20 cells; the populated chain is exactly 20
        // characters wide.
        assert!(report.contains(
            "None                11 -> 6 -> 1 -> NoneNone                None                None                \n"
        ));
    }

    #[test]
    fn bucket_three_renders_three_columns() {
        let config = Config {
            table_size: 6,
            bucket_size: 3,
            method: HashMethod::Division { modulus: 6 },
            strategy: Strategy::Linear,
            ..Config::default()
        };
        let report = report_for(config, 10, &[0, 1, 2, 3]);

        assert!(report.contains("bucket size: 3, linear\n"));
        assert!(report.contains("0       1       2       \n3       None    None    \n"));
    }

    #[test]
    fn fibonacci_reports_no_modulo() {
        let config = Config {
            table_size: 120,
            method: HashMethod::Fibonacci,
            strategy: Strategy::Quadratic,
            ..Config::default()
        };
        let report = report_for(config, 13, &[1, 2, 3]);
        assert!(report.contains("scheme 13 (fibonacci) - modulo: N/A, bucket size: 1, quadratic\n"));
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        let config = Config {
            table_size: 10,
            method: HashMethod::Division { modulus: 10 },
            strategy: Strategy::Linear,
            ..Config::default()
        };
        let mut table = HashTable::new(config).unwrap();
        table.insert(7);

        write_report_to_file(&path, 1, &table, &[7]).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("original input:\n7\n"));
        assert!(contents.ends_with("Memory Usage: 0 bytes\n"));
    }
}
