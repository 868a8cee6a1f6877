//! Input file reading: one signed 32-bit integer per line.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use log::warn;

use crate::error::Error;

/// Reads the keys from `path`.
///
/// Blank lines are skipped. Lines that do not parse as an `i32` (letters,
/// symbols, out-of-range numbers) are skipped with a warning; any value in
/// the `i32` range is accepted, including zero and negatives. Only failing
/// to open or read the file is an error.
pub fn read_keys(path: impl AsRef<Path>) -> Result<Vec<i32>, Error> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut keys = Vec::new();

    for (lineno, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match trimmed.parse::<i32>() {
            Ok(key) => keys.push(key),
            Err(_) => warn!(
                "{}:{}: skipping {trimmed:?}: not a 32-bit integer",
                path.display(),
                lineno + 1
            ),
        }
    }

    if keys.is_empty() {
        warn!("{}: no valid keys found", path.display());
    }
    Ok(keys)
}
