use thiserror::Error;

/// Errors surfaced to callers of this crate.
///
/// Only construction-time configuration problems and timer misuse are
/// reported this way. A full table or an exhausted chain pool is absorbed:
/// the insert is skipped, the condition shows up in the metrics, and a
/// diagnostic is emitted on the log.
#[derive(Debug, Error)]
pub enum Error {
    /// The table must have at least one slot.
    #[error("table size must be positive, got {0}")]
    InvalidTableSize(usize),

    /// Bucket grouping only supports 1 or 3 slots per printed row.
    #[error("bucket size must be 1 or 3, got {0}")]
    InvalidBucketSize(u8),

    /// Division hashing requires a positive modulus.
    #[error("modulus must be a positive integer")]
    InvalidModulus,

    /// Quadratic probing constants must be finite and non-negative.
    #[error("quadratic constants must be finite and non-negative, got c1={c1}, c2={c2}")]
    InvalidProbeConstants {
        /// Linear coefficient that was rejected.
        c1: f64,
        /// Quadratic coefficient that was rejected.
        c2: f64,
    },

    /// `stop_timer` was called without a matching `start_timer`.
    #[error("stop_timer called without a matching start_timer")]
    TimerNotStarted,

    /// Reading an input file or writing a report failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
