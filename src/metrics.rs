//! Per-operation instrumentation for hash table experiments.
//!
//! Every insert and search on a table funnels its accounting through one
//! [`Metrics`] value: comparisons, primary/secondary collisions, probes, and
//! insertions, plus a wall-clock timer and a heap-bytes recorder that the
//! driver fills in around a run.
//!
//! A *primary* collision means the first probe (attempt 0) found the home
//! slot occupied; a *secondary* collision means a later probe (attempt >= 1)
//! found its slot occupied. The split tells you whether the hash function or
//! the probe sequence is responsible for the work a run performed, which is
//! the whole point of the experiment. Separate chaining does not decompose
//! that way and only bumps the undifferentiated total.

use std::fmt;
use std::time::Duration;
use std::time::Instant;

use crate::error::Error;

/// Counters for one table's lifetime, reset by [`Metrics::reset_all`].
///
/// All counters are monotonically non-decreasing between resets. The
/// invariant `total_collisions >= primary + secondary` always holds, with
/// equality when only the primary/secondary incrementers were used.
#[derive(Debug, Default)]
pub struct Metrics {
    comparisons: u64,
    primary_collisions: u64,
    secondary_collisions: u64,
    total_collisions: u64,
    probes: u64,
    insertions: u64,

    table_size: usize,

    started: Option<Instant>,
    elapsed: Option<Duration>,
    memory_bytes: u64,
}

impl Metrics {
    /// Creates a zeroed metrics record with no table size set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the number of addressable slots, enabling [`Metrics::load_factor`].
    pub fn set_table_size(&mut self, table_size: usize) {
        self.table_size = table_size;
    }

    /// Starts the wall-clock timer. Restarting discards the previous sample.
    pub fn start_timer(&mut self) {
        self.started = Some(Instant::now());
        self.elapsed = None;
    }

    /// Stops the wall-clock timer and returns the elapsed duration.
    ///
    /// Fails with [`Error::TimerNotStarted`] if [`Metrics::start_timer`] has
    /// not been called first.
    pub fn stop_timer(&mut self) -> Result<Duration, Error> {
        let started = self.started.take().ok_or(Error::TimerNotStarted)?;
        let elapsed = started.elapsed();
        self.elapsed = Some(elapsed);
        Ok(elapsed)
    }

    /// Elapsed wall-clock time of the last completed timer window.
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    /// Elapsed seconds of the last completed timer window, or 0.0 if the
    /// timer was never stopped.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.map_or(0.0, |d| d.as_secs_f64())
    }

    /// Records the heap bytes attributed to the run by the driver's sampler.
    pub fn set_memory_bytes(&mut self, bytes: u64) {
        self.memory_bytes = bytes;
    }

    /// Heap bytes recorded for the run.
    pub fn memory_bytes(&self) -> u64 {
        self.memory_bytes
    }

    /// Counts one slot or chain-node inspection, matching or not.
    pub fn add_comparison(&mut self) {
        self.comparisons += 1;
    }

    /// Bumps the total collision count without attributing it to the
    /// primary/secondary split. Used by chaining.
    pub fn add_collision(&mut self) {
        self.total_collisions += 1;
    }

    /// Counts an occupied home slot on probe attempt 0.
    pub fn add_primary_collision(&mut self) {
        self.primary_collisions += 1;
        self.total_collisions += 1;
    }

    /// Counts an occupied slot on probe attempt >= 1.
    pub fn add_secondary_collision(&mut self) {
        self.secondary_collisions += 1;
        self.total_collisions += 1;
    }

    /// Counts one probing step past an occupied slot.
    pub fn add_probe(&mut self) {
        self.probes += 1;
    }

    /// Counts one key successfully stored.
    pub fn add_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Total slot and chain-node inspections.
    pub fn comparisons(&self) -> u64 {
        self.comparisons
    }

    /// Collisions on probe attempt 0.
    pub fn primary_collisions(&self) -> u64 {
        self.primary_collisions
    }

    /// Collisions on probe attempts >= 1.
    pub fn secondary_collisions(&self) -> u64 {
        self.secondary_collisions
    }

    /// All collisions, including undifferentiated ones from chaining.
    pub fn total_collisions(&self) -> u64 {
        self.total_collisions
    }

    /// Total probing steps.
    pub fn probes(&self) -> u64 {
        self.probes
    }

    /// Total keys successfully stored.
    pub fn insertions(&self) -> u64 {
        self.insertions
    }

    /// `insertions / table_size`, or -1.0 when no table size has been set.
    pub fn load_factor(&self) -> f64 {
        if self.table_size == 0 {
            return -1.0;
        }
        self.insertions as f64 / self.table_size as f64
    }

    /// Zeroes every counter, the timer, and the memory sample. The table
    /// size is kept; it describes the table, not the run.
    pub fn reset_all(&mut self) {
        let table_size = self.table_size;
        *self = Self::default();
        self.table_size = table_size;
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Comparisons: {}", self.comparisons)?;
        writeln!(
            f,
            "Collisions: {} (Primary: {}, Secondary: {})",
            self.total_collisions, self.primary_collisions, self.secondary_collisions
        )?;
        writeln!(f, "Probes: {}", self.probes)?;
        writeln!(f, "Insertions: {}", self.insertions)?;
        writeln!(f, "Load Factor: {:.6}", self.load_factor())?;
        writeln!(f, "Execution Time: {:.6} seconds", self.elapsed_secs())?;
        write!(f, "Memory Usage: {} bytes", self.memory_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let m = Metrics::new();
        assert_eq!(m.comparisons(), 0);
        assert_eq!(m.primary_collisions(), 0);
        assert_eq!(m.secondary_collisions(), 0);
        assert_eq!(m.total_collisions(), 0);
        assert_eq!(m.probes(), 0);
        assert_eq!(m.insertions(), 0);
    }

    #[test]
    fn split_incrementers_keep_total_in_sync() {
        let mut m = Metrics::new();
        m.add_primary_collision();
        m.add_secondary_collision();
        m.add_secondary_collision();
        assert_eq!(m.primary_collisions(), 1);
        assert_eq!(m.secondary_collisions(), 2);
        assert_eq!(
            m.total_collisions(),
            m.primary_collisions() + m.secondary_collisions()
        );
    }

    #[test]
    fn general_collision_only_bumps_total() {
        let mut m = Metrics::new();
        m.add_collision();
        m.add_collision();
        assert_eq!(m.total_collisions(), 2);
        assert_eq!(m.primary_collisions(), 0);
        assert_eq!(m.secondary_collisions(), 0);
    }

    #[test]
    fn load_factor_is_minus_one_without_table_size() {
        let mut m = Metrics::new();
        m.add_insertion();
        assert_eq!(m.load_factor(), -1.0);

        m.set_table_size(4);
        assert_eq!(m.load_factor(), 0.25);
    }

    #[test]
    fn stop_without_start_is_an_error() {
        let mut m = Metrics::new();
        assert!(matches!(m.stop_timer(), Err(Error::TimerNotStarted)));
    }

    #[test]
    fn timer_round_trip() {
        let mut m = Metrics::new();
        m.start_timer();
        let elapsed = m.stop_timer().unwrap();
        assert_eq!(m.elapsed(), Some(elapsed));
        assert!(m.elapsed_secs() >= 0.0);

        // The sample was consumed; stopping again is misuse.
        assert!(m.stop_timer().is_err());
    }

    #[test]
    fn reset_all_zeroes_counters_but_keeps_table_size() {
        let mut m = Metrics::new();
        m.set_table_size(120);
        m.add_comparison();
        m.add_primary_collision();
        m.add_probe();
        m.add_insertion();
        m.set_memory_bytes(4096);

        m.reset_all();
        assert_eq!(m.comparisons(), 0);
        assert_eq!(m.total_collisions(), 0);
        assert_eq!(m.probes(), 0);
        assert_eq!(m.insertions(), 0);
        assert_eq!(m.memory_bytes(), 0);
        assert_eq!(m.load_factor(), 0.0);
    }
}
