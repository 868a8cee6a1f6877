//! Separate-chaining engine: dispatches inserts and searches into the
//! per-slot [`Chain`]s.
//!
//! Chaining never probes, so the primary/secondary collision split does not
//! apply; a non-empty chain at the target slot counts one undifferentiated
//! collision. The accounting itself lives in [`Chain`].

use crate::chain::Chain;
use crate::chain::NodePool;
use crate::metrics::Metrics;

/// Inserts `key` into the chain at `index`. A pool-exhausted insert is
/// dropped (reported by [`Chain::insert`] on the log) and leaves the
/// insertion count untouched.
pub fn insert(
    chains: &mut [Chain],
    pool: &mut NodePool,
    key: i32,
    index: usize,
    metrics: &mut Metrics,
) {
    chains[index].insert(pool, key, metrics);
}

/// Searches the chain at `index` for `key`, counting one comparison per
/// visited node.
pub fn search(
    chains: &[Chain],
    pool: &NodePool,
    key: i32,
    index: usize,
    metrics: &mut Metrics,
) -> bool {
    chains[index].search(pool, key, metrics)
}

/// Same walk as [`search`], but touches no counter.
pub fn lookup(chains: &[Chain], pool: &NodePool, key: i32, index: usize) -> bool {
    chains[index].lookup(pool, key)
}
