//! Open-addressing insert/search with linear or quadratic probing.
//!
//! The probe sequence for attempt `i = 0, 1, ..., N-1` over an `N`-slot
//! table is:
//!
//! - linear: `(home + i) mod N`
//! - quadratic: `floor(home + c1*i + c2*i^2) mod N`, normalized to a
//!   non-negative index with a floored modulo so that pathological `c1`/`c2`
//!   values cannot produce a negative intermediate.
//!
//! The accounting rules are the contract of this module and must not drift:
//! every attempt costs one comparison; an occupied slot on attempt 0 is a
//! *primary* collision, on any later attempt a *secondary* collision, and
//! each occupied slot also costs one probe. An insert that walks all `N`
//! attempts without finding an empty slot reports [`TableFull`] having
//! accumulated exactly `N` comparisons and `N` probes. Searches count
//! comparisons only; lookups touch no counter at all.
//!
//! Searches stop early at the first empty slot: the key cannot appear later
//! in the sequence, because its insertion would have stopped at that slot.

use log::debug;

use crate::metrics::Metrics;

/// Marker returned when an insert exhausts all `N` probe attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableFull;

/// Index of probe attempt `i` for the given home slot.
///
/// Deterministic for fixed `(home, i, table_size, c1, c2)`; experiment
/// reproducibility depends on this function never changing.
#[inline]
pub fn probe_index(
    home: usize,
    i: usize,
    table_size: usize,
    quadratic: bool,
    c1: f64,
    c2: f64,
) -> usize {
    if quadratic {
        let fi = i as f64;
        let raw = (home as f64 + c1 * fi + c2 * fi * fi).floor() as i64;
        raw.rem_euclid(table_size as i64) as usize
    } else {
        (home + i) % table_size
    }
}

/// Inserts `key` starting at `home`, probing until an empty slot is found.
///
/// Updates comparisons, the primary/secondary collision split, probes, and
/// insertions as described in the module docs. Returns [`TableFull`] after
/// `N` failed attempts; the slots are left untouched in that case.
pub fn insert(
    slots: &mut [Option<i32>],
    key: i32,
    home: usize,
    quadratic: bool,
    c1: f64,
    c2: f64,
    metrics: &mut Metrics,
) -> Result<(), TableFull> {
    let table_size = slots.len();

    for i in 0..table_size {
        let idx = probe_index(home, i, table_size, quadratic, c1, c2);
        debug!("probe attempt {i} for key {key} -> index {idx}");
        metrics.add_comparison();

        match slots[idx] {
            None => {
                slots[idx] = Some(key);
                metrics.add_insertion();
                debug!("inserted key {key} at index {idx} after {i} probe(s)");
                return Ok(());
            }
            Some(_) => {
                if i == 0 {
                    metrics.add_primary_collision();
                } else {
                    metrics.add_secondary_collision();
                }
                metrics.add_probe();
            }
        }
    }

    Err(TableFull)
}

/// Walks the probe sequence for `key`, reporting each visited slot.
fn walk(
    slots: &[Option<i32>],
    key: i32,
    home: usize,
    quadratic: bool,
    c1: f64,
    c2: f64,
    mut visit: impl FnMut(),
) -> bool {
    let table_size = slots.len();

    for i in 0..table_size {
        let idx = probe_index(home, i, table_size, quadratic, c1, c2);
        visit();
        match slots[idx] {
            None => return false,
            Some(k) if k == key => return true,
            Some(_) => {}
        }
    }

    false
}

/// Searches for `key`, counting one comparison per visited slot.
pub fn search(
    slots: &[Option<i32>],
    key: i32,
    home: usize,
    quadratic: bool,
    c1: f64,
    c2: f64,
    metrics: &mut Metrics,
) -> bool {
    walk(slots, key, home, quadratic, c1, c2, || {
        metrics.add_comparison()
    })
}

/// Same probe walk as [`search`], but touches no counter.
pub fn lookup(
    slots: &[Option<i32>],
    key: i32,
    home: usize,
    quadratic: bool,
    c1: f64,
    c2: f64,
) -> bool {
    walk(slots, key, home, quadratic, c1, c2, || {})
}
