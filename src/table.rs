//! The hash table façade: configuration, storage, and dispatch.
//!
//! A [`HashTable`] owns one of two storage shapes, decided by the collision
//! strategy at construction: a flat array of optional keys for open
//! addressing, or an array of chains plus a node pool (preallocated at twice
//! the slot count) for separate chaining. Every operation computes a home
//! index with the configured hash function and hands off to the matching
//! engine, which does the metric accounting.

use log::error;

use crate::chain::Chain;
use crate::chain::NodePool;
use crate::chaining;
use crate::error::Error;
use crate::hash;
use crate::metrics::Metrics;
use crate::probing;

/// Hash function selection. Division carries its modulus; it is meaningless
/// for the multiplicative method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashMethod {
    /// `(|key| mod modulus) mod table_size`.
    Division {
        /// Divisor for the first reduction; must be positive.
        modulus: u32,
    },
    /// Knuth's multiplicative method with the 64-bit golden-ratio constant.
    Fibonacci,
}

impl std::fmt::Display for HashMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashMethod::Division { .. } => write!(f, "division"),
            HashMethod::Fibonacci => write!(f, "fibonacci"),
        }
    }
}

/// Collision resolution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Open addressing, step `(home + i) mod N`.
    Linear,
    /// Open addressing, step `floor(home + c1*i + c2*i^2) mod N`.
    Quadratic,
    /// Separate chaining with a pooled linked list per slot.
    Chaining,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Linear => write!(f, "linear"),
            Strategy::Quadratic => write!(f, "quadratic"),
            Strategy::Chaining => write!(f, "chaining"),
        }
    }
}

/// Immutable table configuration, validated once at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Number of addressable slots, N.
    pub table_size: usize,
    /// Presentation grouping for the rendered table: 1 or 3 slots per row
    /// cell group. Does not change probing, which is flat over all N slots.
    pub bucket_size: u8,
    /// Hash function computing home indices.
    pub method: HashMethod,
    /// Collision resolution strategy.
    pub strategy: Strategy,
    /// Linear coefficient for quadratic probing; ignored otherwise.
    pub c1: f64,
    /// Quadratic coefficient for quadratic probing; ignored otherwise.
    pub c2: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_size: 120,
            bucket_size: 1,
            method: HashMethod::Fibonacci,
            strategy: Strategy::Linear,
            c1: 0.5,
            c2: 0.5,
        }
    }
}

impl Config {
    fn validate(&self) -> Result<(), Error> {
        if self.table_size == 0 {
            return Err(Error::InvalidTableSize(self.table_size));
        }
        if self.bucket_size != 1 && self.bucket_size != 3 {
            return Err(Error::InvalidBucketSize(self.bucket_size));
        }
        if let HashMethod::Division { modulus: 0 } = self.method {
            return Err(Error::InvalidModulus);
        }
        if self.strategy == Strategy::Quadratic
            && !(self.c1.is_finite() && self.c2.is_finite() && self.c1 >= 0.0 && self.c2 >= 0.0)
        {
            return Err(Error::InvalidProbeConstants {
                c1: self.c1,
                c2: self.c2,
            });
        }
        Ok(())
    }
}

#[derive(Debug)]
enum Storage {
    Open(Vec<Option<i32>>),
    Chained { chains: Vec<Chain>, pool: NodePool },
}

/// Read-only view of the storage, handed to the report formatter.
#[derive(Debug, Clone, Copy)]
pub enum RawTable<'a> {
    /// Open-addressing slot array; `None` marks an empty slot.
    Open(&'a [Option<i32>]),
    /// Chain per slot, with the pool needed to walk them.
    Chained {
        /// One chain per table slot.
        chains: &'a [Chain],
        /// The arena backing every chain.
        pool: &'a NodePool,
    },
}

/// An instrumented hash table with a fixed slot count.
///
/// The table never resizes and keys are never deleted; a run consists of
/// construction, a sequence of inserts and searches, and optionally a
/// [`HashTable::clear`] to reuse the allocation for the next run.
#[derive(Debug)]
pub struct HashTable {
    config: Config,
    storage: Storage,
    metrics: Metrics,
}

impl HashTable {
    /// Builds a table for `config`, validating it first.
    ///
    /// For chaining, preallocates a pool of `2 * table_size` nodes shared by
    /// all chains.
    pub fn new(config: Config) -> Result<Self, Error> {
        config.validate()?;

        let storage = match config.strategy {
            Strategy::Linear | Strategy::Quadratic => Storage::Open(vec![None; config.table_size]),
            Strategy::Chaining => Storage::Chained {
                chains: vec![Chain::new(); config.table_size],
                pool: NodePool::with_capacity(config.table_size * 2),
            },
        };

        let mut metrics = Metrics::new();
        metrics.set_table_size(config.table_size);

        Ok(Self {
            config,
            storage,
            metrics,
        })
    }

    /// The validated configuration this table was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Home index of `key` under the configured hash function.
    pub fn home_index(&self, key: i32) -> usize {
        match self.config.method {
            HashMethod::Division { modulus } => {
                hash::division_hash(key, modulus, self.config.table_size)
            }
            HashMethod::Fibonacci => hash::fibonacci_hash(key, self.config.table_size),
        }
    }

    /// Inserts `key`, updating the metrics.
    ///
    /// A full table or an exhausted chain pool drops the key: the condition
    /// is logged and visible in the metrics, but it is not an error. Further
    /// inserts with other home indices may still succeed.
    pub fn insert(&mut self, key: i32) {
        let home = self.home_index(key);
        match &mut self.storage {
            Storage::Open(slots) => {
                let quadratic = self.config.strategy == Strategy::Quadratic;
                if probing::insert(
                    slots,
                    key,
                    home,
                    quadratic,
                    self.config.c1,
                    self.config.c2,
                    &mut self.metrics,
                )
                .is_err()
                {
                    error!("hash table is full; could not insert key {key}");
                }
            }
            Storage::Chained { chains, pool } => {
                chaining::insert(chains, pool, key, home, &mut self.metrics);
            }
        }
    }

    /// Searches for `key`, counting comparisons in the metrics.
    pub fn search(&mut self, key: i32) -> bool {
        let home = self.home_index(key);
        match &mut self.storage {
            Storage::Open(slots) => {
                let quadratic = self.config.strategy == Strategy::Quadratic;
                probing::search(
                    slots,
                    key,
                    home,
                    quadratic,
                    self.config.c1,
                    self.config.c2,
                    &mut self.metrics,
                )
            }
            Storage::Chained { chains, pool } => {
                chaining::search(chains, pool, key, home, &mut self.metrics)
            }
        }
    }

    /// Answers the same question as [`HashTable::search`] without touching
    /// any counter.
    pub fn lookup(&self, key: i32) -> bool {
        let home = self.home_index(key);
        match &self.storage {
            Storage::Open(slots) => {
                let quadratic = self.config.strategy == Strategy::Quadratic;
                probing::lookup(slots, key, home, quadratic, self.config.c1, self.config.c2)
            }
            Storage::Chained { chains, pool } => chaining::lookup(chains, pool, key, home),
        }
    }

    /// Empties the table and zeroes the metrics. Chained storage returns
    /// every node to the pool.
    pub fn clear(&mut self) {
        match &mut self.storage {
            Storage::Open(slots) => slots.fill(None),
            Storage::Chained { chains, pool } => {
                for chain in chains.iter_mut() {
                    chain.clear(pool);
                }
            }
        }
        self.metrics.reset_all();
    }

    /// Read-only storage view for the report formatter.
    pub fn raw(&self) -> RawTable<'_> {
        match &self.storage {
            Storage::Open(slots) => RawTable::Open(slots),
            Storage::Chained { chains, pool } => RawTable::Chained { chains, pool },
        }
    }

    /// The metrics accumulated by this table's operations.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Mutable metrics access, used by drivers to run the wall-clock timer
    /// and record heap usage around an insert loop.
    pub fn metrics_mut(&mut self) -> &mut Metrics {
        &mut self.metrics
    }
}
