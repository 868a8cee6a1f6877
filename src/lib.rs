#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod chain;

pub mod chaining;

mod error;

pub mod hash;

pub mod metrics;

pub mod probing;

pub mod reader;

pub mod report;

pub mod scheme;

pub mod table;

pub use chain::Chain;
pub use chain::NodePool;
pub use error::Error;
pub use metrics::Metrics;
pub use scheme::Scheme;
pub use table::Config;
pub use table::HashMethod;
pub use table::HashTable;
pub use table::RawTable;
pub use table::Strategy;
