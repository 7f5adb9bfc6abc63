//! Read-side Cypher: the fixed aggregate set and store counts.

pub mod aggregate;
pub mod counts;

pub use aggregate::run_aggregate;
pub use counts::store_counts;
