//! # vkgraph core
//!
//! Crawl engine and query layer for the vkgraph social graph.
//!
//! The engine walks followers and group subscriptions outward from a seed user,
//! persisting everything it discovers through a [`GraphStore`]. Remote data comes
//! from an [`EntitySource`]. Both are traits so the engine can be driven against
//! Neo4j and the VK API in production, or against in-memory fakes in tests.

pub mod crawl;
pub mod error;
pub mod model;
pub mod query;
pub mod source;
pub mod store;

pub use crawl::{CrawlOptions, CrawlReport, Crawler};
pub use error::{SourceError, StoreError, StoreResult, VkgError, VkgResult};
pub use model::{GroupRecord, SubscriptionTarget, TargetKind, UserRecord, UserRef};
pub use query::{dispatch, AggregateQuery, QueryOutcome, QueryResult};
pub use source::EntitySource;
pub use store::{GraphStore, MemoryGraph, StoreCounts};
