//! # vkgraph graph
//!
//! Neo4j implementation of the vkgraph [`GraphStore`](vkgraph_core::GraphStore).
//!
//! Users and groups are `(:User {id})` and `(:Group {id})` nodes joined by
//! `[:FOLLOWS]` and `[:SUBSCRIBED]` relationships. All writes are `MERGE`s, so
//! repeating a crawl converges on the same graph.

pub mod client;
pub mod queries;
pub mod schema;
pub mod store;

pub use client::{GraphClient, GraphConfig};
pub use store::Neo4jStore;
