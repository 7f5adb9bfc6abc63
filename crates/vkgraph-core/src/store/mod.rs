//! Graph store contract.
//!
//! Every operation is a complete, independently committed unit of work.
//! Node upserts match by identifier and overwrite the supplied attributes;
//! edge links match on the full `(from, to, type)` triple and never duplicate.

pub mod memory;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::StoreResult;
use crate::model::{GroupRecord, UserRecord};
use crate::query::{AggregateQuery, QueryResult};

pub use memory::MemoryGraph;

/// Persistent property graph of users, groups, follows and subscriptions.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Create the User if absent, then overwrite its attributes.
    async fn upsert_user(&self, user: &UserRecord) -> StoreResult<()>;

    /// Create the Group if absent, then overwrite its attributes.
    async fn upsert_group(&self, group: &GroupRecord) -> StoreResult<()>;

    /// Ensure `(follower)-[:FOLLOWS]->(followee)`, creating id-only endpoints as needed.
    async fn link_follows(&self, follower_id: i64, followee_id: i64) -> StoreResult<()>;

    /// Ensure `(user)-[:SUBSCRIBED]->(group)`, creating id-only endpoints as needed.
    async fn link_subscribed(&self, user_id: i64, group_id: i64) -> StoreResult<()>;

    /// Delete every node and edge. Irreversible.
    async fn clear(&self) -> StoreResult<()>;

    /// Run one of the fixed aggregate traversals.
    async fn aggregate(&self, query: AggregateQuery) -> StoreResult<QueryResult>;

    /// Node and edge counts for status display.
    async fn counts(&self) -> StoreResult<StoreCounts>;
}

/// Node and relationship counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreCounts {
    pub users: usize,
    pub groups: usize,
    pub follows: usize,
    pub subscriptions: usize,
}

impl StoreCounts {
    pub fn nodes(&self) -> usize {
        self.users + self.groups
    }

    pub fn relationships(&self) -> usize {
        self.follows + self.subscriptions
    }
}
