//! In-memory implementation of [`GraphStore`].
//!
//! Same match-then-merge semantics as the Neo4j store. Used for dry runs and
//! to drive the crawl engine in tests. Ties in the ranking queries are broken
//! by ascending id.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

use super::{GraphStore, StoreCounts};
use crate::error::StoreResult;
use crate::model::{GroupRecord, UserRecord};
use crate::query::{AggregateQuery, MutualPair, QueryResult, RankedGroup, RankedUser, TOP_LIMIT};

/// A User node. Attributes stay `None` until the profile is upserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserNode {
    pub name: Option<String>,
    pub screen_name: Option<String>,
    pub sex: Option<i64>,
    pub city: Option<String>,
}

/// A Group node. Attributes stay `None` until the group is upserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupNode {
    pub name: Option<String>,
    pub screen_name: Option<String>,
}

#[derive(Debug, Default)]
struct Inner {
    users: BTreeMap<i64, UserNode>,
    groups: BTreeMap<i64, GroupNode>,
    /// (follower, followee)
    follows: BTreeSet<(i64, i64)>,
    /// (user, group)
    subscribed: BTreeSet<(i64, i64)>,
}

/// In-process property graph.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    inner: RwLock<Inner>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a user node.
    pub async fn user(&self, id: i64) -> Option<UserNode> {
        self.inner.read().await.users.get(&id).cloned()
    }

    /// Snapshot of a group node.
    pub async fn group(&self, id: i64) -> Option<GroupNode> {
        self.inner.read().await.groups.get(&id).cloned()
    }

    pub async fn user_ids(&self) -> Vec<i64> {
        self.inner.read().await.users.keys().copied().collect()
    }

    pub async fn group_ids(&self) -> Vec<i64> {
        self.inner.read().await.groups.keys().copied().collect()
    }

    pub async fn follows(&self) -> Vec<(i64, i64)> {
        self.inner.read().await.follows.iter().copied().collect()
    }

    pub async fn subscriptions(&self) -> Vec<(i64, i64)> {
        self.inner.read().await.subscribed.iter().copied().collect()
    }
}

/// Count inbound edges per target, highest first, limited to [`TOP_LIMIT`].
fn rank_inbound(edges: &BTreeSet<(i64, i64)>) -> Vec<(i64, i64)> {
    let mut inbound: BTreeMap<i64, i64> = BTreeMap::new();
    for (_, to) in edges {
        *inbound.entry(*to).or_default() += 1;
    }

    let mut ranked: Vec<(i64, i64)> = inbound.into_iter().collect();
    // Stable sort keeps ascending id among equal counts.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(TOP_LIMIT);
    ranked
}

#[async_trait]
impl GraphStore for MemoryGraph {
    async fn upsert_user(&self, user: &UserRecord) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let node = inner.users.entry(user.id).or_default();
        node.name = Some(user.name.clone());
        node.screen_name = Some(user.screen_name.clone());
        node.sex = Some(user.sex);
        node.city = Some(user.city.clone());
        Ok(())
    }

    async fn upsert_group(&self, group: &GroupRecord) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let node = inner.groups.entry(group.id).or_default();
        node.name = Some(group.name.clone());
        node.screen_name = Some(group.screen_name.clone());
        Ok(())
    }

    async fn link_follows(&self, follower_id: i64, followee_id: i64) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        inner.users.entry(follower_id).or_default();
        inner.users.entry(followee_id).or_default();
        inner.follows.insert((follower_id, followee_id));
        Ok(())
    }

    async fn link_subscribed(&self, user_id: i64, group_id: i64) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        inner.users.entry(user_id).or_default();
        inner.groups.entry(group_id).or_default();
        inner.subscribed.insert((user_id, group_id));
        Ok(())
    }

    async fn clear(&self) -> StoreResult<()> {
        *self.inner.write().await = Inner::default();
        Ok(())
    }

    async fn aggregate(&self, query: AggregateQuery) -> StoreResult<QueryResult> {
        let inner = self.inner.read().await;

        let result = match query {
            AggregateQuery::UsersCount => QueryResult::UsersCount(inner.users.len() as i64),
            AggregateQuery::GroupsCount => QueryResult::GroupsCount(inner.groups.len() as i64),
            AggregateQuery::TopUsers => QueryResult::TopUsers(
                rank_inbound(&inner.follows)
                    .into_iter()
                    .map(|(id, followers_count)| RankedUser {
                        id,
                        name: inner.users.get(&id).and_then(|u| u.name.clone()).unwrap_or_default(),
                        followers_count,
                    })
                    .collect(),
            ),
            AggregateQuery::TopGroups => QueryResult::TopGroups(
                rank_inbound(&inner.subscribed)
                    .into_iter()
                    .map(|(id, subscribers_count)| RankedGroup {
                        id,
                        name: inner.groups.get(&id).and_then(|g| g.name.clone()).unwrap_or_default(),
                        subscribers_count,
                    })
                    .collect(),
            ),
            AggregateQuery::MutualFollowers => QueryResult::MutualFollowers(
                inner
                    .follows
                    .iter()
                    .filter(|(a, b)| inner.follows.contains(&(*b, *a)))
                    .map(|(a, b)| MutualPair { a: *a, b: *b })
                    .collect(),
            ),
        };

        Ok(result)
    }

    async fn counts(&self) -> StoreResult<StoreCounts> {
        let inner = self.inner.read().await;
        Ok(StoreCounts {
            users: inner.users.len(),
            groups: inner.groups.len(),
            follows: inner.follows.len(),
            subscriptions: inner.subscribed.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, name: &str) -> UserRecord {
        UserRecord {
            id,
            name: name.to_string(),
            screen_name: String::new(),
            sex: 0,
            city: String::new(),
        }
    }

    #[tokio::test]
    async fn test_upsert_fills_partial_node() {
        let store = MemoryGraph::new();
        store.link_follows(101, 100).await.unwrap();
        assert_eq!(store.user(101).await, Some(UserNode::default()));

        store.upsert_user(&user(101, "Anna Petrova")).await.unwrap();
        let node = store.user(101).await.unwrap();
        assert_eq!(node.name.as_deref(), Some("Anna Petrova"));
        assert_eq!(store.counts().await.unwrap().users, 2);
    }

    #[tokio::test]
    async fn test_links_are_idempotent() {
        let store = MemoryGraph::new();
        for _ in 0..3 {
            store.link_follows(1, 2).await.unwrap();
            store.link_subscribed(1, 500).await.unwrap();
        }
        let counts = store.counts().await.unwrap();
        assert_eq!(counts.follows, 1);
        assert_eq!(counts.subscriptions, 1);
        assert_eq!(counts.nodes(), 3);
    }

    #[tokio::test]
    async fn test_top_users_ranks_by_inbound_follows() {
        let store = MemoryGraph::new();
        store.upsert_user(&user(1, "Popular")).await.unwrap();
        for follower in 10..13 {
            store.link_follows(follower, 1).await.unwrap();
        }
        store.link_follows(10, 2).await.unwrap();

        let QueryResult::TopUsers(top) = store.aggregate(AggregateQuery::TopUsers).await.unwrap() else {
            panic!("expected TopUsers");
        };
        assert_eq!(top.len(), 2);
        assert_eq!(top[0], RankedUser { id: 1, name: "Popular".to_string(), followers_count: 3 });
        assert_eq!(top[1].id, 2);
        assert_eq!(top[1].name, "");
    }

    #[tokio::test]
    async fn test_top_limit() {
        let store = MemoryGraph::new();
        for group in 0..8 {
            store.link_subscribed(1, group).await.unwrap();
        }
        let QueryResult::TopGroups(top) = store.aggregate(AggregateQuery::TopGroups).await.unwrap() else {
            panic!("expected TopGroups");
        };
        assert_eq!(top.len(), TOP_LIMIT);
        assert_eq!(top.iter().map(|g| g.id).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_mutual_followers_lists_both_directions() {
        let store = MemoryGraph::new();
        store.link_follows(1, 2).await.unwrap();
        store.link_follows(2, 1).await.unwrap();
        store.link_follows(3, 1).await.unwrap();

        let result = store.aggregate(AggregateQuery::MutualFollowers).await.unwrap();
        assert_eq!(
            result,
            QueryResult::MutualFollowers(vec![MutualPair { a: 1, b: 2 }, MutualPair { a: 2, b: 1 }])
        );
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let store = MemoryGraph::new();
        store.link_follows(1, 2).await.unwrap();
        store.link_subscribed(1, 3).await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.counts().await.unwrap(), StoreCounts::default());
    }
}
