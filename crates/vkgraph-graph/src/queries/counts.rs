//! Node and relationship counts.

use neo4rs::Query;
use vkgraph_core::{StoreCounts, StoreResult};

use crate::GraphClient;

async fn count(client: &GraphClient, cypher: &str) -> StoreResult<usize> {
    let value: i64 = client
        .query_scalar(Query::new(cypher.to_string()), "count")
        .await?
        .unwrap_or(0);
    Ok(value.max(0) as usize)
}

/// Count users, groups and both relationship types.
pub async fn store_counts(client: &GraphClient) -> StoreResult<StoreCounts> {
    Ok(StoreCounts {
        users: count(client, "MATCH (u:User) RETURN count(u) AS count").await?,
        groups: count(client, "MATCH (g:Group) RETURN count(g) AS count").await?,
        follows: count(client, "MATCH (:User)-[r:FOLLOWS]->(:User) RETURN count(r) AS count").await?,
        subscriptions: count(client, "MATCH (:User)-[r:SUBSCRIBED]->(:Group) RETURN count(r) AS count").await?,
    })
}
