//! Neo4j-backed [`GraphStore`].
//!
//! Each call is a single auto-committed statement. Edge statements MERGE their
//! endpoints by id first, so an edge never points at a missing node even when
//! the endpoint's profile was never fetched.

use async_trait::async_trait;
use neo4rs::Query;
use tracing::{debug, warn};
use vkgraph_core::{AggregateQuery, GraphStore, GroupRecord, QueryResult, StoreCounts, StoreResult, UserRecord};

use crate::queries;
use crate::GraphClient;

const UPSERT_USER: &str = "MERGE (u:User {id: $id})
     SET u.name = $name,
         u.screen_name = $screen_name,
         u.sex = $sex,
         u.city = $city";

const UPSERT_GROUP: &str = "MERGE (g:Group {id: $id})
     SET g.name = $name,
         g.screen_name = $screen_name";

const LINK_FOLLOWS: &str = "MERGE (a:User {id: $from})
     MERGE (b:User {id: $to})
     MERGE (a)-[:FOLLOWS]->(b)";

const LINK_SUBSCRIBED: &str = "MERGE (u:User {id: $user})
     MERGE (g:Group {id: $group})
     MERGE (u)-[:SUBSCRIBED]->(g)";

const CLEAR: &str = "MATCH (n) DETACH DELETE n";

/// Graph store on a Neo4j database.
#[derive(Clone)]
pub struct Neo4jStore {
    client: GraphClient,
}

impl Neo4jStore {
    pub fn new(client: GraphClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &GraphClient {
        &self.client
    }
}

#[async_trait]
impl GraphStore for Neo4jStore {
    async fn upsert_user(&self, user: &UserRecord) -> StoreResult<()> {
        let query = Query::new(UPSERT_USER.to_string())
            .param("id", user.id)
            .param("name", user.name.as_str())
            .param("screen_name", user.screen_name.as_str())
            .param("sex", user.sex)
            .param("city", user.city.as_str());

        self.client.execute(query).await?;
        debug!(user_id = user.id, "Merged User");
        Ok(())
    }

    async fn upsert_group(&self, group: &GroupRecord) -> StoreResult<()> {
        let query = Query::new(UPSERT_GROUP.to_string())
            .param("id", group.id)
            .param("name", group.name.as_str())
            .param("screen_name", group.screen_name.as_str());

        self.client.execute(query).await?;
        debug!(group_id = group.id, "Merged Group");
        Ok(())
    }

    async fn link_follows(&self, follower_id: i64, followee_id: i64) -> StoreResult<()> {
        let query = Query::new(LINK_FOLLOWS.to_string())
            .param("from", follower_id)
            .param("to", followee_id);

        self.client.execute(query).await
    }

    async fn link_subscribed(&self, user_id: i64, group_id: i64) -> StoreResult<()> {
        let query = Query::new(LINK_SUBSCRIBED.to_string())
            .param("user", user_id)
            .param("group", group_id);

        self.client.execute(query).await
    }

    async fn clear(&self) -> StoreResult<()> {
        warn!("Deleting all nodes and relationships");
        self.client.execute(Query::new(CLEAR.to_string())).await
    }

    async fn aggregate(&self, query: AggregateQuery) -> StoreResult<QueryResult> {
        queries::run_aggregate(&self.client, query).await
    }

    async fn counts(&self) -> StoreResult<StoreCounts> {
        queries::store_counts(&self.client).await
    }
}
