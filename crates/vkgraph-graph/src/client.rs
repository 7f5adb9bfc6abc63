//! Neo4j connection client.

use neo4rs::{ConfigBuilder, Graph, Query};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use vkgraph_core::{StoreError, StoreResult};

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "neo4j://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "11111111".to_string(),
        }
    }
}

/// Client for Neo4j graph operations.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Create a new GraphClient from config.
    ///
    /// neo4rs builds its pool lazily, so a `RETURN 1` ping is issued right away
    /// to surface an unreachable server here rather than on the first write.
    pub async fn connect(config: &GraphConfig) -> StoreResult<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .max_connections(4)
            .fetch_size(200)
            .build()
            .map_err(|e| StoreError::Connection(format!("invalid Neo4j config: {}", e)))?;

        let graph = Graph::connect(neo4j_config)
            .await
            .map_err(|e| StoreError::Connection(format!("{}: {}", config.uri, e)))?;

        graph
            .run(Query::new("RETURN 1".to_string()))
            .await
            .map_err(|e| StoreError::Connection(format!("{} is not responding: {}", config.uri, e)))?;

        Ok(Self { graph })
    }

    /// Execute a Cypher query that returns no results.
    pub async fn execute(&self, query: Query) -> StoreResult<()> {
        self.graph
            .run(query)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))
    }

    /// Execute a Cypher query and return results as rows.
    pub async fn query(&self, query: Query) -> StoreResult<Vec<neo4rs::Row>> {
        let mut result = self
            .graph
            .execute(query)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let mut rows = Vec::new();
        while let Some(row) = result.next().await.map_err(|e| StoreError::Query(e.to_string()))? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Execute a Cypher query and return a single scalar value.
    pub async fn query_scalar<T: DeserializeOwned>(&self, query: Query, field: &str) -> StoreResult<Option<T>> {
        let rows = self.query(query).await?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(get_field(&row, field)?)),
            None => Ok(None),
        }
    }

    /// Get a reference to the underlying neo4rs Graph.
    pub fn inner(&self) -> &Graph {
        &self.graph
    }
}

/// Read one column of a row.
pub fn get_field<T: DeserializeOwned>(row: &neo4rs::Row, field: &str) -> StoreResult<T> {
    row.get(field)
        .map_err(|e| StoreError::Decode(format!("field '{}': {:?}", field, e)))
}
