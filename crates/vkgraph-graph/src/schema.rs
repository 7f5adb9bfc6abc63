//! Neo4j schema initialization.

use neo4rs::Query;
use tracing::info;
use vkgraph_core::StoreResult;

use crate::GraphClient;

/// Uniqueness constraints backing the id-keyed MERGEs. They also index the ids.
const SCHEMA_STATEMENTS: &[&str] = &[
    "CREATE CONSTRAINT user_id IF NOT EXISTS FOR (u:User) REQUIRE u.id IS UNIQUE",
    "CREATE CONSTRAINT group_id IF NOT EXISTS FOR (g:Group) REQUIRE g.id IS UNIQUE",
];

/// Initialize Neo4j schema with constraints.
///
/// Safe to run multiple times - uses IF NOT EXISTS clauses.
pub async fn initialize_schema(client: &GraphClient) -> StoreResult<()> {
    for statement in SCHEMA_STATEMENTS {
        client.execute(Query::new(statement.to_string())).await?;
    }

    info!("Neo4j schema initialized ({} statements)", SCHEMA_STATEMENTS.len());
    Ok(())
}
