//! Aggregate traversals over users, groups and their relationships.

use neo4rs::Query;
use vkgraph_core::query::{MutualPair, RankedGroup, RankedUser, TOP_LIMIT};
use vkgraph_core::{AggregateQuery, QueryResult, StoreResult};

use crate::client::get_field;
use crate::GraphClient;

/// Cypher text for each aggregate.
pub fn cypher(query: AggregateQuery) -> &'static str {
    match query {
        AggregateQuery::UsersCount => "MATCH (u:User) RETURN count(u) AS count",
        AggregateQuery::GroupsCount => "MATCH (g:Group) RETURN count(g) AS count",
        AggregateQuery::TopUsers => {
            "MATCH (u:User)<-[:FOLLOWS]-()
             RETURN u.id AS id, coalesce(u.name, '') AS name, count(*) AS followers_count
             ORDER BY followers_count DESC
             LIMIT $limit"
        }
        AggregateQuery::TopGroups => {
            "MATCH (g:Group)<-[:SUBSCRIBED]-()
             RETURN g.id AS id, coalesce(g.name, '') AS name, count(*) AS subscribers_count
             ORDER BY subscribers_count DESC
             LIMIT $limit"
        }
        AggregateQuery::MutualFollowers => {
            "MATCH (a:User)-[:FOLLOWS]->(b:User)-[:FOLLOWS]->(a)
             RETURN a.id AS a, b.id AS b"
        }
    }
}

/// Run one aggregate and decode its rows into the matching result shape.
pub async fn run_aggregate(client: &GraphClient, query: AggregateQuery) -> StoreResult<QueryResult> {
    let statement = Query::new(cypher(query).to_string());

    let result = match query {
        AggregateQuery::UsersCount => {
            QueryResult::UsersCount(client.query_scalar(statement, "count").await?.unwrap_or(0))
        }
        AggregateQuery::GroupsCount => {
            QueryResult::GroupsCount(client.query_scalar(statement, "count").await?.unwrap_or(0))
        }
        AggregateQuery::TopUsers => {
            let rows = client.query(statement.param("limit", TOP_LIMIT as i64)).await?;
            let users = rows
                .iter()
                .map(|row| -> StoreResult<RankedUser> {
                    Ok(RankedUser {
                        id: get_field(row, "id")?,
                        name: get_field(row, "name")?,
                        followers_count: get_field(row, "followers_count")?,
                    })
                })
                .collect::<StoreResult<Vec<_>>>()?;
            QueryResult::TopUsers(users)
        }
        AggregateQuery::TopGroups => {
            let rows = client.query(statement.param("limit", TOP_LIMIT as i64)).await?;
            let groups = rows
                .iter()
                .map(|row| -> StoreResult<RankedGroup> {
                    Ok(RankedGroup {
                        id: get_field(row, "id")?,
                        name: get_field(row, "name")?,
                        subscribers_count: get_field(row, "subscribers_count")?,
                    })
                })
                .collect::<StoreResult<Vec<_>>>()?;
            QueryResult::TopGroups(groups)
        }
        AggregateQuery::MutualFollowers => {
            let rows = client.query(statement).await?;
            let pairs = rows
                .iter()
                .map(|row| -> StoreResult<MutualPair> {
                    Ok(MutualPair {
                        a: get_field(row, "a")?,
                        b: get_field(row, "b")?,
                    })
                })
                .collect::<StoreResult<Vec<_>>>()?;
            QueryResult::MutualFollowers(pairs)
        }
    };

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rankings_are_limited() {
        assert!(cypher(AggregateQuery::TopUsers).contains("LIMIT $limit"));
        assert!(cypher(AggregateQuery::TopGroups).contains("LIMIT $limit"));
    }

    #[test]
    fn test_column_names_match_result_rows() {
        let top_users = cypher(AggregateQuery::TopUsers);
        for column in ["AS id", "AS name", "AS followers_count"] {
            assert!(top_users.contains(column), "missing {}", column);
        }
        assert!(cypher(AggregateQuery::TopGroups).contains("AS subscribers_count"));
        assert!(cypher(AggregateQuery::MutualFollowers).contains("RETURN a.id AS a, b.id AS b"));
    }
}
