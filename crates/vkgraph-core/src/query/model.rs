//! Aggregate query models.

use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of rows returned by the ranking queries.
pub const TOP_LIMIT: usize = 5;

/// The fixed set of aggregate traversals the store answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateQuery {
    UsersCount,
    GroupsCount,
    TopUsers,
    TopGroups,
    MutualFollowers,
}

impl AggregateQuery {
    pub const ALL: [AggregateQuery; 5] = [
        Self::UsersCount,
        Self::GroupsCount,
        Self::TopUsers,
        Self::TopGroups,
        Self::MutualFollowers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UsersCount => "users_count",
            Self::GroupsCount => "groups_count",
            Self::TopUsers => "top_users",
            Self::TopGroups => "top_groups",
            Self::MutualFollowers => "mutual_followers",
        }
    }
}

impl fmt::Display for AggregateQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a query name is not in the fixed table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no such query: {0}")]
pub struct UnknownQuery(pub String);

impl FromStr for AggregateQuery {
    type Err = UnknownQuery;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|q| q.as_str() == s)
            .ok_or_else(|| UnknownQuery(s.to_string()))
    }
}

/// A user ranked by inbound follows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedUser {
    pub id: i64,
    pub name: String,
    pub followers_count: i64,
}

/// A group ranked by inbound subscriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedGroup {
    pub id: i64,
    pub name: String,
    pub subscribers_count: i64,
}

/// One direction of a mutual follow: `a` follows `b` and `b` follows `a`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutualPair {
    pub a: i64,
    pub b: i64,
}

/// Result of an aggregate query, shaped per query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResult {
    UsersCount(i64),
    GroupsCount(i64),
    TopUsers(Vec<RankedUser>),
    TopGroups(Vec<RankedGroup>),
    MutualFollowers(Vec<MutualPair>),
}

/// A result row as a column -> value mapping.
pub type Row = BTreeMap<String, Value>;

impl QueryResult {
    /// The query that produced this result.
    pub fn query(&self) -> AggregateQuery {
        match self {
            Self::UsersCount(_) => AggregateQuery::UsersCount,
            Self::GroupsCount(_) => AggregateQuery::GroupsCount,
            Self::TopUsers(_) => AggregateQuery::TopUsers,
            Self::TopGroups(_) => AggregateQuery::TopGroups,
            Self::MutualFollowers(_) => AggregateQuery::MutualFollowers,
        }
    }

    /// Flatten into generic rows.
    pub fn rows(&self) -> Vec<Row> {
        match self {
            Self::UsersCount(count) | Self::GroupsCount(count) => {
                vec![row(json!({ "count": count }))]
            }
            Self::TopUsers(users) => users.iter().map(to_row).collect(),
            Self::TopGroups(groups) => groups.iter().map(to_row).collect(),
            Self::MutualFollowers(pairs) => pairs.iter().map(to_row).collect(),
        }
    }

    /// Human-readable output lines, one per row, or "not found" for an empty ranking.
    pub fn render_lines(&self) -> Vec<String> {
        let lines: Vec<String> = match self {
            Self::UsersCount(count) | Self::GroupsCount(count) => return vec![count.to_string()],
            Self::TopUsers(users) => users
                .iter()
                .map(|u| format!("{}, followers: {}", display_name(&u.name, u.id), u.followers_count))
                .collect(),
            Self::TopGroups(groups) => groups
                .iter()
                .map(|g| format!("{}, subscribers: {}", display_name(&g.name, g.id), g.subscribers_count))
                .collect(),
            Self::MutualFollowers(pairs) => pairs.iter().map(|p| format!("{} - {}", p.a, p.b)).collect(),
        };

        if lines.is_empty() {
            vec!["not found".to_string()]
        } else {
            lines
        }
    }
}

// Nodes created only as edge endpoints have no name yet.
fn display_name(name: &str, id: i64) -> String {
    if name.is_empty() {
        format!("id{}", id)
    } else {
        name.to_string()
    }
}

fn to_row<T: Serialize>(value: &T) -> Row {
    row(serde_json::to_value(value).unwrap_or(Value::Null))
}

fn row(value: Value) -> Row {
    match value {
        Value::Object(map) => map.into_iter().collect(),
        _ => Row::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip_through_from_str() {
        for q in AggregateQuery::ALL {
            assert_eq!(q.as_str().parse::<AggregateQuery>(), Ok(q));
        }
        assert_eq!(
            "nonexistent_query".parse::<AggregateQuery>(),
            Err(UnknownQuery("nonexistent_query".to_string()))
        );
    }

    #[test]
    fn test_top_groups_rows() {
        let result = QueryResult::TopGroups(vec![RankedGroup {
            id: 500,
            name: "Chess Club".to_string(),
            subscribers_count: 1,
        }]);
        let rows = result.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], json!(500));
        assert_eq!(rows[0]["name"], json!("Chess Club"));
        assert_eq!(rows[0]["subscribers_count"], json!(1));
    }

    #[test]
    fn test_count_rows_and_lines() {
        let result = QueryResult::UsersCount(3);
        assert_eq!(result.rows()[0]["count"], json!(3));
        assert_eq!(result.render_lines(), vec!["3"]);
        assert_eq!(result.query(), AggregateQuery::UsersCount);
    }

    #[test]
    fn test_empty_ranking_renders_not_found() {
        assert_eq!(QueryResult::TopUsers(vec![]).render_lines(), vec!["not found"]);
        assert_eq!(QueryResult::MutualFollowers(vec![]).render_lines(), vec!["not found"]);
        assert!(QueryResult::TopGroups(vec![]).rows().is_empty());
    }

    #[test]
    fn test_render_lines() {
        let users = QueryResult::TopUsers(vec![
            RankedUser { id: 1, name: "Pavel Durov".to_string(), followers_count: 3 },
            RankedUser { id: 2, name: String::new(), followers_count: 1 },
        ]);
        assert_eq!(users.render_lines(), vec!["Pavel Durov, followers: 3", "id2, followers: 1"]);

        let pairs = QueryResult::MutualFollowers(vec![MutualPair { a: 1, b: 2 }, MutualPair { a: 2, b: 1 }]);
        assert_eq!(pairs.render_lines(), vec!["1 - 2", "2 - 1"]);
    }
}
