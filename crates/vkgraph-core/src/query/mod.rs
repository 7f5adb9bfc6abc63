//! Query dispatcher over the fixed aggregate set.

pub mod model;

use tracing::{debug, error};

use crate::error::StoreResult;
use crate::store::GraphStore;
pub use model::{AggregateQuery, MutualPair, QueryResult, RankedGroup, RankedUser, Row, UnknownQuery, TOP_LIMIT};

/// Outcome of dispatching a query by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Rows(QueryResult),
    /// The name is not one of the fixed queries. Carries the name as given.
    NoSuchQuery(String),
}

impl QueryOutcome {
    /// Generic rows; empty for an unrecognized query.
    pub fn rows(&self) -> Vec<Row> {
        match self {
            Self::Rows(result) => result.rows(),
            Self::NoSuchQuery(_) => Vec::new(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, Self::Rows(_))
    }
}

/// Look up `name` in the fixed query table and run it against the store.
///
/// An unknown name is not an error: it is logged and reported as
/// [`QueryOutcome::NoSuchQuery`]. Store failures propagate.
pub async fn dispatch(store: &dyn GraphStore, name: &str) -> StoreResult<QueryOutcome> {
    let query = match name.parse::<AggregateQuery>() {
        Ok(query) => query,
        Err(e) => {
            error!(query = name, "{}", e);
            return Ok(QueryOutcome::NoSuchQuery(name.to_string()));
        }
    };

    debug!(query = %query, "Running aggregate query");
    let result = store.aggregate(query).await?;
    Ok(QueryOutcome::Rows(result))
}
