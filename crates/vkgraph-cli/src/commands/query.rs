//! Aggregate query command.

use anyhow::Result;
use clap::{Args, ValueEnum};
use vkgraph_core::{dispatch, GraphStore, QueryOutcome};

use crate::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// users_count, groups_count, top_users, top_groups, mutual_followers
    pub name: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: Format,
}

pub async fn execute(args: QueryArgs, store: &dyn GraphStore) -> Result<()> {
    let outcome = dispatch(store, &args.name).await?;

    match (&outcome, args.format) {
        (QueryOutcome::NoSuchQuery(name), _) => output::print_no_such_query(name),
        (QueryOutcome::Rows(result), Format::Text) => output::print_query_result(result),
        (QueryOutcome::Rows(_), Format::Json) => {
            println!("{}", serde_json::to_string_pretty(&outcome.rows())?);
        }
    }

    Ok(())
}
