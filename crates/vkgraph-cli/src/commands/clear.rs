//! Clear command.

use anyhow::Result;
use colored::Colorize;
use vkgraph_core::GraphStore;

pub async fn execute(store: &dyn GraphStore) -> Result<()> {
    let before = store.counts().await?;
    store.clear().await?;

    println!(
        "{} ({} nodes, {} relationships removed)",
        "Graph cleared".green().bold(),
        before.nodes(),
        before.relationships()
    );
    Ok(())
}
