//! Status command.

use anyhow::Result;
use vkgraph_core::GraphStore;

use crate::output;

pub async fn execute(store: &dyn GraphStore) -> Result<()> {
    let counts = store.counts().await?;
    output::print_counts(&counts);
    Ok(())
}
