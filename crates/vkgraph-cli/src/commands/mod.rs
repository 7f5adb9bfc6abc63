//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use vkgraph_core::{GraphStore, MemoryGraph};
use vkgraph_graph::{schema, GraphClient, GraphConfig, Neo4jStore};

pub mod clear;
pub mod crawl;
pub mod query;
pub mod status;

/// Crawl VK followers and subscriptions into a graph and query it
#[derive(Parser)]
#[command(name = "vkgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub store: StoreArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Crawl from a seed user down to a depth
    Crawl(crawl::CrawlArgs),

    /// Run one of the fixed aggregate queries
    Query(query::QueryArgs),

    /// Delete every node and relationship
    Clear,

    /// Show node and relationship counts
    Status,
}

/// Where the graph lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    Neo4j,
    /// In-process graph discarded on exit (dry runs)
    Memory,
}

#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Graph store backend
    #[arg(long, global = true, value_enum, default_value = "neo4j")]
    pub backend: Backend,

    /// Neo4j URI
    #[arg(long, global = true, env = "NEO4J_URI", default_value = "neo4j://localhost:7687")]
    pub neo4j_uri: String,

    /// Neo4j login
    #[arg(long, global = true, env = "NEO4J_LOGIN", default_value = "neo4j")]
    pub neo4j_login: String,

    /// Neo4j password
    #[arg(long, global = true, env = "NEO4J_PASSWORD", default_value = "11111111", hide_env_values = true)]
    pub neo4j_pass: String,
}

impl StoreArgs {
    pub fn graph_config(&self) -> GraphConfig {
        GraphConfig {
            uri: self.neo4j_uri.clone(),
            user: self.neo4j_login.clone(),
            password: self.neo4j_pass.clone(),
        }
    }

    /// Open the configured store, initializing the Neo4j schema if needed.
    pub async fn open(&self) -> Result<Box<dyn GraphStore>> {
        match self.backend {
            Backend::Memory => {
                info!("Using in-memory graph; nothing will be persisted");
                Ok(Box::new(MemoryGraph::new()))
            }
            Backend::Neo4j => {
                let client = GraphClient::connect(&self.graph_config())
                    .await
                    .context("Failed to connect to Neo4j")?;
                schema::initialize_schema(&client)
                    .await
                    .context("Failed to initialize Neo4j schema")?;
                Ok(Box::new(Neo4jStore::new(client)))
            }
        }
    }
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let store = self.store.open().await?;

        match self.command {
            Commands::Crawl(args) => crawl::execute(args, store.as_ref()).await,
            Commands::Query(args) => query::execute(args, store.as_ref()).await,
            Commands::Clear => clear::execute(store.as_ref()).await,
            Commands::Status => status::execute(store.as_ref()).await,
        }
    }
}
