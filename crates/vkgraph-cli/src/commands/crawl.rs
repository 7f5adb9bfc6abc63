//! Crawl command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tracing::info;
use vkgraph_core::{CrawlOptions, Crawler, GraphStore, UserRef};
use vkgraph_vk::config::{DEFAULT_API_URL, DEFAULT_API_VERSION};
use vkgraph_vk::{VkClient, VkConfig};

use crate::output;

#[derive(Args, Debug)]
pub struct CrawlArgs {
    /// Seed user: numeric id or screen name
    #[arg(long)]
    pub user_id: UserRef,

    /// Crawl depth (1 = seed and its direct followers/groups only)
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
    pub depth: u32,

    /// Clear the graph before crawling
    #[arg(long)]
    pub clear: bool,

    /// Skip users already expanded during this run
    #[arg(long)]
    pub dedupe: bool,

    /// VK access token
    #[arg(long, env = "VK_TOKEN", hide_env_values = true)]
    pub token: String,

    /// VK API base URL
    #[arg(long, env = "VK_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Items per followers/subscriptions request (API default when unset)
    #[arg(long)]
    pub fetch_count: Option<u32>,

    /// HTTP timeout per request, in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

impl CrawlArgs {
    pub fn vk_config(&self) -> VkConfig {
        VkConfig {
            api_url: self.api_url.clone(),
            token: self.token.clone(),
            api_version: DEFAULT_API_VERSION.to_string(),
            fetch_count: self.fetch_count,
            timeout_secs: self.timeout_secs,
        }
    }

    pub fn options(&self) -> CrawlOptions {
        CrawlOptions::new(self.depth).with_dedupe(self.dedupe)
    }
}

pub async fn execute(args: CrawlArgs, store: &dyn GraphStore) -> Result<()> {
    if args.clear {
        info!("clearing db...");
        store.clear().await?;
    }

    let source = VkClient::new(args.vk_config());
    let crawler = Crawler::new(&source, store, args.options());

    println!(
        "{} {} (depth={})",
        "Crawling from".bold(),
        args.user_id.to_string().cyan(),
        args.depth
    );

    let report = crawler.run(args.user_id).await?;
    let counts = store.counts().await?;

    output::print_crawl_report(&report, &counts);
    Ok(())
}
