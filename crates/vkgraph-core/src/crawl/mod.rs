//! Depth-bounded crawl from a seed user.
//!
//! The traversal is depth-first over an explicit stack of `(user, depth)` work
//! items. For each item the engine fetches the profile, upserts the user, links
//! every follower (queueing it when depth remains) and finally upserts and links
//! the user's groups.
//!
//! Source failures only abandon the affected branch. Store failures abort the
//! run.

pub mod report;

use std::collections::HashMap;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::error::{VkgError, VkgResult};
use crate::model::{UserRecord, UserRef};
use crate::source::EntitySource;
use crate::store::GraphStore;
pub use report::CrawlReport;

/// Run configuration for a crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlOptions {
    /// Levels to expand from the seed. 1 = the seed and its direct neighbours only.
    pub depth: u32,
    /// Skip users already expanded at the same or greater remaining depth.
    /// Saves remote calls; the resulting graph is the same.
    pub dedupe_fetches: bool,
}

impl CrawlOptions {
    pub fn new(depth: u32) -> Self {
        Self {
            depth,
            dedupe_fetches: false,
        }
    }

    pub fn with_dedupe(mut self, dedupe_fetches: bool) -> Self {
        self.dedupe_fetches = dedupe_fetches;
        self
    }
}

#[derive(Debug)]
struct WorkItem {
    user: UserRef,
    depth: u32,
}

/// Remaining depth each user was last expanded with.
#[derive(Debug, Default)]
struct Visited {
    enabled: bool,
    expanded: HashMap<i64, u32>,
}

impl Visited {
    fn seen(&self, id: i64, depth: u32) -> bool {
        self.enabled && self.expanded.get(&id).is_some_and(|&d| d >= depth)
    }

    fn mark(&mut self, id: i64, depth: u32) {
        if self.enabled {
            self.expanded.insert(id, depth);
        }
    }
}

/// Crawl engine bound to a source, a store and run options.
pub struct Crawler<'a> {
    source: &'a dyn EntitySource,
    store: &'a dyn GraphStore,
    options: CrawlOptions,
}

impl<'a> Crawler<'a> {
    pub fn new(source: &'a dyn EntitySource, store: &'a dyn GraphStore, options: CrawlOptions) -> Self {
        Self { source, store, options }
    }

    pub fn options(&self) -> &CrawlOptions {
        &self.options
    }

    /// Crawl outward from `seed`.
    pub async fn run(&self, seed: UserRef) -> VkgResult<CrawlReport> {
        if self.options.depth == 0 {
            return Err(VkgError::validation("crawl depth must be at least 1"));
        }

        let run_id = Uuid::new_v4();
        let span = info_span!("crawl", %run_id, seed = %seed, depth = self.options.depth);

        async move {
            info!(dedupe = self.options.dedupe_fetches, "Starting crawl");

            let mut report = CrawlReport::new(run_id);
            let mut visited = Visited {
                enabled: self.options.dedupe_fetches,
                ..Visited::default()
            };
            let mut stack = vec![WorkItem {
                user: seed,
                depth: self.options.depth,
            }];

            while let Some(item) = stack.pop() {
                self.process(item, &mut stack, &mut visited, &mut report).await?;
            }

            info!(
                profiles = report.profiles_fetched,
                failed = report.failed_fetches,
                users = report.users_upserted,
                groups = report.groups_upserted,
                follows = report.follows_linked,
                subscriptions = report.subscriptions_linked,
                skipped = report.skipped_revisits,
                "Crawl complete"
            );

            Ok(report)
        }
        .instrument(span)
        .await
    }

    async fn process(
        &self,
        item: WorkItem,
        stack: &mut Vec<WorkItem>,
        visited: &mut Visited,
        report: &mut CrawlReport,
    ) -> VkgResult<()> {
        let WorkItem { user, depth } = item;

        if user.id().is_some_and(|id| visited.seen(id, depth)) {
            debug!(user = %user, depth, "Already expanded, skipping");
            report.skipped_revisits += 1;
            return Ok(());
        }

        info!(user = %user, depth, "Fetching info");
        let profile = match self.source.fetch_profile(&user).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(user = %user, depth, error = %e, "Profile fetch failed, abandoning branch");
                report.failed_fetches += 1;
                return Ok(());
            }
        };
        report.profiles_fetched += 1;

        // A screen-name seed is only resolved to an id here.
        if visited.seen(profile.id, depth) {
            report.skipped_revisits += 1;
            return Ok(());
        }
        visited.mark(profile.id, depth);

        self.store.upsert_user(&profile).await?;
        report.users_upserted += 1;
        debug!(user_id = profile.id, name = %profile.name, "Upserted user");

        self.link_followers(&profile, depth, stack, report).await?;
        self.link_groups(&profile, report).await?;

        Ok(())
    }

    async fn link_followers(
        &self,
        profile: &UserRecord,
        depth: u32,
        stack: &mut Vec<WorkItem>,
        report: &mut CrawlReport,
    ) -> VkgResult<()> {
        let followers = match self.source.fetch_followers(profile.id).await {
            Ok(followers) => followers,
            Err(e) => {
                warn!(user_id = profile.id, error = %e, "Followers fetch failed, skipping followers");
                report.failed_fetches += 1;
                return Ok(());
            }
        };

        for &follower in &followers {
            debug!(follower, user_id = profile.id, "Linking follower");
            self.store.link_follows(follower, profile.id).await?;
            report.follows_linked += 1;
        }

        if depth > 1 {
            // Reverse so followers pop off the stack in the order they were listed.
            stack.extend(followers.iter().rev().map(|&follower| WorkItem {
                user: UserRef::Id(follower),
                depth: depth - 1,
            }));
        }

        Ok(())
    }

    async fn link_groups(&self, profile: &UserRecord, report: &mut CrawlReport) -> VkgResult<()> {
        let targets = match self.source.fetch_subscriptions(profile.id).await {
            Ok(targets) => targets,
            Err(e) => {
                warn!(user_id = profile.id, error = %e, "Subscriptions fetch failed, skipping groups");
                report.failed_fetches += 1;
                return Ok(());
            }
        };

        for group in targets.iter().filter_map(|t| t.as_group()) {
            self.store.upsert_group(&group).await?;
            report.groups_upserted += 1;
            self.store.link_subscribed(profile.id, group.id).await?;
            report.subscriptions_linked += 1;
            debug!(user_id = profile.id, group_id = group.id, "Linked group");
        }

        Ok(())
    }
}
