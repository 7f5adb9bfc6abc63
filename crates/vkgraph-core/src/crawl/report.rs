//! Per-run crawl counters.

use serde::Serialize;
use uuid::Uuid;

/// What a crawl run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlReport {
    pub run_id: Uuid,
    pub profiles_fetched: usize,
    /// Branches abandoned or lists skipped because the source failed.
    pub failed_fetches: usize,
    pub users_upserted: usize,
    pub groups_upserted: usize,
    pub follows_linked: usize,
    pub subscriptions_linked: usize,
    /// Work items skipped by the per-run visited set.
    pub skipped_revisits: usize,
}

impl CrawlReport {
    pub fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            ..Self::default()
        }
    }

    pub fn relationships_linked(&self) -> usize {
        self.follows_linked + self.subscriptions_linked
    }
}
