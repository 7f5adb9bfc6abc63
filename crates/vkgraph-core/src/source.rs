//! Remote entity source contract.

use async_trait::async_trait;

use crate::error::SourceError;
use crate::model::{SubscriptionTarget, UserRecord, UserRef};

/// Read-only access to the remote social network.
#[async_trait]
pub trait EntitySource: Send + Sync {
    /// Fetch a user's profile. Empty result lists are reported as `NotFound`.
    async fn fetch_profile(&self, user: &UserRef) -> Result<UserRecord, SourceError>;

    /// Fetch the ids of a user's followers.
    async fn fetch_followers(&self, user_id: i64) -> Result<Vec<i64>, SourceError>;

    /// Fetch a user's subscriptions, groups and profiles alike.
    async fn fetch_subscriptions(&self, user_id: i64) -> Result<Vec<SubscriptionTarget>, SourceError>;
}
