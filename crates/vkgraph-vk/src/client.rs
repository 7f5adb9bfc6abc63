//! VK API HTTP client.

use async_trait::async_trait;
use tracing::debug;
use vkgraph_core::{EntitySource, SourceError, SubscriptionTarget, UserRecord, UserRef};

use crate::config::{VkConfig, PROFILE_FIELDS};
use crate::response;

/// VK API client implementing [`EntitySource`].
#[derive(Clone)]
pub struct VkClient {
    config: VkConfig,
    client: reqwest::Client,
}

impl VkClient {
    /// Create a new client from config.
    pub fn new(config: VkConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            config: VkConfig {
                api_url: config.api_url.trim_end_matches('/').to_string(),
                ..config
            },
            client,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/method/{}", self.config.api_url, method)
    }

    /// Call an API method and return the raw body.
    async fn call(&self, method: &str, params: &[(&str, String)]) -> Result<String, SourceError> {
        let mut query: Vec<(&str, String)> = params.to_vec();
        query.push(("access_token", self.config.token.clone()));
        query.push(("v", self.config.api_version.clone()));

        let response = self
            .client
            .get(self.method_url(method))
            .query(&query)
            .send()
            .await
            .map_err(|e| SourceError::Transport(format!("{} request failed: {}", method, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Transport(format!("{} body unreadable: {}", method, e)))?;

        if !status.is_success() {
            return Err(SourceError::Transport(format!("{} returned HTTP {}: {}", method, status, body)));
        }

        debug!(method, bytes = body.len(), "VK API call");
        Ok(body)
    }

    fn count_param(&self) -> Option<(&'static str, String)> {
        self.config.fetch_count.map(|count| ("count", count.to_string()))
    }
}

#[async_trait]
impl EntitySource for VkClient {
    async fn fetch_profile(&self, user: &UserRef) -> Result<UserRecord, SourceError> {
        let params = [
            ("user_ids", user.to_string()),
            ("fields", PROFILE_FIELDS.to_string()),
        ];
        let body = self.call("users.get", &params).await?;
        response::parse_profile(&body, user)
    }

    async fn fetch_followers(&self, user_id: i64) -> Result<Vec<i64>, SourceError> {
        let mut params = vec![("user_id", user_id.to_string())];
        params.extend(self.count_param());
        let body = self.call("users.getFollowers", &params).await?;
        response::parse_followers(&body)
    }

    async fn fetch_subscriptions(&self, user_id: i64) -> Result<Vec<SubscriptionTarget>, SourceError> {
        let mut params = vec![("user_id", user_id.to_string()), ("extended", "1".to_string())];
        params.extend(self.count_param());
        let body = self.call("users.getSubscriptions", &params).await?;
        response::parse_subscriptions(&body)
    }
}
