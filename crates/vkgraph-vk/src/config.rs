//! VK API client configuration.

use serde::Deserialize;

/// Default VK API URL.
pub const DEFAULT_API_URL: &str = "https://api.vk.com";

/// API version the response parsing is written against.
pub const DEFAULT_API_VERSION: &str = "5.199";

/// Profile fields requested from `users.get`.
pub const PROFILE_FIELDS: &str = "city,sex,screen_name";

/// Configuration for talking to the VK API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VkConfig {
    pub api_url: String,
    pub token: String,
    pub api_version: String,
    /// `count` for list methods; the API default applies when unset.
    pub fetch_count: Option<u32>,
    pub timeout_secs: u64,
}

impl Default for VkConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: String::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
            fetch_count: None,
            timeout_secs: 30,
        }
    }
}

impl VkConfig {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }
}
