//! Centralized error types for vkgraph.

use thiserror::Error;

/// Failure reported by a remote entity source.
///
/// These are never fatal to a crawl: the engine logs them and abandons the
/// affected branch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("No info for user: {0}")]
    NotFound(String),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Failure reported by a graph store. Always fatal to the current run.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Graph store connection failed: {0}")]
    Connection(String),

    #[error("Graph store query failed: {0}")]
    Query(String),

    #[error("Failed to decode graph store row: {0}")]
    Decode(String),
}

/// Result type for graph store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Main error type for vkgraph operations.
#[derive(Error, Debug)]
pub enum VkgError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Result type for vkgraph operations.
pub type VkgResult<T> = Result<T, VkgError>;

impl VkgError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}
