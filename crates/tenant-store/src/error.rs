//! Error types for tenant token operations

use thiserror::Error;

/// Errors from token storage and lifecycle operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Token endpoint failures, including responses missing `hub_id`
    #[error("{0}")]
    Auth(#[from] hubspot_auth::Error),

    /// Durable store failures (connection, query, serialization)
    #[error("token store error: {0}")]
    Store(String),
}

/// Result alias for tenant token operations.
pub type Result<T> = std::result::Result<T, Error>;
