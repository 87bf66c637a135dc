//! Error types for CRM API operations

/// Errors from CRM API calls.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("contacts endpoint returned {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("invalid contacts response: {0}")]
    InvalidResponse(String),
}

impl Error {
    /// The provider's error payload as JSON, when this error carries one.
    pub fn provider_payload(&self) -> Option<serde_json::Value> {
        match self {
            Error::Provider { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

/// Result alias for CRM operations.
pub type Result<T> = std::result::Result<T, Error>;
