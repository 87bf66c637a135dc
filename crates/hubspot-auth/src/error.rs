//! Error types for OAuth authentication operations

/// Errors from OAuth authentication operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("token endpoint returned {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("hub_id not found in token response")]
    MissingPortal,

    #[error("invalid token response: {0}")]
    InvalidResponse(String),
}

impl Error {
    /// The provider's error payload as JSON, when this error carries one.
    ///
    /// HubSpot returns structured bodies like
    /// `{"status":"error","message":"..."}` on failed exchanges; callers
    /// surface that payload in their own error responses.
    pub fn provider_payload(&self) -> Option<serde_json::Value> {
        match self {
            Error::Provider { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

/// Result alias for auth operations.
pub type Result<T> = std::result::Result<T, Error>;
