//! The per-tenant token record
//!
//! Exactly one record per portal, overwritten in full on every successful
//! exchange. The document keeps the external field name `portalId`; the
//! expiry field stores an absolute unix-millisecond timestamp under the
//! name `expires_at`.

use serde::{Deserialize, Serialize};

/// Name of the durable collection holding tenant records.
pub const TOKENS_COLLECTION: &str = "tokens";

/// OAuth credentials for one installed portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantTokenRecord {
    /// HubSpot account identifier, the unique key
    #[serde(rename = "portalId")]
    pub portal_id: i64,
    /// Current bearer token for API calls
    pub access_token: String,
    /// Long-lived credential used to mint new access tokens
    pub refresh_token: String,
    /// Expiration as unix timestamp in milliseconds (absolute, not a delta)
    pub expires_at: i64,
}

impl TenantTokenRecord {
    /// Whether the access token has expired as of `now_ms`.
    ///
    /// The boundary counts as expired: a token whose expiry equals the
    /// current instant is not handed out without a refresh attempt.
    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms >= self.expires_at
    }
}
