//! Token lifecycle operations over an injected store
//!
//! `TokenService` owns the three operations the HTTP surface needs:
//! exchange (install), retrieval (with request-time refresh), and the
//! authorization check. Every successful exchange, initial or refresh,
//! overwrites the tenant's record in full.
//!
//! Request-time refresh is serialized per tenant: concurrent retrievals
//! that hit an expired record wait on the tenant's lock, re-check expiry,
//! and reuse the refreshed record instead of issuing redundant exchanges.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use hubspot_auth::{Grant, OAuthApp, TokenResponse};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::record::TenantTokenRecord;
use crate::store::TokenStore;

/// Outcome of a successful exchange: the tenant the tokens were stored
/// under, plus the provider's raw token response.
#[derive(Debug, Clone)]
pub struct Exchanged {
    pub portal_id: i64,
    pub token: TokenResponse,
}

/// Multi-tenant token lifecycle over an injected [`TokenStore`].
pub struct TokenService {
    store: Arc<dyn TokenStore>,
    oauth: OAuthApp,
    http: reqwest::Client,
    refresh_locks: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl TokenService {
    pub fn new(store: Arc<dyn TokenStore>, oauth: OAuthApp, http: reqwest::Client) -> Self {
        Self {
            store,
            oauth,
            http,
            refresh_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Token Exchange: trade an authorization code for tokens and store
    /// them under the responding portal.
    pub async fn exchange_code(&self, code: &str) -> Result<Exchanged> {
        self.exchange(Grant::AuthorizationCode { code }).await
    }

    /// Access Token Retrieval.
    ///
    /// `None` means the portal never installed the app. An expired record
    /// triggers exactly one refresh exchange under the tenant's lock, then
    /// the updated record is re-read and its token returned.
    pub async fn access_token(&self, portal_id: i64) -> Result<Option<String>> {
        let Some(record) = self.store.find(portal_id).await? else {
            debug!(portal_id, "no record, app not installed");
            return Ok(None);
        };
        if !record.is_expired(now_millis()) {
            return Ok(Some(record.access_token));
        }

        let lock = self.tenant_lock(portal_id).await;
        let _guard = lock.lock().await;

        // A concurrent retrieval may have refreshed while we waited
        let Some(record) = self.store.find(portal_id).await? else {
            return Ok(None);
        };
        if !record.is_expired(now_millis()) {
            return Ok(Some(record.access_token));
        }

        info!(portal_id, "access token expired, refreshing");
        self.exchange(Grant::RefreshToken {
            refresh_token: &record.refresh_token,
        })
        .await?;

        // Serve what the store now holds, not the in-flight response
        let refreshed = self.store.find(portal_id).await?;
        Ok(refreshed.map(|r| r.access_token))
    }

    /// Authorization Check: whether any record exists for the portal.
    pub async fn is_authorized(&self, portal_id: i64) -> Result<bool> {
        Ok(self.store.find(portal_id).await?.is_some())
    }

    /// Exchange a grant and upsert the resulting record.
    ///
    /// A response without `hub_id` cannot be keyed to a tenant: nothing is
    /// written and the exchange fails.
    async fn exchange(&self, grant: Grant<'_>) -> Result<Exchanged> {
        let grant_type = grant.grant_type();
        let token = match self.oauth.exchange(&self.http, grant).await {
            Ok(token) => token,
            Err(e) => {
                metrics::counter!("oauth_token_exchanges_total",
                    "grant_type" => grant_type, "outcome" => "error")
                .increment(1);
                warn!(grant_type, error = %e, "token exchange failed");
                return Err(e.into());
            }
        };

        let Some(portal_id) = token.hub_id else {
            metrics::counter!("oauth_token_exchanges_total",
                "grant_type" => grant_type, "outcome" => "error")
            .increment(1);
            warn!(grant_type, "token response missing hub_id, nothing stored");
            return Err(hubspot_auth::Error::MissingPortal.into());
        };

        let expires_at = now_millis() + token.expires_in as i64 * 1000;
        self.store
            .upsert(TenantTokenRecord {
                portal_id,
                access_token: token.access_token.clone(),
                refresh_token: token.refresh_token.clone(),
                expires_at,
            })
            .await?;

        metrics::counter!("oauth_token_exchanges_total",
            "grant_type" => grant_type, "outcome" => "ok")
        .increment(1);
        info!(portal_id, grant_type, "stored tenant tokens");
        Ok(Exchanged { portal_id, token })
    }

    /// The per-tenant refresh lock, created on first use.
    async fn tenant_lock(&self, portal_id: i64) -> Arc<Mutex<()>> {
        let mut locks = self.refresh_locks.lock().await;
        locks
            .entry(portal_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Current unix time in milliseconds.
fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
