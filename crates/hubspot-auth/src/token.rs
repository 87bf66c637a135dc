//! OAuth token exchange and refresh
//!
//! Handles the two token endpoint interactions:
//! 1. Authorization code exchange (initial install completion)
//! 2. Token refresh (request-time refresh of an expired access token)
//!
//! Both operations POST a form-encoded grant to the token endpoint; the
//! only differences are the `grant_type` value and the code/refresh-token
//! field. HubSpot identifies the installing tenant via `hub_id` in the
//! token response.

use common::Secret;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::TOKEN_ENDPOINT;
use crate::error::{Error, Result};

/// Response from the token endpoint for both exchange and refresh.
///
/// `expires_in` is a delta in seconds from the response time. The caller
/// converts this to an absolute unix millisecond timestamp when storing
/// the credential. `hub_id` is the portal that installed the app; its
/// absence makes the response unusable for multi-tenant storage.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Seconds until the access token expires (delta, not absolute)
    pub expires_in: u64,
    /// Portal (tenant) identifier, absent on malformed responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hub_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

/// Grant payload sent to the token endpoint.
#[derive(Debug, Clone, Copy)]
pub enum Grant<'a> {
    /// Initial install: trade the callback's authorization code for tokens
    AuthorizationCode { code: &'a str },
    /// Mint a new access token from a stored refresh token
    RefreshToken { refresh_token: &'a str },
}

impl Grant<'_> {
    /// The `grant_type` form field value.
    pub fn grant_type(&self) -> &'static str {
        match self {
            Grant::AuthorizationCode { .. } => "authorization_code",
            Grant::RefreshToken { .. } => "refresh_token",
        }
    }
}

/// One registered HubSpot app's OAuth client configuration.
///
/// Holds the credentials sent with every grant. The token URL defaults to
/// the real endpoint; tests override it to point at a local mock.
#[derive(Debug, Clone)]
pub struct OAuthApp {
    client_id: String,
    client_secret: Secret<String>,
    redirect_uri: String,
    token_url: String,
}

impl OAuthApp {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: Secret<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret,
            redirect_uri: redirect_uri.into(),
            token_url: TOKEN_ENDPOINT.to_string(),
        }
    }

    /// Override the token endpoint URL (tests).
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Exchange a grant for tokens.
    ///
    /// Sends the form-encoded grant with the app credentials and redirect
    /// URI. Non-2xx responses become [`Error::Provider`] carrying the
    /// provider's body so callers can surface its error payload.
    pub async fn exchange(&self, client: &reqwest::Client, grant: Grant<'_>) -> Result<TokenResponse> {
        let mut form: Vec<(&str, &str)> = vec![
            ("grant_type", grant.grant_type()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose().as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];
        match grant {
            Grant::AuthorizationCode { code } => form.push(("code", code)),
            Grant::RefreshToken { refresh_token } => form.push(("refresh_token", refresh_token)),
        }

        debug!(grant_type = grant.grant_type(), "exchanging grant for tokens");

        let response = client
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| Error::Http(format!("token request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<no body>"));
            return Err(Error::Provider {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))
    }
}
