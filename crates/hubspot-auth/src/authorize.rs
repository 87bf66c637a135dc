//! Authorization URL construction
//!
//! The install flow starts by redirecting the user's browser to HubSpot's
//! authorization page with the app's client id, the requested scopes, and
//! the callback URI. HubSpot's public-app flow carries no PKCE pair and no
//! state parameter.

use crate::constants::AUTHORIZE_ENDPOINT;

/// Build the full authorization URL for the install redirect.
///
/// `scope` must already be space-delimited (see [`crate::normalize_scopes`]).
pub fn build_authorization_url(client_id: &str, scope: &str, redirect_uri: &str) -> String {
    format!(
        "{}?client_id={}&scope={}&redirect_uri={}",
        AUTHORIZE_ENDPOINT,
        urlencoded(client_id),
        urlencoded(scope),
        urlencoded(redirect_uri),
    )
}

/// Minimal URL encoding for parameter values.
/// Only encodes characters that would break URL parameter parsing.
fn urlencoded(s: &str) -> String {
    s.replace('%', "%25")
        .replace(' ', "%20")
        .replace(':', "%3A")
        .replace('/', "%2F")
        .replace('&', "%26")
}
