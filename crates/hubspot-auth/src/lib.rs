//! HubSpot OAuth authentication library
//!
//! Provides the authorization URL, scope normalization, and the token
//! endpoint client (code exchange + refresh) for the multi-tenant install
//! flow. This crate is pure HTTP; tenant storage lives in `tenant-store`.
//!
//! Install flow:
//! 1. The service redirects the user to `build_authorization_url(..)`
//! 2. HubSpot calls back with an authorization code
//! 3. `OAuthApp::exchange()` trades the code for tokens (`TokenResponse`)
//! 4. The response's `hub_id` identifies the tenant that installed the app
//! 5. Later, `OAuthApp::exchange()` with a refresh grant mints new tokens

pub mod authorize;
pub mod constants;
pub mod error;
pub mod scopes;
pub mod token;

pub use authorize::build_authorization_url;
pub use constants::*;
pub use error::{Error, Result};
pub use scopes::normalize_scopes;
pub use token::{Grant, OAuthApp, TokenResponse};
