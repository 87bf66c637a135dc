//! HubSpot OAuth constants
//!
//! Endpoint URLs for the public-app install flow. The app's client id and
//! secret are NOT constants: they are per-app values read from the
//! environment and held by `OAuthApp`.

/// Authorization page where the user grants the app access to a portal
pub const AUTHORIZE_ENDPOINT: &str = "https://app.hubspot.com/oauth/authorize";

/// Token endpoint for code exchange and token refresh
pub const TOKEN_ENDPOINT: &str = "https://api.hubapi.com/oauth/v1/token";

/// Default scope requested when the SCOPE environment variable is unset.
/// The install flow only needs to read CRM contacts.
pub const DEFAULT_SCOPE: &str = "crm.objects.contacts.read";
