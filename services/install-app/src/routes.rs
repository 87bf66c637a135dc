//! HTTP surface of the install service
//!
//! Routes:
//! - `GET /install` — redirect to HubSpot's authorization page
//! - `GET /oauth-callback` — exchange the authorization code, then
//!   redirect to `/?portalId=<id>` or `/error?msg=<message>`
//! - `GET /` — install prompt, or the authenticated view for a portal
//! - `GET /contacts` — JSON contact page for the widget
//! - `GET /error` — render a failure message
//! - `GET /health`, `GET /metrics` — operational endpoints

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use tracing::{info, warn};

use hubspot_crm::CrmClient;
use tenant_store::TokenService;

use crate::metrics::record_contact_fetch;
use crate::pages;

/// Shared application state accessible from all handlers
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub crm: CrmClient,
    pub authorize_url: String,
    pub started_at: Instant,
    pub prometheus: PrometheusHandle,
}

/// Build the axum router with all routes and shared state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/install", get(install))
        .route("/oauth-callback", get(oauth_callback))
        .route("/contacts", get(contacts))
        .route("/error", get(error_page))
        .route("/health", get(health))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct PortalQuery {
    #[serde(rename = "portalId")]
    portal_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct CallbackQuery {
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorQuery {
    msg: Option<String>,
}

/// GET /install — kick off the OAuth flow.
async fn install(State(state): State<AppState>) -> Redirect {
    info!("initiating OAuth 2.0 install flow");
    Redirect::to(&state.authorize_url)
}

/// GET /oauth-callback — complete the install for the responding portal.
async fn oauth_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Redirect {
    let Some(code) = query.code else {
        warn!("callback without authorization code");
        return Redirect::to("/error?msg=missing%20authorization%20code");
    };

    info!("received authorization code");
    match state.tokens.exchange_code(&code).await {
        Ok(exchanged) => Redirect::to(&format!("/?portalId={}", exchanged.portal_id)),
        Err(e) => {
            warn!(error = %e, "authorization code exchange failed");
            Redirect::to(&format!("/error?msg={}", query_encode(&user_message(&e))))
        }
    }
}

/// GET / — install prompt, or the authenticated view with the portal's
/// first contact.
async fn home(State(state): State<AppState>, Query(query): Query<PortalQuery>) -> Html<String> {
    let Some(portal_id) = query.portal_id else {
        return Html(pages::install_prompt());
    };

    match state.tokens.is_authorized(portal_id).await {
        Ok(true) => {}
        Ok(false) => return Html(pages::install_prompt()),
        Err(e) => {
            warn!(portal_id, error = %e, "authorization check failed");
            return Html(pages::install_prompt());
        }
    }

    let contact = match state.tokens.access_token(portal_id).await {
        Ok(Some(token)) => {
            let outcome = state.crm.first_contact(&token).await;
            match &outcome {
                Ok(_) => record_contact_fetch("ok"),
                Err(e) => {
                    record_contact_fetch("error");
                    warn!(portal_id, error = %e, "unable to retrieve contact");
                }
            }
            pages::ContactLine::from_fetch(outcome)
        }
        Ok(None) => return Html(pages::install_prompt()),
        Err(e) => {
            warn!(portal_id, error = %e, "access token retrieval failed");
            pages::ContactLine::Unavailable
        }
    };

    Html(pages::authenticated_view(portal_id, &contact))
}

/// GET /contacts — the contact page the UI widget consumes.
async fn contacts(State(state): State<AppState>, Query(query): Query<PortalQuery>) -> Response {
    let Some(portal_id) = query.portal_id else {
        return (
            StatusCode::BAD_REQUEST,
            axum::Json(serde_json::json!({ "error": "portalId is required" })),
        )
            .into_response();
    };

    let token = match state.tokens.access_token(portal_id).await {
        Ok(Some(token)) => token,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                axum::Json(serde_json::json!({
                    "error": format!("portalId {portal_id} is not installed"),
                })),
            )
                .into_response();
        }
        Err(e) => {
            warn!(portal_id, error = %e, "access token retrieval failed");
            return contacts_failure(token_error_details(&e));
        }
    };

    match state.crm.list_contacts(&token, None).await {
        Ok(page) => {
            record_contact_fetch("ok");
            axum::Json(page).into_response()
        }
        Err(e) => {
            record_contact_fetch("error");
            warn!(portal_id, error = %e, "contact fetch failed");
            let details = e
                .provider_payload()
                .unwrap_or_else(|| serde_json::Value::String(e.to_string()));
            contacts_failure(details)
        }
    }
}

/// GET /error — render the failure message.
async fn error_page(Query(query): Query<ErrorQuery>) -> Html<String> {
    Html(pages::error_page(
        query.msg.as_deref().unwrap_or("Unknown error"),
    ))
}

/// GET /health — liveness plus uptime.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let uptime = state.started_at.elapsed().as_secs();
    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, "application/json")],
        serde_json::json!({
            "status": "healthy",
            "uptime_seconds": uptime,
        })
        .to_string(),
    )
}

/// GET /metrics — Prometheus text exposition format.
async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        state.prometheus.render(),
    )
}

/// The 500 body for `/contacts` failures.
fn contacts_failure(details: serde_json::Value) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(serde_json::json!({
            "error": "Failed to fetch contacts",
            "details": details,
        })),
    )
        .into_response()
}

/// Provider payload for a token-lifecycle error, or its message.
fn token_error_details(err: &tenant_store::Error) -> serde_json::Value {
    if let tenant_store::Error::Auth(auth) = err {
        if let Some(payload) = auth.provider_payload() {
            return payload;
        }
    }
    serde_json::Value::String(err.to_string())
}

/// The user-visible message for a failed exchange: the provider's
/// `message` field when it sent one, the error text otherwise.
fn user_message(err: &tenant_store::Error) -> String {
    if let tenant_store::Error::Auth(auth) = err {
        if let Some(payload) = auth.provider_payload() {
            if let Some(msg) = payload.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
        }
    }
    err.to_string()
}

/// Minimal query-string encoding for redirect parameters.
fn query_encode(s: &str) -> String {
    s.replace('%', "%25")
        .replace(' ', "%20")
        .replace('&', "%26")
        .replace('#', "%23")
        .replace('?', "%3F")
        .replace('=', "%3D")
        .replace('+', "%2B")
}
