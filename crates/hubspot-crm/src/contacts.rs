//! Contact listing against the CRM v3 objects API
//!
//! One endpoint, two call shapes: the widget-facing `/contacts` route
//! fetches the full first page, the authenticated landing page only needs
//! the first contact (`limit=1`).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Production API base. Tests point `CrmClient` at a local mock instead.
pub const CRM_BASE_URL: &str = "https://api.hubapi.com";

/// Properties requested for every contact fetch.
pub const CONTACT_PROPERTIES: &[&str] = &["firstname", "lastname", "email"];

/// The property subset this service requests. HubSpot omits properties a
/// contact has no value for, so every field is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ContactProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// One CRM contact object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Contact {
    pub id: String,
    #[serde(default)]
    pub properties: ContactProperties,
}

impl Contact {
    /// "Firstname Lastname" with either side blank when unset, mirroring
    /// the rendered contact line on the landing page.
    pub fn display_name(&self) -> String {
        let first = self.properties.firstname.as_deref().unwrap_or("");
        let last = self.properties.lastname.as_deref().unwrap_or("");
        format!("{first} {last}").trim().to_string()
    }
}

/// One page of contact results, the shape the UI widget consumes.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ContactPage {
    #[serde(default)]
    pub results: Vec<Contact>,
}

/// CRM API client bound to a base URL.
#[derive(Debug, Clone)]
pub struct CrmClient {
    http: reqwest::Client,
    base_url: String,
}

impl CrmClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self::with_base_url(http, CRM_BASE_URL)
    }

    /// Client against a non-default base URL (tests).
    pub fn with_base_url(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http, base_url }
    }

    /// List contacts with the fixed property set.
    ///
    /// `limit` caps the page size; `None` leaves paging to the provider's
    /// default. Non-2xx responses become [`Error::Provider`] carrying the
    /// provider's body.
    pub async fn list_contacts(
        &self,
        access_token: &str,
        limit: Option<u32>,
    ) -> Result<ContactPage> {
        let mut url = format!(
            "{}/crm/v3/objects/contacts?properties={}",
            self.base_url,
            CONTACT_PROPERTIES.join(","),
        );
        if let Some(limit) = limit {
            url.push_str(&format!("&limit={limit}"));
        }

        debug!(limit, "fetching contacts");

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| Error::Http(format!("contacts request failed: {e}")))?;

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
            .json::<ContactPage>()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))
    }

    /// The first contact in the portal, if any.
    pub async fn first_contact(&self, access_token: &str) -> Result<Option<Contact>> {
        let page = self.list_contacts(access_token, Some(1)).await?;
        Ok(page.results.into_iter().next())
    }
}
