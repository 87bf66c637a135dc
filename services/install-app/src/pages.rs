//! Host-rendered HTML pages
//!
//! The install prompt and the authenticated landing view. Markup stays
//! bare; the real UI lives in the host platform's widget, which talks to
//! `/contacts` instead of these pages.

use hubspot_crm::Contact;

/// Contact line of the authenticated view.
#[derive(Debug)]
pub enum ContactLine {
    /// First contact found, rendered by name
    Name(String),
    /// The portal has no contacts; the line is omitted entirely
    Empty,
    /// The fetch failed
    Unavailable,
}

impl ContactLine {
    /// Classify a contact fetch outcome.
    pub fn from_fetch(outcome: Result<Option<Contact>, hubspot_crm::Error>) -> Self {
        match outcome {
            Ok(Some(contact)) => ContactLine::Name(contact.display_name()),
            Ok(None) => ContactLine::Empty,
            Err(_) => ContactLine::Unavailable,
        }
    }

    fn render(&self) -> String {
        match self {
            ContactLine::Name(name) => {
                format!("<p>Contact name: {}</p>", escape_html(name))
            }
            ContactLine::Empty => String::new(),
            ContactLine::Unavailable => "<p>Unable to retrieve contact!</p>".to_string(),
        }
    }
}

const PAGE_HEADING: &str = "<h2>HubSpot OAuth 2.0 Multi-Tenant Install</h2>";

/// Landing page for visitors without an installed portal.
pub fn install_prompt() -> String {
    format!("{PAGE_HEADING}\n<a href=\"/install\"><h3>Install the app</h3></a>\n")
}

/// Landing page for an installed portal.
pub fn authenticated_view(portal_id: i64, contact: &ContactLine) -> String {
    format!(
        "{PAGE_HEADING}\n<h4>PortalId: {portal_id}</h4>\n{}",
        contact.render()
    )
}

/// The `/error` page.
pub fn error_page(msg: &str) -> String {
    format!("<h4>Error: {}</h4>\n", escape_html(msg))
}

/// Escape text interpolated into HTML. The error message and contact names
/// come from query strings and the remote API respectively.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
