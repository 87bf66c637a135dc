//! HubSpot CRM API client
//!
//! Bearer-authenticated access to the CRM v3 objects API. Only the contact
//! listing the install service needs: a fixed property set
//! (`firstname,lastname,email`) and an optional page limit.

pub mod contacts;
pub mod error;

pub use contacts::{CONTACT_PROPERTIES, Contact, ContactPage, ContactProperties, CrmClient};
pub use error::{Error, Result};
