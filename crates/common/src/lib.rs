//! Common types for the HubSpot install service

mod error;
mod secret;

pub use error::{Error, Result};
pub use secret::Secret;
