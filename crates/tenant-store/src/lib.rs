//! Tenant token storage and lifecycle
//!
//! One durable record per installed portal, plus the operations the HTTP
//! surface is built on:
//! - exchange an authorization code and upsert the tenant's tokens
//! - look up an access token, refreshing it first when expired
//! - check whether a portal has installed the app at all
//!
//! Storage is behind the [`TokenStore`] trait so the service can run
//! against MongoDB in production and an in-memory double in tests.

pub mod error;
pub mod mongo;
pub mod record;
pub mod service;
pub mod store;

pub use error::{Error, Result};
pub use mongo::MongoTokenStore;
pub use record::{TOKENS_COLLECTION, TenantTokenRecord};
pub use service::{Exchanged, TokenService};
pub use store::{MemoryTokenStore, TokenStore};
