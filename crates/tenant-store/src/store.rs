//! Storage abstraction for tenant records
//!
//! The store is injected into [`crate::TokenService`] as `Arc<dyn TokenStore>`
//! so production code runs against MongoDB while tests use the in-memory
//! implementation. Uses `Pin<Box<dyn Future>>` return types for
//! dyn-compatibility.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use tokio::sync::RwLock;

use crate::error::Result;
use crate::record::TenantTokenRecord;

/// Durable key-value storage of tenant records, keyed by portal id.
///
/// Implementations must make `upsert` atomic per record; the service relies
/// on single-document upsert semantics and never needs cross-record
/// transactions.
pub trait TokenStore: Send + Sync {
    /// Fetch the record for a portal, `None` when the app is not installed.
    fn find(
        &self,
        portal_id: i64,
    ) -> Pin<Box<dyn Future<Output = Result<Option<TenantTokenRecord>>> + Send + '_>>;

    /// Insert or fully overwrite the record for `record.portal_id`.
    fn upsert(
        &self,
        record: TenantTokenRecord,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// In-memory store for tests and single-process demos.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    records: RwLock<HashMap<i64, TenantTokenRecord>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl TokenStore for MemoryTokenStore {
    fn find(
        &self,
        portal_id: i64,
    ) -> Pin<Box<dyn Future<Output = Result<Option<TenantTokenRecord>>> + Send + '_>> {
        Box::pin(async move { Ok(self.records.read().await.get(&portal_id).cloned()) })
    }

    fn upsert(
        &self,
        record: TenantTokenRecord,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            self.records.write().await.insert(record.portal_id, record);
            Ok(())
        })
    }
}
