//! MongoDB-backed token store
//!
//! One `tokens` collection, one document per portal, atomic per-document
//! upserts. The collection is typed so find/upsert work directly on
//! [`TenantTokenRecord`] without manual BSON mapping.

use std::future::Future;
use std::pin::Pin;

use mongodb::bson::doc;
use mongodb::{Client, Collection};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::record::{TOKENS_COLLECTION, TenantTokenRecord};
use crate::store::TokenStore;

/// Durable store over a MongoDB `tokens` collection.
#[derive(Debug, Clone)]
pub struct MongoTokenStore {
    collection: Collection<TenantTokenRecord>,
}

impl MongoTokenStore {
    /// Connect to MongoDB and bind the `tokens` collection in `db_name`.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| Error::Store(format!("connecting to MongoDB: {e}")))?;
        info!(db_name, "connected to MongoDB");
        Ok(Self::from_client(&client, db_name))
    }

    /// Bind the `tokens` collection on an existing client.
    pub fn from_client(client: &Client, db_name: &str) -> Self {
        let collection = client
            .database(db_name)
            .collection::<TenantTokenRecord>(TOKENS_COLLECTION);
        Self { collection }
    }
}

impl TokenStore for MongoTokenStore {
    fn find(
        &self,
        portal_id: i64,
    ) -> Pin<Box<dyn Future<Output = Result<Option<TenantTokenRecord>>> + Send + '_>> {
        Box::pin(async move {
            self.collection
                .find_one(doc! { "portalId": portal_id })
                .await
                .map_err(|e| Error::Store(format!("finding record for portal {portal_id}: {e}")))
        })
    }

    fn upsert(
        &self,
        record: TenantTokenRecord,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            self.collection
                .update_one(
                    doc! { "portalId": record.portal_id },
                    doc! { "$set": {
                        "access_token": record.access_token.as_str(),
                        "refresh_token": record.refresh_token.as_str(),
                        "expires_at": record.expires_at,
                    } },
                )
                .upsert(true)
                .await
                .map_err(|e| {
                    Error::Store(format!(
                        "upserting record for portal {}: {e}",
                        record.portal_id
                    ))
                })?;
            debug!(portal_id = record.portal_id, "upserted tenant record");
            Ok(())
        })
    }
}
