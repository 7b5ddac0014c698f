use async_trait::async_trait;
use bson::{Bson, Document};
use futures::TryStreamExt;
use mongodb::{Client, Database};
use tracing::info;

use super::{DocumentStore, StoreError};

/// MongoDB-backed [`DocumentStore`].
///
/// The driver's `Client` is an internal connection pool, so one `MongoStore`
/// is shared by every request without further locking.
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub async fn connect(url: &str, db_name: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(url)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let db = client.database(db_name);

        info!("MongoDB client initialized (database: {db_name})");
        Ok(Self { db })
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn create_document(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<String, StoreError> {
        let result = self
            .db
            .collection::<Document>(collection)
            .insert_one(document)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let id = match result.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        };

        Ok(id)
    }

    async fn get_documents(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError> {
        let cursor = self
            .db
            .collection::<Document>(collection)
            .find(filter)
            .limit(limit)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
        self.db
            .list_collection_names()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}
