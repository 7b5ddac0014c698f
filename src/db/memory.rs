use std::collections::HashMap;

use async_trait::async_trait;
use bson::{Bson, Document, oid::ObjectId};
use tokio::sync::RwLock;

use super::{DocumentStore, StoreError};

/// In-memory [`DocumentStore`] used by the integration tests.
///
/// Mirrors the observable behavior of [`super::MongoStore`]: a generated
/// `_id` per document, equality-only filters, and `limit` capping.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create_document(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<String, StoreError> {
        let id = match document.get("_id") {
            Some(Bson::ObjectId(oid)) => oid.to_hex(),
            Some(other) => other.to_string(),
            None => {
                let oid = ObjectId::new();
                document.insert("_id", oid);
                oid.to_hex()
            }
        };

        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(id)
    }

    async fn get_documents(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let documents = collections.get(collection).map(Vec::as_slice).unwrap_or(&[]);

        // Mongo treats a non-positive limit as "no limit".
        let cap = usize::try_from(limit)
            .ok()
            .filter(|&n| n > 0)
            .unwrap_or(usize::MAX);

        Ok(documents
            .iter()
            .filter(|doc| matches_filter(doc, &filter))
            .take(cap)
            .cloned()
            .collect())
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.keys().cloned().collect())
    }
}

/// Equality match on every filter key. Nothing fancier is needed: the
/// handlers only ever filter on `email` and `published`.
fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, value)| document.get(key) == Some(value))
}
