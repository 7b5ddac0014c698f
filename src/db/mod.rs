//! Persistence layer.
//!
//! A thin abstraction over a document database: records go in through
//! [`DocumentStore::create_document`], come back out through
//! [`DocumentStore::get_documents`]. The MongoDB-backed implementation lives
//! in [`mongo`], the schemas in [`schemas`], and an in-memory implementation
//! used by the integration tests in [`memory`].

pub mod memory;
pub mod mongo;
pub mod schemas;

use async_trait::async_trait;
use bson::Document;
use thiserror::Error;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Interface to the document database, held behind `Arc<dyn DocumentStore>`
/// so handlers never care which backend is wired in.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert one document into `collection`, returning the generated key
    /// as a string.
    async fn create_document(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<String, StoreError>;

    /// Fetch up to `limit` documents from `collection` matching `filter`.
    async fn get_documents(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError>;

    /// Names of the collections currently present in the database.
    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError>;
}
