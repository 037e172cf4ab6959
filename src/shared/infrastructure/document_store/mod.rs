// Document store port.
//
// Purpose
// - Describe what the resource routers need from the document database, without implementing it.
//
// Responsibilities
// - Keep handlers independent of the database driver by coding against a trait.
// - Documents are opaque JSON objects. The store owns the `_id` field.
//
// Testing guidance
// - Use the in memory implementation for handler tests and local development.

pub mod in_memory;
pub mod mongo;

use async_trait::async_trait;
use thiserror::Error;

pub type Document = serde_json::Map<String, serde_json::Value>;

pub const ID_FIELD: &str = "_id";

#[derive(Debug, Error)]
pub enum DocumentStoreError {
    #[error("no database connection string configured")]
    NotConfigured,

    #[error("invalid document id: {0}")]
    InvalidId(String),

    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn ping(&self) -> Result<(), DocumentStoreError>;
    async fn list(&self, collection: &str) -> Result<Vec<Document>, DocumentStoreError>;
    async fn insert(&self, collection: &str, document: Document) -> Result<Document, DocumentStoreError>;
    async fn find(&self, collection: &str, id: &str) -> Result<Option<Document>, DocumentStoreError>;
    async fn replace(
        &self,
        collection: &str,
        id: &str,
        document: Document,
    ) -> Result<Option<Document>, DocumentStoreError>;
    async fn delete(&self, collection: &str, id: &str) -> Result<bool, DocumentStoreError>;
}

/// Returns `document` with any client supplied `_id` removed.
pub fn without_id(mut document: Document) -> Document {
    document.remove(ID_FIELD);
    document
}

/// Returns `document` with `_id` set to `id`.
pub fn with_id(id: &str, document: Document) -> Document {
    let mut stored = without_id(document);
    stored.insert(ID_FIELD.to_string(), serde_json::Value::String(id.to_string()));
    stored
}
