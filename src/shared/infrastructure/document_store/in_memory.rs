// In memory implementation of the DocumentStore port.
//
// Purpose
// - Support handler tests and local development without a database.
//
// Responsibilities
// - Keep documents per collection in insertion order.
// - Assign uuid v7 ids on insert.

use crate::shared::infrastructure::document_store::{
    Document, DocumentStore, DocumentStoreError, ID_FIELD, with_id,
};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    is_offline: bool,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    fn ensure_online(&self) -> Result<(), DocumentStoreError> {
        if self.is_offline {
            return Err(DocumentStoreError::Backend("Document store offline".into()));
        }
        Ok(())
    }
}

fn has_id(document: &Document, id: &str) -> bool {
    document.get(ID_FIELD).and_then(|v| v.as_str()) == Some(id)
}

#[async_trait::async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn ping(&self) -> Result<(), DocumentStoreError> {
        self.ensure_online()
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, DocumentStoreError> {
        self.ensure_online()?;
        let guard = self.collections.read().await;
        Ok(guard.get(collection).cloned().unwrap_or_default())
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<Document, DocumentStoreError> {
        self.ensure_online()?;
        let stored = with_id(&Uuid::now_v7().to_string(), document);
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    async fn find(&self, collection: &str, id: &str) -> Result<Option<Document>, DocumentStoreError> {
        self.ensure_online()?;
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .and_then(|documents| documents.iter().find(|d| has_id(d, id)))
            .cloned())
    }

    async fn replace(
        &self,
        collection: &str,
        id: &str,
        document: Document,
    ) -> Result<Option<Document>, DocumentStoreError> {
        self.ensure_online()?;
        let mut guard = self.collections.write().await;
        let Some(slot) = guard
            .get_mut(collection)
            .and_then(|documents| documents.iter_mut().find(|d| has_id(d, id)))
        else {
            return Ok(None);
        };
        *slot = with_id(id, document);
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, DocumentStoreError> {
        self.ensure_online()?;
        let mut guard = self.collections.write().await;
        let Some(documents) = guard.get_mut(collection) else {
            return Ok(false);
        };
        let before = documents.len();
        documents.retain(|d| !has_id(d, id));
        Ok(documents.len() != before)
    }
}
