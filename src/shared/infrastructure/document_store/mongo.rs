// MongoDB implementation of the DocumentStore port.
//
// Responsibilities
// - Map opaque JSON documents to BSON and back.
// - Expose ObjectId values as hex strings in the `_id` field.

use crate::shared::infrastructure::database::DatabaseConnector;
use crate::shared::infrastructure::document_store::{
    Document, DocumentStore, DocumentStoreError, ID_FIELD, with_id, without_id,
};
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{self, Bson, doc, oid::ObjectId};
use mongodb::options::ReturnDocument;
use mongodb::{Client, Collection, Database};
use std::sync::Arc;

pub struct MongoDocumentStore {
    database: Database,
}

impl MongoDocumentStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, DocumentStoreError> {
        let client = Client::with_uri_str(uri).await.map_err(backend)?;
        Ok(Self {
            database: client.database(database),
        })
    }

    fn collection(&self, name: &str) -> Collection<bson::Document> {
        self.database.collection(name)
    }
}

fn backend(error: mongodb::error::Error) -> DocumentStoreError {
    DocumentStoreError::Backend(error.to_string())
}

fn object_id(id: &str) -> Result<ObjectId, DocumentStoreError> {
    ObjectId::parse_str(id).map_err(|_| DocumentStoreError::InvalidId(id.to_string()))
}

fn to_bson(document: Document) -> Result<bson::Document, DocumentStoreError> {
    bson::to_document(&without_id(document))
        .map_err(|e| DocumentStoreError::Backend(e.to_string()))
}

fn to_json(mut document: bson::Document) -> Result<Document, DocumentStoreError> {
    let id = match document.remove(ID_FIELD) {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(id)) => id,
        Some(other) => other.to_string(),
        None => return Err(DocumentStoreError::Backend("document without _id".into())),
    };
    match Bson::Document(document).into_relaxed_extjson() {
        serde_json::Value::Object(fields) => Ok(with_id(&id, fields)),
        other => Err(DocumentStoreError::Backend(format!(
            "unexpected document shape: {other}"
        ))),
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    async fn ping(&self) -> Result<(), DocumentStoreError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(backend)
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, DocumentStoreError> {
        let cursor = self
            .collection(collection)
            .find(doc! {})
            .await
            .map_err(backend)?;
        let documents: Vec<bson::Document> = cursor.try_collect().await.map_err(backend)?;
        documents.into_iter().map(to_json).collect()
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<Document, DocumentStoreError> {
        let inserted = self
            .collection(collection)
            .insert_one(to_bson(document.clone())?)
            .await
            .map_err(backend)?;
        let id = match inserted.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        };
        Ok(with_id(&id, document))
    }

    async fn find(&self, collection: &str, id: &str) -> Result<Option<Document>, DocumentStoreError> {
        let found = self
            .collection(collection)
            .find_one(doc! { "_id": object_id(id)? })
            .await
            .map_err(backend)?;
        found.map(to_json).transpose()
    }

    async fn replace(
        &self,
        collection: &str,
        id: &str,
        document: Document,
    ) -> Result<Option<Document>, DocumentStoreError> {
        let replaced = self
            .collection(collection)
            .find_one_and_replace(doc! { "_id": object_id(id)? }, to_bson(document)?)
            .return_document(ReturnDocument::After)
            .await
            .map_err(backend)?;
        replaced.map(to_json).transpose()
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, DocumentStoreError> {
        let deleted = self
            .collection(collection)
            .delete_one(doc! { "_id": object_id(id)? })
            .await
            .map_err(backend)?;
        Ok(deleted.deleted_count > 0)
    }
}

/// Creates the client and pings the server once. `Client::with_uri_str` is
/// lazy, so the ping is what proves connectivity.
pub struct MongoConnector {
    uri: Option<String>,
    database: String,
}

impl MongoConnector {
    pub fn new(uri: Option<String>, database: impl Into<String>) -> Self {
        Self {
            uri,
            database: database.into(),
        }
    }
}

#[async_trait]
impl DatabaseConnector for MongoConnector {
    async fn connect(&self) -> Result<Arc<dyn DocumentStore>, DocumentStoreError> {
        let uri = self.uri.as_deref().ok_or(DocumentStoreError::NotConfigured)?;
        let store = MongoDocumentStore::connect(uri, &self.database).await?;
        store.ping().await?;
        Ok(Arc::new(store))
    }
}
