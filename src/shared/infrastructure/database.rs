// Database handle and readiness tracking.
//
// Purpose
// - Own the document store once it exists, and expose the connection status to readers.
//
// Responsibilities
// - Start in `NotReady`. The connect task moves it to `Ready` or `Degraded`, once.
// - Hand the store to handlers only when it is ready.
//
// Boundaries
// - No retry. A failed attempt stays degraded for the lifetime of the process.

use crate::shared::infrastructure::document_store::in_memory::InMemoryDocumentStore;
use crate::shared::infrastructure::document_store::{DocumentStore, DocumentStoreError};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::{Arc, OnceLock};
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DatabaseStatus {
    NotReady,
    Ready,
    Degraded { reason: String },
}

impl DatabaseStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, DatabaseStatus::Ready)
    }
}

#[async_trait]
pub trait DatabaseConnector: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn DocumentStore>, DocumentStoreError>;
}

/// Connects to a fresh in-process store. Used for local development
/// (`MONGODB_URI=memory://`) and tests.
#[derive(Default)]
pub struct InMemoryConnector;

#[async_trait]
impl DatabaseConnector for InMemoryConnector {
    async fn connect(&self) -> Result<Arc<dyn DocumentStore>, DocumentStoreError> {
        Ok(Arc::new(InMemoryDocumentStore::new()))
    }
}

pub struct Database {
    store: OnceLock<Arc<dyn DocumentStore>>,
    status: watch::Sender<DatabaseStatus>,
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

impl Database {
    pub fn new() -> Self {
        let (status, _) = watch::channel(DatabaseStatus::NotReady);
        Self {
            store: OnceLock::new(),
            status,
        }
    }

    /// A handle that is already connected to `store`.
    pub fn ready(store: Arc<dyn DocumentStore>) -> Self {
        let database = Self::new();
        database.mark_ready(store);
        database
    }

    pub fn status(&self) -> DatabaseStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DatabaseStatus> {
        self.status.subscribe()
    }

    pub fn store(&self) -> Result<Arc<dyn DocumentStore>, DatabaseStatus> {
        match self.store.get() {
            Some(store) => Ok(store.clone()),
            None => Err(self.status()),
        }
    }

    pub fn mark_ready(&self, store: Arc<dyn DocumentStore>) {
        if self.store.set(store).is_ok() {
            self.status.send_replace(DatabaseStatus::Ready);
        }
    }

    pub fn mark_degraded(&self, reason: impl Into<String>) {
        if self.store.get().is_none() {
            self.status.send_replace(DatabaseStatus::Degraded {
                reason: reason.into(),
            });
        }
    }
}

/// Starts the connection attempt without waiting for it. The outcome is
/// logged and recorded on `database`; nothing else observes it.
pub fn spawn_connect(
    database: Arc<Database>,
    connector: Arc<dyn DatabaseConnector>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match connector.connect().await {
            Ok(store) => {
                database.mark_ready(store);
                tracing::info!("MongoDB connected");
            }
            Err(error) => {
                tracing::error!(%error, "MongoDB connection error");
                database.mark_degraded(error.to_string());
            }
        }
    })
}
