// Startup sequence.
//
// Order
// - Start the database connection attempt in the background.
// - Build the router: CORS, JSON body parsing, resource mounts, liveness and health routes.
// - Bind the listening socket and serve until the shutdown signal fires.
//
// The listener never waits on the database. A bind failure is returned to `main`.

use anyhow::Context;
use axum::{ServiceExt, extract::Request};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::shared::infrastructure::database::{
    Database, DatabaseConnector, InMemoryConnector, spawn_connect,
};
use crate::shared::infrastructure::document_store::mongo::MongoConnector;
use crate::shell::config::AppConfig;
use crate::shell::http::{self, App, Collaborators};
use crate::shell::state::AppState;

pub struct Composed {
    pub app: App,
    pub database: Arc<Database>,
}

pub fn connector_for(config: &AppConfig) -> Arc<dyn DatabaseConnector> {
    if config.uses_in_memory_database() {
        tracing::warn!("using the in-memory document store, data is lost on exit");
        return Arc::new(InMemoryConnector);
    }
    Arc::new(MongoConnector::new(
        config.database_uri.clone(),
        config.database_name.clone(),
    ))
}

/// Starts the connection attempt and builds the router. Must run inside a
/// tokio runtime.
pub fn compose(config: &AppConfig, connector: Arc<dyn DatabaseConnector>) -> Composed {
    let database = Arc::new(Database::new());
    spawn_connect(database.clone(), connector);
    let app = http::app(
        AppState::new(database.clone()),
        Collaborators::default(),
        config.json_body_limit,
    );
    Composed { app, database }
}

pub async fn serve(
    listener: TcpListener,
    app: App,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let port = listener.local_addr()?.port();
    tracing::info!("Server running on port {port}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown)
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

pub async fn run(
    config: AppConfig,
    connector: Arc<dyn DatabaseConnector>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let Composed { app, .. } = compose(&config, connector);
    let listener = TcpListener::bind(config.listen_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr()))?;
    serve(listener, app, shutdown).await
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
