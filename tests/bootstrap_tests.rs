// Serves the composed application on a real socket.
//
// Covers what router level tests cannot: the listener accepts connections while
// the database attempt is still pending or has failed, and shuts down cleanly.

use async_trait::async_trait;
use budget_tracker_api::shared::infrastructure::database::{
    Database, DatabaseConnector, DatabaseStatus, InMemoryConnector,
};
use budget_tracker_api::shared::infrastructure::document_store::{
    DocumentStore, DocumentStoreError,
};
use budget_tracker_api::shell::bootstrap::{Composed, compose, serve};
use budget_tracker_api::shell::config::AppConfig;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

struct PendingConnector;

#[async_trait]
impl DatabaseConnector for PendingConnector {
    async fn connect(&self) -> Result<Arc<dyn DocumentStore>, DocumentStoreError> {
        std::future::pending().await
    }
}

struct RefusingConnector;

#[async_trait]
impl DatabaseConnector for RefusingConnector {
    async fn connect(&self) -> Result<Arc<dyn DocumentStore>, DocumentStoreError> {
        Err(DocumentStoreError::Backend("connection refused".into()))
    }
}

struct RunningServer {
    addr: SocketAddr,
    database: Arc<Database>,
    stop: oneshot::Sender<()>,
    task: JoinHandle<anyhow::Result<()>>,
}

async fn start(connector: Arc<dyn DatabaseConnector>) -> RunningServer {
    let Composed { app, database } = compose(&AppConfig::default(), connector);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop, stopped) = oneshot::channel::<()>();
    let task = tokio::spawn(serve(listener, app, async move {
        stopped.await.ok();
    }));
    RunningServer {
        addr,
        database,
        stop,
        task,
    }
}

async fn get(addr: SocketAddr, path: &str) -> (u16, String) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();
    let status = raw.split_whitespace().nth(1).unwrap().parse().unwrap();
    let body = raw
        .split_once("\r\n\r\n")
        .map(|(_, body)| body.to_string())
        .unwrap_or_default();
    (status, body)
}

#[tokio::test]
async fn it_should_serve_liveness_while_the_database_attempt_is_pending() {
    let server = start(Arc::new(PendingConnector)).await;

    let (status, body) = get(server.addr, "/").await;
    assert_eq!(status, 200);
    assert_eq!(body, "Backend server is running");

    let (status, body) = get(server.addr, "/health").await;
    assert_eq!(status, 503);
    let report: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(report["database"], json!({"state": "not_ready"}));
    assert_eq!(server.database.status(), DatabaseStatus::NotReady);

    server.stop.send(()).unwrap();
    server.task.await.unwrap().unwrap();
}

#[tokio::test]
async fn it_should_keep_serving_after_the_database_attempt_fails() {
    let server = start(Arc::new(RefusingConnector)).await;
    server
        .database
        .subscribe()
        .wait_for(|s| matches!(s, DatabaseStatus::Degraded { .. }))
        .await
        .unwrap();

    let (status, body) = get(server.addr, "/").await;
    assert_eq!(status, 200);
    assert_eq!(body, "Backend server is running");

    let (status, body) = get(server.addr, "/api/transactions").await;
    assert_eq!(status, 503);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        error["database"],
        json!({"state": "degraded", "reason": "backend error: connection refused"})
    );

    server.stop.send(()).unwrap();
    server.task.await.unwrap().unwrap();
}

#[tokio::test]
async fn it_should_report_ready_once_the_database_connects() {
    let server = start(Arc::new(InMemoryConnector)).await;
    server
        .database
        .subscribe()
        .wait_for(DatabaseStatus::is_ready)
        .await
        .unwrap();

    let (status, body) = get(server.addr, "/health").await;
    assert_eq!(status, 200);
    let report: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(report, json!({"status": "ok", "database": {"state": "ready"}}));

    let (status, body) = get(server.addr, "/api/budgets").await;
    assert_eq!(status, 200);
    assert_eq!(body, "[]");

    let (status, body) = get(server.addr, "/api/budgets/").await;
    assert_eq!(status, 200);
    assert_eq!(body, "[]");

    server.stop.send(()).unwrap();
    server.task.await.unwrap().unwrap();
}
