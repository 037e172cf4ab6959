use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::shared::infrastructure::database::DatabaseStatus;
use crate::shared::infrastructure::document_store::DocumentStoreError;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("database unavailable")]
    Unavailable(DatabaseStatus),

    #[error("{item} {id} not found")]
    NotFound { item: &'static str, id: String },

    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error(transparent)]
    Store(#[from] DocumentStoreError),
}

impl IntoResponse for ResourceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ResourceError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ResourceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ResourceError::NotAnObject => StatusCode::UNPROCESSABLE_ENTITY,
            ResourceError::Store(DocumentStoreError::InvalidId(_)) => StatusCode::BAD_REQUEST,
            ResourceError::Store(DocumentStoreError::NotConfigured) => StatusCode::SERVICE_UNAVAILABLE,
            ResourceError::Store(DocumentStoreError::Backend(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "resource request failed");
        }

        let body = match &self {
            ResourceError::Unavailable(database) => {
                json!({ "error": self.to_string(), "database": database })
            }
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
