use axum::{Extension, Json, extract::State, http::StatusCode};
use serde_json::Value;

use crate::modules::resources::collection::ResourceCollection;
use crate::modules::resources::errors::ResourceError;
use crate::shared::infrastructure::document_store::Document;
use crate::shell::json_body::JsonBody;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Extension(collection): Extension<ResourceCollection>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<Document>), ResourceError> {
    let Value::Object(document) = body else {
        return Err(ResourceError::NotAnObject);
    };
    let store = state.database.store().map_err(ResourceError::Unavailable)?;
    let stored = store.insert(collection.name(), document).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}
