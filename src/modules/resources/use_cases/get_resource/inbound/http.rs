use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::modules::resources::collection::ResourceCollection;
use crate::modules::resources::errors::ResourceError;
use crate::shared::infrastructure::document_store::Document;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Extension(collection): Extension<ResourceCollection>,
    Path(id): Path<String>,
) -> Result<Json<Document>, ResourceError> {
    let store = state.database.store().map_err(ResourceError::Unavailable)?;
    match store.find(collection.name(), &id).await? {
        Some(document) => Ok(Json(document)),
        None => Err(ResourceError::NotFound {
            item: collection.item(),
            id,
        }),
    }
}
