use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
};

use crate::modules::resources::collection::ResourceCollection;
use crate::modules::resources::errors::ResourceError;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Extension(collection): Extension<ResourceCollection>,
    Path(id): Path<String>,
) -> Result<StatusCode, ResourceError> {
    let store = state.database.store().map_err(ResourceError::Unavailable)?;
    if store.delete(collection.name(), &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ResourceError::NotFound {
            item: collection.item(),
            id,
        })
    }
}
