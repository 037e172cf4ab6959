use axum::{Extension, Router, routing::get};

use crate::modules::resources::collection::ResourceCollection;
use crate::modules::resources::use_cases::{
    create_resource::inbound::http as create_http, delete_resource::inbound::http as delete_http,
    get_resource::inbound::http as get_http, list_resources::inbound::http as list_http,
    replace_resource::inbound::http as replace_http,
};
use crate::shell::state::AppState;

/// Document routes for one collection, relative to its mount path.
pub fn router(collection: ResourceCollection) -> Router<AppState> {
    Router::new()
        .route("/", get(list_http::handle).post(create_http::handle))
        .route(
            "/{id}",
            get(get_http::handle)
                .put(replace_http::handle)
                .delete(delete_http::handle),
        )
        .layer(Extension(collection))
}
