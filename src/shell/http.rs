use axum::{
    Json, Router,
    extract::State,
    http::{Method, StatusCode},
    middleware,
    response::IntoResponse,
    routing::get,
};
use serde::Serialize;
use tower_http::cors::{AllowHeaders, Any, CorsLayer};
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;

use crate::modules::resources::collection::ResourceCollection;
use crate::modules::resources::router::router as resource_router;
use crate::shared::infrastructure::database::DatabaseStatus;
use crate::shell::json_body::{JsonBodyLimit, parse_json_body};
use crate::shell::state::AppState;

pub const LIVENESS_BODY: &str = "Backend server is running";

/// The composed router. Trailing slashes are trimmed before routing, so
/// `/api/budgets/` reaches the same handler as `/api/budgets`.
pub type App = NormalizePath<Router>;

/// The routers mounted under `/api/transactions` and `/api/budgets`.
pub struct Collaborators {
    pub transactions: Router<AppState>,
    pub budgets: Router<AppState>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            transactions: resource_router(ResourceCollection::Transactions),
            budgets: resource_router(ResourceCollection::Budgets),
        }
    }
}

/// Any origin, the usual methods, request headers mirrored back.
pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request())
}

pub fn app(state: AppState, collaborators: Collaborators, json_body_limit: usize) -> App {
    let router = Router::new()
        .nest(ResourceCollection::Transactions.mount_path(), collaborators.transactions)
        .nest(ResourceCollection::Budgets.mount_path(), collaborators.budgets)
        .route("/", get(liveness))
        .route("/health", get(health))
        .layer(middleware::from_fn_with_state(
            JsonBodyLimit(json_body_limit),
            parse_json_body,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors())
        .with_state(state);
    NormalizePath::trim_trailing_slash(router)
}

pub async fn liveness() -> &'static str {
    LIVENESS_BODY
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub database: DatabaseStatus,
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let database = state.database.status();
    if database.is_ready() {
        (StatusCode::OK, Json(HealthReport { status: "ok", database }))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthReport {
                status: "unavailable",
                database,
            }),
        )
    }
}
