use axum::{Extension, Json, extract::State};

use crate::modules::resources::collection::ResourceCollection;
use crate::modules::resources::errors::ResourceError;
use crate::shared::infrastructure::document_store::Document;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Extension(collection): Extension<ResourceCollection>,
) -> Result<Json<Vec<Document>>, ResourceError> {
    let store = state.database.store().map_err(ResourceError::Unavailable)?;
    Ok(Json(store.list(collection.name()).await?))
}

#[cfg(test)]
mod list_resources_http_inbound_tests {
    use axum::http::{Method, StatusCode};
    use rstest::rstest;
    use serde_json::json;

    use crate::shared::infrastructure::database::Database;
    use crate::tests::fixtures::{app_with_database, empty_request, offline_app, ready_app, seed, send};

    #[rstest]
    #[tokio::test]
    async fn it_should_return_200_with_an_empty_list() {
        let (status, body) = send(
            ready_app().router,
            empty_request(Method::GET, "/api/transactions"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_list_only_documents_of_its_own_collection() {
        let app = ready_app();
        let id = seed(&app.store, "budgets", json!({"category": "food", "limit": 300})).await;
        seed(&app.store, "transactions", json!({"amount": 12})).await;

        let (status, body) = send(app.router, empty_request(Method::GET, "/api/budgets")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{"_id": id, "category": "food", "limit": 300}]));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_503_while_the_database_is_not_ready() {
        let (status, body) = send(
            app_with_database(Database::new()),
            empty_request(Method::GET, "/api/transactions"),
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["database"], json!({"state": "not_ready"}));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_500_when_the_store_is_offline() {
        let (status, _) = send(offline_app(), empty_request(Method::GET, "/api/transactions")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
