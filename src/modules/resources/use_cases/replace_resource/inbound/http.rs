use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde_json::Value;

use crate::modules::resources::collection::ResourceCollection;
use crate::modules::resources::errors::ResourceError;
use crate::shared::infrastructure::document_store::Document;
use crate::shell::json_body::JsonBody;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    Extension(collection): Extension<ResourceCollection>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<Document>, ResourceError> {
    let Value::Object(document) = body else {
        return Err(ResourceError::NotAnObject);
    };
    let store = state.database.store().map_err(ResourceError::Unavailable)?;
    match store.replace(collection.name(), &id, document).await? {
        Some(replaced) => Ok(Json(replaced)),
        None => Err(ResourceError::NotFound {
            item: collection.item(),
            id,
        }),
    }
}

#[cfg(test)]
mod replace_resource_http_inbound_tests {
    use axum::http::{Method, StatusCode};
    use rstest::rstest;
    use serde_json::json;

    use crate::shared::infrastructure::document_store::DocumentStore;
    use crate::tests::fixtures::{json_request, ready_app, seed, send};

    #[rstest]
    #[tokio::test]
    async fn it_should_replace_the_document_and_keep_its_id() {
        let app = ready_app();
        let id = seed(&app.store, "budgets", json!({"category": "rent", "limit": 900})).await;

        let (status, body) = send(
            app.router,
            json_request(
                Method::PUT,
                &format!("/api/budgets/{id}"),
                r#"{"category":"rent","limit":950}"#,
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"_id": id, "category": "rent", "limit": 950}));
        let stored = app.store.find("budgets", &id).await.unwrap().unwrap();
        assert_eq!(stored["limit"], json!(950));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_404_for_an_unknown_id() {
        let (status, _) = send(
            ready_app().router,
            json_request(Method::PUT, "/api/budgets/missing", r#"{"limit":1}"#),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_422_when_the_body_is_not_an_object() {
        let app = ready_app();
        let id = seed(&app.store, "budgets", json!({"limit": 900})).await;

        let (status, _) = send(
            app.router,
            json_request(Method::PUT, &format!("/api/budgets/{id}"), "[]"),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
