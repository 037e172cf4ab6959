// JSON body parsing layer.
//
// Responsibilities
// - Parse every JSON request body once, before routing reaches a handler.
// - Reject malformed bodies with 400 and oversized bodies with 413.
// - Store the parsed value in the request extensions for handlers to pick up.
//
// Requests without a JSON content type pass through untouched.

use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, State},
    http::{HeaderMap, Request, StatusCode, header::CONTENT_TYPE, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy)]
pub struct JsonBodyLimit(pub usize);

/// The request body as parsed by [`parse_json_body`].
#[derive(Debug, Clone, PartialEq)]
pub struct JsonBody(pub Value);

pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}

fn client_error(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

pub async fn parse_json_body(
    State(JsonBodyLimit(limit)): State<JsonBodyLimit>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !is_json_content_type(request.headers()) {
        return next.run(request).await;
    }

    let (mut parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, limit).await {
        Ok(bytes) => bytes,
        Err(error) => {
            let error = error.into_inner();
            if error.is::<LengthLimitError>() {
                return client_error(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    format!("request body exceeds {limit} bytes"),
                );
            }
            return client_error(StatusCode::BAD_REQUEST, format!("unreadable request body: {error}"));
        }
    };

    // An empty JSON body reads as an empty object.
    let value = if bytes.is_empty() {
        Value::Object(Default::default())
    } else {
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(value) => value,
            Err(error) => {
                tracing::debug!(%error, uri = %parts.uri, "rejected malformed JSON body");
                return client_error(StatusCode::BAD_REQUEST, format!("malformed JSON body: {error}"));
            }
        }
    };
    parts.extensions.insert(JsonBody(value));

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

pub struct MissingJsonBody;

impl IntoResponse for MissingJsonBody {
    fn into_response(self) -> Response {
        client_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "expected a JSON request body".to_string(),
        )
    }
}

impl<S: Send + Sync> FromRequestParts<S> for JsonBody {
    type Rejection = MissingJsonBody;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<JsonBody>()
            .cloned()
            .ok_or(MissingJsonBody)
    }
}
