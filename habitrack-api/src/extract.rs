/// Request extractors that fail with [`ApiError`]
///
/// Axum's stock `Json` and `Path` extractors reject with 400/415/422. These
/// wrappers fold those failures into the two-tier error taxonomy so a
/// malformed body or id is a 500 like any other handler failure.
///
/// Bodies are parsed as JSON whatever their `Content-Type`; browser `fetch`
/// calls often send `text/plain` or nothing.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::ApiError;

/// JSON request body
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            ApiError::InternalError(format!("Failed to read request body: {}", rejection.body_text()))
        })?;

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|e| ApiError::InternalError(format!("Invalid request body: {}", e)))
    }
}

/// Record ID from the last path segment (`/api/habits/:id`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                ApiError::InternalError(format!("Invalid path: {}", rejection.body_text()))
            })?;

        Uuid::parse_str(&raw)
            .map(RecordId)
            .map_err(|e| ApiError::InternalError(format!("Invalid record id {:?}: {}", raw, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::StatusCode,
        response::IntoResponse,
        routing::{get, post},
        Router,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Payload {
        name: String,
    }

    fn app() -> Router {
        Router::new()
            .route(
                "/echo",
                post(|ApiJson(p): ApiJson<Payload>| async move { p.name }),
            )
            .route(
                "/items/:id",
                get(|RecordId(id): RecordId| async move { id.to_string() }),
            )
    }

    async fn send(request: axum::http::Request<Body>) -> (StatusCode, String) {
        let response = app().oneshot(request).await.unwrap().into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    #[tokio::test]
    async fn test_valid_json_body() {
        let (status, body) = send(
            axum::http::Request::post("/echo")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"name":"ok"}"#))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_malformed_json_is_500() {
        let (status, _) = send(
            axum::http::Request::post("/echo")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        // Empty body
        let (status, _) = send(
            axum::http::Request::post("/echo")
                .header("content-type", "application/json")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_json_body_without_json_content_type() {
        let (status, body) = send(
            axum::http::Request::post("/echo")
                .body(Body::from(r#"{"name":"no header"}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "no header");

        let (status, body) = send(
            axum::http::Request::post("/echo")
                .header("content-type", "text/plain;charset=UTF-8")
                .body(Body::from(r#"{"name":"plain"}"#))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "plain");
    }

    #[tokio::test]
    async fn test_record_id() {
        let id = Uuid::new_v4();
        let (status, body) = send(
            axum::http::Request::get(format!("/items/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, id.to_string());

        let (status, _) = send(
            axum::http::Request::get("/items/not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
