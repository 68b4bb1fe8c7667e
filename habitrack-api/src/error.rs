/// Error handling for the API server
///
/// Two tiers only:
///
/// - [`ApiError::Unauthorized`]: missing or invalid session, 401
/// - [`ApiError::InternalError`]: every other failure (bad body, bad id,
///   missing record, database outage), 500
///
/// The detail carried by either variant goes to the server log; clients get a
/// fixed message.
///
/// # Example
///
/// ```
/// use habitrack_api::error::{ApiError, ApiResult};
/// use axum::Json;
/// use serde_json::{json, Value};
///
/// async fn handler() -> ApiResult<Json<Value>> {
///     let count = "3".parse::<u32>().map_err(ApiError::internal)?;
///     Ok(Json(json!({ "count": count })))
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use habitrack_shared::{auth::middleware::AuthError, store::StoreError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Unauthorized (401)
    Unauthorized(String),

    /// Internal server error (500)
    InternalError(String),
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (`unauthorized` or `internal_error`)
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    /// Wraps any displayable failure as an internal error
    pub fn internal(err: impl fmt::Display) -> Self {
        ApiError::InternalError(err.to_string())
    }

    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (error_code, message) = match self {
            ApiError::Unauthorized(detail) => {
                tracing::debug!(%detail, "Rejected unauthenticated request");
                ("unauthorized", "Unauthorized")
            }
            ApiError::InternalError(detail) => {
                // Log internal errors but don't expose details to clients
                tracing::error!(%detail, "Internal error");
                ("internal_error", "An internal error occurred")
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message: message.to_string(),
        });

        (status, body).into_response()
    }
}

/// Missing records, foreign records and database failures all collapse to 500
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

/// Any authentication failure is a 401
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::Unauthorized("Missing credentials".to_string());
        assert_eq!(err.to_string(), "Unauthorized: Missing credentials");

        let err = ApiError::internal("boom");
        assert_eq!(err.to_string(), "Internal error: boom");
    }

    #[tokio::test]
    async fn test_unauthorized_response_hides_detail() {
        let response = ApiError::Unauthorized("Token expired for user_1".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["error"], "unauthorized");
        assert_eq!(body["message"], "Unauthorized");
    }

    #[tokio::test]
    async fn test_store_errors_collapse_to_500() {
        let err: ApiError = StoreError::NotFound {
            entity: "habit",
            id: Uuid::nil(),
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "internal_error");
        assert_eq!(body["message"], "An internal error occurred");
    }

    #[test]
    fn test_auth_errors_are_401() {
        let err: ApiError = AuthError::MissingCredentials.into();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);

        let err: ApiError = AuthError::InvalidFormat("Expected Bearer token".to_string()).into();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }
}
