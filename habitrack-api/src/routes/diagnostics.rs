/// Diagnostic endpoints
///
/// Both endpoints require a session. They help tell apart "my session is
/// rejected" from "the database is down" when wiring up a frontend.
///
/// # Endpoints
///
/// - `GET /api/test-connection` - Session plus database reachability
/// - `GET /api/auth-debug` - Session contents and which settings are present

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Utc};
use habitrack_shared::auth::middleware::AuthContext;
use serde::{Deserialize, Serialize};

/// Database probe result
#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseStatus {
    /// Store backend (`postgres` or `memory`)
    pub backend: String,

    /// `connected` or `disconnected`
    pub status: String,

    /// Probe failure, when disconnected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `GET /api/test-connection` response
#[derive(Debug, Serialize, Deserialize)]
pub struct TestConnectionResponse {
    pub authenticated: bool,
    pub user_id: String,
    pub database: DatabaseStatus,
    pub timestamp: DateTime<Utc>,
}

/// `GET /api/auth-debug` response
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthDebugResponse {
    pub user_id: String,
    pub session_id: Option<String>,
    pub environment: EnvironmentFlags,
}

/// Presence of configuration, never the values
#[derive(Debug, Serialize, Deserialize)]
pub struct EnvironmentFlags {
    /// `hmac` or `rsa`
    pub session_key: String,
    pub session_issuer_configured: bool,
    pub database_url_configured: bool,
    pub production: bool,
}

/// Reports the authenticated user and whether the store answers
///
/// A failed probe is reported in the body; the response is still 200.
///
/// # Response
///
/// ```json
/// {
///   "authenticated": true,
///   "user_id": "user_2abc",
///   "database": { "backend": "postgres", "status": "connected" },
///   "timestamp": "2025-01-01T00:00:00Z"
/// }
/// ```
pub async fn test_connection(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<TestConnectionResponse>> {
    let store = state.services.store();

    let database = match store.ping().await {
        Ok(()) => DatabaseStatus {
            backend: store.backend().to_string(),
            status: "connected".to_string(),
            error: None,
        },
        Err(e) => {
            tracing::warn!(user_id = %auth.user_id, error = %e, "Database probe failed");
            DatabaseStatus {
                backend: store.backend().to_string(),
                status: "disconnected".to_string(),
                error: Some(e.to_string()),
            }
        }
    };

    Ok(Json(TestConnectionResponse {
        authenticated: true,
        user_id: auth.user_id,
        database,
        timestamp: Utc::now(),
    }))
}

/// Echoes the verified session and which auth/database settings are present
pub async fn auth_debug(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<AuthDebugResponse>> {
    Ok(Json(AuthDebugResponse {
        user_id: auth.user_id,
        session_id: auth.session_id,
        environment: EnvironmentFlags {
            session_key: state.verifier.key_kind().to_string(),
            session_issuer_configured: state.verifier.has_issuer(),
            database_url_configured: state.config.has_database(),
            production: state.config.api.production,
        },
    }))
}
