/// Session authentication for Axum
///
/// Extracts the session token from a request, verifies it and produces the
/// [`AuthContext`] that handlers receive through request extensions.
///
/// # Credential Sources
///
/// Checked in order:
/// 1. `Authorization: Bearer <token>` (mobile clients)
/// 2. `__session` cookie (web clients, set by the auth provider)
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use habitrack_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("User: {}", auth.user_id)
/// }
/// ```

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};

use super::session::{SessionError, SessionVerifier};

/// Name of the cookie the auth provider stores the session token in
pub const SESSION_COOKIE: &str = "__session";

/// Authentication context added to request extensions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID (the provider's `sub` claim)
    pub user_id: String,

    /// Provider session ID, when the token carries one
    pub session_id: Option<String>,
}

impl AuthContext {
    /// Creates an auth context for a user
    pub fn new(user_id: impl Into<String>, session_id: Option<String>) -> Self {
        Self {
            user_id: user_id.into(),
            session_id,
        }
    }
}

/// Error type for request authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Neither a bearer token nor a session cookie was sent
    #[error("Missing credentials")]
    MissingCredentials,

    /// Authorization header present but not a bearer token
    #[error("Invalid authorization header: {0}")]
    InvalidFormat(String),

    /// Token verification failed
    #[error("Invalid session: {0}")]
    InvalidSession(#[from] SessionError),
}

/// Extracts the raw session token from request headers
///
/// # Errors
///
/// - `AuthError::InvalidFormat` if the Authorization header is not a
///   non-empty bearer token
/// - `AuthError::MissingCredentials` if no credential was found
pub fn extract_session_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let value = value
            .to_str()
            .map_err(|_| AuthError::InvalidFormat("Non-ASCII header value".to_string()))?;

        let token = value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

        if token.is_empty() {
            return Err(AuthError::InvalidFormat("Empty Bearer token".to_string()));
        }

        return Ok(token);
    }

    session_cookie(headers).ok_or(AuthError::MissingCredentials)
}

fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty()).then_some(value)
        })
}

/// Authenticates a request from its headers
///
/// # Errors
///
/// Returns an `AuthError` if no valid session is present
pub fn authenticate(headers: &HeaderMap, verifier: &SessionVerifier) -> Result<AuthContext, AuthError> {
    let token = extract_session_token(headers)?;
    let claims = verifier.verify(token)?;

    Ok(AuthContext::new(claims.sub, claims.sid))
}
