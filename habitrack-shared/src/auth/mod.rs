/// Authentication utilities
///
/// Users sign in with the hosted auth provider; the API only verifies the
/// session token the provider issued.
///
/// # Modules
///
/// - [`session`]: session token verification (HS256 / RS256)
/// - [`middleware`]: credential extraction and the request `AuthContext`
///
/// # Example
///
/// ```no_run
/// use habitrack_shared::auth::middleware::authenticate;
/// use habitrack_shared::auth::session::{SessionKey, SessionVerifier};
/// use axum::http::HeaderMap;
///
/// # fn example(headers: HeaderMap) -> Result<(), Box<dyn std::error::Error>> {
/// let verifier = SessionVerifier::new(SessionKey::Hmac("secret".to_string()), None)?;
/// let auth = authenticate(&headers, &verifier)?;
/// println!("Authenticated {}", auth.user_id);
/// # Ok(())
/// # }
/// ```

pub mod middleware;
pub mod session;
