/// Session token verification
///
/// Sessions are issued by the hosted auth provider as signed JWTs. The API
/// never creates sessions for real users; it only verifies them and reads the
/// user identity out of the claims.
///
/// # Supported Keys
///
/// - **HS256**: shared secret (at least 32 bytes), used for self-hosted
///   setups, local development and tests
/// - **RS256**: the provider's PEM-encoded public key
///
/// # Validation
///
/// - Signature
/// - Expiration (`exp`) and not-before (`nbf`), with the default 60s leeway
/// - Issuer (`iss`), only when an issuer is configured
///
/// # Example
///
/// ```
/// use habitrack_shared::auth::session::{
///     create_session_token, SessionClaims, SessionKey, SessionVerifier,
/// };
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "a-very-long-development-secret-of-32-bytes";
/// let token = create_session_token(&SessionClaims::new("user_123"), secret)?;
///
/// let verifier = SessionVerifier::new(SessionKey::Hmac(secret.to_string()), None)?;
/// let claims = verifier.verify(&token)?;
/// assert_eq!(claims.sub, "user_123");
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// The configured verification key could not be loaded
    #[error("Invalid session key: {0}")]
    InvalidKey(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Issuer does not match the configured one
    #[error("Invalid issuer: expected {expected}")]
    InvalidIssuer { expected: String },

    /// Any other validation failure (signature, format, nbf)
    #[error("Token validation failed: {0}")]
    Invalid(String),
}

/// Key material used to verify session tokens
#[derive(Clone, PartialEq, Eq)]
pub enum SessionKey {
    /// HS256 shared secret
    Hmac(String),

    /// RS256 public key (PEM)
    RsaPem(String),
}

impl SessionKey {
    /// Short name of the key type, safe to expose in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            SessionKey::Hmac(_) => "hmac",
            SessionKey::RsaPem(_) => "rsa",
        }
    }

    fn decoding_key(&self) -> Result<(DecodingKey, Algorithm), SessionError> {
        match self {
            SessionKey::Hmac(secret) => Ok((
                DecodingKey::from_secret(secret.as_bytes()),
                Algorithm::HS256,
            )),
            SessionKey::RsaPem(pem) => {
                let key = DecodingKey::from_rsa_pem(pem.as_bytes())
                    .map_err(|e| SessionError::InvalidKey(e.to_string()))?;
                Ok((key, Algorithm::RS256))
            }
        }
    }
}

// Never print key material.
impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionKey::{}(<redacted>)", self.kind())
    }
}

/// Claims carried by a session token
///
/// Only `sub` is required by the API. `sid` is the provider's session
/// identifier and is surfaced by the auth diagnostics endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject - the provider's user ID (e.g. `user_2abc...`)
    pub sub: String,

    /// Provider session ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,

    /// Issuer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
}

impl SessionClaims {
    /// Default lifetime of tokens minted by [`create_session_token`]
    pub const DEFAULT_LIFETIME_MINUTES: i64 = 60;

    /// Creates claims for a user valid for the default lifetime
    pub fn new(user_id: impl Into<String>) -> Self {
        Self::with_expiration(user_id, Duration::minutes(Self::DEFAULT_LIFETIME_MINUTES))
    }

    /// Creates claims with a custom lifetime
    ///
    /// A negative duration yields an already expired token, which is handy
    /// in tests.
    pub fn with_expiration(user_id: impl Into<String>, expires_in: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id.into(),
            sid: None,
            iss: None,
            iat: Some(now.timestamp()),
            exp: (now + expires_in).timestamp(),
            nbf: Some(now.timestamp()),
        }
    }

    /// Sets the provider session ID
    pub fn session_id(mut self, sid: impl Into<String>) -> Self {
        self.sid = Some(sid.into());
        self
    }

    /// Sets the issuer
    pub fn issuer(mut self, iss: impl Into<String>) -> Self {
        self.iss = Some(iss.into());
        self
    }

    /// Checks if the token has expired (ignoring leeway)
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Signs claims with an HS256 secret
///
/// Real sessions come from the auth provider. This is used by tests and local
/// tooling that needs a token the API accepts.
///
/// # Errors
///
/// Returns `SessionError::CreateError` if encoding fails
pub fn create_session_token(claims: &SessionClaims, secret: &str) -> Result<String, SessionError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| SessionError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Verifies session tokens against a fixed key and optional issuer
///
/// Built once at startup so key parsing errors surface before the server
/// accepts traffic.
#[derive(Clone)]
pub struct SessionVerifier {
    key: DecodingKey,
    validation: Validation,
    kind: &'static str,
    issuer: Option<String>,
}

impl SessionVerifier {
    /// Creates a verifier
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidKey` if an RSA key cannot be parsed
    pub fn new(key: SessionKey, issuer: Option<String>) -> Result<Self, SessionError> {
        let (decoding_key, algorithm) = key.decoding_key()?;

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // Provider tokens carry no audience.
        validation.validate_aud = false;
        if let Some(ref iss) = issuer {
            validation.set_issuer(&[iss]);
        }

        Ok(Self {
            key: decoding_key,
            validation,
            kind: key.kind(),
            issuer,
        })
    }

    /// Key type in use (`hmac` or `rsa`)
    pub fn key_kind(&self) -> &'static str {
        self.kind
    }

    /// Whether tokens must carry a specific issuer
    pub fn has_issuer(&self) -> bool {
        self.issuer.is_some()
    }

    /// Validates a token and extracts its claims
    ///
    /// # Errors
    ///
    /// - `SessionError::Expired` if `exp` has passed
    /// - `SessionError::InvalidIssuer` if the issuer does not match
    /// - `SessionError::Invalid` for any other failure
    pub fn verify(&self, token: &str) -> Result<SessionClaims, SessionError> {
        let token_data =
            decode::<SessionClaims>(token, &self.key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
                    jsonwebtoken::errors::ErrorKind::InvalidIssuer => SessionError::InvalidIssuer {
                        expected: self.issuer.clone().unwrap_or_default(),
                    },
                    _ => SessionError::Invalid(e.to_string()),
                }
            })?;

        if token_data.claims.sub.trim().is_empty() {
            return Err(SessionError::Invalid("Empty subject".to_string()));
        }

        Ok(token_data.claims)
    }
}

impl fmt::Debug for SessionVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionVerifier")
            .field("kind", &self.kind)
            .field("issuer", &self.issuer)
            .finish()
    }
}
