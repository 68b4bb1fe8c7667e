/// Configuration management for the API server
///
/// Loads configuration from environment variables (and a `.env` file when
/// present) into a type-safe struct.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `CORS_ORIGINS`: Comma-separated allowed origins (default: `*`)
/// - `PRODUCTION`: Enables HSTS and strict CORS (default: false)
/// - `DATABASE_URL`: Postgres connection string (optional; in-memory store when unset)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `RUN_MIGRATIONS`: Apply migrations on startup (default: true)
/// - `SESSION_SECRET`: HS256 secret for session tokens, at least 32 characters
/// - `SESSION_PUBLIC_KEY`: RS256 PEM public key of the auth provider
///   (takes precedence over `SESSION_SECRET`)
/// - `SESSION_ISSUER`: Required `iss` claim (optional)
/// - `LOG_FORMAT`: `json` for JSON logs, anything else for text
/// - `RUST_LOG`: Log filter
///
/// # Example
///
/// ```no_run
/// use habitrack_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use habitrack_shared::auth::session::SessionKey;
use std::env;

/// Minimum length of an HS256 session secret
pub const MIN_SECRET_LENGTH: usize = 32;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration (None = in-memory store)
    pub database: Option<DatabaseConfig>,

    /// Session verification configuration
    pub session: SessionConfig,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins (`*` = any)
    pub cors_origins: Vec<String>,

    /// Production mode
    pub production: bool,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,

    /// Apply pending migrations at startup
    pub run_migrations: bool,
}

/// Session verification configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Key used to verify session tokens
    pub key: SessionKey,

    /// Required issuer, if any
    pub issuer: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Neither `SESSION_PUBLIC_KEY` nor `SESSION_SECRET` is set
    /// - `SESSION_SECRET` is shorter than 32 characters
    /// - A numeric or boolean variable has an invalid value
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let cors_origins = parse_list(&env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()));
        let production = parse_bool("PRODUCTION", env::var("PRODUCTION").ok().as_deref(), false)?;

        let database = match non_empty_var("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse::<u32>()?,
                run_migrations: parse_bool(
                    "RUN_MIGRATIONS",
                    env::var("RUN_MIGRATIONS").ok().as_deref(),
                    true,
                )?,
            }),
            None => None,
        };

        let session = SessionConfig {
            key: session_key(non_empty_var("SESSION_PUBLIC_KEY"), non_empty_var("SESSION_SECRET"))?,
            issuer: non_empty_var("SESSION_ISSUER"),
        };

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
                production,
            },
            database,
            session,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Whether a database URL was configured
    pub fn has_database(&self) -> bool {
        self.database.is_some()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn session_key(public_key: Option<String>, secret: Option<String>) -> anyhow::Result<SessionKey> {
    if let Some(pem) = public_key {
        // Allow single-line PEMs from env files
        return Ok(SessionKey::RsaPem(pem.replace("\\n", "\n")));
    }

    let secret = secret.ok_or_else(|| {
        anyhow::anyhow!("SESSION_PUBLIC_KEY or SESSION_SECRET environment variable is required")
    })?;

    if secret.len() < MIN_SECRET_LENGTH {
        anyhow::bail!("SESSION_SECRET must be at least {} characters long", MIN_SECRET_LENGTH);
    }

    Ok(SessionKey::Hmac(secret))
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(name: &str, value: Option<&str>, default: bool) -> anyhow::Result<bool> {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) if v.is_empty() => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => anyhow::bail!("{} must be a boolean, got {:?}", name, v),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                cors_origins: vec!["*".to_string()],
                production: false,
            },
            database: None,
            session: SessionConfig {
                key: SessionKey::Hmac("test-secret-key-at-least-32-bytes-long".to_string()),
                issuer: None,
            },
        };

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert!(!config.has_database());
    }

    #[test]
    fn test_session_key_selection() {
        let secret = "s".repeat(MIN_SECRET_LENGTH);

        assert_eq!(
            session_key(None, Some(secret.clone())).unwrap(),
            SessionKey::Hmac(secret.clone())
        );
        assert_eq!(
            session_key(Some("line1\\nline2".to_string()), Some(secret)).unwrap(),
            SessionKey::RsaPem("line1\nline2".to_string())
        );
        assert!(session_key(None, Some("short".to_string())).is_err());
        assert!(session_key(None, None).is_err());
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(
            parse_list("https://a.example.com, https://b.example.com,"),
            vec!["https://a.example.com", "https://b.example.com"]
        );
        assert_eq!(parse_list("*"), vec!["*"]);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("X", Some("TRUE"), false).unwrap());
        assert!(!parse_bool("X", Some("0"), true).unwrap());
        assert!(parse_bool("X", None, true).unwrap());
        assert!(parse_bool("X", Some(""), true).unwrap());
        assert!(parse_bool("X", Some("maybe"), true).is_err());
    }
}
