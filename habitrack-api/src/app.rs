/// Application state and router builder
///
/// This module defines the shared application state and builds the Axum
/// router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use habitrack_api::{app::{build_router, AppState}, config::Config};
/// use habitrack_shared::store::memory::MemoryStore;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(MemoryStore::new()), config)?;
/// let app = build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError, middleware::security::SecurityHeadersLayer};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, patch},
    Router,
};
use habitrack_shared::{
    auth::{
        middleware::authenticate,
        session::{SessionError, SessionVerifier},
    },
    services::Services,
    store::Store,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor; everything
/// inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Service objects over the configured store
    pub services: Services,

    /// Session token verifier
    pub verifier: Arc<SessionVerifier>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    ///
    /// # Errors
    ///
    /// Returns an error if the configured session key cannot be loaded
    pub fn new(store: Arc<dyn Store>, config: Config) -> Result<Self, SessionError> {
        let verifier = SessionVerifier::new(
            config.session.key.clone(),
            config.session.issuer.clone(),
        )?;

        Ok(Self {
            services: Services::new(store),
            verifier: Arc::new(verifier),
            config: Arc::new(config),
        })
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                         # Health check (public)
/// └── /api/                           # Session required
///     ├── GET, POST     /habits
///     ├── PATCH, DELETE /habits/:id
///     ├── GET, POST     /todos
///     ├── PATCH, DELETE /todos/:id
///     ├── GET, POST     /timer-settings
///     ├── GET           /test-connection
///     └── GET           /auth-debug
/// ```
///
/// # Middleware Stack
///
/// Applied in order (outermost first):
/// 1. Security headers
/// 2. CORS
/// 3. Logging (tower-http TraceLayer)
/// 4. Session authentication (`/api` only), before any body is read
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let api_routes = Router::new()
        .route(
            "/habits",
            get(routes::habits::list_habits).post(routes::habits::create_habit),
        )
        .route(
            "/habits/:id",
            patch(routes::habits::update_habit).delete(routes::habits::delete_habit),
        )
        .route(
            "/todos",
            get(routes::todos::list_todos).post(routes::todos::create_todo),
        )
        .route(
            "/todos/:id",
            patch(routes::todos::update_todo).delete(routes::todos::delete_todo),
        )
        .route(
            "/timer-settings",
            get(routes::timer_settings::get_timer_settings)
                .post(routes::timer_settings::upsert_timer_settings),
        )
        .route("/test-connection", get(routes::diagnostics::test_connection))
        .route("/auth-debug", get(routes::diagnostics::auth_debug))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_auth_layer,
        ));

    let cors = cors_layer(&state.config);
    let production = state.config.api.production;

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(production))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.api.cors_origins.iter().any(|origin| origin == "*") {
        // Development mode: permissive CORS
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// Session authentication middleware layer
///
/// Verifies the session token from the Authorization header or the session
/// cookie, then injects `AuthContext` into request extensions. Rejected
/// requests never reach a handler, so nothing is mutated.
async fn session_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth = authenticate(req.headers(), &state.verifier)?;

    tracing::debug!(user_id = %auth.user_id, "Session verified");
    req.extensions_mut().insert(auth);

    Ok(next.run(req).await)
}
