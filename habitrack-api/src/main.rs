//! # Habitrack API Server
//!
//! REST backend for the Habitrack productivity app.
//!
//! ## Architecture
//!
//! The API server is built with Axum and provides:
//! - Habit and todo CRUD, scoped to the signed-in user
//! - Pomodoro timer settings with defaults
//! - Session verification for tokens issued by the hosted auth provider
//! - Connection and session diagnostics
//!
//! Without `DATABASE_URL` the server falls back to an in-memory store, which
//! is handy for local frontend work but loses everything on restart.
//!
//! ## Usage
//!
//! ```bash
//! SESSION_SECRET=... cargo run -p habitrack-api
//! ```

use std::{future::Future, sync::Arc};

use anyhow::Context;
use habitrack_api::{
    app::{build_router, AppState},
    config::Config,
};
use habitrack_shared::{
    db::{
        migrations::{get_migration_status, run_migrations},
        pool::{close_pool, create_pool, DatabaseConfig},
    },
    store::{memory::MemoryStore, postgres::PgStore, Store},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "habitrack_api=debug,habitrack_shared=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    init_tracing();

    tracing::info!(
        "Habitrack API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let (store, pool): (Arc<dyn Store>, _) = match &config.database {
        Some(db) => {
            let pool = create_pool(DatabaseConfig {
                url: db.url.clone(),
                max_connections: db.max_connections,
                ..Default::default()
            })
            .await
            .context("Failed to connect to database")?;

            if db.run_migrations {
                run_migrations(&pool)
                    .await
                    .context("Failed to run database migrations")?;
            }

            match get_migration_status(&pool).await {
                Ok(status) => tracing::info!(
                    applied = status.applied_migrations,
                    latest = ?status.latest_version,
                    "Database ready"
                ),
                Err(e) => tracing::warn!(error = %e, "Could not read migration status"),
            }

            (Arc::new(PgStore::new(pool.clone())) as Arc<dyn Store>, Some(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory store, data will not persist");
            (Arc::new(MemoryStore::new()) as Arc<dyn Store>, None)
        }
    };

    tracing::info!(
        session_key = config.session.key.kind(),
        issuer = config.session.issuer.as_deref().unwrap_or("<any>"),
        "Session verification configured"
    );

    let bind_address = config.bind_address();
    let state = AppState::new(store, config).context("Invalid session key")?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        close_pool(&pool).await;
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Text logs by default, JSON when `LOG_FORMAT=json`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = wait_for_signal("Ctrl+C", tokio::signal::ctrl_c());

    #[cfg(unix)]
    let terminate = wait_for_signal("SIGTERM", async {
        let mut signal =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
        signal.recv().await;
        Ok::<(), std::io::Error>(())
    });

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections...");
}

/// Resolves when the signal arrives; never resolves if the handler could not
/// be installed, so the server keeps running.
async fn wait_for_signal<F, E>(name: &str, signal: F)
where
    F: Future<Output = Result<(), E>>,
    E: std::fmt::Display,
{
    if let Err(e) = signal.await {
        tracing::error!(error = %e, "Failed to listen for {}", name);
        std::future::pending::<()>().await;
    }
}
