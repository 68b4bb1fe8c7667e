//! Common test utilities for integration tests
//!
//! This module provides shared infrastructure for integration tests:
//! - An app over an in-memory store (no database needed)
//! - Session token generation
//! - Request helpers

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use habitrack_api::app::{build_router, AppState};
use habitrack_api::config::{ApiConfig, Config, SessionConfig};
use habitrack_shared::auth::session::{create_session_token, SessionClaims, SessionKey};
use habitrack_shared::store::{memory::MemoryStore, Store};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Test context containing all necessary resources
pub struct TestContext {
    pub app: Router,
    pub store: Arc<dyn Store>,
    pub config: Config,
}

impl TestContext {
    /// App over a fresh in-memory store
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// App over a given store
    pub fn with_store(store: Arc<dyn Store>) -> Self {
        let config = test_config();
        let state = AppState::new(store.clone(), config.clone()).unwrap();

        Self {
            app: build_router(state),
            store,
            config,
        }
    }

    /// Session token for a user, valid for an hour
    pub fn token_for(&self, user_id: &str) -> String {
        create_session_token(&SessionClaims::new(user_id), TEST_SECRET).unwrap()
    }

    /// Sends a request as `user_id` (or anonymously) and returns status and JSON body
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        user_id: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(user_id) = user_id {
            builder = builder.header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.token_for(user_id)),
            );
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send_raw(request).await
    }

    /// Sends a prepared request
    pub async fn send_raw(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
            production: false,
        },
        database: None,
        session: SessionConfig {
            key: SessionKey::Hmac(TEST_SECRET.to_string()),
            issuer: None,
        },
    }
}
