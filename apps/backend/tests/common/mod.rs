//! Common test utilities for integration tests.
//!
//! Everything runs against the in-memory stores, so no external services
//! are needed.

#![allow(dead_code)]

pub mod fixtures;

use axum::http::HeaderValue;
use axum::Router;
use axum_test::TestServer;
use uuid::Uuid;

use learn_backend::config::Config;
use learn_backend::{router, AppState};

/// Test context holding the application state and router.
pub struct TestContext {
    pub state: AppState,
    app: Router,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let state = AppState::new(&config);
        let app = router(state.clone());
        Self { state, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Build a test server over the router.
    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }

    /// Register a user directly and return its ID and token.
    pub fn create_test_user(&self, name: Option<&str>) -> (Uuid, String) {
        let user = self
            .state
            .db
            .create_user(name)
            .expect("Failed to create test user");
        (user.id, user.token)
    }

    /// Format authorization header value.
    pub fn auth_header_value(token: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
    }
}

/// Create a study set through the API and return its JSON body.
pub async fn create_study_set(
    server: &TestServer,
    token: &str,
    body: &serde_json::Value,
) -> serde_json::Value {
    let response = server
        .post("/api/study-sets")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(token),
        )
        .json(body)
        .await;
    response.assert_status_ok();
    response.json()
}

/// Start a learn session through the API and return its JSON body.
pub async fn create_learn_session(
    server: &TestServer,
    token: &str,
    body: &serde_json::Value,
) -> serde_json::Value {
    let response = server
        .post("/api/learn-sessions")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(token),
        )
        .json(body)
        .await;
    response.assert_status_ok();
    response.json()
}
