//! Common test utilities and fixtures for integration tests.
//!
//! State is in-memory, so every test builds its own isolated context and
//! no external services are required.

pub mod fixtures;

use axum::Router;

use studycards_backend::{router, AppState};

/// Test context owning the application state and router.
pub struct TestContext {
    pub state: AppState,
    app: Router,
}

impl TestContext {
    pub fn new() -> Self {
        let state = AppState::new();
        let app = router(state.clone());
        Self { state, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Create a user directly in storage and return its id.
    pub fn create_test_user(&self, username: &str) -> i64 {
        self.state
            .storage
            .create_user(
                username.to_string(),
                format!("{}@example.com", username),
                None,
                None,
                None,
                None,
            )
            .id
    }
}
