pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use review_core::{MemoryReviewStore, ReviewScheduler};

use crate::db::Storage;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
    pub scheduler: Arc<ReviewScheduler<MemoryReviewStore>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(Storage::new()),
            scheduler: Arc::new(ReviewScheduler::new(MemoryReviewStore::new())),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Account routes
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/identity", post(routes::auth::identity_sign_in))
        // Flashcard set routes
        .route("/api/flashcard-sets", post(routes::sets::create))
        .route("/api/flashcard-sets/:set_id", get(routes::sets::get))
        .route("/api/flashcard-sets/:set_id", delete(routes::sets::delete))
        .route(
            "/api/users/:user_id/flashcard-sets",
            get(routes::sets::list_by_user),
        )
        // Quiz score routes
        .route("/api/quiz-scores", post(routes::scores::create))
        .route(
            "/api/users/:user_id/quiz-scores",
            get(routes::scores::list_by_user),
        )
        // Review routes
        .route("/api/reviews/feedback", post(routes::reviews::submit_feedback))
        .route("/api/reviews/due", get(routes::reviews::due))
        .route("/api/reviews/upcoming", get(routes::reviews::upcoming))
        .route("/api/reviews/stats", get(routes::reviews::stats))
        .route("/api/reviews/:card_id", get(routes::reviews::get_record))
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::new();

    let app = router(state).layer(
        tower::ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
