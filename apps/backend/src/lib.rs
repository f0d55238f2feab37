pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use learn_core::{LearnService, MemoryStore};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub learn: Arc<LearnService<MemoryStore>>,
    pub default_mastery_goal: u32,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            db: Arc::new(Database::new()),
            learn: Arc::new(LearnService::new(MemoryStore::new())),
            default_mastery_goal: config.default_mastery_goal,
        }
    }
}

/// Build the router with all routes.
pub fn router(state: AppState) -> Router {
    let protected_routes = Router::new()
        // Study set routes
        .route(
            "/api/study-sets",
            get(routes::study_sets::list).post(routes::study_sets::create),
        )
        .route(
            "/api/study-sets/{id}",
            get(routes::study_sets::get)
                .put(routes::study_sets::update)
                .delete(routes::study_sets::delete),
        )
        .route(
            "/api/study-sets/{id}/flashcards",
            post(routes::study_sets::add_flashcard),
        )
        .route(
            "/api/study-sets/{id}/flashcards/bulk",
            post(routes::study_sets::bulk_import),
        )
        // Flashcard routes
        .route(
            "/api/flashcards/{id}",
            put(routes::flashcards::update).delete(routes::flashcards::delete),
        )
        // Folder routes
        .route(
            "/api/folders",
            get(routes::folders::list).post(routes::folders::create),
        )
        .route(
            "/api/folders/{id}",
            get(routes::folders::get)
                .put(routes::folders::update)
                .delete(routes::folders::delete),
        )
        // Study session routes
        .route(
            "/api/study-sessions",
            get(routes::study_sessions::list).post(routes::study_sessions::create),
        )
        // Learn session routes
        .route("/api/learn-sessions", post(routes::learn::create))
        .route(
            "/api/learn-sessions/{id}",
            get(routes::learn::get)
                .patch(routes::learn::update)
                .delete(routes::learn::delete),
        )
        .route("/api/learn-sessions/{id}/next", get(routes::learn::next))
        .route(
            "/api/learn-sessions/{id}/restart",
            post(routes::learn::restart),
        )
        .route(
            "/api/learn-sessions/{id}/review-wrong",
            post(routes::learn::review_wrong),
        )
        // Answer routes
        .route("/api/answers/check", post(routes::answers::check))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/users/register", post(routes::users::register))
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::new(&config);
    let app = router(state);

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
