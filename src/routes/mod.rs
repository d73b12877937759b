/// Application routes configuration
use crate::handlers::{get_weather, health, root, AppState};
use axum::{routing::get, Router};

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/weather/:city", get(get_weather))
        .with_state(state)
}
