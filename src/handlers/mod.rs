/// HTTP request handlers
use crate::domain::{DisplayForecast, Health};
use crate::errors::ApiError;
use crate::services::ForecastService;
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::error;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub forecast_service: Arc<ForecastService>,
}

/// Greeting handler
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello, Railway!" }))
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

/// Display forecast for a known city
pub async fn get_weather(
    Path(city): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DisplayForecast>, ApiError> {
    match state.forecast_service.forecast_for(&city).await {
        Ok(forecast) => Ok(Json(forecast)),
        Err(e) => {
            if !matches!(e, ApiError::NotFound(_)) {
                error!("Weather request for {} failed: {}", city, e);
            }
            Err(e)
        }
    }
}
