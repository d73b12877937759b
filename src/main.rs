/// Weather proxy entry point
mod clients;
mod config;
mod domain;
mod errors;
mod formatter;
mod handlers;
mod locations;
mod routes;
mod services;
mod utils;

use crate::clients::TomorrowClient;
use crate::config::AppConfig;
use crate::formatter::ForecastFormatter;
use crate::handlers::AppState;
use crate::locations::LocationTable;
use crate::routes::build_router;
use crate::services::ForecastService;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env()?;
    info!(
        "Configuration loaded (timezone {}, upstream timeout {:?})",
        config.timezone, config.upstream_timeout
    );
    if config.api_key.is_none() {
        warn!("TOMORROW_API_KEY is not set, weather requests will fail");
    }

    let locations = Arc::new(LocationTable::builtin());
    info!("Known locations: {}", locations.names().join(", "));

    let client = TomorrowClient::new(config.weather_api_url.clone(), config.upstream_timeout)?;
    info!("Forecasts will be fetched from {}", client.base_url());

    let forecast_service = Arc::new(ForecastService::new(
        locations,
        client,
        ForecastFormatter::new(config.timezone),
        config.api_key.clone(),
    ));

    let state = AppState { forecast_service };

    // Build router
    let app = build_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("weather_proxy listening on {}", addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
