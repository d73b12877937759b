/// Business logic services layer
use crate::clients::TomorrowClient;
use crate::domain::DisplayForecast;
use crate::errors::{ApiError, ApiResult};
use crate::formatter::ForecastFormatter;
use crate::locations::LocationTable;
use std::sync::Arc;
use tracing::{info, warn};

/// Resolve, fetch and format a forecast for one request
pub struct ForecastService {
    locations: Arc<LocationTable>,
    client: TomorrowClient,
    formatter: ForecastFormatter,
    api_key: Option<String>,
}

impl ForecastService {
    pub fn new(
        locations: Arc<LocationTable>,
        client: TomorrowClient,
        formatter: ForecastFormatter,
        api_key: Option<String>,
    ) -> Self {
        Self {
            locations,
            client,
            formatter,
            api_key,
        }
    }

    /// Forecast for a city from the location table
    pub async fn forecast_for(&self, city: &str) -> ApiResult<DisplayForecast> {
        let location = self
            .locations
            .resolve(city)
            .ok_or_else(|| ApiError::NotFound(city.to_string()))?;

        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ApiError::Configuration("TOMORROW_API_KEY is not set".to_string())
        })?;

        let raw = self.client.fetch_forecast(location, api_key).await?;
        let forecast = self.formatter.format(city, &raw);

        match &forecast {
            Ok(f) => info!(
                "Forecast for {} built ({} days, {} hours)",
                city,
                f.days.len(),
                f.hours.len()
            ),
            Err(e) => warn!("Forecast for {} rejected: {}", city, e),
        }

        forecast
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service(server: &MockServer, api_key: Option<&str>) -> ForecastService {
        ForecastService::new(
            Arc::new(LocationTable::builtin()),
            TomorrowClient::new(server.uri(), Duration::from_secs(5)).unwrap(),
            ForecastFormatter::default(),
            api_key.map(str::to_string),
        )
    }

    fn forecast_body() -> serde_json::Value {
        serde_json::json!({
            "timelines": {
                "hourly": [{
                    "time": "2024-06-01T09:00:00Z",
                    "values": {"temperature": 20.4, "weatherCode": 1000}
                }],
                "daily": [{
                    "time": "2024-06-01T03:00:00Z",
                    "values": {"weatherCode": 1000}
                }]
            }
        })
    }

    #[tokio::test]
    async fn test_unknown_city_never_calls_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
            .expect(0)
            .mount(&server)
            .await;

        let err = service(&server, Some("secret"))
            .forecast_for("Atlantis")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_missing_key_never_calls_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
            .expect(0)
            .mount(&server)
            .await;

        let err = service(&server, None)
            .forecast_for("Solntsevo")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_forecast_for_known_city() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
            .expect(1)
            .mount(&server)
            .await;

        let forecast = service(&server, Some("secret"))
            .forecast_for("Solntsevo")
            .await
            .unwrap();
        assert_eq!(forecast.current.name, "Solntsevo");
        assert_eq!(forecast.current.temperature, "20°");
        assert_eq!(forecast.current.weather_condition, "Ясно");
    }

    #[tokio::test]
    async fn test_empty_upstream_timelines_fail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "timelines": {"hourly": [], "daily": []}
            })))
            .mount(&server)
            .await;

        let err = service(&server, Some("secret"))
            .forecast_for("Moscow")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MalformedUpstreamData(_)));
    }

    #[tokio::test]
    async fn test_upstream_failure_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let err = service(&server, Some("secret"))
            .forecast_for("Vnukovo")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::UpstreamTransport(_)));
    }
}
