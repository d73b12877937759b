/// External API clients module
use crate::domain::Location;
use crate::errors::{ApiError, ApiResult};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(timeout)
            .user_agent(concat!("weather-proxy/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

/// Tomorrow.io forecast client
pub struct TomorrowClient {
    http_client: HttpClient,
    base_url: String,
}

impl TomorrowClient {
    pub fn new(base_url: String, timeout: Duration) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(timeout)?,
            base_url,
        })
    }

    /// Get base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch hourly and daily forecast for a point
    pub async fn fetch_forecast(&self, location: &Location, api_key: &str) -> ApiResult<Value> {
        let point = format!("{},{}", location.latitude, location.longitude);
        debug!("Requesting forecast for {} from {}", point, self.base_url);

        let resp = self
            .http_client
            .get_client()
            .get(&self.base_url)
            .query(&[
                ("location", point.as_str()),
                ("apikey", api_key),
                ("timesteps", "1h,1d"),
                ("units", "metric"),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error body".to_string());
            return Err(ApiError::UpstreamTransport(format!(
                "forecast request failed with status {}: {}",
                status, body
            )));
        }

        let json = resp.json().await?;
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SOLNTSEVO: Location = Location {
        latitude: 55.6371,
        longitude: 37.3913,
    };

    fn client(server: &MockServer) -> TomorrowClient {
        let url = format!("{}/v4/weather/forecast", server.uri());
        TomorrowClient::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_forecast_sends_location_and_key() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v4/weather/forecast"))
            .and(query_param("location", "55.6371,37.3913"))
            .and(query_param("apikey", "secret"))
            .and(query_param("timesteps", "1h,1d"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "timelines": {"hourly": [], "daily": []}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let body = client(&server)
            .fetch_forecast(&SOLNTSEVO, "secret")
            .await
            .unwrap();
        assert!(body["timelines"]["hourly"].is_array());
    }

    #[tokio::test]
    async fn test_fetch_forecast_error_status_keeps_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_forecast(&SOLNTSEVO, "wrong")
            .await
            .unwrap_err();
        match err {
            ApiError::UpstreamTransport(msg) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("Invalid API key"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_forecast_invalid_json() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_forecast(&SOLNTSEVO, "secret")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::UpstreamTransport(_)));
    }

    #[tokio::test]
    async fn test_fetch_forecast_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let client = TomorrowClient::new(server.uri(), Duration::from_millis(200)).unwrap();
        let err = client.fetch_forecast(&SOLNTSEVO, "secret").await.unwrap_err();
        assert!(matches!(err, ApiError::UpstreamTransport(_)));
    }

    #[tokio::test]
    async fn test_transport_error_hides_api_key() {
        // Nothing listens on the discard port
        let client =
            TomorrowClient::new("http://127.0.0.1:9/forecast".to_string(), Duration::from_secs(2))
                .unwrap();
        let err = client
            .fetch_forecast(&SOLNTSEVO, "SUPERSECRETKEY")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::UpstreamTransport(_)));
        assert!(!err.to_string().contains("SUPERSECRETKEY"));
    }

    #[tokio::test]
    async fn test_decode_error_hides_api_key() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_forecast(&SOLNTSEVO, "SUPERSECRETKEY")
            .await
            .unwrap_err();
        assert!(!err.to_string().contains("SUPERSECRETKEY"));
    }
}
