/// Application configuration module
use chrono_tz::Tz;
use std::env;
use std::time::Duration;

pub const DEFAULT_WEATHER_API_URL: &str = "https://api.tomorrow.io/v4/weather/forecast";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Tomorrow.io credential; requests fail with a configuration error while unset
    pub api_key: Option<String>,
    pub port: u16,
    pub weather_api_url: String,
    pub upstream_timeout: Duration,
    pub timezone: Tz,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("TOMORROW_API_KEY").filter(|k| !k.trim().is_empty());

        let port = parse_or("PORT", &lookup, DEFAULT_PORT);

        let weather_api_url = lookup("WEATHER_API_URL")
            .unwrap_or_else(|| DEFAULT_WEATHER_API_URL.to_string());

        let upstream_timeout =
            Duration::from_secs(parse_or("UPSTREAM_TIMEOUT_SECONDS", &lookup, 10u64));

        let timezone = match lookup("DISPLAY_TIMEZONE") {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|e| anyhow::anyhow!("invalid DISPLAY_TIMEZONE '{}': {}", name, e))?,
            None => chrono_tz::Europe::Moscow,
        };

        Ok(Self {
            api_key,
            port,
            weather_api_url,
            upstream_timeout,
            timezone,
        })
    }
}

fn parse_or<F, T>(key: &str, lookup: &F, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}
