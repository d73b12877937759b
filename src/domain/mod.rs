/// Domain models for the application
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Number of daily entries rendered into the display forecast
pub const FORECAST_DAYS: usize = 5;
/// Number of hourly entries rendered, the current hour included
pub const FORECAST_HOURS: usize = 26;

/// Named point the service can forecast for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Tomorrow.io forecast payload
#[derive(Debug, Clone, Deserialize)]
pub struct RawForecast {
    #[serde(default)]
    pub timelines: Timelines,
    #[serde(default)]
    pub alerts: Option<Value>,
}

impl RawForecast {
    /// Alert content is not interpreted, only its presence
    pub fn has_alerts(&self) -> bool {
        match &self.alerts {
            None | Some(Value::Null) => false,
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::Object(fields)) => !fields.is_empty(),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Number(n)) => n.as_f64().map_or(true, |x| x != 0.0),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Timelines {
    #[serde(default)]
    pub hourly: Vec<HourEntry>,
    #[serde(default)]
    pub daily: Vec<DayEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HourEntry {
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub values: HourValues,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourValues {
    pub temperature: Option<f64>,
    pub temperature_apparent: Option<f64>,
    pub weather_code: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
    #[serde(alias = "pressureSeaLevel")]
    pub pressure_surface_level: Option<f64>,
    pub humidity: Option<f64>,
    pub visibility: Option<f64>,
    pub uv_index: Option<f64>,
    pub precipitation_probability: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DayEntry {
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub values: DayValues,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayValues {
    pub sunrise_time: Option<DateTime<Utc>>,
    pub sunset_time: Option<DateTime<Utc>>,
    pub temperature_min: Option<f64>,
    pub temperature_max: Option<f64>,
    pub weather_code_max: Option<f64>,
    pub weather_code_min: Option<f64>,
    pub weather_code: Option<f64>,
}

impl DayValues {
    pub fn day_code(&self) -> Option<f64> {
        self.weather_code_max.or(self.weather_code)
    }

    pub fn night_code(&self) -> Option<f64> {
        self.weather_code_min.or(self.weather_code)
    }
}

/// Current conditions block of the display forecast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub name: String,
    pub temperature: String,
    pub feels_like: String,
    pub weather_condition: String,
    pub wind_speed: String,
    pub pressure: String,
    pub humidity: String,
    pub warnings: String,
    pub air_quality: String,
    pub visibility: String,
    pub uf_index: String,
    pub moon: String,
    pub data: String,
    pub sunrise: String,
    pub sunset: String,
}

/// One day of the forecast, `number` counts from 1
#[derive(Debug, Clone, PartialEq)]
pub struct DayForecast {
    pub number: usize,
    pub condition_day: String,
    pub condition_night: String,
    pub temperature_day: String,
    pub temperature_night: String,
    /// Only filled for days after the second one
    pub weekday: Option<String>,
}

/// One hour of the forecast, `index` 0 is the current hour
#[derive(Debug, Clone, PartialEq)]
pub struct HourForecast {
    pub index: usize,
    pub temperature: String,
    pub time: String,
    pub wind: String,
    pub rain_prob: String,
    pub pressure: String,
    pub uf_index: String,
    pub humidity: String,
    pub condition: String,
}

impl HourForecast {
    fn key_suffix(&self) -> String {
        if self.index == 0 {
            "now".to_string()
        } else {
            self.index.to_string()
        }
    }
}

/// Display-ready forecast, serialized as one flat object of strings
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayForecast {
    pub current: CurrentConditions,
    pub days: Vec<DayForecast>,
    pub hours: Vec<HourForecast>,
}

impl Serialize for DisplayForecast {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let c = &self.current;
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &c.name)?;
        map.serialize_entry("temperature", &c.temperature)?;
        map.serialize_entry("feels_like", &c.feels_like)?;
        map.serialize_entry("weather_condition", &c.weather_condition)?;
        map.serialize_entry("wind_speed", &c.wind_speed)?;
        map.serialize_entry("pressure", &c.pressure)?;
        map.serialize_entry("humidity", &c.humidity)?;
        map.serialize_entry("warnings", &c.warnings)?;
        map.serialize_entry("air_quality", &c.air_quality)?;
        map.serialize_entry("visibility", &c.visibility)?;
        map.serialize_entry("uf_index", &c.uf_index)?;
        map.serialize_entry("moon", &c.moon)?;
        map.serialize_entry("data", &c.data)?;
        map.serialize_entry("sunrise", &c.sunrise)?;
        map.serialize_entry("sunset", &c.sunset)?;

        for day in &self.days {
            let i = day.number;
            map.serialize_entry(&format!("condition_day_day{i}"), &day.condition_day)?;
            map.serialize_entry(&format!("condition_night_day{i}"), &day.condition_night)?;
            map.serialize_entry(&format!("temperature_day_day{i}"), &day.temperature_day)?;
            map.serialize_entry(&format!("temperature_night_day{i}"), &day.temperature_night)?;
            if let Some(weekday) = &day.weekday {
                map.serialize_entry(&format!("day{i}"), weekday)?;
            }
        }

        for hour in &self.hours {
            let s = hour.key_suffix();
            map.serialize_entry(&format!("temperature_hour_{s}"), &hour.temperature)?;
            map.serialize_entry(&format!("time_hour_{s}"), &hour.time)?;
            map.serialize_entry(&format!("wind_hour_{s}"), &hour.wind)?;
            map.serialize_entry(&format!("rain_prob_hour_{s}"), &hour.rain_prob)?;
            map.serialize_entry(&format!("pressure_hour_{s}"), &hour.pressure)?;
            map.serialize_entry(&format!("uf_index_hour_{s}"), &hour.uf_index)?;
            map.serialize_entry(&format!("humidity_hour_{s}"), &hour.humidity)?;
            map.serialize_entry(&format!("condition_hour_{s}"), &hour.condition)?;
        }

        map.end()
    }
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}
