/// Reshapes a raw Tomorrow.io forecast into the display forecast
use crate::domain::{
    CurrentConditions, DayEntry, DayForecast, DisplayForecast, HourEntry, HourForecast,
    HourValues, RawForecast, FORECAST_DAYS, FORECAST_HOURS,
};
use crate::errors::{ApiError, ApiResult};
use crate::utils::{
    clock_label, compass, condition_text, hpa_to_mmhg, or_missing, temperature, weekday_short,
    MISSING,
};
use chrono_tz::Tz;
use serde::Deserialize;
use serde_json::Value;

pub const LABEL_NOW: &str = "Сейчас";
pub const LABEL_SUNRISE: &str = "Восход";
pub const LABEL_SUNSET: &str = "Закат";
pub const WARNINGS_ACTIVE: &str = "Есть предупреждения";
pub const WARNINGS_NONE: &str = "Нет предупреждений";
/// Value of fields that have no upstream source yet
pub const NO_DATA: &str = "Нет данных";

/// Days from this number on also carry a weekday label
const FIRST_WEEKDAY_DAY: usize = 3;

/// Pure transformation, every clock value rendered in `tz`
#[derive(Debug, Clone, Copy)]
pub struct ForecastFormatter {
    tz: Tz,
}

impl ForecastFormatter {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Validate and format an upstream JSON body
    pub fn format(&self, location_name: &str, raw: &Value) -> ApiResult<DisplayForecast> {
        let forecast = RawForecast::deserialize(raw).map_err(|e| {
            ApiError::MalformedUpstreamData(format!("unexpected forecast shape: {}", e))
        })?;
        self.format_raw(location_name, &forecast)
    }

    pub fn format_raw(
        &self,
        location_name: &str,
        forecast: &RawForecast,
    ) -> ApiResult<DisplayForecast> {
        let hourly = &forecast.timelines.hourly;
        let daily = &forecast.timelines.daily;

        let now = hourly.first().ok_or_else(|| {
            ApiError::MalformedUpstreamData("hourly timeline is empty".to_string())
        })?;
        let today = daily.first().ok_or_else(|| {
            ApiError::MalformedUpstreamData("daily timeline is empty".to_string())
        })?;

        let sunrise = today.values.sunrise_time.map(|t| clock_label(t, self.tz));
        let sunset = today.values.sunset_time.map(|t| clock_label(t, self.tz));

        let warnings = if forecast.has_alerts() {
            WARNINGS_ACTIVE
        } else {
            WARNINGS_NONE
        };

        let v = &now.values;
        let current = CurrentConditions {
            name: location_name.to_string(),
            temperature: or_missing(v.temperature, temperature),
            feels_like: or_missing(v.temperature_apparent, temperature),
            weather_condition: condition(v.weather_code),
            wind_speed: wind(v),
            pressure: or_missing(v.pressure_surface_level, pressure),
            humidity: or_missing(v.humidity, percent),
            warnings: warnings.to_string(),
            air_quality: NO_DATA.to_string(),
            visibility: or_missing(v.visibility, |km| format!("{} км", km.trunc() as i64)),
            uf_index: or_missing(v.uv_index, whole),
            moon: NO_DATA.to_string(),
            data: NO_DATA.to_string(),
            sunrise: sunrise.clone().unwrap_or_else(|| MISSING.to_string()),
            sunset: sunset.clone().unwrap_or_else(|| MISSING.to_string()),
        };

        let days = daily
            .iter()
            .take(FORECAST_DAYS)
            .enumerate()
            .map(|(i, entry)| self.day(i + 1, entry))
            .collect();

        let hours = hourly
            .iter()
            .take(FORECAST_HOURS)
            .enumerate()
            .map(|(i, entry)| self.hour(i, entry, sunrise.as_deref(), sunset.as_deref()))
            .collect();

        Ok(DisplayForecast {
            current,
            days,
            hours,
        })
    }

    fn day(&self, number: usize, entry: &DayEntry) -> DayForecast {
        let v = &entry.values;
        DayForecast {
            number,
            condition_day: condition(v.day_code()),
            condition_night: condition(v.night_code()),
            temperature_day: or_missing(v.temperature_max, temperature),
            temperature_night: or_missing(v.temperature_min, temperature),
            weekday: (number >= FIRST_WEEKDAY_DAY)
                .then(|| weekday_short(entry.time, self.tz).to_string()),
        }
    }

    fn hour(
        &self,
        index: usize,
        entry: &HourEntry,
        sunrise: Option<&str>,
        sunset: Option<&str>,
    ) -> HourForecast {
        let v = &entry.values;
        HourForecast {
            index,
            temperature: or_missing(v.temperature, temperature),
            time: self.hour_label(index, entry, sunrise, sunset),
            wind: wind(v),
            rain_prob: or_missing(v.precipitation_probability, percent),
            pressure: or_missing(v.pressure_surface_level, pressure),
            uf_index: or_missing(v.uv_index, whole),
            humidity: or_missing(v.humidity, percent),
            condition: condition(v.weather_code),
        }
    }

    fn hour_label(
        &self,
        index: usize,
        entry: &HourEntry,
        sunrise: Option<&str>,
        sunset: Option<&str>,
    ) -> String {
        if index == 0 {
            return LABEL_NOW.to_string();
        }
        let label = clock_label(entry.time, self.tz);
        if sunrise == Some(label.as_str()) {
            LABEL_SUNRISE.to_string()
        } else if sunset == Some(label.as_str()) {
            LABEL_SUNSET.to_string()
        } else {
            label
        }
    }
}

impl Default for ForecastFormatter {
    fn default() -> Self {
        Self::new(chrono_tz::Europe::Moscow)
    }
}

fn condition(code: Option<f64>) -> String {
    condition_text(code.map_or(-1, |c| c as i64)).to_string()
}

fn wind(v: &HourValues) -> String {
    match (v.wind_speed, v.wind_direction) {
        (Some(speed), Some(dir)) => format!("{} м/с, {}", speed.trunc() as i64, compass(dir)),
        (Some(speed), None) => format!("{} м/с", speed.trunc() as i64),
        _ => MISSING.to_string(),
    }
}

fn pressure(hpa: f64) -> String {
    format!("{} мм рт. ст.", hpa_to_mmhg(hpa))
}

fn percent(value: f64) -> String {
    format!("{}%", value.trunc() as i64)
}

fn whole(value: f64) -> String {
    (value.trunc() as i64).to_string()
}
