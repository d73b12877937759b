/// Unit conversions and Russian display labels
use chrono::{DateTime, Datelike, Utc, Weekday};
use chrono_tz::Tz;

/// Placeholder for any metric the payload does not carry
pub const MISSING: &str = "-";

const MMHG_PER_HPA: f64 = 0.750062;

const COMPASS: [&str; 8] = ["С", "СВ", "В", "ЮВ", "Ю", "ЮЗ", "З", "СЗ"];

/// Map a Tomorrow.io weather code to its Russian description
pub fn condition_text(code: i64) -> &'static str {
    match code {
        1000 => "Ясно",
        1001 => "Облачно",
        1100 => "Переменная облачность",
        1101 => "Пасмурно",
        1102 => "Туман",
        4000 => "Небольшой дождь",
        4001 => "Умеренный дождь",
        4200 => "Сильный дождь",
        4201 => "Ледяной дождь",
        5000 => "Небольшой снег",
        5001 => "Сильный снег",
        5100 => "Мокрый снег",
        8000 => "Гроза",
        _ => "Неизвестно",
    }
}

/// Convert a bearing in degrees to one of eight compass points
pub fn compass(degrees: f64) -> &'static str {
    let sector = (degrees / 45.0).round() as i64;
    COMPASS[sector.rem_euclid(8) as usize]
}

/// Hectopascals to millimetres of mercury, truncated
pub fn hpa_to_mmhg(hpa: f64) -> i64 {
    (hpa * MMHG_PER_HPA).trunc() as i64
}

/// Truncated temperature with a degree sign
pub fn temperature(celsius: f64) -> String {
    format!("{}°", celsius.trunc() as i64)
}

/// `HH:MM` clock label in the display timezone
pub fn clock_label(at: DateTime<Utc>, tz: Tz) -> String {
    at.with_timezone(&tz).format("%H:%M").to_string()
}

/// Two-letter Russian weekday of the instant in the display timezone
pub fn weekday_short(at: DateTime<Utc>, tz: Tz) -> &'static str {
    match at.with_timezone(&tz).weekday() {
        Weekday::Mon => "Пн",
        Weekday::Tue => "Вт",
        Weekday::Wed => "Ср",
        Weekday::Thu => "Чт",
        Weekday::Fri => "Пт",
        Weekday::Sat => "Сб",
        Weekday::Sun => "Вс",
    }
}

/// Render an optional metric, falling back to [`MISSING`]
pub fn or_missing<F>(value: Option<f64>, render: F) -> String
where
    F: FnOnce(f64) -> String,
{
    value.map(render).unwrap_or_else(|| MISSING.to_string())
}
