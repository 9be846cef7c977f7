//! Projection of a finished search onto display strings.

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::{CurrentConditions, IconKey, WeatherPresentation};

/// Everything the result panel shows, already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub city: String,
    pub country: String,
    pub date: String,
    /// Nearest whole degree Celsius, no unit.
    pub temperature: String,
    /// Nearest whole degree Celsius, no unit.
    pub feels_like: String,
    pub description: String,
    pub icon: IconKey,
    pub humidity: String,
    pub wind_speed: String,
}

impl ResultView {
    /// "City, Country", or just the city when the provider gave no country.
    pub fn location(&self) -> String {
        if self.country.is_empty() {
            self.city.clone()
        } else {
            format!("{}, {}", self.city, self.country)
        }
    }
}

pub fn render(
    city: &str,
    country: &str,
    conditions: &CurrentConditions,
    presentation: &WeatherPresentation,
    today: NaiveDate,
) -> ResultView {
    ResultView {
        city: city.to_string(),
        country: country.to_string(),
        date: format_date(today),
        temperature: round_degrees(conditions.temperature_c),
        feels_like: round_degrees(conditions.apparent_temperature_c),
        description: presentation.description.to_string(),
        icon: presentation.icon,
        humidity: format!("{}%", conditions.relative_humidity_pct),
        wind_speed: format!("{} km/h", conditions.wind_speed_kmh),
    }
}

/// en-US long weekday, short month, day: "Wednesday, Oct 15".
pub fn format_date(date: NaiveDate) -> String {
    date.format("%A, %b %-d").to_string()
}

// Goes through i64 so that -0.4 renders as "0", not "-0".
fn round_degrees(value: f64) -> String {
    (value.round() as i64).to_string()
}
