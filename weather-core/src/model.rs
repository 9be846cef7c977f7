use serde::{Deserialize, Serialize};

/// A city name as typed by the user, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Returns `None` for empty or whitespace-only input.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// First geocoding match for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoResult {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// The provider's "current" block, unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub apparent_temperature_c: f64,
    pub relative_humidity_pct: i64,
    pub wind_speed_kmh: f64,
    pub weather_code: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconKey {
    Sun,
    CloudSun,
    Smog,
    CloudRain,
    CloudShowersHeavy,
    Snowflake,
    CloudShowersWater,
    CloudBolt,
    Cloud,
}

impl IconKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconKey::Sun => "sun",
            IconKey::CloudSun => "cloud-sun",
            IconKey::Smog => "smog",
            IconKey::CloudRain => "cloud-rain",
            IconKey::CloudShowersHeavy => "cloud-showers-heavy",
            IconKey::Snowflake => "snowflake",
            IconKey::CloudShowersWater => "cloud-showers-water",
            IconKey::CloudBolt => "cloud-bolt",
            IconKey::Cloud => "cloud",
        }
    }
}

impl std::fmt::Display for IconKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-facing label for a weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherPresentation {
    pub description: &'static str,
    pub icon: IconKey,
}
