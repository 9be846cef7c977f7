use std::error::Error as _;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    error::SearchError,
    model::{CurrentConditions, GeoResult},
};

use super::{Geocoder, WeatherSource, truncate_body};

const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,wind_speed_10m";

#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    http: Client,
    url: String,
    language: String,
}

impl OpenMeteoGeocoder {
    pub fn new(http: Client, url: String, language: String) -> Self {
        Self {
            http,
            url,
            language,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenMeteoWeather {
    http: Client,
    url: String,
}

impl OpenMeteoWeather {
    pub fn new(http: Client, url: String) -> Self {
        Self { http, url }
    }
}

#[derive(Debug, Deserialize)]
struct OmGeoResponse {
    #[serde(default)]
    results: Option<Vec<OmGeoEntry>>,
}

#[derive(Debug, Deserialize)]
struct OmGeoEntry {
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current: OmCurrent,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: f64,
    // Integers on the wire today; accept `58.0` as well.
    relative_humidity_2m: f64,
    apparent_temperature: f64,
    weather_code: f64,
    wind_speed_10m: f64,
}

/// GET `request`, returning the body on 2xx and `ServiceUnavailable` otherwise.
async fn fetch_body(
    service: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<String, SearchError> {
    let res = request
        .send()
        .await
        .map_err(|e| SearchError::unavailable(service, describe_send_error(&e)))?;

    let status = res.status();
    let body = res.text().await.map_err(|e| {
        SearchError::unavailable(service, format!("failed to read response body: {e}"))
    })?;

    if !status.is_success() {
        return Err(SearchError::unavailable(
            service,
            format!("status {}: {}", status, truncate_body(&body)),
        ));
    }

    Ok(body)
}

/// reqwest's `Display` stops at "error sending request"; name the cause instead.
fn describe_send_error(e: &reqwest::Error) -> String {
    let cause = if e.is_timeout() {
        "request timed out"
    } else if e.is_connect() {
        "could not connect"
    } else {
        "request failed"
    };

    match e.source() {
        Some(source) => format!("{cause}: {e} ({source})"),
        None => format!("{cause}: {e}"),
    }
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    async fn resolve_city(&self, name: &str) -> Result<GeoResult, SearchError> {
        debug!(city = name, url = %self.url, "Geocoding request");

        let request = self.http.get(&self.url).query(&[
            ("name", name),
            ("count", "1"),
            ("language", self.language.as_str()),
            ("format", "json"),
        ]);
        let body = fetch_body("Geocoding", request).await?;

        let parsed: OmGeoResponse = serde_json::from_str(&body).map_err(|e| {
            SearchError::unexpected(format!("failed to parse geocoding JSON: {e}"))
        })?;

        let entry = parsed
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| SearchError::not_found(name))?;

        info!(
            "Resolved '{}' to {} ({:.4}, {:.4})",
            name, entry.name, entry.latitude, entry.longitude
        );

        Ok(GeoResult {
            name: entry.name,
            country: entry.country.unwrap_or_default(),
            latitude: entry.latitude,
            longitude: entry.longitude,
        })
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoWeather {
    async fn fetch_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, SearchError> {
        debug!(latitude, longitude, url = %self.url, "Current weather request");

        let request = self
            .http
            .get(&self.url)
            .query(&[("latitude", latitude), ("longitude", longitude)])
            .query(&[("current", CURRENT_FIELDS), ("timezone", "auto")]);
        let body = fetch_body("Weather", request).await?;

        let parsed: OmForecastResponse = serde_json::from_str(&body).map_err(|e| {
            SearchError::unexpected(format!("failed to parse weather JSON: {e}"))
        })?;

        let c = parsed.current;
        Ok(CurrentConditions {
            temperature_c: c.temperature_2m,
            apparent_temperature_c: c.apparent_temperature,
            relative_humidity_pct: c.relative_humidity_2m.round() as i64,
            wind_speed_kmh: c.wind_speed_10m,
            weather_code: c.weather_code.round() as i64,
        })
    }
}
