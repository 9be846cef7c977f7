use crate::{
    Config,
    error::SearchError,
    model::{CurrentConditions, GeoResult},
    provider::open_meteo::{OpenMeteoGeocoder, OpenMeteoWeather},
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;

pub mod open_meteo;

const USER_AGENT: &str = concat!("weather-cli/", env!("CARGO_PKG_VERSION"));

/// Resolves a free-text place name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// `name` must be non-empty; callers go through `SearchQuery` first.
    async fn resolve_city(&self, name: &str) -> Result<GeoResult, SearchError>;
}

/// Fetches current conditions for a coordinate pair.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentConditions, SearchError>;
}

/// Build the HTTP client shared by both providers.
pub fn http_client_from_config(config: &Config) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(config.request_timeout())
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")
}

/// Construct the geocoder and weather source described by `config`.
pub fn clients_from_config(
    config: &Config,
) -> anyhow::Result<(Box<dyn Geocoder>, Box<dyn WeatherSource>)> {
    config.validate()?;
    let http = http_client_from_config(config)?;

    let geocoder = OpenMeteoGeocoder::new(
        http.clone(),
        config.geocoding_url.clone(),
        config.language.clone(),
    );
    let weather = OpenMeteoWeather::new(http, config.forecast_url.clone());

    Ok((Box::new(geocoder), Box::new(weather)))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
