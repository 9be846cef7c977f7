//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration handling (endpoints, language, timeouts)
//! - Open-Meteo geocoding and current-weather clients behind provider traits
//! - The weather-code classifier and result rendering
//! - The search controller and its UI state machine
//!
//! It is used by `weather-cli`, but the controller only needs a [`SearchSurface`],
//! so other front-ends can drive it too.

pub mod classify;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;
pub mod search;

pub use classify::classify;
pub use config::Config;
pub use error::SearchError;
pub use model::{CurrentConditions, GeoResult, IconKey, SearchQuery, WeatherPresentation};
pub use provider::{Geocoder, WeatherSource, clients_from_config};
pub use render::{ResultView, render};
pub use search::{SearchController, SearchOutcome, SearchSurface, Submission, UiState};
