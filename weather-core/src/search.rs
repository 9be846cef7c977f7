//! Search controller: owns the UI state and drives one search at a time.
//!
//! States run `Idle -> Loading -> {Result | Error} -> Loading -> ...`. The
//! controller takes `&mut self` per submission, so a second search cannot start
//! while one is still loading.

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::{
    classify::classify,
    error::SearchError,
    model::{CurrentConditions, GeoResult, SearchQuery, WeatherPresentation},
    provider::{Geocoder, WeatherSource},
    render::{ResultView, render},
};

/// A completed, successful search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub location: GeoResult,
    pub conditions: CurrentConditions,
    pub presentation: WeatherPresentation,
}

/// Exactly one panel is visible at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Result(SearchOutcome),
    Error(String),
}

/// Rendering surface for the three panels.
///
/// `show_loading` must hide any previous result or error. `hide_loading` is
/// called exactly once per search, before `show_result` or `show_error`.
pub trait SearchSurface {
    fn show_loading(&mut self, query: &SearchQuery);
    fn hide_loading(&mut self);
    fn show_result(&mut self, view: &ResultView);
    fn show_error(&mut self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Blank input; nothing happened.
    Ignored,
    /// The search ran and the state is now `Result` or `Error`.
    Completed,
}

#[derive(Debug)]
pub struct SearchController {
    geocoder: Box<dyn Geocoder>,
    weather: Box<dyn WeatherSource>,
    state: UiState,
    today: fn() -> NaiveDate,
}

impl SearchController {
    pub fn new(geocoder: Box<dyn Geocoder>, weather: Box<dyn WeatherSource>) -> Self {
        Self {
            geocoder,
            weather,
            state: UiState::Idle,
            today: || Local::now().date_naive(),
        }
    }

    /// Override the date source used for the result panel.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Run a search for `input`. Blank input leaves the state untouched.
    pub async fn submit<S>(&mut self, input: &str, surface: &mut S) -> Submission
    where
        S: SearchSurface + ?Sized,
    {
        let Some(query) = SearchQuery::parse(input) else {
            debug!("Ignoring blank search input");
            return Submission::Ignored;
        };

        self.state = UiState::Loading;
        surface.show_loading(&query);

        let outcome = self.lookup(&query).await;

        surface.hide_loading();

        match outcome {
            Ok(outcome) => {
                let view = render(
                    &outcome.location.name,
                    &outcome.location.country,
                    &outcome.conditions,
                    &outcome.presentation,
                    (self.today)(),
                );
                info!(city = %query, "Search succeeded");
                surface.show_result(&view);
                self.state = UiState::Result(outcome);
            }
            Err(err) => {
                let message = err.to_string();
                // The error panel already shows the message; keep the log quiet
                // below `warn` unless the failure is a surprise.
                if err.is_expected() {
                    info!(city = %query, "Search failed: {message}");
                } else {
                    warn!(city = %query, "Search failed: {message}");
                }
                surface.show_error(&message);
                self.state = UiState::Error(message);
            }
        }

        Submission::Completed
    }

    async fn lookup(&self, query: &SearchQuery) -> Result<SearchOutcome, SearchError> {
        let location = self.geocoder.resolve_city(query.as_str()).await?;
        let conditions = self
            .weather
            .fetch_current(location.latitude, location.longitude)
            .await?;
        let presentation = classify(conditions.weather_code);

        Ok(SearchOutcome {
            location,
            conditions,
            presentation,
        })
    }
}
