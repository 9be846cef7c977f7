//! Integration tests for the Open-Meteo clients and the search flow using wiremock.

use weather_core::{
    Config, Geocoder, IconKey, ResultView, SearchController, SearchError, SearchQuery,
    SearchSurface, UiState, WeatherSource, clients_from_config,
};
use std::time::Duration;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> Config {
    Config {
        geocoding_url: format!("{}/v1/search", server.uri()),
        forecast_url: format!("{}/v1/forecast", server.uri()),
        ..Config::default()
    }
}

fn clients(server: &MockServer) -> (Box<dyn Geocoder>, Box<dyn WeatherSource>) {
    clients_from_config(&config_for(server)).unwrap()
}

fn berlin_results() -> serde_json::Value {
    serde_json::json!({
        "results": [{
            "id": 2950159,
            "name": "Berlin",
            "latitude": 52.52437,
            "longitude": 13.41053,
            "country": "Germany",
            "country_code": "DE"
        }],
        "generationtime_ms": 0.5
    })
}

fn current_weather() -> serde_json::Value {
    serde_json::json!({
        "latitude": 52.52,
        "longitude": 13.419998,
        "timezone": "Europe/Berlin",
        "current": {
            "time": "2026-10-15T14:00",
            "interval": 900,
            "temperature_2m": 23.4,
            "relative_humidity_2m": 58,
            "apparent_temperature": 21.6,
            "weather_code": 3,
            "wind_speed_10m": 14.8
        }
    })
}

async fn mount_geocoding(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_geocode_sends_expected_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "Berlin"))
        .and(query_param("count", "1"))
        .and(query_param("language", "en"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(berlin_results()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (geocoder, _) = clients(&mock_server);
    let geo = geocoder.resolve_city("Berlin").await.unwrap();

    assert_eq!(geo.name, "Berlin");
    assert_eq!(geo.country, "Germany");
    assert!((geo.latitude - 52.52437).abs() < 1e-9);
    assert!((geo.longitude - 13.41053).abs() < 1e-9);
}

#[tokio::test]
async fn test_geocode_url_encodes_city_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "São Paulo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{
                "name": "São Paulo",
                "latitude": -23.5475,
                "longitude": -46.63611,
                "country": "Brazil"
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (geocoder, _) = clients(&mock_server);
    let geo = geocoder.resolve_city("São Paulo").await.unwrap();

    assert_eq!(geo.country, "Brazil");
}

#[tokio::test]
async fn test_geocode_takes_first_result_only() {
    let mock_server = MockServer::start().await;
    mount_geocoding(
        &mock_server,
        serde_json::json!({
            "results": [
                { "name": "Springfield", "latitude": 39.8, "longitude": -89.6, "country": "United States" },
                { "name": "Springfield", "latitude": 37.2, "longitude": -93.3, "country": "United States" }
            ]
        }),
    )
    .await;

    let (geocoder, _) = clients(&mock_server);
    let geo = geocoder.resolve_city("Springfield").await.unwrap();

    assert!((geo.latitude - 39.8).abs() < 1e-9);
}

#[tokio::test]
async fn test_geocode_missing_results_is_not_found() {
    let mock_server = MockServer::start().await;
    mount_geocoding(&mock_server, serde_json::json!({ "generationtime_ms": 0.3 })).await;

    let (geocoder, _) = clients(&mock_server);
    let err = geocoder.resolve_city("Atlantis").await.unwrap_err();

    assert!(matches!(err, SearchError::NotFound { ref city } if city == "Atlantis"));
}

#[tokio::test]
async fn test_geocode_empty_results_is_not_found() {
    let mock_server = MockServer::start().await;
    mount_geocoding(&mock_server, serde_json::json!({ "results": [] })).await;

    let (geocoder, _) = clients(&mock_server);
    let err = geocoder.resolve_city("Atlantis").await.unwrap_err();

    assert!(err.to_string().contains("Atlantis"));
}

#[tokio::test]
async fn test_geocode_missing_country_defaults_to_empty() {
    let mock_server = MockServer::start().await;
    mount_geocoding(
        &mock_server,
        serde_json::json!({
            "results": [{ "name": "Null Island", "latitude": 0.0, "longitude": 0.0 }]
        }),
    )
    .await;

    let (geocoder, _) = clients(&mock_server);
    let geo = geocoder.resolve_city("Null Island").await.unwrap();

    assert_eq!(geo.country, "");
}

#[tokio::test]
async fn test_geocode_server_error_is_service_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let (geocoder, _) = clients(&mock_server);
    let err = geocoder.resolve_city("Berlin").await.unwrap_err();

    assert!(matches!(
        err,
        SearchError::ServiceUnavailable { service: "Geocoding", .. }
    ));
    let msg = err.to_string();
    assert!(msg.contains("503"), "Error should mention 503 status: {}", msg);
}

#[tokio::test]
async fn test_geocode_malformed_json_is_unexpected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let (geocoder, _) = clients(&mock_server);
    let err = geocoder.resolve_city("Berlin").await.unwrap_err();

    assert!(matches!(err, SearchError::Unexpected(_)));
}

#[tokio::test]
async fn test_fetch_current_sends_expected_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "52.52"))
        .and(query_param("longitude", "13.41"))
        .and(query_param(
            "current",
            "temperature_2m,relative_humidity_2m,apparent_temperature,weather_code,wind_speed_10m",
        ))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (_, weather) = clients(&mock_server);
    let current = weather.fetch_current(52.52, 13.41).await.unwrap();

    assert_eq!(current.temperature_c, 23.4);
    assert_eq!(current.apparent_temperature_c, 21.6);
    assert_eq!(current.relative_humidity_pct, 58);
    assert_eq!(current.wind_speed_kmh, 14.8);
    assert_eq!(current.weather_code, 3);
}

#[tokio::test]
async fn test_fetch_current_server_error_is_service_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let (_, weather) = clients(&mock_server);
    let err = weather.fetch_current(52.52, 13.41).await.unwrap_err();

    assert!(matches!(
        err,
        SearchError::ServiceUnavailable { service: "Weather", .. }
    ));
}

#[tokio::test]
async fn test_fetch_current_missing_block_is_unexpected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "latitude": 52.52,
            "longitude": 13.41
        })))
        .mount(&mock_server)
        .await;

    let (_, weather) = clients(&mock_server);
    let err = weather.fetch_current(52.52, 13.41).await.unwrap_err();

    assert!(matches!(err, SearchError::Unexpected(_)));
}

#[tokio::test]
async fn test_geocode_timeout_is_service_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(berlin_results())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let config = Config {
        request_timeout_secs: 1,
        ..config_for(&mock_server)
    };
    let (geocoder, _) = clients_from_config(&config).unwrap();
    let err = geocoder.resolve_city("Berlin").await.unwrap_err();

    let SearchError::ServiceUnavailable { service, reason } = &err else {
        panic!("expected ServiceUnavailable, got {err:?}");
    };
    assert_eq!(*service, "Geocoding");
    assert!(reason.starts_with("request timed out"), "reason: {reason}");
}

#[tokio::test]
async fn test_geocode_connection_refused_is_service_unavailable() {
    let config = Config {
        geocoding_url: "http://127.0.0.1:1/v1/search".into(),
        forecast_url: "http://127.0.0.1:1/v1/forecast".into(),
        ..Config::default()
    };
    let (geocoder, weather) = clients_from_config(&config).unwrap();

    let err = geocoder.resolve_city("Berlin").await.unwrap_err();
    let SearchError::ServiceUnavailable { service, reason } = &err else {
        panic!("expected ServiceUnavailable, got {err:?}");
    };
    assert_eq!(*service, "Geocoding");
    assert!(reason.starts_with("could not connect"), "reason: {reason}");

    let err = weather.fetch_current(52.52, 13.41).await.unwrap_err();
    assert!(matches!(
        err,
        SearchError::ServiceUnavailable { service: "Weather", .. }
    ));
}

#[tokio::test]
async fn test_fetch_current_accepts_float_encoded_integers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current": {
                "temperature_2m": 12.0,
                "relative_humidity_2m": 58.0,
                "apparent_temperature": 10.5,
                "weather_code": 61.0,
                "wind_speed_10m": 20.1
            }
        })))
        .mount(&mock_server)
        .await;

    let (_, weather) = clients(&mock_server);
    let current = weather.fetch_current(52.52, 13.41).await.unwrap();

    assert_eq!(current.relative_humidity_pct, 58);
    assert_eq!(current.weather_code, 61);
}

#[derive(Default)]
struct CapturingSurface {
    loading_hidden: usize,
    result: Option<ResultView>,
    error: Option<String>,
}

impl SearchSurface for CapturingSurface {
    fn show_loading(&mut self, _query: &SearchQuery) {
        self.result = None;
        self.error = None;
    }
    fn hide_loading(&mut self) {
        self.loading_hidden += 1;
    }
    fn show_result(&mut self, view: &ResultView) {
        self.result = Some(view.clone());
    }
    fn show_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }
}

#[tokio::test]
async fn test_full_search_renders_result() {
    let mock_server = MockServer::start().await;
    mount_geocoding(&mock_server, berlin_results()).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "52.52437"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (geocoder, weather) = clients(&mock_server);
    let mut controller = SearchController::new(geocoder, weather);
    let mut surface = CapturingSurface::default();

    controller.submit("Berlin", &mut surface).await;

    assert!(matches!(controller.state(), UiState::Result(_)));
    assert_eq!(surface.loading_hidden, 1);
    assert!(surface.error.is_none());

    let view = surface.result.expect("result panel should be shown");
    assert_eq!(view.location(), "Berlin, Germany");
    assert_eq!(view.temperature, "23");
    assert_eq!(view.feels_like, "22");
    assert_eq!(view.humidity, "58%");
    assert_eq!(view.wind_speed, "14.8 km/h");
    assert_eq!(view.description, "Partly Cloudy");
    assert_eq!(view.icon, IconKey::CloudSun);
}

#[tokio::test]
async fn test_geocode_failure_skips_weather_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (geocoder, weather) = clients(&mock_server);
    let mut controller = SearchController::new(geocoder, weather);
    let mut surface = CapturingSurface::default();

    controller.submit("Berlin", &mut surface).await;

    assert!(matches!(controller.state(), UiState::Error(_)));
    assert_eq!(surface.loading_hidden, 1);
    assert!(surface.result.is_none());
    let message = surface.error.expect("error panel should be shown");
    assert!(message.contains("Geocoding service unavailable"));
}
