//! End-to-end dashboard flow against a mocked OpenWeatherMap server

use chrono::Utc;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use weatherpro::config::WeatherProConfig;
use weatherpro::dashboard::Dashboard;
use weatherpro::units::PreferenceStore;
use weatherpro::WeatherApiClient;

fn dashboard_for(server: &MockServer, prefs_dir: &std::path::Path) -> Dashboard {
    let mut config = WeatherProConfig::default();
    config.weather.api_key = "integration-test-key".to_string();
    config.weather.base_url = server.uri();
    let client = WeatherApiClient::new(&config).expect("client builds");
    Dashboard::new(client, PreferenceStore::at_path(prefs_dir.join("unit_preference")))
}

fn current_weather_body(city: &str, temp: f64, description: &str) -> serde_json::Value {
    json!({
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [{"id": 500, "main": "Rain", "description": description, "icon": "10d"}],
        "main": {"temp": temp, "feels_like": temp - 0.5, "temp_min": temp - 2.0,
                 "temp_max": temp + 2.0, "pressure": 1012, "humidity": 72},
        "wind": {"speed": 4.1, "deg": 240},
        "dt": Utc::now().timestamp(),
        "sys": {"country": "GB", "sunrise": Utc::now().timestamp() - 3600,
                "sunset": Utc::now().timestamp() + 3600},
        "timezone": 0,
        "name": city
    })
}

/// Eight 3-hour entries covering today (UTC city), the provider's usual shape
fn forecast_body(temp: f64, description: &str) -> serde_json::Value {
    let midnight = Utc::now()
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is valid")
        .and_utc()
        .timestamp();

    let list: Vec<serde_json::Value> = (0i64..8)
        .map(|i| {
            json!({
                "dt": midnight + i * 3 * 3600,
                "main": {"temp": temp, "feels_like": temp, "temp_min": temp,
                         "temp_max": temp, "pressure": 1013, "humidity": 65},
                "weather": [{"id": 500, "main": "Rain", "description": description, "icon": "10d"}],
                "wind": {"speed": 3.2, "deg": 200}
            })
        })
        .collect();

    json!({
        "cod": "200",
        "list": list,
        "city": {"name": "London", "country": "GB", "timezone": 0}
    })
}

fn aqi_body(index: u8) -> serde_json::Value {
    json!({
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "list": [{"main": {"aqi": index}, "dt": Utc::now().timestamp()}]
    })
}

async fn mount_happy_path(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather_body(
            "London", 18.0, "light rain",
        )))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(18.0, "light rain")))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/air_pollution"))
        .respond_with(ResponseTemplate::new(200).set_body_json(aqi_body(2)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn successful_search_populates_everything() {
    let server = MockServer::start().await;
    mount_happy_path(&server).await;
    let dir = tempfile::tempdir().unwrap();
    let mut dashboard = dashboard_for(&server, dir.path());

    dashboard.search("London").await;

    let state = dashboard.state();
    assert!(state.error.is_none());

    let current = state.current.as_ref().expect("current conditions set");
    assert_eq!(current.city, "London");
    assert_eq!(current.description, "light rain");

    assert_eq!(state.slots.len(), 24);
    assert_eq!(state.slots.iter().filter(|s| s.has_data()).count(), 8);
    assert!(!state.daily.is_empty());

    let aqi = state.aqi.expect("AQI set");
    assert_eq!(aqi.index, 2);
    assert_eq!(aqi.description(), "Fair");
}

#[tokio::test]
async fn city_not_found_sets_banner_and_leaves_weather_unset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"cod": "404", "message": "city not found"})),
        )
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let mut dashboard = dashboard_for(&server, dir.path());

    dashboard.search("Lndon").await;

    let state = dashboard.state();
    assert_eq!(
        state.error.as_deref(),
        Some("City not found. Please check the spelling and try again.")
    );
    assert!(state.current.is_none());
    assert!(state.slots.is_empty());
}

#[tokio::test]
async fn rate_limited_compare_preserves_existing_cities() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "London"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather_body(
            "London", 18.0, "light rain",
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Paris"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({"cod": 429, "message": "slow down"})),
        )
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let mut dashboard = dashboard_for(&server, dir.path());

    dashboard.compare("London").await;
    assert_eq!(dashboard.state().compare_cities.len(), 1);
    assert!(dashboard.state().error.is_none());

    dashboard.compare("Paris").await;

    let state = dashboard.state();
    assert_eq!(
        state.error.as_deref(),
        Some("Too many requests. Please try again later.")
    );
    assert_eq!(state.compare_cities.len(), 1);
    assert_eq!(state.compare_cities[0].name, "London");
}

#[tokio::test]
async fn duplicate_compare_city_is_rejected_without_a_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather_body(
            "London", 18.0, "light rain",
        )))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let mut dashboard = dashboard_for(&server, dir.path());

    dashboard.compare("London").await;
    dashboard.compare("london").await;

    let state = dashboard.state();
    assert_eq!(state.error.as_deref(), Some("City already added!"));
    assert_eq!(state.compare_cities.len(), 1);
}

#[tokio::test]
async fn forecast_failure_keeps_primary_weather() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather_body(
            "London", 18.0, "light rain",
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/air_pollution"))
        .respond_with(ResponseTemplate::new(200).set_body_json(aqi_body(1)))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let mut dashboard = dashboard_for(&server, dir.path());

    dashboard.search("London").await;

    let state = dashboard.state();
    assert_eq!(
        state.error.as_deref(),
        Some("Failed to fetch forecast data. Please try again.")
    );
    // Primary weather survives the forecast failure
    assert_eq!(state.current.as_ref().unwrap().city, "London");
    assert!(state.slots.is_empty());
    // AQI is independent of the forecast call
    assert_eq!(state.aqi.map(|a| a.index), Some(1));
}

#[tokio::test]
async fn aqi_failure_is_swallowed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_weather_body(
            "London", 18.0, "light rain",
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(18.0, "light rain")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/air_pollution"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let mut dashboard = dashboard_for(&server, dir.path());

    dashboard.search("London").await;

    let state = dashboard.state();
    assert!(state.error.is_none());
    assert!(state.aqi.is_none());
    assert_eq!(state.current.as_ref().unwrap().city, "London");
    assert_eq!(state.slots.len(), 24);
}

#[tokio::test]
async fn new_search_replaces_comparison_independent_state() {
    let server = MockServer::start().await;
    mount_happy_path(&server).await;
    let dir = tempfile::tempdir().unwrap();
    let mut dashboard = dashboard_for(&server, dir.path());

    dashboard.compare("London").await;
    dashboard.search("London").await;

    // The comparison list is orthogonal to the primary search
    let state = dashboard.state();
    assert_eq!(state.compare_cities.len(), 1);
    assert!(state.current.is_some());
}

#[tokio::test]
async fn toggle_unit_persists_across_dashboards() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let mut dashboard = dashboard_for(&server, dir.path());
    assert_eq!(
        dashboard.state().unit,
        weatherpro::UnitPreference::Metric
    );
    dashboard.toggle_unit();

    // A fresh dashboard (fresh process in real life) reads the saved choice
    let dashboard = dashboard_for(&server, dir.path());
    assert_eq!(
        dashboard.state().unit,
        weatherpro::UnitPreference::Imperial
    );
}
