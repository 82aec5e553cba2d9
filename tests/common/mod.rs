#![allow(dead_code)]

use clap::Parser;
use meteo_dash::{
    app::{
        fetch::Services,
        settings::{FileSettings, RuntimeSettings},
        state::AppState,
    },
    cli::Cli,
    resilience::backoff::Backoff,
};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

pub const GEOCODE_PATH: &str = "/v1/search";
pub const FORECAST_PATH: &str = "/v1/forecast";
pub const REVERSE_PATH: &str = "/data/reverse-geocode-client";

/// CLI pointed at the mock server, plus any extra arguments.
pub fn cli_for(server: &MockServer, extra: &[&str]) -> Cli {
    let uri = server.uri();
    let mut args = vec![
        "meteo-dash".to_string(),
        "--geocode-url".to_string(),
        format!("{uri}{GEOCODE_PATH}"),
        "--forecast-url".to_string(),
        format!("{uri}{FORECAST_PATH}"),
        "--reverse-url".to_string(),
        format!("{uri}{REVERSE_PATH}"),
    ];
    args.extend(extra.iter().map(ToString::to_string));
    Cli::parse_from(args)
}

/// Settings without touching the user's config directory.
pub fn settings_for(cli: &Cli) -> RuntimeSettings {
    RuntimeSettings::resolve(cli, &FileSettings::default())
}

pub fn harness(server: &MockServer, extra: &[&str]) -> (Cli, RuntimeSettings, Services, AppState) {
    let cli = cli_for(server, extra);
    let settings = settings_for(&cli);
    let services = Services::from_cli(&cli, &settings.default_country).expect("services");
    let mut app = AppState::new(&settings);
    app.backoff = Backoff::immediate();
    (cli, settings, services, app)
}

pub fn geocode_body(name: &str, latitude: f64, longitude: f64) -> Value {
    json!({
        "results": [{
            "name": name,
            "latitude": latitude,
            "longitude": longitude,
            "admin1": "Federal Capital Territory",
            "country": "Nigeria",
            "timezone": "Africa/Lagos",
        }]
    })
}

/// Two days of hourly data from 2025-06-01T00:00 and a two-day daily block.
pub fn forecast_body() -> Value {
    let times: Vec<String> = (0..48)
        .map(|idx| format!("2025-06-{:02}T{:02}:00", 1 + idx / 24, idx % 24))
        .collect();
    let temps: Vec<f64> = (0..48).map(|idx| 20.0 + f64::from(idx % 24) * 0.5).collect();
    let codes: Vec<u8> = (0..48).map(|idx| if idx < 24 { 0 } else { 61 }).collect();
    json!({
        "timezone": "Africa/Lagos",
        "current_weather": {"temperature": 26.4, "windspeed": 12.0, "weathercode": 2, "is_day": 1},
        "hourly": {
            "time": times,
            "temperature_2m": temps,
            "weather_code": codes,
            "apparent_temperature": vec![28.0; 48],
            "relative_humidity_2m": vec![64.0; 48],
            "windspeed_10m": vec![12.0; 48],
        },
        "daily": {
            "time": ["2025-06-01", "2025-06-02"],
            "weather_code": [0, 61],
            "temperature_2m_max": [31.0, 28.5],
            "temperature_2m_min": [22.0, 21.0],
            "precipitation_sum": [0.0, 12.7],
        },
    })
}

pub async fn mount_place(server: &MockServer, name: &str, latitude: f64, longitude: f64) {
    Mock::given(method("GET"))
        .and(path(GEOCODE_PATH))
        .and(query_param("name", name))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(geocode_body(name, latitude, longitude)),
        )
        .mount(server)
        .await;
}

pub async fn mount_forecast(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(FORECAST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(server)
        .await;
}

pub async fn requests_to(server: &MockServer, route: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == route)
        .count()
}
