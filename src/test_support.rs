use serde_json::json;

use crate::{
    app::settings::{FileSettings, RuntimeSettings},
    cli::Cli,
    data::forecast::{ForecastResponse, bundle_from_payload},
    domain::weather::{DisplayUnits, ForecastBundle, Location},
};

pub(crate) fn test_settings(units: DisplayUnits) -> RuntimeSettings {
    use clap::Parser;

    let mut settings =
        RuntimeSettings::resolve(&Cli::parse_from(["meteo-dash"]), &FileSettings::default());
    settings.units = units;
    settings
}

pub(crate) fn abuja() -> Location {
    Location {
        name: "Abuja".to_string(),
        latitude: 9.0579,
        longitude: 7.4951,
        admin1: Some("Federal Capital Territory".to_string()),
        country: Some("Nigeria".to_string()),
        timezone: Some("Africa/Lagos".to_string()),
    }
}

/// Two days of hourly data (2025-06-01 00:00 .. 2025-06-02 23:00, the second
/// day 3 °C cooler) and a three-day daily block.
pub(crate) fn fixture_bundle(location: Location) -> ForecastBundle {
    let times: Vec<String> = (0..48)
        .map(|idx| format!("2025-06-{:02}T{:02}:00", 1 + idx / 24, idx % 24))
        .collect();
    let temps: Vec<f64> = (0..48)
        .map(|idx| 20.0 + f64::from(idx % 24) * 0.5 - f64::from(idx / 24) * 3.0)
        .collect();
    let codes: Vec<u8> = (0..48).map(|idx| if idx < 24 { 0 } else { 61 }).collect();

    let payload: ForecastResponse = serde_json::from_value(json!({
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
            "time": ["2025-06-01", "2025-06-02", "2025-06-03"],
            "weather_code": [0, 61, 95],
            "temperature_2m_max": [31.0, 28.5, 27.0],
            "temperature_2m_min": [22.0, 21.0, 20.5],
            "precipitation_sum": [0.0, 12.7, 25.4],
        },
    }))
    .expect("valid fixture payload");

    bundle_from_payload(location, payload).expect("fixture bundle")
}
