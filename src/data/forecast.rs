use anyhow::{Context, Result, bail};
use reqwest::Client;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

use crate::domain::weather::{
    CurrentWeather, DailyForecast, DayBuckets, ForecastBundle, Location, Precipitation,
    RawCurrentWeather, RawDailyBlock, RawHourlyBlock, Temperature, WindSpeed, group_by_day,
    normalize_hourly, parse_date, value_at,
};

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

const HOURLY_FIELDS: &str =
    "temperature_2m,weather_code,apparent_temperature,windspeed_10m,relative_humidity_2m";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum";

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

impl ForecastClient {
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("building forecast http client failed")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub async fn fetch(&self, location: Location) -> Result<ForecastBundle> {
        let timezone = location
            .timezone
            .clone()
            .unwrap_or_else(|| "auto".to_string());
        tracing::debug!(
            lat = location.latitude,
            lon = location.longitude,
            %timezone,
            "requesting forecast"
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", timezone),
                ("current_weather", "true".to_string()),
            ])
            .send()
            .await
            .context("forecast request failed")?
            .error_for_status()
            .context("forecast request returned non-success status")?;

        let payload: ForecastResponse = response
            .json()
            .await
            .context("failed to parse forecast payload")?;

        bundle_from_payload(location, payload)
    }
}

/// Decoded forecast body. Only `current_weather` is mandatory; the hourly and
/// daily blocks degrade to empty when absent.
#[derive(Debug, Default, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub current_weather: Option<RawCurrentWeather>,
    #[serde(default, deserialize_with = "lenient_block")]
    pub hourly: Option<RawHourlyBlock>,
    #[serde(default, deserialize_with = "lenient_block")]
    pub daily: Option<RawDailyBlock>,
}

// A block that is not an object is treated as missing.
fn lenient_block<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

pub fn bundle_from_payload(
    location: Location,
    payload: ForecastResponse,
) -> Result<ForecastBundle> {
    let Some(current) = payload.current_weather else {
        bail!("incomplete weather data: response has no current_weather block");
    };

    let hourly_raw = payload.hourly.unwrap_or_default();
    let hourly = normalize_hourly(Some(&hourly_raw));
    let days = match group_by_day(Some(&hourly_raw)) {
        Ok(grouping) => grouping.buckets,
        Err(err) => {
            tracing::warn!(error = %err, "hourly data cannot be grouped by day");
            DayBuckets::default()
        }
    };

    Ok(ForecastBundle {
        location,
        current: CurrentWeather {
            temperature: Temperature::from_celsius(current.temperature),
            wind_speed: WindSpeed::from_kmh(current.windspeed.unwrap_or_default()),
            weather_code: current.weathercode.unwrap_or_default(),
            is_day: current.is_day.is_none_or(|flag| flag == 1),
        },
        hourly_raw,
        hourly,
        days,
        daily: parse_daily(&payload.daily.unwrap_or_default()),
    })
}

fn parse_daily(daily: &RawDailyBlock) -> Vec<DailyForecast> {
    let Some(times) = daily.time.as_deref() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(times.len());
    for (idx, time) in times.iter().enumerate() {
        let Some(date) = parse_date(time) else {
            tracing::warn!(index = idx, time = %time, "skipping daily entry with unparseable date");
            continue;
        };

        out.push(DailyForecast {
            date,
            weather_code: value_at(&daily.weather_code, idx),
            temperature_max: value_at(&daily.temperature_2m_max, idx)
                .map(Temperature::from_celsius),
            temperature_min: value_at(&daily.temperature_2m_min, idx)
                .map(Temperature::from_celsius),
            precipitation_sum: value_at(&daily.precipitation_sum, idx).map(Precipitation::from_mm),
        });
    }
    out
}
