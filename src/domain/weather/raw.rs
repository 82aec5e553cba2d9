use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

/// One column of a parallel-array block. `None` when the API omitted the
/// field or sent something other than an array.
pub type Series<T> = Option<Vec<Option<T>>>;

/// Hourly section of a forecast payload, as parallel arrays indexed by `time`.
///
/// Deserialization never fails on shape problems: a field that is not an
/// array is treated as absent and an entry of the wrong type becomes `None`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHourlyBlock {
    #[serde(default, deserialize_with = "lenient_times")]
    pub time: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_series")]
    pub temperature_2m: Series<f64>,
    #[serde(default, deserialize_with = "lenient_series")]
    pub temperature: Series<f64>,
    #[serde(default, deserialize_with = "lenient_series")]
    pub weather_code: Series<u8>,
    #[serde(default, deserialize_with = "lenient_series")]
    pub apparent_temperature: Series<f64>,
    #[serde(default, deserialize_with = "lenient_series")]
    pub windspeed_10m: Series<f64>,
    #[serde(default, deserialize_with = "lenient_series")]
    pub relative_humidity_2m: Series<f64>,
}

impl RawHourlyBlock {
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.time.as_ref().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Named numeric column, for alias resolution.
    #[must_use]
    pub fn numeric_series(&self, name: &str) -> Option<&[Option<f64>]> {
        let series = match name {
            "temperature_2m" => &self.temperature_2m,
            "temperature" => &self.temperature,
            "apparent_temperature" => &self.apparent_temperature,
            "windspeed_10m" => &self.windspeed_10m,
            "relative_humidity_2m" => &self.relative_humidity_2m,
            _ => return None,
        };
        series.as_deref()
    }
}

/// Daily section of a forecast payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDailyBlock {
    #[serde(default, deserialize_with = "lenient_times")]
    pub time: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_series")]
    pub weather_code: Series<u8>,
    #[serde(default, deserialize_with = "lenient_series")]
    pub temperature_2m_max: Series<f64>,
    #[serde(default, deserialize_with = "lenient_series")]
    pub temperature_2m_min: Series<f64>,
    #[serde(default, deserialize_with = "lenient_series")]
    pub precipitation_sum: Series<f64>,
}

/// The legacy `current_weather=true` block.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCurrentWeather {
    pub temperature: f64,
    #[serde(default)]
    pub windspeed: Option<f64>,
    #[serde(default)]
    pub weathercode: Option<u8>,
    #[serde(default)]
    pub is_day: Option<u8>,
}

/// Entry `idx` of a series, flattening "column missing", "index out of
/// range" and "null at index" into `None`.
#[must_use]
pub fn value_at<T: Copy>(series: &Series<T>, idx: usize) -> Option<T> {
    series.as_ref()?.get(idx).copied().flatten()
}

fn lenient_series<'de, D, T>(deserializer: D) -> Result<Series<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(values) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(
        values
            .into_iter()
            .map(|value| serde_json::from_value(value).ok())
            .collect(),
    ))
}

// Non-string timestamps keep their JSON text so they still occupy a slot and
// fail date classification downstream.
fn lenient_times<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(values) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(
        values
            .into_iter()
            .map(|value| match value {
                Value::String(text) => text,
                other => other.to_string(),
            })
            .collect(),
    ))
}
