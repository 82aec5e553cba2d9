use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

use super::{
    parse_datetime,
    raw::{RawHourlyBlock, value_at},
};

/// Column names that have carried hourly temperature across API revisions,
/// most preferred first.
pub const TEMPERATURE_ALIASES: &[&str] = &["temperature_2m", "temperature"];

/// An ordered alias list bound to the columns a particular block actually
/// carries. Built once per block, then queried per index.
#[derive(Debug, Clone)]
pub struct FieldAliases<'a> {
    columns: Vec<&'a [Option<f64>]>,
}

impl<'a> FieldAliases<'a> {
    #[must_use]
    pub fn resolve(block: &'a RawHourlyBlock, aliases: &[&str]) -> Self {
        let columns = aliases
            .iter()
            .filter_map(|name| block.numeric_series(name))
            .collect();
        Self { columns }
    }

    #[must_use]
    pub fn temperature(block: &'a RawHourlyBlock) -> Self {
        Self::resolve(block, TEMPERATURE_ALIASES)
    }

    /// Value from the first alias whose column reaches `idx`. A null or
    /// mistyped entry there is `None`; later aliases are not consulted.
    #[must_use]
    pub fn value_at(&self, idx: usize) -> Option<f64> {
        self.columns
            .iter()
            .find_map(|column| column.get(idx))
            .copied()
            .flatten()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A single normalized hour. Temperatures are always Celsius.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourRecord {
    pub time: String,
    pub temperature_c: Option<f64>,
    pub weather_code: Option<u8>,
}

impl HourRecord {
    #[must_use]
    pub fn datetime(&self) -> Option<NaiveDateTime> {
        parse_datetime(&self.time)
    }

    #[must_use]
    pub fn hour(&self) -> Option<u32> {
        self.datetime().map(|time| time.hour())
    }

    /// `HH:MM` slice of the timestamp, falling back to the raw text.
    #[must_use]
    pub fn clock_label(&self) -> &str {
        self.time.get(11..16).unwrap_or(&self.time)
    }
}

/// Turns the parallel hourly arrays into one record per `time` entry.
///
/// A missing block or an empty/absent `time` column yields an empty vector.
/// Missing temperatures never drop a record; the field is left as `None`.
#[must_use]
pub fn normalize_hourly(block: Option<&RawHourlyBlock>) -> Vec<HourRecord> {
    let Some(block) = block else {
        return Vec::new();
    };
    let Some(times) = block.time.as_deref() else {
        return Vec::new();
    };

    let temperature = FieldAliases::temperature(block);
    times
        .iter()
        .enumerate()
        .map(|(idx, time)| HourRecord {
            time: time.clone(),
            temperature_c: temperature.value_at(idx),
            weather_code: value_at(&block.weather_code, idx),
        })
        .collect()
}

/// Secondary hourly readings used by the current-conditions panel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HourlyExtras {
    pub apparent_temperature_c: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub relative_humidity: Option<f64>,
}

#[must_use]
pub fn extras_at(block: &RawHourlyBlock, idx: usize) -> HourlyExtras {
    HourlyExtras {
        apparent_temperature_c: value_at(&block.apparent_temperature, idx),
        wind_speed_kmh: value_at(&block.windspeed_10m, idx),
        relative_humidity: value_at(&block.relative_humidity_2m, idx),
    }
}
