use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use super::{DisplayUnits, PrecipitationUnit, TemperatureUnit, WindUnit};

const MPH_PER_KMH: f64 = 0.621371;
const INCHES_PER_MM: f64 = 0.0393701;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConversionError {
    #[error("cannot convert non-finite {quantity} value {value}")]
    NonFinite { quantity: &'static str, value: f64 },
}

fn finite(quantity: &'static str, value: f64) -> Result<f64, ConversionError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConversionError::NonFinite { quantity, value })
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    let scaled = value * scale;
    if scaled.is_finite() {
        scaled.round() / scale
    } else {
        value
    }
}

/// `°F = °C × 9/5 + 32`, rounded to one decimal.
pub fn celsius_to_fahrenheit(celsius: f64) -> Result<f64, ConversionError> {
    let celsius = finite("temperature", celsius)?;
    finite("temperature", round_to(celsius * 9.0 / 5.0 + 32.0, 1))
}

/// Inverse of [`celsius_to_fahrenheit`], rounded to one decimal.
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> Result<f64, ConversionError> {
    let fahrenheit = finite("temperature", fahrenheit)?;
    finite("temperature", round_to((fahrenheit - 32.0) * 5.0 / 9.0, 1))
}

pub fn kmh_to_mph(kmh: f64) -> Result<f64, ConversionError> {
    let kmh = finite("wind speed", kmh)?;
    finite("wind speed", round_to(kmh * MPH_PER_KMH, 1))
}

pub fn mm_to_inches(mm: f64) -> Result<f64, ConversionError> {
    let mm = finite("precipitation", mm)?;
    finite("precipitation", round_to(mm * INCHES_PER_MM, 2))
}

/// A display-ready number with its unit suffix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub value: f64,
    pub unit: &'static str,
    decimals: usize,
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.starts_with('°') {
            write!(f, "{:.*}{}", self.decimals, self.value, self.unit)
        } else {
            write!(f, "{:.*} {}", self.decimals, self.value, self.unit)
        }
    }
}

// Canonical quantities hold the metric value the API returned. Display values
// are always derived from these, never from another display value.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperature {
    celsius: f64,
}

impl Temperature {
    #[must_use]
    pub fn from_celsius(celsius: f64) -> Self {
        Self { celsius }
    }

    #[must_use]
    pub fn celsius(self) -> f64 {
        self.celsius
    }

    pub fn display(self, units: &DisplayUnits) -> Result<Reading, ConversionError> {
        let value = match units.temperature {
            TemperatureUnit::Celsius => finite("temperature", self.celsius)?,
            TemperatureUnit::Fahrenheit => celsius_to_fahrenheit(self.celsius)?,
        };
        Ok(Reading {
            // + 0.0 folds -0 into 0
            value: value.round() + 0.0,
            unit: units.temperature.symbol(),
            decimals: 0,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindSpeed {
    kmh: f64,
}

impl WindSpeed {
    #[must_use]
    pub fn from_kmh(kmh: f64) -> Self {
        Self { kmh }
    }

    #[must_use]
    pub fn kmh(self) -> f64 {
        self.kmh
    }

    pub fn display(self, units: &DisplayUnits) -> Result<Reading, ConversionError> {
        let value = match units.wind {
            WindUnit::Kmh => finite("wind speed", self.kmh)?,
            WindUnit::Mph => kmh_to_mph(self.kmh)?,
        };
        Ok(Reading {
            value,
            unit: units.wind.symbol(),
            decimals: 1,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Precipitation {
    mm: f64,
}

impl Precipitation {
    #[must_use]
    pub fn from_mm(mm: f64) -> Self {
        Self { mm }
    }

    #[must_use]
    pub fn mm(self) -> f64 {
        self.mm
    }

    pub fn display(self, units: &DisplayUnits) -> Result<Reading, ConversionError> {
        let value = match units.precipitation {
            PrecipitationUnit::Mm => finite("precipitation", self.mm)?,
            PrecipitationUnit::Inches => mm_to_inches(self.mm)?,
        };
        Ok(Reading {
            value,
            unit: units.precipitation.symbol(),
            decimals: 2,
        })
    }
}

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Parses the API's local timestamps, with or without seconds. RFC 3339
/// values with an offset keep their local wall-clock time.
#[must_use]
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|time| time.naive_local())
        })
}

#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Weekday name, `Monday` or `Mon`.
#[must_use]
pub fn day_name(date: NaiveDate, full: bool) -> String {
    date.format(if full { "%A" } else { "%a" }).to_string()
}
