#![allow(clippy::missing_errors_doc)]

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::domain::weather::{PrecipitationUnit, TemperatureUnit, WindUnit};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystemArg {
    Metric,
    Imperial,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum TempUnitArg {
    C,
    F,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum WindUnitArg {
    Kmh,
    Mph,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PrecipUnitArg {
    Mm,
    Inches,
}

impl From<TempUnitArg> for TemperatureUnit {
    fn from(value: TempUnitArg) -> Self {
        match value {
            TempUnitArg::C => Self::Celsius,
            TempUnitArg::F => Self::Fahrenheit,
        }
    }
}

impl From<WindUnitArg> for WindUnit {
    fn from(value: WindUnitArg) -> Self {
        match value {
            WindUnitArg::Kmh => Self::Kmh,
            WindUnitArg::Mph => Self::Mph,
        }
    }
}

impl From<PrecipUnitArg> for PrecipitationUnit {
    fn from(value: PrecipUnitArg) -> Self {
        match value {
            PrecipUnitArg::Mm => Self::Mm,
            PrecipUnitArg::Inches => Self::Inches,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconMode {
    Unicode,
    Ascii,
    Emoji,
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "meteo-dash",
    version,
    about = "Current, hourly and daily forecast for a place"
)]
pub struct Cli {
    /// Place to look up (default from settings, else Abuja)
    pub place: Option<String>,

    /// Unit system preset
    #[arg(long, value_enum)]
    pub units: Option<UnitSystemArg>,

    /// Temperature unit override
    #[arg(long, value_enum)]
    pub temp_unit: Option<TempUnitArg>,

    /// Wind speed unit override
    #[arg(long, value_enum)]
    pub wind_unit: Option<WindUnitArg>,

    /// Precipitation unit override
    #[arg(long, value_enum)]
    pub precip_unit: Option<PrecipUnitArg>,

    /// Direct latitude (requires --lon)
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Direct longitude (requires --lat)
    #[arg(long, allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Day to show hourly data for: a date (YYYY-MM-DD) or an offset from the first day
    #[arg(long)]
    pub day: Option<String>,

    /// Number of hourly slots to show
    #[arg(long, default_value_t = 8, value_parser = clap::value_parser!(u8).range(1..=24))]
    pub hours: u8,

    /// Force ASCII icons
    #[arg(long, conflicts_with = "emoji_icons")]
    pub ascii_icons: bool,

    /// Force emoji icons
    #[arg(long)]
    pub emoji_icons: bool,

    /// Fetch attempts before giving up
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub retries: u8,

    /// Forecast API base URL
    #[arg(long, hide = true)]
    pub forecast_url: Option<String>,

    /// Geocoding API base URL
    #[arg(long, hide = true)]
    pub geocode_url: Option<String>,

    /// Reverse geocoding API base URL
    #[arg(long, hide = true)]
    pub reverse_url: Option<String>,
}

impl Cli {
    pub fn validate(&self) -> anyhow::Result<()> {
        match (self.lat, self.lon) {
            (Some(_), None) | (None, Some(_)) => {
                anyhow::bail!("--lat and --lon must be provided together")
            }
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn icon_mode(&self) -> IconMode {
        if self.ascii_icons {
            IconMode::Ascii
        } else if self.emoji_icons {
            IconMode::Emoji
        } else {
            IconMode::Unicode
        }
    }
}
