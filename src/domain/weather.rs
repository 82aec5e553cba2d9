use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

mod conditions;
mod conversions;
mod daily;
mod hourly;
mod raw;
mod window;

pub use conditions::{
    DEFAULT_ICON, IconKind, WeatherIcon, classify_weather_code, icon_kind, kind_glyph,
    weather_glyph, weather_label,
};
pub use conversions::{
    ConversionError, Precipitation, Reading, Temperature, WindSpeed, celsius_to_fahrenheit,
    day_name, fahrenheit_to_celsius, kmh_to_mph, mm_to_inches, parse_date, parse_datetime,
};
pub use daily::{
    DayBucket, DayBuckets, GroupError, Grouping, RecordOutcome, SkipReason, date_key,
    group_by_day,
};
pub use hourly::{
    FieldAliases, HourRecord, HourlyExtras, TEMPERATURE_ALIASES, extras_at, normalize_hourly,
};
pub use raw::{RawCurrentWeather, RawDailyBlock, RawHourlyBlock, Series, value_at};
pub use window::{HOURS_TO_DISPLAY, next_hours};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindUnit {
    #[default]
    Kmh,
    Mph,
}

impl WindUnit {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Kmh => "km/h",
            Self::Mph => "mph",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecipitationUnit {
    #[default]
    Mm,
    Inches,
}

impl PrecipitationUnit {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Mm => "mm",
            Self::Inches => "in",
        }
    }
}

/// The user's unit selection. Passed explicitly to every display conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayUnits {
    pub temperature: TemperatureUnit,
    pub wind: WindUnit,
    pub precipitation: PrecipitationUnit,
}

impl DisplayUnits {
    #[must_use]
    pub fn metric() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn imperial() -> Self {
        Self {
            temperature: TemperatureUnit::Fahrenheit,
            wind: WindUnit::Mph,
            precipitation: PrecipitationUnit::Inches,
        }
    }

    #[must_use]
    pub fn is_imperial(&self) -> bool {
        *self == Self::imperial()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub admin1: Option<String>,
    pub country: Option<String>,
    pub timezone: Option<String>,
}

impl Location {
    pub fn from_coords(lat: f64, lon: f64) -> Self {
        Self {
            name: format!("{lat:.4}, {lon:.4}"),
            latitude: lat,
            longitude: lon,
            admin1: None,
            country: None,
            timezone: None,
        }
    }

    pub fn display_name(&self) -> String {
        match (&self.admin1, &self.country) {
            (Some(admin), Some(country)) if !admin.is_empty() => {
                format!("{}, {}, {}", self.name, admin, country)
            }
            (_, Some(country)) => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeather {
    pub temperature: Temperature,
    pub wind_speed: WindSpeed,
    pub weather_code: u8,
    pub is_day: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub weather_code: Option<u8>,
    pub temperature_max: Option<Temperature>,
    pub temperature_min: Option<Temperature>,
    pub precipitation_sum: Option<Precipitation>,
}

/// Everything one forecast fetch produced. Values stay metric; rendering
/// converts on the way out.
#[derive(Debug, Clone)]
pub struct ForecastBundle {
    pub location: Location,
    pub current: CurrentWeather,
    pub hourly_raw: RawHourlyBlock,
    pub hourly: Vec<HourRecord>,
    pub days: DayBuckets,
    pub daily: Vec<DailyForecast>,
}

impl ForecastBundle {
    /// Feels-like and humidity come from the first hourly slot.
    #[must_use]
    pub fn current_extras(&self) -> HourlyExtras {
        extras_at(&self.hourly_raw, 0)
    }

    #[must_use]
    pub fn precipitation_today(&self) -> Precipitation {
        self.daily
            .first()
            .and_then(|day| day.precipitation_sum)
            .unwrap_or(Precipitation::from_mm(0.0))
    }
}
