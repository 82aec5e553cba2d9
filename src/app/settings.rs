use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::{
    cli::{Cli, IconMode, UnitSystemArg},
    domain::weather::{DisplayUnits, Location, PrecipitationUnit, TemperatureUnit, WindUnit},
};

pub const DEFAULT_PLACE: &str = "Abuja";
pub const DEFAULT_COUNTRY: &str = "Nigeria";

/// Used when even the default place cannot be geocoded.
pub fn fallback_location() -> Location {
    Location {
        name: DEFAULT_COUNTRY.to_string(),
        latitude: 9.082,
        longitude: 8.6753,
        admin1: None,
        country: Some("NG".to_string()),
        timezone: Some("Africa/Lagos".to_string()),
    }
}

/// Contents of `settings.json`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    pub place: Option<String>,
    pub country: Option<String>,
    pub units: Option<UnitSystemArg>,
    pub temperature: Option<TemperatureUnit>,
    pub wind: Option<WindUnit>,
    pub precipitation: Option<PrecipitationUnit>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeSettings {
    pub units: DisplayUnits,
    pub default_place: String,
    pub default_country: String,
    pub icon_mode: IconMode,
    pub hours: usize,
    pub retries: u32,
}

impl RuntimeSettings {
    /// Layers CLI flags over file settings over built-in defaults. Unit
    /// presets apply before per-quantity overrides at each layer.
    pub fn resolve(cli: &Cli, file: &FileSettings) -> Self {
        let mut units = preset(file.units);
        apply_overrides(&mut units, file.temperature, file.wind, file.precipitation);
        if cli.units.is_some() {
            units = preset(cli.units);
        }
        apply_overrides(
            &mut units,
            cli.temp_unit.map(Into::into),
            cli.wind_unit.map(Into::into),
            cli.precip_unit.map(Into::into),
        );

        Self {
            units,
            default_place: file
                .place
                .clone()
                .unwrap_or_else(|| DEFAULT_PLACE.to_string()),
            default_country: file
                .country
                .clone()
                .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
            icon_mode: cli.icon_mode(),
            hours: usize::from(cli.hours),
            retries: u32::from(cli.retries),
        }
    }
}

fn preset(system: Option<UnitSystemArg>) -> DisplayUnits {
    match system {
        Some(UnitSystemArg::Imperial) => DisplayUnits::imperial(),
        Some(UnitSystemArg::Metric) | None => DisplayUnits::metric(),
    }
}

fn apply_overrides(
    units: &mut DisplayUnits,
    temperature: Option<TemperatureUnit>,
    wind: Option<WindUnit>,
    precipitation: Option<PrecipitationUnit>,
) {
    if let Some(temperature) = temperature {
        units.temperature = temperature;
    }
    if let Some(wind) = wind {
        units.wind = wind;
    }
    if let Some(precipitation) = precipitation {
        units.precipitation = precipitation;
    }
}

pub fn load_runtime_settings(cli: &Cli) -> RuntimeSettings {
    let file = settings_path()
        .map(|path| read_file_settings(&path))
        .unwrap_or_default();
    RuntimeSettings::resolve(cli, &file)
}

/// Missing files are normal; unreadable or invalid ones are logged and
/// ignored.
pub fn read_file_settings(path: &Path) -> FileSettings {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return FileSettings::default(),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "cannot read settings file");
            return FileSettings::default();
        }
    };
    serde_json::from_str(&content).unwrap_or_else(|err| {
        tracing::warn!(path = %path.display(), error = %err, "ignoring invalid settings file");
        FileSettings::default()
    })
}

fn settings_path() -> Option<PathBuf> {
    if let Some(base) = std::env::var_os("METEO_DASH_CONFIG_DIR") {
        return Some(PathBuf::from(base).join("settings.json"));
    }

    let home = std::env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("meteo-dash")
            .join("settings.json"),
    )
}

#[cfg(test)]
mod tests;
