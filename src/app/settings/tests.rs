use std::io::Write;

use clap::Parser;
use tempfile::NamedTempFile;

use super::*;

fn cli(args: &[&str]) -> Cli {
    Cli::parse_from(std::iter::once("meteo-dash").chain(args.iter().copied()))
}

fn settings_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp settings file");
    file.write_all(content.as_bytes()).expect("write settings");
    file
}

#[test]
fn defaults_are_metric_with_builtin_place() {
    let settings = RuntimeSettings::resolve(&cli(&[]), &FileSettings::default());
    assert_eq!(settings.units, DisplayUnits::metric());
    assert_eq!(settings.default_place, DEFAULT_PLACE);
    assert_eq!(settings.default_country, DEFAULT_COUNTRY);
    assert_eq!(settings.hours, 8);
    assert_eq!(settings.retries, 3);
}

#[test]
fn file_values_apply_under_cli_flags() {
    let file = FileSettings {
        place: Some("Lagos".to_string()),
        units: Some(UnitSystemArg::Imperial),
        wind: Some(WindUnit::Kmh),
        ..FileSettings::default()
    };

    let settings = RuntimeSettings::resolve(&cli(&[]), &file);
    assert_eq!(settings.default_place, "Lagos");
    assert_eq!(settings.units.temperature, TemperatureUnit::Fahrenheit);
    assert_eq!(settings.units.wind, WindUnit::Kmh);

    let settings = RuntimeSettings::resolve(
        &cli(&["--units", "metric", "--precip-unit", "inches"]),
        &file,
    );
    assert_eq!(settings.units.temperature, TemperatureUnit::Celsius);
    assert_eq!(settings.units.wind, WindUnit::Kmh);
    assert_eq!(settings.units.precipitation, PrecipitationUnit::Inches);
}

#[test]
fn per_quantity_flag_overrides_preset() {
    let settings = RuntimeSettings::resolve(
        &cli(&["--units", "imperial", "--temp-unit", "c"]),
        &FileSettings::default(),
    );
    assert_eq!(settings.units.temperature, TemperatureUnit::Celsius);
    assert_eq!(settings.units.wind, WindUnit::Mph);
    assert_eq!(settings.units.precipitation, PrecipitationUnit::Inches);
}

#[test]
fn reads_settings_json() {
    let file = settings_file(
        r#"{"place": "Kano", "country": "Nigeria", "units": "imperial", "temperature": "celsius"}"#,
    );
    let parsed = read_file_settings(file.path());
    assert_eq!(parsed.place.as_deref(), Some("Kano"));
    assert_eq!(parsed.units, Some(UnitSystemArg::Imperial));
    assert_eq!(parsed.temperature, Some(TemperatureUnit::Celsius));
    assert_eq!(parsed.wind, None);
}

#[test]
fn invalid_or_missing_files_fall_back_to_defaults() {
    let file = settings_file("{ not json");
    assert_eq!(read_file_settings(file.path()), FileSettings::default());

    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("settings.json");
    assert_eq!(read_file_settings(&missing), FileSettings::default());
}

#[test]
fn fallback_location_is_abuja_region() {
    let location = fallback_location();
    assert_eq!(location.timezone.as_deref(), Some("Africa/Lagos"));
    assert!((location.latitude - 9.082).abs() < f64::EPSILON);
}
