use std::fmt::Write as _;

use chrono::NaiveDateTime;

use crate::{
    app::state::AppState,
    cli::IconMode,
    domain::weather::{
        ConversionError, DEFAULT_ICON, DisplayUnits, HourRecord, Temperature,
        classify_weather_code, day_name, icon_kind, kind_glyph, next_hours, weather_glyph,
        weather_label,
    },
};

const DAILY_ROWS: usize = 7;

#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub icon_mode: IconMode,
    pub hours: usize,
    pub now: NaiveDateTime,
}

/// Plain-text dashboard for the state's current forecast. Every number is
/// derived from canonical metric values using `state.units`.
pub fn render(state: &AppState, options: &ReportOptions) -> Result<String, ConversionError> {
    let Some(weather) = state.weather.as_ref() else {
        return Ok(match state.last_error.as_deref() {
            Some(message) => format!("Error: {message}\n"),
            None => "No weather data loaded.\n".to_string(),
        });
    };
    let units = &state.units;
    let mut out = String::new();

    let _ = writeln!(out, "{}", weather.location.display_name());
    if let Some(date) = state.selected_day {
        let _ = writeln!(out, "{}", date.format("%A, %B %-d, %Y"));
        let range = weather
            .days
            .bucket(date)
            .and_then(|day| day.temperature_range());
        if let Some((high, low)) = range {
            let _ = writeln!(
                out,
                "High {} / Low {}",
                high.display(units)?,
                low.display(units)?
            );
        }
    }
    let _ = writeln!(out);

    let current = &weather.current;
    let _ = writeln!(
        out,
        "  {}  {}  {}",
        weather_glyph(current.weather_code, current.is_day, options.icon_mode),
        current.temperature.display(units)?,
        weather_label(current.weather_code),
    );

    let extras = weather.current_extras();
    let feels_like = extras
        .apparent_temperature_c
        .map(|c| Temperature::from_celsius(c).display(units))
        .transpose()?
        .map_or_else(|| "--".to_string(), |reading| reading.to_string());
    let humidity = extras
        .relative_humidity
        .map_or_else(|| "--".to_string(), |h| format!("{} %", h.round()));
    let _ = writeln!(
        out,
        "  Feels like {feels_like}   Humidity {humidity}   Wind {}   Precipitation {}",
        current.wind_speed.display(units)?,
        weather.precipitation_today().display(units)?,
    );

    if !weather.daily.is_empty() {
        let _ = writeln!(out, "\nDaily");
        for day in weather.daily.iter().take(DAILY_ROWS) {
            let kind = day.weather_code.map_or(DEFAULT_ICON, icon_kind);
            let label = day
                .weather_code
                .map_or("Overcast", |code| classify_weather_code(code).label);
            let _ = writeln!(
                out,
                "  {:<4} {}  {} / {}  {label}",
                day_name(day.date, false),
                kind_glyph(kind, options.icon_mode),
                optional_temperature(day.temperature_max, units)?,
                optional_temperature(day.temperature_min, units)?,
            );
        }
    }

    if !weather.days.is_empty() {
        let picker: Vec<String> = weather
            .days
            .dates()
            .map(|date| {
                let name = day_name(date, true);
                if Some(date) == state.selected_day {
                    format!("[{name}]")
                } else {
                    name
                }
            })
            .collect();
        let _ = writeln!(out, "\nDays: {}", picker.join(" "));
    }

    let window = next_hours(state.selected_hours(), options.now, options.hours);
    if !window.is_empty() {
        let heading = state.selected_day.map_or_else(
            || "Hourly".to_string(),
            |date| format!("Hourly · {}", day_name(date, true)),
        );
        let _ = writeln!(out, "\n{heading}");
        for record in window {
            let _ = writeln!(out, "  {}", hourly_line(record, units, options.icon_mode)?);
        }
    }

    Ok(out)
}

fn hourly_line(
    record: &HourRecord,
    units: &DisplayUnits,
    mode: IconMode,
) -> Result<String, ConversionError> {
    let glyph = kind_glyph(record.weather_code.map_or(DEFAULT_ICON, icon_kind), mode);
    let temperature =
        optional_temperature(record.temperature_c.map(Temperature::from_celsius), units)?;
    Ok(format!("{}  {}  {}", record.clock_label(), glyph, temperature))
}

fn optional_temperature(
    value: Option<Temperature>,
    units: &DisplayUnits,
) -> Result<String, ConversionError> {
    Ok(match value {
        Some(temperature) => temperature.display(units)?.to_string(),
        None => "--".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        app::{events::DaySelector, state::AppState},
        domain::weather::parse_datetime,
        test_support::{abuja, fixture_bundle, test_settings},
    };

    fn options(now: &str) -> ReportOptions {
        ReportOptions {
            icon_mode: IconMode::Ascii,
            hours: 8,
            now: parse_datetime(now).unwrap(),
        }
    }

    fn state(units: DisplayUnits) -> AppState {
        let mut state = AppState::new(&test_settings(units));
        let request = state.begin_request();
        state.apply_forecast(request, fixture_bundle(abuja()));
        state
    }

    #[test]
    fn metric_report_has_all_sections() {
        let report =
            render(&state(DisplayUnits::metric()), &options("2025-06-01T10:30")).unwrap();

        assert!(report.starts_with(
            "Abuja, Federal Capital Territory, Nigeria\nSunday, June 1, 2025\nHigh 32°C / Low 20°C\n"
        ));
        assert!(report.contains("  PCL  26°C  Partly cloudy\n"));
        assert!(report.contains(
            "Feels like 28°C   Humidity 64 %   Wind 12.0 km/h   Precipitation 0.00 mm"
        ));
        assert!(report.contains("  Mon  RAN  29°C / 21°C  Rain\n"));
        assert!(report.contains("Days: [Sunday] Monday"));
        assert!(report.contains("Hourly · Sunday\n  10:00  SUN  25°C\n"));
        assert!(report.contains("  17:00  SUN  29°C\n"));
        assert!(!report.contains("18:00"));
    }

    #[test]
    fn imperial_report_converts_from_canonical_values() {
        let report =
            render(&state(DisplayUnits::imperial()), &options("2025-06-01T00:00")).unwrap();

        assert!(report.contains("80°F"));
        assert!(report.contains("Wind 7.5 mph"));
        assert!(report.contains("Precipitation 0.00 in"));
        assert!(report.contains("  Tue  THN  81°F / 69°F  Thunderstorm\n"));
    }

    #[test]
    fn selected_day_drives_hourly_section() {
        let mut state = state(DisplayUnits::metric());
        state.select_day(DaySelector::Offset(1));
        let report = render(&state, &options("2025-06-01T22:00")).unwrap();

        assert!(report.contains("Monday, June 2, 2025"));
        assert!(report.contains("Days: Sunday [Monday]"));
        assert!(report.contains("Hourly · Monday\n  22:00  RAN  28°C\n  23:00  RAN  29°C\n"));
    }

    #[test]
    fn selected_day_summary_shows_its_own_high_and_low() {
        let mut metric = state(DisplayUnits::metric());
        assert!(metric.select_day(DaySelector::Offset(1)));
        let report = render(&metric, &options("2025-06-02T00:00")).unwrap();
        assert!(report.contains("Monday, June 2, 2025\nHigh 29°C / Low 17°C\n"));

        let mut imperial = state(DisplayUnits::imperial());
        assert!(imperial.select_day(DaySelector::Offset(1)));
        let report = render(&imperial, &options("2025-06-02T00:00")).unwrap();
        assert!(report.contains("Monday, June 2, 2025\nHigh 83°F / Low 63°F\n"));
    }

    #[test]
    fn clear_night_shows_moon_for_current_conditions() {
        let mut bundle = fixture_bundle(abuja());
        bundle.current.weather_code = 0;
        bundle.current.is_day = false;
        let mut state = AppState::new(&test_settings(DisplayUnits::metric()));
        let request = state.begin_request();
        state.apply_forecast(request, bundle);

        let report = render(&state, &options("2025-06-01T22:00")).unwrap();
        assert!(report.contains("  MON  26°C  Clear sky\n"));
    }

    #[test]
    fn empty_state_reports_error_or_nothing() {
        let mut state = AppState::new(&test_settings(DisplayUnits::metric()));
        assert_eq!(
            render(&state, &options("2025-06-01T00:00")).unwrap(),
            "No weather data loaded.\n"
        );

        let request = state.begin_request();
        state.record_failure(
            request,
            "forecast request failed".to_string(),
            crate::app::state::ErrorContext::Place("Kano".to_string()),
        );
        assert_eq!(
            render(&state, &options("2025-06-01T00:00")).unwrap(),
            "Error: forecast request failed\n"
        );
    }
}
