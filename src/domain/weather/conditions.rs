use serde::Serialize;

use crate::cli::IconMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconKind {
    Clear,
    PartlyCloudy,
    Overcast,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
}

/// What the dashboard shows for a weather code: the icon key plus the text
/// read out in place of the icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherIcon {
    pub kind: IconKind,
    pub label: &'static str,
}

/// Codes outside the table fall back to this.
pub const DEFAULT_ICON: IconKind = IconKind::Overcast;

#[must_use]
pub fn icon_kind(code: u8) -> IconKind {
    match code {
        0 => IconKind::Clear,
        2 => IconKind::PartlyCloudy,
        1 | 3 => IconKind::Overcast,
        45 | 48 => IconKind::Fog,
        51 | 53 | 55 => IconKind::Drizzle,
        61 | 63 | 65 | 66 | 67 | 80 | 81 | 82 => IconKind::Rain,
        71 | 73 | 75 => IconKind::Snow,
        95 | 96 | 99 => IconKind::Thunderstorm,
        _ => DEFAULT_ICON,
    }
}

#[must_use]
pub fn classify_weather_code(code: u8) -> WeatherIcon {
    let kind = icon_kind(code);
    let label = match kind {
        IconKind::Clear => "Clear sky",
        IconKind::PartlyCloudy => "Partly cloudy",
        IconKind::Overcast => "Overcast",
        IconKind::Fog => "Fog",
        IconKind::Drizzle => "Drizzle",
        IconKind::Rain => "Rain",
        IconKind::Snow => "Snow",
        IconKind::Thunderstorm => "Thunderstorm",
    };
    WeatherIcon { kind, label }
}

/// Glyph for live conditions. A clear sky after dark shows the moon.
#[must_use]
pub fn weather_glyph(code: u8, is_day: bool, mode: IconMode) -> &'static str {
    match icon_kind(code) {
        IconKind::Clear if !is_day => match mode {
            IconMode::Ascii => "MON",
            IconMode::Emoji => "🌙",
            IconMode::Unicode => "☾",
        },
        kind => kind_glyph(kind, mode),
    }
}

#[must_use]
pub fn kind_glyph(kind: IconKind, mode: IconMode) -> &'static str {
    let (ascii, emoji, unicode) = icon_tokens(kind);
    match mode {
        IconMode::Ascii => ascii,
        IconMode::Emoji => emoji,
        IconMode::Unicode => unicode,
    }
}

fn icon_tokens(kind: IconKind) -> (&'static str, &'static str, &'static str) {
    match kind {
        IconKind::Clear => ("SUN", "☀️", "☀"),
        IconKind::PartlyCloudy => ("PCL", "⛅", "⛅"),
        IconKind::Overcast => ("CLD", "☁️", "☁"),
        IconKind::Fog => ("FOG", "🌫️", "░"),
        IconKind::Drizzle => ("DRZ", "🌦️", "☔"),
        IconKind::Rain => ("RAN", "🌧️", "☂"),
        IconKind::Snow => ("SNW", "🌨️", "❄"),
        IconKind::Thunderstorm => ("THN", "⛈️", "⚡"),
    }
}

const WEATHER_LABELS: &[(u8, &str)] = &[
    (0, "Clear sky"),
    (1, "Mainly clear"),
    (2, "Partly cloudy"),
    (3, "Overcast"),
    (45, "Fog"),
    (48, "Depositing rime fog"),
    (51, "Light drizzle"),
    (53, "Moderate drizzle"),
    (55, "Dense drizzle"),
    (56, "Light freezing drizzle"),
    (57, "Dense freezing drizzle"),
    (61, "Slight rain"),
    (63, "Moderate rain"),
    (65, "Heavy rain"),
    (66, "Light freezing rain"),
    (67, "Heavy freezing rain"),
    (71, "Slight snowfall"),
    (73, "Moderate snowfall"),
    (75, "Heavy snowfall"),
    (77, "Snow grains"),
    (80, "Slight rain showers"),
    (81, "Moderate rain showers"),
    (82, "Violent rain showers"),
    (85, "Slight snow showers"),
    (86, "Heavy snow showers"),
    (95, "Thunderstorm"),
    (96, "Thunderstorm + light hail"),
    (99, "Thunderstorm + heavy hail"),
];

/// WMO description of a code, `"Unknown"` outside the table.
#[must_use]
pub fn weather_label(code: u8) -> &'static str {
    WEATHER_LABELS
        .iter()
        .find_map(|(candidate, label)| (*candidate == code).then_some(*label))
        .unwrap_or("Unknown")
}
