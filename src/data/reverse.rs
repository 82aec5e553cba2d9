use reqwest::Client;
use serde::Deserialize;

use crate::domain::weather::Location;

pub const REVERSE_URL: &str = "https://api.bigdatacloud.net/data/reverse-geocode-client";
pub const FALLBACK_CITY: &str = "Local Area";

/// Names a coordinate pair. Never fails: the BigDataCloud lookup is tried
/// first, then the forecast endpoint's timezone, then fixed defaults.
#[derive(Debug, Clone)]
pub struct ReverseGeocoder {
    client: Option<Client>,
    reverse_url: String,
    forecast_url: String,
    default_country: String,
}

impl ReverseGeocoder {
    pub fn new(
        reverse_url: impl Into<String>,
        forecast_url: impl Into<String>,
        default_country: impl Into<String>,
    ) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(5))
            .build()
            .map_err(|err| tracing::warn!(error = %err, "reverse geocoding client unavailable"))
            .ok();
        Self {
            client,
            reverse_url: reverse_url.into(),
            forecast_url: forecast_url.into(),
            default_country: default_country.into(),
        }
    }

    pub async fn resolve(&self, lat: f64, lon: f64) -> Location {
        if let Some(location) = self.lookup_place(lat, lon).await {
            return location;
        }
        tracing::warn!(lat, lon, "reverse geocoding failed, inferring place from timezone");
        if let Some(timezone) = self.lookup_timezone(lat, lon).await {
            return Location {
                name: city_from_timezone(&timezone),
                latitude: lat,
                longitude: lon,
                admin1: None,
                country: Some(self.default_country.clone()),
                timezone: Some(timezone),
            };
        }
        tracing::warn!(lat, lon, "timezone lookup failed, using default place name");
        Location {
            name: FALLBACK_CITY.to_string(),
            latitude: lat,
            longitude: lon,
            admin1: None,
            country: Some(self.default_country.clone()),
            timezone: None,
        }
    }

    async fn lookup_place(&self, lat: f64, lon: f64) -> Option<Location> {
        let response: PlaceResponse = self
            .client
            .as_ref()?
            .get(&self.reverse_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("localityLanguage", "en".to_string()),
            ])
            .send()
            .await
            .ok()?
            .error_for_status()
            .ok()?
            .json()
            .await
            .ok()?;

        let name = response
            .city
            .filter(|c| !c.is_empty())
            .or(response.locality.filter(|l| !l.is_empty()))
            .unwrap_or_else(|| FALLBACK_CITY.to_string());
        let timezone = response
            .locality_info
            .and_then(|info| info.informative.into_iter().next())
            .and_then(|entry| entry.name)
            .unwrap_or_else(|| "UTC".to_string());

        Some(Location {
            name,
            latitude: lat,
            longitude: lon,
            admin1: response.principal_subdivision.filter(|s| !s.is_empty()),
            country: Some(
                response
                    .country_name
                    .filter(|c| !c.is_empty())
                    .unwrap_or_else(|| self.default_country.clone()),
            ),
            timezone: Some(timezone),
        })
    }

    async fn lookup_timezone(&self, lat: f64, lon: f64) -> Option<String> {
        let response: TimezoneResponse = self
            .client
            .as_ref()?
            .get(&self.forecast_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("current_weather", "true".to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .ok()?
            .error_for_status()
            .ok()?
            .json()
            .await
            .ok()?;
        Some(response.timezone.unwrap_or_else(|| "UTC".to_string()))
    }
}

/// `Europe/Stockholm` → `Stockholm`, `America/New_York` → `New York`.
#[must_use]
pub fn city_from_timezone(timezone: &str) -> String {
    match timezone.rsplit_once('/') {
        Some((_, city)) if !city.is_empty() => city.replace('_', " "),
        _ => FALLBACK_CITY.to_string(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaceResponse {
    city: Option<String>,
    locality: Option<String>,
    principal_subdivision: Option<String>,
    country_name: Option<String>,
    locality_info: Option<LocalityInfo>,
}

#[derive(Debug, Deserialize)]
struct LocalityInfo {
    #[serde(default)]
    informative: Vec<InformativeEntry>,
}

#[derive(Debug, Deserialize)]
struct InformativeEntry {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TimezoneResponse {
    timezone: Option<String>,
}
