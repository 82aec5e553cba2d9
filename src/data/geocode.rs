use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

use crate::domain::weather::Location;

pub const GEOCODE_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
}

impl GeocodeClient {
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(8))
            .build()
            .context("building geocoding http client failed")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Best match for `place`, or `None` when the service knows no such place.
    pub async fn search(&self, place: &str) -> Result<Option<Location>> {
        tracing::debug!(%place, "geocoding");
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("name", place), ("count", "1")])
            .send()
            .await
            .context("geocoding request failed")?
            .error_for_status()
            .context("geocoding request returned non-success status")?;

        let payload: GeocodeResponse = response
            .json()
            .await
            .context("failed to decode geocoding response")?;

        Ok(top_result(payload))
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    results: Option<Vec<GeocodeResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    name: String,
    latitude: f64,
    longitude: f64,
    admin1: Option<String>,
    country: Option<String>,
    timezone: Option<String>,
}

fn top_result(payload: GeocodeResponse) -> Option<Location> {
    let entry = payload.results?.into_iter().next()?;
    Some(Location {
        name: entry.name,
        latitude: entry.latitude,
        longitude: entry.longitude,
        admin1: entry.admin1,
        country: entry.country,
        timezone: entry.timezone,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_first_result() {
        let payload: GeocodeResponse = serde_json::from_str(
            r#"{"results":[
                {"name":"Lagos","latitude":6.45,"longitude":3.39,"country":"Nigeria","admin1":"Lagos","timezone":"Africa/Lagos"},
                {"name":"Lagos","latitude":37.1,"longitude":-8.67,"country":"Portugal"}
            ]}"#,
        )
        .unwrap();
        let location = top_result(payload).unwrap();
        assert_eq!(location.country.as_deref(), Some("Nigeria"));
        assert_eq!(location.timezone.as_deref(), Some("Africa/Lagos"));
    }

    #[test]
    fn missing_or_empty_results_mean_not_found() {
        let missing: GeocodeResponse =
            serde_json::from_str(r#"{"generationtime_ms":0.5}"#).unwrap();
        assert!(top_result(missing).is_none());
        let empty: GeocodeResponse = serde_json::from_str(r#"{"results":[]}"#).unwrap();
        assert!(top_result(empty).is_none());
    }
}
