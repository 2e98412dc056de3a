//! OpenCage forward-geocoding client.

use anyhow::{bail, Context, Result};
use cleanroute_core::Coordinate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.opencagedata.com";

/// HTTP client for the OpenCage geocoder.
pub struct OpenCageClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    lat: f64,
    lng: f64,
}

impl OpenCageClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Resolve a free-form place name to a coordinate.
    ///
    /// Returns `Ok(None)` when the geocoder has no match for the query;
    /// transport and HTTP failures are errors.
    pub async fn geocode(&self, place: &str) -> Result<Option<Coordinate>> {
        let url = format!("{}/geocode/v1/json", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("q", place), ("key", self.api_key.as_str())])
            .send()
            .await
            .with_context(|| format!("geocoding request failed for {place:?}"))?;

        if !response.status().is_success() {
            bail!("geocoding failed for {place:?}: HTTP {}", response.status());
        }

        let payload: GeocodeResponse = response
            .json()
            .await
            .context("geocoding response was not valid JSON")?;
        Ok(first_coordinate(payload))
    }
}

fn first_coordinate(payload: GeocodeResponse) -> Option<Coordinate> {
    payload
        .results
        .first()
        .map(|result| Coordinate::new(result.geometry.lat, result.geometry.lng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn takes_the_first_result() {
        let payload: GeocodeResponse = serde_json::from_value(json!({
            "results": [
                {"geometry": {"lat": 28.6315, "lng": 77.2167}},
                {"geometry": {"lat": 51.5072, "lng": -0.1276}}
            ]
        }))
        .unwrap();
        assert_eq!(
            first_coordinate(payload),
            Some(Coordinate::new(28.6315, 77.2167))
        );
    }

    #[test]
    fn no_results_means_no_match() {
        let payload: GeocodeResponse = serde_json::from_value(json!({"results": []})).unwrap();
        assert_eq!(first_coordinate(payload), None);
    }
}
