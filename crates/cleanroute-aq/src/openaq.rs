//! OpenAQ v3 client: distance-weighted PM2.5 near a coordinate.

use crate::round2;
use anyhow::{bail, Context, Result};
use cleanroute_core::{haversine_distance, Coordinate, Pm25Source};
use futures::future::BoxFuture;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openaq.org/v3/latest";

/// Guards the inverse-distance weight against division by zero when a
/// station coincides with the query point.
const DISTANCE_EPSILON_KM: f64 = 0.001;

/// Settings for the OpenAQ spatial query.
#[derive(Debug, Clone)]
pub struct OpenAqConfig {
    pub base_url: String,
    /// Sent as `X-API-Key` when present; the public tier works without one.
    pub api_key: Option<String>,
    /// Station search radius in meters.
    pub radius_m: u32,
    /// Maximum number of stations to request.
    pub station_limit: u32,
    pub timeout: Duration,
}

impl Default for OpenAqConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            radius_m: 50_000,
            station_limit: 5,
            timeout: Duration::from_secs(15),
        }
    }
}

/// HTTP client for the OpenAQ v3 `latest` endpoint.
pub struct OpenAqClient {
    client: Client,
    config: OpenAqConfig,
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[serde(default)]
    results: Vec<StationResult>,
}

#[derive(Debug, Deserialize)]
struct StationResult {
    #[serde(default)]
    measurements: Vec<Measurement>,
    coordinates: Option<StationCoordinates>,
}

#[derive(Debug, Deserialize)]
struct Measurement {
    parameter: String,
    value: f64,
}

#[derive(Debug, Deserialize)]
struct StationCoordinates {
    latitude: f64,
    longitude: f64,
}

impl OpenAqClient {
    pub fn new(config: OpenAqConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(config.timeout)
                .build()
                .expect("Failed to create HTTP client"),
            config,
        }
    }

    async fn fetch(&self, point: Coordinate) -> Result<Option<f64>> {
        let mut request = self.client.get(&self.config.base_url).query(&[
            ("coordinates", format!("{},{}", point.lat, point.lon)),
            ("radius", self.config.radius_m.to_string()),
            ("parameter", "pm25".to_string()),
            ("limit", self.config.station_limit.to_string()),
        ]);
        if let Some(key) = self.config.api_key.as_deref() {
            request = request.header("X-API-Key", key);
        }

        let response = request.send().await.context("OpenAQ request failed")?;
        if !response.status().is_success() {
            bail!("OpenAQ HTTP {}", response.status());
        }

        let payload: LatestResponse = response
            .json()
            .await
            .context("OpenAQ response was not valid JSON")?;
        Ok(weighted_average(point, &payload.results))
    }
}

/// Distance-weighted average of the stations' PM2.5 values.
///
/// Each station weighs in at `1 / (distance_km + ε)`, so near stations
/// dominate the estimate. Stations without a pm25 measurement or without a
/// coordinate are skipped; no usable station means no reading.
fn weighted_average(point: Coordinate, stations: &[StationResult]) -> Option<f64> {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;

    for station in stations {
        let Some(coords) = &station.coordinates else {
            continue;
        };
        let Some(pm) = station
            .measurements
            .iter()
            .find(|m| m.parameter == "pm25")
            .map(|m| m.value)
        else {
            continue;
        };

        let station_point = Coordinate::new(coords.latitude, coords.longitude);
        let weight = 1.0 / (haversine_distance(point, station_point) + DISTANCE_EPSILON_KM);
        weighted_sum += pm * weight;
        weight_total += weight;
    }

    if weight_total == 0.0 {
        return None;
    }
    Some(round2(weighted_sum / weight_total))
}

impl Pm25Source for OpenAqClient {
    fn name(&self) -> &'static str {
        "openaq"
    }

    fn reading_near(&self, point: Coordinate) -> BoxFuture<'_, Option<f64>> {
        Box::pin(async move {
            match self.fetch(point).await {
                Ok(reading) => reading,
                Err(err) => {
                    tracing::warn!(error = %err, "OpenAQ lookup failed");
                    None
                }
            }
        })
    }
}
