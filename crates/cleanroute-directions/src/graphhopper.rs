//! GraphHopper Directions API client.

use anyhow::{bail, Context, Result};
use cleanroute_core::Coordinate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://graphhopper.com/api/1";

/// HTTP client for the GraphHopper routing provider.
pub struct GraphHopperClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    #[serde(default)]
    paths: Vec<RoutePath>,
}

#[derive(Debug, Deserialize)]
struct RoutePath {
    points: PathPoints,
}

#[derive(Debug, Deserialize)]
struct PathPoints {
    /// GeoJSON order: each pair is `[lon, lat]`.
    coordinates: Vec<[f64; 2]>,
}

impl GraphHopperClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Fetch candidate driving routes between two points.
    ///
    /// Each returned geometry is in travel order. At most `alternatives`
    /// routes come back; the free GraphHopper plan serves a single path.
    pub async fn fetch_routes(
        &self,
        start: Coordinate,
        end: Coordinate,
        alternatives: usize,
    ) -> Result<Vec<Vec<Coordinate>>> {
        if self.api_key.trim().is_empty() {
            bail!("GraphHopper API key is not configured");
        }

        let url = format!("{}/route", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("point", format!("{},{}", start.lat, start.lon)),
                ("point", format!("{},{}", end.lat, end.lon)),
                ("vehicle", "car".to_string()),
                ("locale", "en".to_string()),
                ("points_encoded", "false".to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await
            .context("network error while fetching route")?;

        if !response.status().is_success() {
            bail!("failed to fetch route: HTTP {}", response.status());
        }

        let payload: RouteResponse = response
            .json()
            .await
            .context("route response was not valid JSON")?;
        if payload.paths.is_empty() {
            bail!("no route found between the requested points");
        }

        let routes = routes_from_paths(payload.paths, alternatives);
        tracing::debug!(count = routes.len(), "retrieved candidate routes");
        Ok(routes)
    }
}

/// Convert response paths into lat/lon geometries, keeping at most
/// `alternatives` of them.
fn routes_from_paths(paths: Vec<RoutePath>, alternatives: usize) -> Vec<Vec<Coordinate>> {
    paths
        .into_iter()
        .take(alternatives.max(1))
        .map(|path| {
            path.points
                .coordinates
                .into_iter()
                .map(|pair| Coordinate::new(pair[1], pair[0]))
                .collect()
        })
        .collect()
}
