//! AQICN geo-feed client: single-point fallback PM2.5.

use crate::round2;
use anyhow::{bail, Context, Result};
use cleanroute_core::{Coordinate, Pm25Source};
use futures::future::BoxFuture;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.waqi.info";

/// Settings for the AQICN geo feed.
#[derive(Debug, Clone)]
pub struct AqicnConfig {
    pub base_url: String,
    /// Access token; without one the provider is permanently unavailable
    /// and lookups are skipped without a network call.
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for AqicnConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP client for the AQICN `feed/geo:` endpoint.
pub struct AqicnClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FeedResponse {
    status: String,
    data: Option<FeedData>,
}

#[derive(Debug, Deserialize)]
struct FeedData {
    #[serde(default)]
    iaqi: Iaqi,
}

#[derive(Debug, Default, Deserialize)]
struct Iaqi {
    pm25: Option<IaqiValue>,
}

#[derive(Debug, Deserialize)]
struct IaqiValue {
    v: f64,
}

impl AqicnClient {
    pub fn new(config: AqicnConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(config.timeout)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: config.base_url,
            token: config
                .token
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
        }
    }

    async fn fetch(&self, point: Coordinate, token: &str) -> Result<Option<f64>> {
        let url = format!("{}/feed/geo:{};{}/", self.base_url, point.lat, point.lon);
        let response = self
            .client
            .get(&url)
            .query(&[("token", token)])
            .send()
            .await
            .context("AQICN request failed")?;
        if !response.status().is_success() {
            bail!("AQICN HTTP {}", response.status());
        }

        let payload: FeedResponse = response
            .json()
            .await
            .context("AQICN response was not valid JSON")?;
        Ok(reading_from_feed(payload))
    }
}

/// Pull the PM2.5 value out of a feed payload, if the station reports one.
fn reading_from_feed(payload: FeedResponse) -> Option<f64> {
    if payload.status != "ok" {
        return None;
    }
    payload
        .data
        .and_then(|data| data.iaqi.pm25)
        .map(|reading| round2(reading.v))
}

impl Pm25Source for AqicnClient {
    fn name(&self) -> &'static str {
        "aqicn"
    }

    fn reading_near(&self, point: Coordinate) -> BoxFuture<'_, Option<f64>> {
        Box::pin(async move {
            let Some(token) = self.token.as_deref() else {
                tracing::debug!("AQICN token not configured, skipping provider");
                return None;
            };
            match self.fetch(point, token).await {
                Ok(reading) => reading,
                Err(err) => {
                    tracing::warn!(error = %err, "AQICN lookup failed");
                    None
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> FeedResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn extracts_pm25_from_ok_feed() {
        let payload = parse(json!({
            "status": "ok",
            "data": {"iaqi": {"pm25": {"v": 42.456}, "o3": {"v": 11.0}}}
        }));
        assert_eq!(reading_from_feed(payload), Some(42.46));
    }

    #[test]
    fn zero_is_a_valid_reading() {
        let payload = parse(json!({
            "status": "ok",
            "data": {"iaqi": {"pm25": {"v": 0.0}}}
        }));
        assert_eq!(reading_from_feed(payload), Some(0.0));
    }

    #[test]
    fn error_status_is_absent() {
        let payload = parse(json!({"status": "error", "data": null}));
        assert_eq!(reading_from_feed(payload), None);
    }

    #[test]
    fn missing_pm25_is_absent() {
        let payload = parse(json!({
            "status": "ok",
            "data": {"iaqi": {"o3": {"v": 11.0}}}
        }));
        assert_eq!(reading_from_feed(payload), None);
    }

    #[tokio::test]
    async fn missing_token_skips_without_network() {
        // Unroutable base URL: a network attempt would error, a skip won't.
        let client = AqicnClient::new(AqicnConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            token: None,
            ..AqicnConfig::default()
        });
        assert_eq!(
            client.reading_near(Coordinate::new(28.6, 77.2)).await,
            None
        );
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let client = AqicnClient::new(AqicnConfig {
            token: Some("   ".to_string()),
            ..AqicnConfig::default()
        });
        assert!(client.token.is_none());
    }
}
