//! Ordered provider fallback.

use cleanroute_core::{Coordinate, Pm25Source};
use futures::future::BoxFuture;
use std::sync::Arc;

/// Tries PM2.5 providers in a fixed priority order and returns the first
/// reading.
///
/// The chain itself implements [`Pm25Source`], so call sites stay
/// provider-agnostic and adding a third provider is an append at
/// construction time. Which provider answered is reported as a diagnostic
/// event only; it never changes the returned value.
pub struct FallbackChain {
    providers: Vec<Arc<dyn Pm25Source>>,
}

impl FallbackChain {
    pub fn new(providers: Vec<Arc<dyn Pm25Source>>) -> Self {
        Self { providers }
    }
}

impl Pm25Source for FallbackChain {
    fn name(&self) -> &'static str {
        "fallback-chain"
    }

    fn reading_near(&self, point: Coordinate) -> BoxFuture<'_, Option<f64>> {
        Box::pin(async move {
            for provider in &self.providers {
                if let Some(value) = provider.reading_near(point).await {
                    tracing::debug!(provider = provider.name(), pm25 = value, "PM2.5 reading");
                    return Some(value);
                }
                tracing::debug!(provider = provider.name(), "no reading, trying next provider");
            }
            tracing::warn!(
                lat = point.lat,
                lon = point.lon,
                "no air quality data from any provider"
            );
            None
        })
    }
}
