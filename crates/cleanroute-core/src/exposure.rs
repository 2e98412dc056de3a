//! Per-route pollution exposure aggregation.

use crate::models::{Coordinate, RouteMetrics};
use crate::sampling::sample_route;
use futures::future::BoxFuture;

/// Weight of the sustained-average term in the pollution score.
const AVG_WEIGHT: f64 = 0.7;
/// Weight of the peak term in the pollution score.
const MAX_WEIGHT: f64 = 0.3;
/// Linear scale from pollution score to healthiness; a pollution score of
/// 500 lands exactly on the zero floor.
const HEALTHINESS_DIVISOR: f64 = 5.0;

/// A source of PM2.5 readings near a coordinate.
///
/// Implementations must be total: provider failures of any kind (timeout,
/// bad status, malformed body, missing credential) are reported as `None`,
/// never as an error. Sources are `Send + Sync` so lookups for independent
/// samples can be issued concurrently by the caller.
pub trait Pm25Source: Send + Sync {
    /// Short provider name for diagnostics.
    fn name(&self) -> &'static str;

    /// PM2.5 concentration (µg/m³) near `point`, or `None` when no data
    /// is available from this source.
    fn reading_near(&self, point: Coordinate) -> BoxFuture<'_, Option<f64>>;
}

/// Round to two decimal places for stable presentation output.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Compute exposure metrics for one candidate route.
///
/// Samples the geometry, queries the source at each sample point, and
/// aggregates the readings that came back. Averages divide by the count of
/// contributing samples, so routes with partial data coverage still score.
///
/// Returns `None` when no sample along the route produced a reading. The
/// caller must treat that as "route cannot be scored", not zero pollution.
pub async fn compute_route_metrics(
    source: &dyn Pm25Source,
    route: &[Coordinate],
    max_samples: usize,
) -> Option<RouteMetrics> {
    let samples = sample_route(route, max_samples);
    tracing::debug!(points = samples.len(), "sampling route for PM2.5");

    let mut pm_values = Vec::with_capacity(samples.len());
    for point in samples {
        if let Some(value) = source.reading_near(point).await {
            pm_values.push(value);
        }
    }

    if pm_values.is_empty() {
        tracing::warn!("no air quality data along route");
        return None;
    }

    let avg_pm = pm_values.iter().sum::<f64>() / pm_values.len() as f64;
    let max_pm = pm_values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let pollution_score = AVG_WEIGHT * avg_pm + MAX_WEIGHT * max_pm;
    let healthiness_score = (100.0 - pollution_score / HEALTHINESS_DIVISOR).max(0.0);

    Some(RouteMetrics {
        avg_pm25: round2(avg_pm),
        max_pm25: round2(max_pm),
        pollution_score: round2(pollution_score),
        healthiness_score: round2(healthiness_score),
        samples_used: pm_values.len(),
    })
}
