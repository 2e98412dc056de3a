//! Cross-route ordering and best-route selection.

use crate::exposure::{compute_route_metrics, Pm25Source};
use crate::models::{Coordinate, ScoredRoute};
use std::cmp::Ordering;
use thiserror::Error;

/// The single terminal failure of the scoring pipeline.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("no scorable routes: air quality data unavailable for every candidate")]
    NoScorableRoutes,
}

/// Sort scored routes by healthiness, cleanest first.
///
/// The sort is stable, so equal scores keep their relative input order.
/// Identifiers travel with their routes.
pub fn rank_routes(routes: &mut [ScoredRoute]) {
    routes.sort_by(|a, b| {
        b.metrics
            .healthiness_score
            .partial_cmp(&a.metrics.healthiness_score)
            .unwrap_or(Ordering::Equal)
    });
}

/// Score an ordered list of candidate routes and rank them, best first.
///
/// Identifiers are assigned 1-based in input order before the sort, so a
/// skipped candidate still consumes its ordinal. Candidates that cannot be
/// scored (no data along the whole route) are dropped; if that leaves
/// nothing, the whole operation fails with [`ScoreError::NoScorableRoutes`].
pub async fn score_routes(
    source: &dyn Pm25Source,
    candidates: Vec<Vec<Coordinate>>,
    max_samples: usize,
) -> Result<Vec<ScoredRoute>, ScoreError> {
    let mut scored = Vec::with_capacity(candidates.len());
    for (index, geometry) in candidates.into_iter().enumerate() {
        let route_id = index + 1;
        match compute_route_metrics(source, &geometry, max_samples).await {
            Some(metrics) => scored.push(ScoredRoute {
                route_id,
                metrics,
                geometry,
            }),
            None => tracing::warn!(route_id, "skipping route with no air quality coverage"),
        }
    }

    if scored.is_empty() {
        return Err(ScoreError::NoScorableRoutes);
    }

    rank_routes(&mut scored);
    Ok(scored)
}
