//! Route recommendation endpoint.

use crate::cache::{self, CachedRanking, CachedRoutes};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use cleanroute_core::{score_routes, Coordinate, ScoreError, ScoredRoute};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Sampling density bounds exposed to clients.
const MIN_SAMPLES: usize = 5;
const MAX_SAMPLES: usize = 25;

type ApiError = (StatusCode, Json<serde_json::Value>);

#[derive(Debug, Default, Deserialize)]
pub struct RecommendRequest {
    /// Start position; omit when `start_place` is given.
    #[serde(default)]
    pub start: Option<Coordinate>,
    #[serde(default)]
    pub end: Option<Coordinate>,
    /// Free-form place names resolved through the geocoder.
    #[serde(default)]
    pub start_place: Option<String>,
    #[serde(default)]
    pub end_place: Option<String>,
    /// Points along each route to query for PM2.5, clamped to [5, 25].
    #[serde(default)]
    pub samples: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    /// Identifier of the cleanest route. Routes are listed best first.
    pub best_route_id: usize,
    pub routes: Vec<ScoredRoute>,
    /// Sampling density actually used.
    pub samples: usize,
    pub scored_at: DateTime<Utc>,
}

pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecommendRequest>,
) -> Result<(StatusCode, Json<RecommendResponse>), ApiError> {
    let samples = request
        .samples
        .unwrap_or(state.config.default_sample_density)
        .clamp(MIN_SAMPLES, MAX_SAMPLES);

    let start = resolve_endpoint(&state, request.start, request.start_place.as_deref(), "start")
        .await?;
    let end = resolve_endpoint(&state, request.end, request.end_place.as_deref(), "end").await?;
    validate_coordinate(start, "start")?;
    validate_coordinate(end, "end")?;

    let ttl = Duration::from_secs(state.config.cache_ttl_s);
    let ranking_key = cache::ranking_key(start, end, samples);
    if let Some(entry) = cache::get_fresh(&state.ranking_cache, &ranking_key, ttl) {
        tracing::debug!(key = %ranking_key, "serving ranking from cache");
        return Ok((StatusCode::OK, Json(response_from(entry.routes, samples))));
    }

    let candidates = fetch_candidates(&state, start, end, ttl).await?;
    let ranked = score_routes(state.pm25.as_ref(), candidates, samples)
        .await
        .map_err(|err| match err {
            ScoreError::NoScorableRoutes => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "no_scorable_routes",
                    "message": err.to_string(),
                })),
            ),
        })?;

    state.ranking_cache.insert(
        ranking_key,
        CachedRanking {
            fetched_at: Instant::now(),
            routes: ranked.clone(),
        },
    );
    cache::prune_cache(
        &state.ranking_cache,
        state.config.cache_max_entries,
        ttl.saturating_mul(2),
    );

    Ok((StatusCode::OK, Json(response_from(ranked, samples))))
}

fn response_from(routes: Vec<ScoredRoute>, samples: usize) -> RecommendResponse {
    RecommendResponse {
        best_route_id: routes.first().map(|r| r.route_id).unwrap_or_default(),
        routes,
        samples,
        scored_at: Utc::now(),
    }
}

/// Fetch candidate geometries from the routing provider, memoized per
/// endpoint pair.
async fn fetch_candidates(
    state: &AppState,
    start: Coordinate,
    end: Coordinate,
    ttl: Duration,
) -> Result<Vec<Vec<Coordinate>>, ApiError> {
    let key = cache::endpoints_key(start, end);
    if let Some(entry) = cache::get_fresh(&state.route_cache, &key, ttl) {
        tracing::debug!(key = %key, "serving routes from cache");
        return Ok(entry.routes);
    }

    let routes = state
        .directions
        .fetch_routes(start, end, state.config.route_alternatives)
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, "routing provider failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({
                    "error": "routing_failed",
                    "message": err.to_string(),
                })),
            )
        })?;

    state.route_cache.insert(
        key,
        CachedRoutes {
            fetched_at: Instant::now(),
            routes: routes.clone(),
        },
    );
    cache::prune_cache(
        &state.route_cache,
        state.config.cache_max_entries,
        ttl.saturating_mul(2),
    );

    Ok(routes)
}

/// Resolve one endpoint from an explicit coordinate or a place name.
async fn resolve_endpoint(
    state: &AppState,
    coordinate: Option<Coordinate>,
    place: Option<&str>,
    which: &str,
) -> Result<Coordinate, ApiError> {
    if let Some(coordinate) = coordinate {
        return Ok(coordinate);
    }

    let Some(place) = place.filter(|p| !p.trim().is_empty()) else {
        return Err(unprocessable(format!(
            "missing {which}: provide coordinates or a place name"
        )));
    };

    let Some(geocoder) = state.geocoder.as_ref() else {
        return Err(unprocessable(
            "place-name input requires a configured geocoder".to_string(),
        ));
    };

    match geocoder.geocode(place).await {
        Ok(Some(coordinate)) => Ok(coordinate),
        Ok(None) => Err(unprocessable(format!("no results found for {place:?}"))),
        Err(err) => {
            tracing::warn!(error = %err, place, "geocoding failed");
            Err((
                StatusCode::BAD_GATEWAY,
                Json(json!({
                    "error": "geocoding_failed",
                    "message": err.to_string(),
                })),
            ))
        }
    }
}

fn validate_coordinate(coordinate: Coordinate, which: &str) -> Result<(), ApiError> {
    let lat_ok = coordinate.lat.is_finite() && (-90.0..=90.0).contains(&coordinate.lat);
    let lon_ok = coordinate.lon.is_finite() && (-180.0..=180.0).contains(&coordinate.lon);
    if lat_ok && lon_ok {
        Ok(())
    } else {
        Err(unprocessable(format!(
            "{which} is not a valid WGS84 coordinate"
        )))
    }
}

fn unprocessable(message: String) -> ApiError {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "error": "invalid_request",
            "message": message,
        })),
    )
}
