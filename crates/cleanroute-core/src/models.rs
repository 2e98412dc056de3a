//! Core data models for route exposure scoring.

use serde::{Deserialize, Serialize};

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Aggregate PM2.5 exposure statistics for one candidate route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteMetrics {
    /// Mean PM2.5 over the samples that yielded data (µg/m³)
    pub avg_pm25: f64,
    /// Peak PM2.5 over the samples that yielded data (µg/m³)
    pub max_pm25: f64,
    /// Weighted blend of sustained and peak exposure
    pub pollution_score: f64,
    /// 0-100 scale, higher = cleaner
    pub healthiness_score: f64,
    /// Count of samples that actually produced a reading
    pub samples_used: usize,
}

/// A candidate route with its exposure metrics attached.
///
/// `route_id` is a 1-based ordinal assigned in the order candidates
/// arrived; it stays with the route when results are sorted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredRoute {
    pub route_id: usize,
    pub metrics: RouteMetrics,
    pub geometry: Vec<Coordinate>,
}
