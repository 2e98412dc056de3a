pub mod exposure;
pub mod models;
pub mod ranking;
pub mod sampling;
pub mod spatial;

pub use exposure::{compute_route_metrics, Pm25Source};
pub use models::{Coordinate, RouteMetrics, ScoredRoute};
pub use ranking::{rank_routes, score_routes, ScoreError};
pub use sampling::sample_route;
pub use spatial::haversine_distance;
