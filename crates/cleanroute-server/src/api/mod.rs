//! API routes for the cleanroute server.

pub mod recommend;

use crate::state::AppState;
use axum::{routing::post, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/v1/recommend", post(recommend::recommend))
}
