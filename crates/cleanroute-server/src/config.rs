//! Server configuration from environment.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// GraphHopper API key; required for route fetching.
    pub graphhopper_key: String,
    /// OpenCage API key; place-name input is rejected when unset.
    pub opencage_key: Option<String>,
    /// Optional OpenAQ API key for the higher request tier.
    pub openaq_api_key: Option<String>,
    /// AQICN token; the fallback provider is skipped when unset.
    pub aqicn_token: Option<String>,
    /// Station search radius for the primary provider, meters.
    pub openaq_radius_m: u32,
    /// Station limit for the primary provider.
    pub openaq_station_limit: u32,
    /// Sampling density used when a request does not specify one.
    pub default_sample_density: usize,
    /// Candidate routes requested from the routing provider.
    pub route_alternatives: usize,
    /// Memoization entry lifetime, seconds.
    pub cache_ttl_s: u64,
    /// Memoization entry cap per cache.
    pub cache_max_entries: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("CLEANROUTE_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3000),
            graphhopper_key: env::var("GRAPHHOPPER_KEY").unwrap_or_default(),
            opencage_key: env::var("OPENCAGE_KEY")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            openaq_api_key: env::var("OPENAQ_API_KEY")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            aqicn_token: env::var("AQICN_TOKEN")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            openaq_radius_m: env::var("OPENAQ_RADIUS_M")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(50_000),
            openaq_station_limit: env::var("OPENAQ_STATION_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            default_sample_density: env::var("CLEANROUTE_SAMPLE_DENSITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(12),
            route_alternatives: env::var("CLEANROUTE_ALTERNATIVES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3),
            cache_ttl_s: env::var("CLEANROUTE_CACHE_TTL_S")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(600),
            cache_max_entries: env::var("CLEANROUTE_CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(256),
        }
    }
}
