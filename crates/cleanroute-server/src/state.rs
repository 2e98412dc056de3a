//! Shared application state.

use crate::cache::{RankingCache, RouteCache};
use crate::config::Config;
use cleanroute_aq::{AqicnClient, AqicnConfig, FallbackChain, OpenAqClient, OpenAqConfig};
use cleanroute_core::Pm25Source;
use cleanroute_directions::{GraphHopperClient, OpenCageClient};
use std::sync::Arc;

pub struct AppState {
    pub directions: GraphHopperClient,
    pub geocoder: Option<OpenCageClient>,
    pub pm25: Arc<dyn Pm25Source>,
    pub route_cache: RouteCache,
    pub ranking_cache: RankingCache,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let openaq = OpenAqClient::new(OpenAqConfig {
            api_key: config.openaq_api_key.clone(),
            radius_m: config.openaq_radius_m,
            station_limit: config.openaq_station_limit,
            ..OpenAqConfig::default()
        });
        let aqicn = AqicnClient::new(AqicnConfig {
            token: config.aqicn_token.clone(),
            ..AqicnConfig::default()
        });
        // Fixed provider order: spatial-weighted primary, single-point fallback.
        let pm25: Arc<dyn Pm25Source> = Arc::new(FallbackChain::new(vec![
            Arc::new(openaq) as Arc<dyn Pm25Source>,
            Arc::new(aqicn),
        ]));

        Self {
            directions: GraphHopperClient::new(config.graphhopper_key.clone()),
            geocoder: config
                .opencage_key
                .as_deref()
                .map(|key| OpenCageClient::new(key.to_string())),
            pm25,
            route_cache: RouteCache::new(),
            ranking_cache: RankingCache::new(),
            config,
        }
    }
}
