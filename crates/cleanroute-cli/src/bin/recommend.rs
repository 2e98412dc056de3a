use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use cleanroute_aq::{AqicnClient, AqicnConfig, FallbackChain, OpenAqClient, OpenAqConfig};
use cleanroute_core::{score_routes, Coordinate, Pm25Source};
use cleanroute_directions::{GraphHopperClient, OpenCageClient};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about = "Recommend the least-polluted driving route", long_about = None)]
struct Args {
    /// Start as "lat,lon", or a place name with --geocode
    #[arg(long)]
    from: String,

    /// Destination as "lat,lon", or a place name with --geocode
    #[arg(long)]
    to: String,

    /// Treat --from/--to as place names and resolve them via OpenCage
    #[arg(long, default_value_t = false)]
    geocode: bool,

    /// Points along each route to query for PM2.5 (5-25)
    #[arg(long, default_value_t = 12)]
    samples: usize,

    /// Candidate routes to request from the routing provider
    #[arg(long, default_value_t = 3)]
    alternatives: usize,

    /// GraphHopper API key
    #[arg(long, env = "GRAPHHOPPER_KEY")]
    graphhopper_key: String,

    /// OpenCage API key (needed with --geocode)
    #[arg(long, env = "OPENCAGE_KEY")]
    opencage_key: Option<String>,

    /// OpenAQ API key (optional)
    #[arg(long, env = "OPENAQ_API_KEY")]
    openaq_key: Option<String>,

    /// AQICN token; fallback provider is skipped without it
    #[arg(long, env = "AQICN_TOKEN")]
    aqicn_token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let samples = args.samples.clamp(5, 25);

    let (start, end) = if args.geocode {
        let key = args
            .opencage_key
            .as_deref()
            .ok_or_else(|| anyhow!("--geocode requires an OpenCage API key"))?;
        let geocoder = OpenCageClient::new(key.to_string());
        println!("Geocoding {:?} and {:?}...", args.from, args.to);
        let start = geocoder
            .geocode(&args.from)
            .await?
            .ok_or_else(|| anyhow!("no results found for {:?}", args.from))?;
        let end = geocoder
            .geocode(&args.to)
            .await?
            .ok_or_else(|| anyhow!("no results found for {:?}", args.to))?;
        (start, end)
    } else {
        (parse_point(&args.from)?, parse_point(&args.to)?)
    };

    let directions = GraphHopperClient::new(args.graphhopper_key);
    println!("Fetching routes...");
    let candidates = directions
        .fetch_routes(start, end, args.alternatives)
        .await?;
    println!("Retrieved {} candidate route(s).", candidates.len());

    let openaq = OpenAqClient::new(OpenAqConfig {
        api_key: args.openaq_key,
        ..OpenAqConfig::default()
    });
    let aqicn = AqicnClient::new(AqicnConfig {
        token: args.aqicn_token,
        ..AqicnConfig::default()
    });
    let pm25 = FallbackChain::new(vec![
        Arc::new(openaq) as Arc<dyn Pm25Source>,
        Arc::new(aqicn),
    ]);

    println!("Sampling PM2.5 at up to {} points per route...", samples);
    let ranked = score_routes(&pm25, candidates, samples).await?;
    let best = ranked.first().context("ranking returned no routes")?;

    println!();
    println!("Cleanest route: #{}", best.route_id);
    println!("  Average PM2.5:     {} ug/m3", best.metrics.avg_pm25);
    println!("  Max PM2.5:         {} ug/m3", best.metrics.max_pm25);
    println!("  Healthiness score: {}", best.metrics.healthiness_score);
    println!("  Samples used:      {}", best.metrics.samples_used);

    if ranked.len() > 1 {
        println!();
        println!(
            "{:<7} {:>10} {:>10} {:>16} {:>13}",
            "Route", "Avg PM2.5", "Max PM2.5", "Pollution score", "Healthiness"
        );
        for route in &ranked {
            println!(
                "#{:<6} {:>10} {:>10} {:>16} {:>13}",
                route.route_id,
                route.metrics.avg_pm25,
                route.metrics.max_pm25,
                route.metrics.pollution_score,
                route.metrics.healthiness_score
            );
        }
    }

    Ok(())
}

/// Parse a "lat,lon" argument.
fn parse_point(value: &str) -> Result<Coordinate> {
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| anyhow!("expected \"lat,lon\", got {value:?}"))?;
    let lat: f64 = lat.trim().parse().context("latitude is not a number")?;
    let lon: f64 = lon.trim().parse().context("longitude is not a number")?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        bail!("coordinate out of range: {value:?}");
    }
    Ok(Coordinate::new(lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lat_lon_pairs() {
        let point = parse_point("28.6315, 77.2167").unwrap();
        assert_eq!(point, Coordinate::new(28.6315, 77.2167));
    }

    #[test]
    fn rejects_garbage_and_out_of_range_input() {
        assert!(parse_point("new delhi").is_err());
        assert!(parse_point("95.0,77.0").is_err());
        assert!(parse_point("28.6,200.0").is_err());
    }
}
