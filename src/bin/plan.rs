use saferoute::config::Config;
use saferoute::constants::DEFAULT_SAFETY_PREFERENCE;
use saferoute::models::route::RouteResponse;
use saferoute::models::{Location, ScoredRoute, TravelMode};
use saferoute::AppState;
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_help() {
    eprintln!(
        "\
Usage: plan --origin=LAT,LNG --destination=LAT,LNG [OPTIONS]

Options:
  --origin=LAT,LNG       Trip start (required)
  --destination=LAT,LNG  Trip end (required)
  --mode=MODE            walking or driving (default: walking)
  --safety=N             Safety preference 0-100 (default: 50)
  --json                 Output ranked routes as JSON
  --geojson              Output ranked routes as a GeoJSON FeatureCollection
  --help                 Show this help message"
    );
}

fn parse_location(value: &str) -> Result<Location, String> {
    let (lat, lng) = value
        .split_once(',')
        .ok_or_else(|| format!("Expected LAT,LNG, got '{}'", value))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("Invalid latitude '{}'", lat))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|_| format!("Invalid longitude '{}'", lng))?;
    Ok(Location::new(lat, lng))
}

fn format_table(routes: &[ScoredRoute]) -> String {
    let mut out = format!(
        "{:<10} {:>8} {:>8} {:>7} {:<9} {:>6} {:>6} {:>6} {:>6}\n",
        "ROUTE", "MIN", "KM", "SAFETY", "PROFILE", "CRIME", "SPEED", "CRASH", "CONSTR"
    );
    for route in routes {
        out.push_str(&format!(
            "{:<10} {:>8.1} {:>8.2} {:>7.1} {:<9} {:>6.1} {:>6.1} {:>6.1} {:>6.1}\n",
            route.id,
            route.duration_minutes,
            route.distance_km,
            route.safety_score,
            route.preference.to_string(),
            route.ratings.crime,
            route.ratings.speeding,
            route.ratings.crash,
            route.ratings.construction,
        ));
    }
    out
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (quiet unless RUST_LOG says otherwise)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "saferoute=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI args
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help") {
        print_help();
        return Ok(());
    }

    let origin = args
        .iter()
        .find_map(|a| a.strip_prefix("--origin="))
        .map(parse_location)
        .transpose()?;
    let destination = args
        .iter()
        .find_map(|a| a.strip_prefix("--destination="))
        .map(parse_location)
        .transpose()?;
    let mode: TravelMode = args
        .iter()
        .find_map(|a| a.strip_prefix("--mode="))
        .map(|s| s.parse::<TravelMode>())
        .transpose()?
        .unwrap_or_default();
    let safety: f64 = args
        .iter()
        .find_map(|a| a.strip_prefix("--safety="))
        .map(|s| s.parse().map_err(|_| format!("Invalid --safety value '{}'", s)))
        .transpose()?
        .unwrap_or(DEFAULT_SAFETY_PREFERENCE);
    let json_output = args.iter().any(|a| a == "--json");
    let geojson_output = args.iter().any(|a| a == "--geojson");

    if origin.is_none() || destination.is_none() {
        print_help();
        return Err("--origin and --destination are required".into());
    }

    let config = Config::from_env().map_err(|e| format!("Config error: {}", e))?;
    let state = AppState::from_config(&config);

    let routes = state
        .route_planner
        .score_and_rank_routes(origin.as_ref(), destination.as_ref(), mode, safety)
        .await?;

    if geojson_output {
        let collection = RouteResponse { routes }.to_feature_collection();
        println!("{}", serde_json::to_string_pretty(&collection)?);
    } else if json_output {
        println!("{}", serde_json::to_string_pretty(&routes)?);
    } else {
        print!("{}", format_table(&routes));
    }

    Ok(())
}
