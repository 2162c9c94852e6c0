//! Stable application-wide constants.
//!
//! Values here are structural invariants, scoring coefficients, and default
//! fallbacks for env-var-based configuration. The scoring coefficients are
//! fixed so that the same route and incident snapshot always produce the same
//! ratings; they are intentionally not exposed through
//! [`Config`](crate::config::Config).

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";
/// Default timeout (seconds) for outbound collaborator requests.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

// --- Collaborator endpoints ---

/// Default Socrata resource root for incident datasets.
pub const DEFAULT_OPEN_DATA_BASE_URL: &str = "https://data.cityofnewyork.us/resource";
/// Default National Weather Service API root.
pub const DEFAULT_NWS_BASE_URL: &str = "https://api.weather.gov";

// --- Incident recency and volume defaults ---

/// Crashes older than this are ignored. Overridden by `CRASH_RECENCY_DAYS`.
pub const DEFAULT_CRASH_RECENCY_DAYS: u32 = 365;
/// Crimes older than this are ignored. Overridden by `CRIME_RECENCY_DAYS`.
pub const DEFAULT_CRIME_RECENCY_DAYS: u32 = 90;
/// Upstream `$limit` for the dated (crash / crime) datasets.
pub const DEFAULT_INCIDENT_FETCH_LIMIT: u32 = 5_000;
/// Crash / crime records kept after bbox filtering.
pub const DEFAULT_INCIDENT_MAX_RECORDS: usize = 1_000;
/// Upstream `$limit` for the undated (construction / speeding) datasets.
pub const UNDATED_INCIDENT_FETCH_LIMIT: u32 = 1_000;
/// Construction records kept after bbox filtering.
pub const DEFAULT_CONSTRUCTION_MAX_RECORDS: usize = 500;
/// Speed-camera records kept after bbox filtering.
pub const DEFAULT_SPEEDING_MAX_RECORDS: usize = 500;

// --- Route request structure ---

/// Padding (degrees) added on every side of the origin/destination box
/// before querying incidents.
pub const BOUNDS_PADDING_DEGREES: f64 = 0.05;
/// Hard upper bound on candidates taken from the directions provider and on
/// ranked routes returned.
pub const MAX_ROUTES: usize = 10;
/// Maximum number of sample points scored per route.
pub const MAX_SAMPLE_POINTS: usize = 50;
/// Safety preference used when a request omits the dial.
pub const DEFAULT_SAFETY_PREFERENCE: f64 = 50.0;
/// Dial values at or above this select the safety-first regime.
pub const SAFEST_DIAL_THRESHOLD: f64 = 70.0;
/// Dial values at or below this select the speed-first regime.
pub const FASTEST_DIAL_THRESHOLD: f64 = 30.0;

// --- Category proximity thresholds (meters) ---

pub const CRIME_PROXIMITY_M: f64 = 100.0;
pub const SPEEDING_PROXIMITY_M: f64 = 200.0;
pub const CRASH_PROXIMITY_M: f64 = 50.0;
pub const CONSTRUCTION_PROXIMITY_M: f64 = 100.0;

// --- Per-incident weights ---

pub const CRIME_WEIGHT_FELONY: f64 = 3.0;
pub const CRIME_WEIGHT_MISDEMEANOR: f64 = 1.5;
pub const CRIME_WEIGHT_OTHER: f64 = 0.5;
/// Camera violation count that saturates a single speeding contribution at 1.0.
pub const SPEEDING_VIOLATIONS_SATURATION: f64 = 100.0;
pub const CRASH_WEIGHT_FATALITY: f64 = 5.0;
pub const CRASH_WEIGHT_INJURY: f64 = 2.0;
pub const CRASH_WEIGHT_VEHICLE: f64 = 0.5;
pub const CONSTRUCTION_WEIGHT: f64 = 1.0;

// --- Per-category normalization scale ---

pub const CRIME_SCALE: f64 = 2.0;
pub const SPEEDING_SCALE: f64 = 5.0;
pub const CRASH_SCALE: f64 = 0.5;
pub const CONSTRUCTION_SCALE: f64 = 10.0;

// --- Neutral priors used when a category has no incidents at all ---

pub const NEUTRAL_CRIME_RATING: f64 = 5.0;
pub const NEUTRAL_SPEEDING_RATING: f64 = 5.0;
pub const NEUTRAL_CRASH_RATING: f64 = 5.0;
pub const NEUTRAL_CONSTRUCTION_RATING: f64 = 2.0;
/// Construction rating used for a route with no geometry. Differs from
/// [`NEUTRAL_CONSTRUCTION_RATING`].
pub const EMPTY_ROUTE_CONSTRUCTION_RATING: f64 = 5.0;
/// Flood risk has no live source yet; every route carries this value.
pub const FLOOD_RISK_PLACEHOLDER: f64 = 1.0;

/// Upper bound of every 0-10 rating and of the composite safety score.
pub const MAX_RATING: f64 = 10.0;

// --- Composite score weights (sum to 1.0) ---

pub const COMPOSITE_WEIGHT_CRIME: f64 = 0.25;
pub const COMPOSITE_WEIGHT_SPEEDING: f64 = 0.20;
pub const COMPOSITE_WEIGHT_CRASH: f64 = 0.30;
pub const COMPOSITE_WEIGHT_CONSTRUCTION: f64 = 0.15;
pub const COMPOSITE_WEIGHT_FLOOD: f64 = 0.10;

// --- Balanced ranking key ---

pub const BALANCED_SAFETY_WEIGHT: f64 = 0.6;
pub const BALANCED_SPEED_WEIGHT: f64 = 0.4;
/// Stand-in duration (minutes) for routes reporting zero or negative
/// duration, so they sort as slow rather than infinitely fast.
pub const ZERO_DURATION_SENTINEL_MINUTES: f64 = 9_007_199_254_740_991.0;

// --- Geocoding ---

/// Queries shorter than this are not sent to the geocoder.
pub const MIN_GEOCODE_QUERY_LEN: usize = 3;
/// Default number of geocoding suggestions.
pub const DEFAULT_GEOCODE_LIMIT: u32 = 5;
/// Proximity bias for geocoding (lng,lat of lower Manhattan).
pub const GEOCODE_PROXIMITY: &str = "-74.006,40.7128";
/// Geocoding search box covering the five boroughs.
pub const GEOCODE_BBOX: &str = "-74.25909,40.477399,-73.700272,40.917577";

/// User-Agent sent to the weather service, which rejects anonymous clients.
pub const WEATHER_USER_AGENT: &str = "SafeRoute/1.0";
/// Reported when the forecast lookup fails or omits a temperature.
pub const DEFAULT_FORECAST_TEMPERATURE_F: f64 = 70.0;
pub const DEFAULT_FORECAST_CONDITION: &str = "Unknown";
