use async_trait::async_trait;
use saferoute::config::IncidentSourceConfig;
use saferoute::models::{
    BoundingBox, ConstructionIncident, Coordinates, CrashIncident, CrimeIncident, CrimeSeverity,
    RouteRatings, ScoredRoute, PreferenceLabel, SpeedingIncident, TravelMode,
};
use saferoute::services::{
    AuthMode, DirectionsProvider, DirectionsResponse, IncidentRepository, MapboxClient,
    RoutePlanner, WeatherClient,
};
use saferoute::{AppError, AppState, Result};
use std::sync::Arc;

/// Base URL nothing listens on; any request against it fails fast
#[allow(dead_code)]
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:9";

/// Directions provider returning a fixed set of alternatives
#[allow(dead_code)]
pub struct FakeDirections {
    pub routes: Vec<DirectionsResponse>,
    pub fail: bool,
}

#[async_trait]
impl DirectionsProvider for FakeDirections {
    async fn route_alternatives(
        &self,
        _origin: &Coordinates,
        _destination: &Coordinates,
        _mode: TravelMode,
    ) -> Result<Vec<DirectionsResponse>> {
        if self.fail {
            return Err(AppError::DirectionsApi("HTTP 503: upstream down".to_string()));
        }
        Ok(self.routes.clone())
    }
}

/// Incident repository over in-memory records. Applies the bbox like the
/// real repository does.
#[allow(dead_code)]
#[derive(Default)]
pub struct FakeIncidents {
    pub crashes: Vec<CrashIncident>,
    pub crimes: Vec<CrimeIncident>,
    pub construction: Vec<ConstructionIncident>,
    pub speeding: Vec<SpeedingIncident>,
}

#[async_trait]
impl IncidentRepository for FakeIncidents {
    async fn crashes(&self, bbox: &BoundingBox, _recency_days: u32) -> Result<Vec<CrashIncident>> {
        Ok(self
            .crashes
            .iter()
            .filter(|c| bbox.contains(&c.location))
            .cloned()
            .collect())
    }

    async fn crimes(&self, bbox: &BoundingBox, _recency_days: u32) -> Result<Vec<CrimeIncident>> {
        Ok(self
            .crimes
            .iter()
            .filter(|c| bbox.contains(&c.location))
            .cloned()
            .collect())
    }

    async fn construction(&self, bbox: &BoundingBox) -> Result<Vec<ConstructionIncident>> {
        Ok(self
            .construction
            .iter()
            .filter(|c| bbox.contains(&c.location))
            .cloned()
            .collect())
    }

    async fn speeding(&self, bbox: &BoundingBox) -> Result<Vec<SpeedingIncident>> {
        Ok(self
            .speeding
            .iter()
            .filter(|c| bbox.contains(&c.location))
            .cloned()
            .collect())
    }
}

/// North-south walking line along a fixed longitude, three points
#[allow(dead_code)]
pub fn straight_route(lng: f64, minutes: f64) -> DirectionsResponse {
    DirectionsResponse {
        distance_meters: 2200.0,
        duration_seconds: minutes * 60.0,
        geometry: vec![[lng, 40.740], [lng, 40.750], [lng, 40.760]],
    }
}

#[allow(dead_code)]
pub fn felony_at(lat: f64, lng: f64) -> CrimeIncident {
    CrimeIncident {
        id: Some(format!("cmplnt-{}-{}", lat, lng)),
        location: Coordinates::new(lat, lng).unwrap(),
        date: None,
        offense: Some("ROBBERY".to_string()),
        severity: CrimeSeverity::Felony,
    }
}

#[allow(dead_code)]
pub fn scored_route(id: &str, duration_minutes: f64, safety_score: f64) -> ScoredRoute {
    ScoredRoute {
        id: id.to_string(),
        name: id.to_string(),
        duration_minutes,
        distance_km: 2.0,
        safety_score,
        preference: PreferenceLabel::Balanced,
        coordinates: vec![[-73.99, 40.75]],
        ratings: RouteRatings::empty_route(),
    }
}

/// App state wired to fakes. Mapbox and NWS clients point nowhere, so only
/// requests that never reach them succeed.
#[allow(dead_code)]
pub fn test_state(directions: FakeDirections, incidents: FakeIncidents) -> Arc<AppState> {
    let incidents: Arc<dyn IncidentRepository> = Arc::new(incidents);
    Arc::new(AppState {
        route_planner: RoutePlanner::new(
            Arc::new(directions),
            incidents.clone(),
            IncidentSourceConfig::default(),
        ),
        incidents,
        mapbox: MapboxClient::with_config(
            "test_key".to_string(),
            UNREACHABLE_URL.to_string(),
            AuthMode::DirectToken,
        ),
        weather: WeatherClient::new(UNREACHABLE_URL.to_string()),
    })
}

/// Check if we should skip real API tests
#[allow(dead_code)]
pub fn should_skip_real_api_tests() -> bool {
    std::env::var("SKIP_REAL_API_TESTS").is_ok() || std::env::var("MAPBOX_API_KEY").is_err()
}
