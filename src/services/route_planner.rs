use crate::config::IncidentSourceConfig;
use crate::constants::MAX_ROUTES;
use crate::error::{AppError, Result};
use crate::models::{
    BoundingBox, Coordinates, IncidentSnapshot, Location, RouteCandidate, SafetyPreference,
    ScoredRoute, TravelMode,
};
use crate::scoring::{assess_route, rank_routes};
use crate::services::directions::DirectionsProvider;
use crate::services::incidents::IncidentRepository;
use std::sync::Arc;

/// Generates alternatives, scores each against nearby incidents, and ranks
/// them by the caller's safety preference.
#[derive(Clone)]
pub struct RoutePlanner {
    directions: Arc<dyn DirectionsProvider>,
    incidents: Arc<dyn IncidentRepository>,
    incident_config: IncidentSourceConfig,
}

impl RoutePlanner {
    pub fn new(
        directions: Arc<dyn DirectionsProvider>,
        incidents: Arc<dyn IncidentRepository>,
        incident_config: IncidentSourceConfig,
    ) -> Self {
        Self {
            directions,
            incidents,
            incident_config,
        }
    }

    /// Score and rank route alternatives between two locations.
    ///
    /// Fails with `MissingLocation` before any collaborator call when either
    /// endpoint is absent, and with `NoRoutesFound` when no candidate has
    /// usable geometry. Any collaborator failure fails the whole call.
    pub async fn score_and_rank_routes(
        &self,
        origin: Option<&Location>,
        destination: Option<&Location>,
        mode: TravelMode,
        safety_preference: f64,
    ) -> Result<Vec<ScoredRoute>> {
        let origin = origin
            .ok_or_else(|| AppError::MissingLocation("origin is required".to_string()))?;
        let destination = destination
            .ok_or_else(|| AppError::MissingLocation("destination is required".to_string()))?;

        let preference = SafetyPreference::new(safety_preference).map_err(AppError::InvalidRequest)?;
        let origin = origin
            .coordinates()
            .map_err(|e| AppError::InvalidRequest(format!("origin: {}", e)))?;
        let destination = destination
            .coordinates()
            .map_err(|e| AppError::InvalidRequest(format!("destination: {}", e)))?;

        tracing::info!(
            mode = %mode,
            safety_preference = preference.value(),
            "Planning safe routes: ({:.4}, {:.4}) -> ({:.4}, {:.4})",
            origin.lat, origin.lng, destination.lat, destination.lng
        );

        let candidates: Vec<RouteCandidate> = self
            .directions
            .route_alternatives(&origin, &destination, mode)
            .await?
            .into_iter()
            .take(MAX_ROUTES)
            .enumerate()
            .map(|(i, response)| response.into_candidate(i + 1))
            .collect();

        if candidates.is_empty() {
            return Err(AppError::NoRoutesFound);
        }

        let snapshot = self.fetch_incidents(&origin, &destination).await?;
        let scored = score_candidates(candidates, &snapshot, preference);
        let ranked = rank_routes(scored, preference)?;

        tracing::info!(
            routes = ranked.len(),
            preference = %preference.label(),
            best_safety_score = ranked[0].safety_score,
            "Ranked {} routes",
            ranked.len()
        );

        Ok(ranked)
    }

    /// Fetch all four incident categories for the trip's padded bounding box.
    pub async fn fetch_incidents(
        &self,
        origin: &Coordinates,
        destination: &Coordinates,
    ) -> Result<IncidentSnapshot> {
        let bbox = BoundingBox::for_trip(origin, destination);
        let config = &self.incident_config;

        let (crashes, crimes, construction, speeding) = tokio::try_join!(
            self.incidents.crashes(&bbox, config.crash_recency_days),
            self.incidents.crimes(&bbox, config.crime_recency_days),
            self.incidents.construction(&bbox),
            self.incidents.speeding(&bbox),
        )?;

        let snapshot = IncidentSnapshot {
            crashes,
            crimes,
            construction,
            speeding,
        };

        tracing::debug!(
            crashes = snapshot.crashes.len(),
            crimes = snapshot.crimes.len(),
            construction = snapshot.construction.len(),
            speeding = snapshot.speeding.len(),
            "Loaded {} incidents for scoring",
            snapshot.total()
        );

        Ok(snapshot)
    }
}

/// Score every candidate with a non-empty geometry. Degenerate candidates
/// are skipped; ids follow the provider slot so gaps are possible.
fn score_candidates(
    candidates: Vec<RouteCandidate>,
    snapshot: &IncidentSnapshot,
    preference: SafetyPreference,
) -> Vec<ScoredRoute> {
    candidates
        .into_iter()
        .filter_map(|candidate| {
            if candidate.coordinates.is_empty() {
                tracing::warn!(slot = candidate.slot, "Skipping route with empty geometry");
                return None;
            }

            let assessment = assess_route(&candidate.coordinates, snapshot);
            tracing::debug!(
                slot = candidate.slot,
                safety_score = assessment.safety_score,
                crime = assessment.ratings.crime,
                crash = assessment.ratings.crash,
                "Scored route {}",
                candidate.slot
            );

            Some(ScoredRoute {
                id: format!("route-{}", candidate.slot),
                name: format!("Route {}", candidate.slot),
                duration_minutes: candidate.duration_minutes,
                distance_km: candidate.distance_km,
                safety_score: assessment.safety_score,
                preference: preference.label(),
                coordinates: candidate.coordinates,
                ratings: assessment.ratings,
            })
        })
        .collect()
}
