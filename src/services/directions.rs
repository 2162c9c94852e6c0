use crate::error::Result;
use crate::models::{Coordinates, RouteCandidate, TravelMode};
use crate::scoring::ratings::round1;
use async_trait::async_trait;
use serde::Serialize;

/// Source of alternative route geometries between two points.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    /// All alternatives the provider offers, in its own order. An empty list
    /// is a valid answer.
    async fn route_alternatives(
        &self,
        origin: &Coordinates,
        destination: &Coordinates,
        mode: TravelMode,
    ) -> Result<Vec<DirectionsResponse>>;
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DirectionsResponse {
    pub distance_meters: f64,
    pub duration_seconds: f64,
    /// GeoJSON coordinates as [lng, lat] pairs
    pub geometry: Vec<[f64; 2]>,
}

impl DirectionsResponse {
    /// Kilometers, rounded to two decimals
    pub fn distance_km(&self) -> f64 {
        (self.distance_meters / 1000.0 * 100.0).round() / 100.0
    }

    /// Minutes, rounded to one decimal
    pub fn duration_minutes(&self) -> f64 {
        round1(self.duration_seconds / 60.0)
    }

    /// Candidate for scoring at the given 1-based provider slot
    pub fn into_candidate(self, slot: usize) -> RouteCandidate {
        RouteCandidate {
            slot,
            duration_minutes: self.duration_minutes(),
            distance_km: self.distance_km(),
            coordinates: self.geometry,
        }
    }
}
