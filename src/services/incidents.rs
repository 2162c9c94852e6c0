use crate::error::Result;
use crate::models::{
    BoundingBox, ConstructionIncident, CrashIncident, CrimeIncident, SpeedingIncident,
};
use async_trait::async_trait;

/// Read-only source of geolocated incidents.
///
/// Every query returns records inside `bbox` only. Dated categories take a
/// recency window in days; records without a date are always kept.
#[async_trait]
pub trait IncidentRepository: Send + Sync {
    async fn crashes(&self, bbox: &BoundingBox, recency_days: u32) -> Result<Vec<CrashIncident>>;

    async fn crimes(&self, bbox: &BoundingBox, recency_days: u32) -> Result<Vec<CrimeIncident>>;

    async fn construction(&self, bbox: &BoundingBox) -> Result<Vec<ConstructionIncident>>;

    async fn speeding(&self, bbox: &BoundingBox) -> Result<Vec<SpeedingIncident>>;
}
