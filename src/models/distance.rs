use serde::{Deserialize, Serialize};

/// Distance in meters
/// Keeps proximity thresholds and great-circle results in the same unit
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct DistanceMeters(pub f64);

impl DistanceMeters {
    /// Create from raw value without validation (use carefully)
    pub fn from_raw(meters: f64) -> Self {
        DistanceMeters(meters)
    }

    /// Strictly closer than `radius`; a point exactly on the radius is outside
    pub fn is_within(self, radius: RadiusMeters) -> bool {
        self.0 < radius.0
    }
}

/// Radius in meters - semantically similar to DistanceMeters but clearer intent
pub type RadiusMeters = DistanceMeters;
