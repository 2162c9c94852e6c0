use crate::models::Coordinates;
use serde::{Deserialize, Serialize};

/// A geocoded place: coordinates plus the address it was resolved from, if any.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Location {
            lat,
            lng,
            address: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Validated coordinates for this location
    pub fn coordinates(&self) -> Result<Coordinates, String> {
        Coordinates::new(self.lat, self.lng)
    }
}
