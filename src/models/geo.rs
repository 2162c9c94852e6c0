use crate::constants::BOUNDS_PADDING_DEGREES;
use crate::models::Coordinates;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Validated constructor: both axes must satisfy `min <= max`.
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Result<Self, String> {
        if [min_lat, max_lat, min_lng, max_lng]
            .iter()
            .any(|v| !v.is_finite())
        {
            return Err("Bounding box values must be finite".to_string());
        }
        if min_lat > max_lat {
            return Err(format!(
                "min_lat ({}) must not exceed max_lat ({})",
                min_lat, max_lat
            ));
        }
        if min_lng > max_lng {
            return Err(format!(
                "min_lng ({}) must not exceed max_lng ({})",
                min_lng, max_lng
            ));
        }
        Ok(BoundingBox {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        })
    }

    /// Smallest box containing both endpoints, grown by `padding_deg` on every side.
    pub fn around_endpoints(a: &Coordinates, b: &Coordinates, padding_deg: f64) -> Self {
        BoundingBox {
            min_lat: a.lat.min(b.lat) - padding_deg,
            max_lat: a.lat.max(b.lat) + padding_deg,
            min_lng: a.lng.min(b.lng) - padding_deg,
            max_lng: a.lng.max(b.lng) + padding_deg,
        }
    }

    /// Incident query region for a trip, using the standard padding.
    pub fn for_trip(origin: &Coordinates, destination: &Coordinates) -> Self {
        Self::around_endpoints(origin, destination, BOUNDS_PADDING_DEGREES)
    }

    /// Inclusive on all edges.
    pub fn contains(&self, point: &Coordinates) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lng..=self.max_lng).contains(&point.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lng: f64) -> Coordinates {
        Coordinates::new(lat, lng).unwrap()
    }

    #[test]
    fn trip_bounds_are_padded_and_ordered() {
        // Destination is south-west of origin
        let origin = c(40.78, -73.95);
        let destination = c(40.70, -74.01);
        let bbox = BoundingBox::for_trip(&origin, &destination);

        assert!((bbox.min_lat - 40.65).abs() < 1e-10);
        assert!((bbox.max_lat - 40.83).abs() < 1e-10);
        assert!((bbox.min_lng - -74.06).abs() < 1e-10);
        assert!((bbox.max_lng - -73.90).abs() < 1e-10);
        assert!(bbox.min_lat <= bbox.max_lat && bbox.min_lng <= bbox.max_lng);
        assert!(bbox.contains(&origin));
        assert!(bbox.contains(&destination));
    }

    #[test]
    fn trip_bounds_for_identical_endpoints() {
        let p = c(40.7, -74.0);
        let bbox = BoundingBox::for_trip(&p, &p);
        assert!(bbox.contains(&p));
        assert!(bbox.max_lat - bbox.min_lat > 0.09);
    }

    #[test]
    fn contains_is_edge_inclusive() {
        let bbox = BoundingBox::new(40.0, 41.0, -75.0, -74.0).unwrap();
        assert!(bbox.contains(&c(40.0, -75.0)));
        assert!(bbox.contains(&c(41.0, -74.0)));
        assert!(!bbox.contains(&c(41.01, -74.5)));
        assert!(!bbox.contains(&c(40.5, -73.99)));
    }

    #[test]
    fn new_rejects_inverted_axes() {
        assert!(BoundingBox::new(41.0, 40.0, -75.0, -74.0).is_err());
        assert!(BoundingBox::new(40.0, 41.0, -74.0, -75.0).is_err());
        assert!(BoundingBox::new(f64::NAN, 41.0, -75.0, -74.0).is_err());
    }
}
