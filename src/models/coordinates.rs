use crate::models::distance::DistanceMeters;
use serde::{Deserialize, Serialize};

/// WGS84 equatorial radius
const EARTH_RADIUS_M: f64 = 6_378_137.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(format!(
                "Invalid latitude: {} (must be between -90 and 90)",
                lat
            ));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(format!(
                "Invalid longitude: {} (must be between -180 and 180)",
                lng
            ));
        }
        Ok(Coordinates { lat, lng })
    }

    /// Great-circle distance (spherical law of cosines), rounded to whole
    /// meters. Proximity thresholds are compared against this rounded value.
    pub fn distance_to(&self, other: &Coordinates) -> DistanceMeters {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let delta_lng = (self.lng - other.lng).to_radians();

        let cos_angle = (lat2.sin() * lat1.sin() + lat2.cos() * lat1.cos() * delta_lng.cos())
            .clamp(-1.0, 1.0);

        DistanceMeters::from_raw((cos_angle.acos() * EARTH_RADIUS_M).round())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_validation() {
        assert!(Coordinates::new(40.7128, -74.0060).is_ok());
        assert!(Coordinates::new(91.0, 0.0).is_err()); // Invalid lat
        assert!(Coordinates::new(0.0, 181.0).is_err()); // Invalid lng
    }

    #[test]
    fn test_distance_calculation() {
        let times_square = Coordinates::new(40.7580, -73.9855).unwrap();
        let empire_state = Coordinates::new(40.7484, -73.9857).unwrap();

        // Roughly 1.07 km apart
        let distance = times_square.distance_to(&empire_state).0;
        assert!((distance - 1_069.0).abs() < 20.0, "got {}", distance);
    }

    #[test]
    fn test_distance_is_zero_for_same_point() {
        let p = Coordinates::new(40.7, -74.0).unwrap();
        assert_eq!(p.distance_to(&p).0, 0.0);
    }

    #[test]
    fn test_distance_rounds_to_whole_meters() {
        let origin = Coordinates::new(40.7, -74.0).unwrap();

        // 99.74 m before rounding
        let edge = Coordinates::new(40.700896, -74.0).unwrap();
        assert_eq!(origin.distance_to(&edge).0, 100.0);

        // 97.96 m before rounding
        let inside = Coordinates::new(40.70088, -74.0).unwrap();
        assert_eq!(origin.distance_to(&inside).0, 98.0);
    }
}
