//! Per-category risk ratings.
//!
//! Every category follows the same shape: for each sample point and each
//! incident, an incident strictly closer than the category threshold adds its
//! weight to a running total. The total is averaged over the sample points,
//! multiplied by the category scale, and clamped to `[0, 10]`. A category
//! with no incidents at all gets a fixed neutral prior instead.

use crate::constants::*;
use crate::models::{
    ConstructionIncident, Coordinates, CrashIncident, CrimeIncident, CrimeSeverity,
    DistanceMeters, RadiusMeters, SpeedingIncident,
};

/// An incident that contributes risk to nearby route points.
pub trait ProximityRisk {
    fn location(&self) -> &Coordinates;

    /// Contribution added for each sample point within range.
    fn risk_weight(&self) -> f64;
}

/// Threshold, scale, and empty-category prior for one category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateParams {
    pub threshold: RadiusMeters,
    pub scale: f64,
    pub neutral: f64,
}

pub const CRIME_PARAMS: RateParams = RateParams {
    threshold: DistanceMeters(CRIME_PROXIMITY_M),
    scale: CRIME_SCALE,
    neutral: NEUTRAL_CRIME_RATING,
};

pub const SPEEDING_PARAMS: RateParams = RateParams {
    threshold: DistanceMeters(SPEEDING_PROXIMITY_M),
    scale: SPEEDING_SCALE,
    neutral: NEUTRAL_SPEEDING_RATING,
};

pub const CRASH_PARAMS: RateParams = RateParams {
    threshold: DistanceMeters(CRASH_PROXIMITY_M),
    scale: CRASH_SCALE,
    neutral: NEUTRAL_CRASH_RATING,
};

pub const CONSTRUCTION_PARAMS: RateParams = RateParams {
    threshold: DistanceMeters(CONSTRUCTION_PROXIMITY_M),
    scale: CONSTRUCTION_SCALE,
    neutral: NEUTRAL_CONSTRUCTION_RATING,
};

impl CrimeSeverity {
    pub fn weight(self) -> f64 {
        match self {
            CrimeSeverity::Felony => CRIME_WEIGHT_FELONY,
            CrimeSeverity::Misdemeanor => CRIME_WEIGHT_MISDEMEANOR,
            CrimeSeverity::ViolationOrOther => CRIME_WEIGHT_OTHER,
        }
    }
}

impl ProximityRisk for CrimeIncident {
    fn location(&self) -> &Coordinates {
        &self.location
    }

    fn risk_weight(&self) -> f64 {
        self.severity.weight()
    }
}

impl ProximityRisk for SpeedingIncident {
    fn location(&self) -> &Coordinates {
        &self.location
    }

    fn risk_weight(&self) -> f64 {
        (self.violations as f64 / SPEEDING_VIOLATIONS_SATURATION).min(1.0)
    }
}

impl ProximityRisk for CrashIncident {
    fn location(&self) -> &Coordinates {
        &self.location
    }

    fn risk_weight(&self) -> f64 {
        CRASH_WEIGHT_FATALITY * self.fatalities as f64
            + CRASH_WEIGHT_INJURY * self.injuries as f64
            + CRASH_WEIGHT_VEHICLE * self.vehicle_count as f64
    }
}

impl ProximityRisk for ConstructionIncident {
    fn location(&self) -> &Coordinates {
        &self.location
    }

    fn risk_weight(&self) -> f64 {
        CONSTRUCTION_WEIGHT
    }
}

/// Shared rating kernel. Returns `params.neutral` for an empty incident list
/// and 0.0 when there are no sample points to be exposed.
pub fn proximity_rate<I: ProximityRisk>(
    points: &[Coordinates],
    incidents: &[I],
    params: &RateParams,
) -> f64 {
    if incidents.is_empty() {
        return params.neutral;
    }
    if points.is_empty() {
        return 0.0;
    }

    let mut accumulated = 0.0;
    for point in points {
        for incident in incidents {
            if point
                .distance_to(incident.location())
                .is_within(params.threshold)
            {
                accumulated += incident.risk_weight();
            }
        }
    }

    ((accumulated / points.len() as f64) * params.scale).clamp(0.0, MAX_RATING)
}

pub fn rate_crime(points: &[Coordinates], crimes: &[CrimeIncident]) -> f64 {
    proximity_rate(points, crimes, &CRIME_PARAMS)
}

pub fn rate_speeding(points: &[Coordinates], speeding: &[SpeedingIncident]) -> f64 {
    proximity_rate(points, speeding, &SPEEDING_PARAMS)
}

pub fn rate_crashes(points: &[Coordinates], crashes: &[CrashIncident]) -> f64 {
    proximity_rate(points, crashes, &CRASH_PARAMS)
}

pub fn rate_construction(points: &[Coordinates], construction: &[ConstructionIncident]) -> f64 {
    proximity_rate(points, construction, &CONSTRUCTION_PARAMS)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ~0.00009 degrees of latitude is ~10 m
    fn p(lat: f64, lng: f64) -> Coordinates {
        Coordinates { lat, lng }
    }

    fn crime(lat: f64, lng: f64, severity: CrimeSeverity) -> CrimeIncident {
        CrimeIncident {
            id: None,
            location: p(lat, lng),
            date: None,
            offense: None,
            severity,
        }
    }

    fn crash(lat: f64, lng: f64, fatalities: u32, injuries: u32, vehicles: u32) -> CrashIncident {
        CrashIncident {
            id: None,
            location: p(lat, lng),
            date: None,
            injuries,
            fatalities,
            vehicle_count: vehicles,
        }
    }

    fn camera(lat: f64, lng: f64, violations: u32) -> SpeedingIncident {
        SpeedingIncident {
            location: p(lat, lng),
            violations,
            camera_label: None,
        }
    }

    fn site(lat: f64, lng: f64) -> ConstructionIncident {
        ConstructionIncident {
            id: None,
            location: p(lat, lng),
            description: None,
            permit_type: None,
            issued: None,
        }
    }

    #[test]
    fn empty_categories_use_neutral_priors() {
        let points = [p(40.7, -74.0), p(40.71, -74.0)];
        assert_eq!(rate_crime(&points, &[]), 5.0);
        assert_eq!(rate_speeding(&points, &[]), 5.0);
        assert_eq!(rate_crashes(&points, &[]), 5.0);
        assert_eq!(rate_construction(&points[..1], &[]), 2.0);
    }

    #[test]
    fn crime_weights_by_severity() {
        let points = [p(40.7, -74.0)];
        let crimes = [
            crime(40.7, -74.0, CrimeSeverity::Felony),
            crime(40.7, -74.0, CrimeSeverity::Misdemeanor),
            crime(40.7, -74.0, CrimeSeverity::ViolationOrOther),
        ];
        // (3.0 + 1.5 + 0.5) / 1 * 2 = 10.0
        assert_eq!(rate_crime(&points, &crimes), 10.0);
        // 1.5 * 2
        assert_eq!(rate_crime(&points, &crimes[1..2]), 3.0);
    }

    #[test]
    fn crime_outside_threshold_is_ignored() {
        let points = [p(40.7, -74.0)];
        // ~111 m north
        let crimes = [crime(40.701, -74.0, CrimeSeverity::Felony)];
        assert_eq!(rate_crime(&points, &crimes), 0.0);
    }

    #[test]
    fn threshold_compares_rounded_distance() {
        let points = [p(40.7, -74.0)];
        // 99.74 m rounds up to 100 m, which is not strictly inside
        let edge = [crime(40.700896, -74.0, CrimeSeverity::Felony)];
        assert_eq!(rate_crime(&points, &edge), 0.0);

        // 97.96 m rounds to 98 m
        let inside = [crime(40.70088, -74.0, CrimeSeverity::Felony)];
        assert_eq!(rate_crime(&points, &inside), 6.0);
    }

    #[test]
    fn contributions_average_over_sample_points() {
        let points = [p(40.7, -74.0), p(40.8, -74.0)];
        let crimes = [crime(40.7, -74.0, CrimeSeverity::Felony)];
        // 3.0 / 2 * 2 = 3.0
        assert_eq!(rate_crime(&points, &crimes), 3.0);
    }

    #[test]
    fn speeding_weight_saturates() {
        let points = [p(40.7, -74.0)];
        assert_eq!(rate_speeding(&points, &[camera(40.7, -74.0, 50)]), 2.5);
        assert_eq!(rate_speeding(&points, &[camera(40.7, -74.0, 100)]), 5.0);
        assert_eq!(rate_speeding(&points, &[camera(40.7, -74.0, 4_000)]), 5.0);
        // ~150 m away still counts for speeding
        assert_eq!(rate_speeding(&points, &[camera(40.70135, -74.0, 100)]), 5.0);
    }

    #[test]
    fn crash_weight_and_tight_threshold() {
        let points = [p(40.7, -74.0)];
        // 5*1 + 2*2 + 0.5*2 = 10 -> * 0.5 = 5.0
        assert_eq!(rate_crashes(&points, &[crash(40.7, -74.0, 1, 2, 2)]), 5.0);
        // ~67 m away is beyond 50 m
        assert_eq!(rate_crashes(&points, &[crash(40.7006, -74.0, 1, 2, 2)]), 0.0);
    }

    #[test]
    fn construction_counts_matches() {
        let points = [p(40.7, -74.0), p(40.8, -74.0), p(40.9, -74.0), p(41.0, -74.0)];
        // one match over four points -> 0.25 * 10
        assert_eq!(rate_construction(&points, &[site(40.7, -74.0)]), 2.5);
    }

    #[test]
    fn ratings_are_clamped_to_ten() {
        let points = [p(40.7, -74.0)];
        let crashes = vec![crash(40.7, -74.0, 3, 10, 4); 5];
        assert_eq!(rate_crashes(&points, &crashes), 10.0);
    }

    #[test]
    fn no_points_means_no_exposure() {
        assert_eq!(rate_crime(&[], &[crime(40.7, -74.0, CrimeSeverity::Felony)]), 0.0);
    }
}
