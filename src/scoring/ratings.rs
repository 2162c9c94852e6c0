use super::rates::{rate_construction, rate_crashes, rate_crime, rate_speeding};
use super::sampler::sample_points;
use crate::constants::*;
use crate::models::{Coordinates, IncidentSnapshot, RouteRatings};

/// Round to one decimal place
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl RouteRatings {
    /// Ratings for a route with no geometry. Construction is 5.0 here, not
    /// the 2.0 empty-category prior.
    pub fn empty_route() -> Self {
        RouteRatings {
            crime: NEUTRAL_CRIME_RATING,
            speeding: NEUTRAL_SPEEDING_RATING,
            crash: NEUTRAL_CRASH_RATING,
            construction: EMPTY_ROUTE_CONSTRUCTION_RATING,
            flood_risk: FLOOD_RISK_PLACEHOLDER,
        }
    }

    /// Weighted risk sum R; crash weighs most and flood risk least.
    pub fn weighted_risk(&self) -> f64 {
        COMPOSITE_WEIGHT_CRIME * self.crime
            + COMPOSITE_WEIGHT_SPEEDING * self.speeding
            + COMPOSITE_WEIGHT_CRASH * self.crash
            + COMPOSITE_WEIGHT_CONSTRUCTION * self.construction
            + COMPOSITE_WEIGHT_FLOOD * self.flood_risk
    }
}

/// Score a route's `[lng, lat]` geometry against an incident snapshot.
/// Each sub-score is rounded to one decimal place.
pub fn calculate_ratings(coordinates: &[[f64; 2]], incidents: &IncidentSnapshot) -> RouteRatings {
    if coordinates.is_empty() {
        return RouteRatings::empty_route();
    }

    let points: Vec<Coordinates> = sample_points(coordinates, MAX_SAMPLE_POINTS)
        .into_iter()
        .map(|[lng, lat]| Coordinates { lat, lng })
        .collect();

    RouteRatings {
        crime: round1(rate_crime(&points, &incidents.crimes)),
        speeding: round1(rate_speeding(&points, &incidents.speeding)),
        crash: round1(rate_crashes(&points, &incidents.crashes)),
        construction: round1(rate_construction(&points, &incidents.construction)),
        flood_risk: FLOOD_RISK_PLACEHOLDER,
    }
}

/// Composite safety score: `max(0, round1(10 - R))`. Higher is safer, the
/// opposite polarity of the sub-scores.
pub fn safety_score(ratings: &RouteRatings) -> f64 {
    let score = round1(MAX_RATING - ratings.weighted_risk());
    // also normalizes -0.0
    if score > 0.0 {
        score
    } else {
        0.0
    }
}
