//! Route safety scoring: sample a route, rate it per incident category,
//! fold the ratings into one composite score, and rank the alternatives.
//!
//! Everything here is a pure function of its inputs.

pub mod rates;
pub mod ranking;
pub mod ratings;
pub mod sampler;

pub use ranking::rank_routes;
pub use ratings::{calculate_ratings, safety_score};
pub use sampler::sample_points;

use crate::models::{IncidentSnapshot, RouteRatings};

/// Ratings plus the composite score derived from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafetyAssessment {
    pub ratings: RouteRatings,
    pub safety_score: f64,
}

/// Score one route geometry (`[lng, lat]` pairs) against an incident snapshot.
pub fn assess_route(coordinates: &[[f64; 2]], incidents: &IncidentSnapshot) -> SafetyAssessment {
    let ratings = calculate_ratings(coordinates, incidents);
    SafetyAssessment {
        safety_score: safety_score(&ratings),
        ratings,
    }
}
