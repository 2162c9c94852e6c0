use crate::constants::*;
use crate::error::{AppError, Result};
use crate::models::{PreferenceLabel, SafetyPreference, ScoredRoute};
use std::cmp::Ordering;

/// Duration used by the balanced regime; non-positive durations become the
/// sentinel so they never look fast.
fn effective_duration(route: &ScoredRoute) -> f64 {
    if route.duration_minutes > 0.0 {
        route.duration_minutes
    } else {
        ZERO_DURATION_SENTINEL_MINUTES
    }
}

/// Blended key `0.6 * safety - 0.4 / duration`, sorted descending.
pub fn balanced_key(route: &ScoredRoute) -> f64 {
    BALANCED_SAFETY_WEIGHT * route.safety_score
        - BALANCED_SPEED_WEIGHT * (1.0 / effective_duration(route))
}

fn safest_first(a: &ScoredRoute, b: &ScoredRoute) -> Ordering {
    b.safety_score
        .total_cmp(&a.safety_score)
        .then_with(|| a.duration_minutes.total_cmp(&b.duration_minutes))
}

fn fastest_first(a: &ScoredRoute, b: &ScoredRoute) -> Ordering {
    a.duration_minutes
        .total_cmp(&b.duration_minutes)
        .then_with(|| b.safety_score.total_cmp(&a.safety_score))
}

/// Balanced order: descending [`balanced_key`], ties to the shorter effective
/// duration.
///
/// Zero or negative durations are sorted after every positive-duration route
/// before the key is compared. The sentinel alone is not enough for that: with
/// it a high-safety zero-duration route can outscore a slow, risky one
/// (9.5 safety vs 2.0 safety at 5 minutes) and would lead the batch. Here it
/// never leads while any route has a real duration.
fn balanced_first(a: &ScoredRoute, b: &ScoredRoute) -> Ordering {
    let a_invalid = a.duration_minutes <= 0.0;
    let b_invalid = b.duration_minutes <= 0.0;

    a_invalid
        .cmp(&b_invalid)
        .then_with(|| balanced_key(b).total_cmp(&balanced_key(a)))
        .then_with(|| effective_duration(a).total_cmp(&effective_duration(b)))
}

/// Order scored routes for the batch's safety preference and keep the first
/// [`MAX_ROUTES`]. The sort is stable, so full ties keep provider order.
pub fn rank_routes(
    mut routes: Vec<ScoredRoute>,
    preference: SafetyPreference,
) -> Result<Vec<ScoredRoute>> {
    if routes.is_empty() {
        return Err(AppError::NoRoutesFound);
    }

    match preference.label() {
        PreferenceLabel::Safest => routes.sort_by(safest_first),
        PreferenceLabel::Fastest => routes.sort_by(fastest_first),
        PreferenceLabel::Balanced => routes.sort_by(balanced_first),
    }

    routes.truncate(MAX_ROUTES);
    Ok(routes)
}
