use crate::constants::DEFAULT_GEOCODE_LIMIT;
use crate::error::{AppError, Result};
use crate::models::Location;
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct GeocodeQueryParams {
    #[serde(default)]
    pub q: String,
    /// Maximum suggestions (default: 5, max: 10)
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    DEFAULT_GEOCODE_LIMIT
}

/// GET /geocode?q=...
/// Address suggestions biased toward New York City
pub async fn geocode(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GeocodeQueryParams>,
) -> Result<Json<Vec<Location>>> {
    if params.limit == 0 || params.limit > 10 {
        return Err(AppError::InvalidRequest(
            "limit must be between 1 and 10".to_string(),
        ));
    }

    let locations = state.mapbox.geocode(&params.q, params.limit).await?;
    Ok(Json(locations))
}
