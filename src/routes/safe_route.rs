use crate::error::{AppError, Result};
use crate::models::route::{RouteResponse, SafeRouteRequest};
use crate::AppState;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct RouteFormatParams {
    /// `json` (default) or `geojson`
    pub format: Option<String>,
}

/// POST /routes/safe
/// Score route alternatives between two points and rank them by the
/// requested safety preference
pub async fn create_safe_route(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RouteFormatParams>,
    Json(request): Json<SafeRouteRequest>,
) -> Result<Response> {
    let as_geojson = match params.format.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None | Some("json") => false,
        Some("geojson") => true,
        Some(other) => {
            return Err(AppError::InvalidRequest(format!(
                "Unsupported format '{}': expected json or geojson",
                other
            )))
        }
    };

    tracing::info!(
        mode = %request.mode,
        safety_preference = request.safety_preference,
        has_origin = request.origin.is_some(),
        has_destination = request.destination.is_some(),
        as_geojson,
        "Safe route request"
    );

    let routes = state
        .route_planner
        .score_and_rank_routes(
            request.origin.as_ref(),
            request.destination.as_ref(),
            request.mode,
            request.safety_preference,
        )
        .await?;

    let response = RouteResponse { routes };
    if as_geojson {
        Ok(Json(response.to_feature_collection()).into_response())
    } else {
        Ok(Json(response).into_response())
    }
}
