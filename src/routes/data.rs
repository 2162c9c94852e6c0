use crate::error::{AppError, Result};
use crate::models::{
    BoundingBox, ConstructionIncident, Coordinates, CrashIncident, CrimeIncident,
    IncidentCategory, SpeedingIncident, WeatherAlert, WeatherForecast,
};
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

const MAX_RECENCY_DAYS: u32 = 3650;

/// Bounding box query shared by the incident endpoints
#[derive(Debug, Default, Deserialize)]
pub struct BboxQueryParams {
    pub min_lat: Option<f64>,
    pub min_lng: Option<f64>,
    pub max_lat: Option<f64>,
    pub max_lng: Option<f64>,
    /// Recency window override; ignored by undated categories
    #[serde(default)]
    pub days: Option<u32>,
}

impl BboxQueryParams {
    pub fn bounding_box(&self) -> Result<BoundingBox> {
        match (self.min_lat, self.max_lat, self.min_lng, self.max_lng) {
            (Some(min_lat), Some(max_lat), Some(min_lng), Some(max_lng)) => {
                BoundingBox::new(min_lat, max_lat, min_lng, max_lng)
                    .map_err(AppError::InvalidRequest)
            }
            _ => Err(AppError::InvalidRequest(
                "min_lat, min_lng, max_lat and max_lng are required".to_string(),
            )),
        }
    }

    /// Requested window, or the category's default
    pub fn recency_days(&self, category: IncidentCategory) -> Result<u32> {
        match self.days {
            Some(days) if days == 0 || days > MAX_RECENCY_DAYS => Err(AppError::InvalidRequest(
                format!("days must be between 1 and {}", MAX_RECENCY_DAYS),
            )),
            Some(days) => Ok(days),
            None => Ok(category.default_recency_days().unwrap_or(MAX_RECENCY_DAYS)),
        }
    }
}

/// GET /data/crashes
pub async fn get_crashes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BboxQueryParams>,
) -> Result<Json<Vec<CrashIncident>>> {
    let bbox = params.bounding_box()?;
    let days = params.recency_days(IncidentCategory::Crash)?;
    let crashes = state.incidents.crashes(&bbox, days).await?;
    Ok(Json(crashes))
}

/// GET /data/crime
pub async fn get_crimes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BboxQueryParams>,
) -> Result<Json<Vec<CrimeIncident>>> {
    let bbox = params.bounding_box()?;
    let days = params.recency_days(IncidentCategory::Crime)?;
    let crimes = state.incidents.crimes(&bbox, days).await?;
    Ok(Json(crimes))
}

/// GET /data/construction
pub async fn get_construction(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BboxQueryParams>,
) -> Result<Json<Vec<ConstructionIncident>>> {
    let bbox = params.bounding_box()?;
    Ok(Json(state.incidents.construction(&bbox).await?))
}

/// GET /data/speeding
pub async fn get_speeding(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BboxQueryParams>,
) -> Result<Json<Vec<SpeedingIncident>>> {
    let bbox = params.bounding_box()?;
    Ok(Json(state.incidents.speeding(&bbox).await?))
}

#[derive(Debug, Deserialize)]
pub struct AlertQueryParams {
    #[serde(default = "default_area")]
    pub area: String,
}

fn default_area() -> String {
    "NY".to_string()
}

/// GET /data/alerts
pub async fn get_alerts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AlertQueryParams>,
) -> Result<Json<Vec<WeatherAlert>>> {
    let alerts = state.weather.active_alerts(&params.area).await?;
    Ok(Json(alerts))
}

#[derive(Debug, Default, Deserialize)]
pub struct WeatherQueryParams {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl WeatherQueryParams {
    pub fn coordinates(&self) -> Result<Coordinates> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Coordinates::new(lat, lng).map_err(AppError::InvalidRequest),
            _ => Err(AppError::InvalidRequest(
                "lat and lng are required".to_string(),
            )),
        }
    }
}

/// GET /data/weather
pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WeatherQueryParams>,
) -> Result<Json<WeatherForecast>> {
    let location = params.coordinates()?;
    Ok(Json(state.weather.forecast(location).await))
}
