pub mod data;
pub mod debug;
pub mod geocode;
pub mod safe_route;

use axum::{routing::{get, post}, Router};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/routes/safe", post(safe_route::create_safe_route))
        .route("/data/crashes", get(data::get_crashes))
        .route("/data/crime", get(data::get_crimes))
        .route("/data/construction", get(data::get_construction))
        .route("/data/speeding", get(data::get_speeding))
        .route("/data/alerts", get(data::get_alerts))
        .route("/data/weather", get(data::get_weather))
        .route("/geocode", get(geocode::geocode))
        .route("/debug/health", get(debug::health_check))
        .with_state(state)
}
