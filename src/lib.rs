// Library exports for testing and reusability

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod routes;
pub mod scoring;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};

use config::Config;
use services::{
    AuthMode, IncidentRepository, MapboxClient, OpenDataClient, RoutePlanner, WeatherClient,
};
use std::sync::Arc;
use std::time::Duration;

// App state for sharing across the application
pub struct AppState {
    pub route_planner: RoutePlanner,
    pub incidents: Arc<dyn IncidentRepository>,
    pub mapbox: MapboxClient,
    pub weather: WeatherClient,
}

impl AppState {
    /// Wire the live collaborators described by `config`.
    pub fn from_config(config: &Config) -> Self {
        let timeout = Duration::from_secs(config.http_timeout_secs);

        let mapbox = if let Some(ref base_url) = config.mapbox_base_url {
            MapboxClient::with_config(
                config.mapbox_api_key.clone(),
                base_url.clone(),
                AuthMode::BearerHeader,
            )
        } else {
            MapboxClient::new(config.mapbox_api_key.clone())
        }
        .with_timeout(timeout);

        let incidents: Arc<dyn IncidentRepository> = Arc::new(
            OpenDataClient::new(
                config.open_data_base_url.clone(),
                config.open_data_app_token.clone(),
                config.incidents.clone(),
            )
            .with_timeout(timeout),
        );

        let weather = WeatherClient::new(config.nws_base_url.clone()).with_timeout(timeout);

        let route_planner = RoutePlanner::new(
            Arc::new(mapbox.clone()),
            incidents.clone(),
            config.incidents.clone(),
        );

        AppState {
            route_planner,
            incidents,
            mapbox,
            weather,
        }
    }
}
