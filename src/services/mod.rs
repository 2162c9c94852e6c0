pub mod directions;
pub mod incidents;
pub mod mapbox;
pub mod open_data;
pub mod route_planner;
pub mod weather;

pub use directions::{DirectionsProvider, DirectionsResponse};
pub use incidents::IncidentRepository;
pub use mapbox::{AuthMode, MapboxClient};
pub use open_data::OpenDataClient;
pub use route_planner::RoutePlanner;
pub use weather::WeatherClient;
