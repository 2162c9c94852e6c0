pub mod coordinates;
pub mod distance;
pub mod geo;
pub mod incident;
pub mod location;
pub mod route;
pub mod weather;

pub use coordinates::Coordinates;
pub use distance::{DistanceMeters, RadiusMeters};
pub use geo::BoundingBox;
pub use incident::{
    ConstructionIncident, CrashIncident, CrimeIncident, CrimeSeverity, IncidentCategory,
    IncidentSnapshot, SpeedingIncident,
};
pub use location::Location;
pub use route::{
    PreferenceLabel, RouteCandidate, RouteRatings, SafetyPreference, ScoredRoute, TravelMode,
};
pub use weather::{WeatherAlert, WeatherForecast};
