use crate::constants::{DEFAULT_FORECAST_CONDITION, DEFAULT_FORECAST_TEMPERATURE_F};
use crate::models::Coordinates;
use serde::{Deserialize, Serialize};

/// Active weather alert from the National Weather Service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherAlert {
    pub id: String,
    pub headline: String,
    pub description: String,
    pub severity: String,
    pub effective: Option<String>,
    pub expires: Option<String>,
    pub area: String,
}

/// Current conditions at a point, taken from the first forecast period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherForecast {
    pub location: Coordinates,
    /// Degrees Fahrenheit
    pub temperature: f64,
    pub condition: String,
    /// Chance of precipitation, percent
    pub precipitation: f64,
    /// Always empty here; see `/data/alerts`
    pub alerts: Vec<WeatherAlert>,
}

impl WeatherForecast {
    /// Mild, dry placeholder used when the forecast can't be fetched
    pub fn fallback(location: Coordinates) -> Self {
        WeatherForecast {
            location,
            temperature: DEFAULT_FORECAST_TEMPERATURE_F,
            condition: DEFAULT_FORECAST_CONDITION.to_string(),
            precipitation: 0.0,
            alerts: Vec::new(),
        }
    }
}
