use crate::constants::*;
use crate::error::{AppError, Result};
use crate::models::{Coordinates, WeatherAlert, WeatherForecast};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// National Weather Service client: active alerts and point forecasts.
/// Informational only; weather never feeds route scores.
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl WeatherClient {
    pub fn new(base_url: String) -> Self {
        WeatherClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T> {
        let response = request
            .header(USER_AGENT, WEATHER_USER_AGENT)
            .header(ACCEPT, "application/geo+json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::IncidentSource(format!("Weather {} request failed: {}", what, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(status = %status, "NWS {} HTTP error {}", what, status);
            return Err(AppError::IncidentSource(format!(
                "Weather {} HTTP {}",
                what, status
            )));
        }

        response.json().await.map_err(|e| {
            AppError::IncidentSource(format!("Failed to parse weather {}: {}", what, e))
        })
    }

    /// Alerts currently active for a two-letter state or marine area code.
    pub async fn active_alerts(&self, area: &str) -> Result<Vec<WeatherAlert>> {
        let area = area.trim().to_ascii_uppercase();
        if area.len() != 2 || !area.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(AppError::InvalidRequest(format!(
                "Invalid alert area '{}': expected a two-letter code",
                area
            )));
        }

        let url = format!("{}/alerts/active", self.base_url);
        let request = self.client.get(&url).query(&[("area", area.as_str())]);
        let body: AlertCollection = self.get_json(request, "alerts").await?;

        let alerts = body.into_alerts();
        tracing::debug!(area = %area, count = alerts.len(), "Fetched {} weather alerts", alerts.len());
        Ok(alerts)
    }

    /// Conditions for the first forecast period at `location`.
    ///
    /// Never fails: any upstream problem is logged and the mild, dry
    /// fallback forecast is returned instead.
    pub async fn forecast(&self, location: Coordinates) -> WeatherForecast {
        match self.first_period(location).await {
            Ok(period) => period.into_forecast(location),
            Err(e) => {
                tracing::warn!(
                    lat = location.lat,
                    lng = location.lng,
                    "Weather forecast unavailable, using defaults: {}",
                    e
                );
                WeatherForecast::fallback(location)
            }
        }
    }

    /// The points lookup names the gridpoint forecast URL; a missing URL or
    /// an empty period list yields an empty period.
    async fn first_period(&self, location: Coordinates) -> Result<ForecastPeriod> {
        let url = format!(
            "{}/points/{:.4},{:.4}",
            self.base_url, location.lat, location.lng
        );
        let point: PointResponse = self.get_json(self.client.get(&url), "points").await?;

        let Some(forecast_url) = point.properties.forecast else {
            tracing::debug!(lat = location.lat, lng = location.lng, "No forecast URL for point");
            return Ok(ForecastPeriod::default());
        };

        let forecast: ForecastResponse = self
            .get_json(self.client.get(&forecast_url), "forecast")
            .await?;
        Ok(forecast.properties.periods.into_iter().next().unwrap_or_default())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PointResponse {
    properties: PointProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PointProperties {
    forecast: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ForecastProperties {
    periods: Vec<ForecastPeriod>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ForecastPeriod {
    temperature: Option<f64>,
    short_forecast: Option<String>,
    probability_of_precipitation: Option<QuantitativeValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QuantitativeValue {
    value: Option<f64>,
}

impl ForecastPeriod {
    fn into_forecast(self, location: Coordinates) -> WeatherForecast {
        let mut forecast = WeatherForecast::fallback(location);
        if let Some(temperature) = self.temperature {
            forecast.temperature = temperature;
        }
        if let Some(condition) = self.short_forecast.filter(|c| !c.trim().is_empty()) {
            forecast.condition = condition;
        }
        if let Some(chance) = self.probability_of_precipitation.and_then(|p| p.value) {
            forecast.precipitation = chance;
        }
        forecast
    }
}

#[derive(Debug, Default, Deserialize)]
struct AlertCollection {
    #[serde(default)]
    features: Vec<AlertFeature>,
}

impl AlertCollection {
    fn into_alerts(self) -> Vec<WeatherAlert> {
        self.features
            .into_iter()
            .map(|feature| {
                let p = feature.properties;
                WeatherAlert {
                    id: p.id.or(feature.id).unwrap_or_default(),
                    headline: p.headline.unwrap_or_default(),
                    description: p.description.unwrap_or_default(),
                    severity: p.severity.unwrap_or_else(|| "unknown".to_string()),
                    effective: p.effective,
                    expires: p.expires,
                    area: p.area_desc.unwrap_or_default(),
                }
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct AlertFeature {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    properties: AlertProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AlertProperties {
    id: Option<String>,
    headline: Option<String>,
    description: Option<String>,
    severity: Option<String>,
    effective: Option<String>,
    expires: Option<String>,
    area_desc: Option<String>,
}
