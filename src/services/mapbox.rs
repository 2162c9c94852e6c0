use crate::constants::*;
use crate::error::{AppError, Result};
use crate::models::{Coordinates, Location, TravelMode};
use crate::services::directions::{DirectionsProvider, DirectionsResponse};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::time::Duration;

const MAPBOX_API_BASE_URL: &str = "https://api.mapbox.com";

/// How the client authenticates with the Mapbox APIs.
#[derive(Clone, Debug)]
pub enum AuthMode {
    /// Send `access_token` query param (direct Mapbox).
    DirectToken,
    /// Proxy mode: send `Authorization: Bearer` header.
    BearerHeader,
}

#[derive(Clone)]
pub struct MapboxClient {
    client: Client,
    api_key: String,
    base_url: String,
    auth_mode: AuthMode,
    timeout: Duration,
}

impl MapboxClient {
    pub fn new(api_key: String) -> Self {
        MapboxClient {
            client: Client::new(),
            api_key,
            base_url: MAPBOX_API_BASE_URL.to_string(),
            auth_mode: AuthMode::DirectToken,
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    pub fn with_config(api_key: String, base_url: String, auth_mode: AuthMode) -> Self {
        MapboxClient {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_mode,
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.auth_mode {
            AuthMode::DirectToken => request.query(&[("access_token", &self.api_key)]),
            AuthMode::BearerHeader => request.bearer_auth(&self.api_key),
        }
    }

    fn directions_url(&self, origin: &Coordinates, destination: &Coordinates, mode: TravelMode) -> String {
        format!(
            "{}/directions/v5/mapbox/{}/{},{};{},{}",
            self.base_url,
            mode.mapbox_profile(),
            origin.lng,
            origin.lat,
            destination.lng,
            destination.lat
        )
    }

    fn geocoding_url(&self, query: &str) -> String {
        format!(
            "{}/geocoding/v5/mapbox.places/{}.json",
            self.base_url,
            urlencoding::encode(query)
        )
    }

    /// Forward-geocode a free-text address into up to `limit` suggestions,
    /// biased toward New York City. Queries under three characters return
    /// nothing without calling the API.
    pub async fn geocode(&self, query: &str, limit: u32) -> Result<Vec<Location>> {
        let query = query.trim();
        if query.chars().count() < MIN_GEOCODE_QUERY_LEN {
            return Ok(Vec::new());
        }

        let limit = limit.to_string();
        let request = self.client.get(self.geocoding_url(query)).query(&[
            ("proximity", GEOCODE_PROXIMITY),
            ("bbox", GEOCODE_BBOX),
            ("country", "US"),
            ("limit", limit.as_str()),
        ]);

        let response = self
            .authorize(request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::DirectionsApi(format!("Geocoding request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(status = %status, "Mapbox geocoding HTTP error {}: {}", status, error_text);
            return Err(AppError::DirectionsApi(format!(
                "Geocoding HTTP {}: {}",
                status, error_text
            )));
        }

        let body: MapboxGeocodingApiResponse = response.json().await.map_err(|e| {
            AppError::DirectionsApi(format!("Failed to parse geocoding response: {}", e))
        })?;

        let locations = body.into_locations();
        tracing::debug!(query = %query, results = locations.len(), "Geocoded '{}'", query);
        Ok(locations)
    }
}

#[async_trait]
impl DirectionsProvider for MapboxClient {
    /// Request driving/walking alternatives between two points.
    /// Returns at most [`MAX_ROUTES`] routes with full geometry.
    async fn route_alternatives(
        &self,
        origin: &Coordinates,
        destination: &Coordinates,
        mode: TravelMode,
    ) -> Result<Vec<DirectionsResponse>> {
        let url = self.directions_url(origin, destination, mode);

        tracing::debug!(
            mode = %mode.mapbox_profile(),
            "Mapbox directions request: ({:.4}, {:.4}) -> ({:.4}, {:.4}), profile {}",
            origin.lat, origin.lng, destination.lat, destination.lng, mode.mapbox_profile()
        );

        let request = self.client.get(&url).query(&[
            ("alternatives", "true"),
            ("geometries", "geojson"),
            ("overview", "full"),
            ("steps", "false"),
        ]);

        let response = self
            .authorize(request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::DirectionsApi(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                status = %status,
                mode = %mode.mapbox_profile(),
                "Mapbox API HTTP error {}: {}",
                status, error_text
            );
            return Err(AppError::DirectionsApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let directions: MapboxDirectionsApiResponse = response
            .json()
            .await
            .map_err(|e| AppError::DirectionsApi(format!("Failed to parse response: {}", e)))?;

        let routes = directions.into_routes();
        tracing::debug!(
            alternatives = routes.len(),
            "Mapbox returned {} alternatives",
            routes.len()
        );
        Ok(routes)
    }
}

// Mapbox API response types

#[derive(Debug, Deserialize)]
struct MapboxDirectionsApiResponse {
    #[serde(default)]
    routes: Vec<MapboxRoute>,
    #[allow(dead_code)]
    #[serde(default)]
    code: String,
}

impl MapboxDirectionsApiResponse {
    fn into_routes(self) -> Vec<DirectionsResponse> {
        self.routes
            .into_iter()
            .take(MAX_ROUTES)
            .map(|route| DirectionsResponse {
                distance_meters: route.distance,
                duration_seconds: route.duration,
                geometry: route.geometry.coordinates,
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct MapboxRoute {
    #[serde(default)]
    distance: f64, // meters
    #[serde(default)]
    duration: f64, // seconds
    #[serde(default)]
    geometry: MapboxGeometry,
}

#[derive(Debug, Default, Deserialize)]
struct MapboxGeometry {
    #[serde(default)]
    coordinates: Vec<[f64; 2]>, // [lng, lat] pairs
}

#[derive(Debug, Deserialize)]
struct MapboxGeocodingApiResponse {
    #[serde(default)]
    features: Vec<MapboxPlace>,
}

impl MapboxGeocodingApiResponse {
    fn into_locations(self) -> Vec<Location> {
        self.features
            .into_iter()
            .map(|place| {
                Location::new(place.center[1], place.center[0]).with_address(place.place_name)
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct MapboxPlace {
    place_name: String,
    /// [lng, lat]
    center: [f64; 2],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_to_direct_token() {
        let client = MapboxClient::new("pk.test123".to_string());
        assert_eq!(client.base_url, MAPBOX_API_BASE_URL);
        assert!(matches!(client.auth_mode, AuthMode::DirectToken));
    }

    #[test]
    fn test_with_config_bearer_mode() {
        let client = MapboxClient::with_config(
            "my-key".to_string(),
            "http://localhost:4000/".to_string(),
            AuthMode::BearerHeader,
        )
        .with_timeout(Duration::from_secs(5));
        assert_eq!(client.base_url, "http://localhost:4000");
        assert!(matches!(client.auth_mode, AuthMode::BearerHeader));
        assert_eq!(client.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_directions_url_uses_lng_lat_order() {
        let client = MapboxClient::new("pk".to_string());
        let origin = Coordinates::new(40.7, -74.0).unwrap();
        let destination = Coordinates::new(40.75, -73.98).unwrap();

        assert_eq!(
            client.directions_url(&origin, &destination, TravelMode::Walking),
            "https://api.mapbox.com/directions/v5/mapbox/walking/-74,40.7;-73.98,40.75"
        );
        assert!(client
            .directions_url(&origin, &destination, TravelMode::Driving)
            .contains("/mapbox/driving/"));
    }

    #[test]
    fn test_geocoding_url_encodes_query() {
        let client = MapboxClient::new("pk".to_string());
        assert_eq!(
            client.geocoding_url("350 5th Ave"),
            "https://api.mapbox.com/geocoding/v5/mapbox.places/350%205th%20Ave.json"
        );
    }

    #[tokio::test]
    async fn test_short_geocode_query_skips_request() {
        // Unroutable base URL: any request would fail
        let client = MapboxClient::with_config(
            "pk".to_string(),
            "http://127.0.0.1:9".to_string(),
            AuthMode::DirectToken,
        );
        assert!(client.geocode(" ny ", 5).await.unwrap().is_empty());
    }

    #[test]
    fn test_parse_alternatives() {
        let body = serde_json::json!({
            "code": "Ok",
            "routes": [
                {
                    "distance": 2400.0,
                    "duration": 1800.0,
                    "geometry": {"type": "LineString", "coordinates": [[-74.0, 40.7], [-73.99, 40.71]]}
                },
                {
                    "distance": 2650.0,
                    "duration": 1920.0,
                    "geometry": {"type": "LineString", "coordinates": []}
                }
            ]
        });

        let parsed: MapboxDirectionsApiResponse = serde_json::from_value(body).unwrap();
        let routes = parsed.into_routes();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].geometry.len(), 2);
        assert_eq!(routes[0].duration_minutes(), 30.0);
        assert!(routes[1].geometry.is_empty());
    }

    #[test]
    fn test_parse_caps_alternatives() {
        let route = serde_json::json!({
            "distance": 1000.0,
            "duration": 600.0,
            "geometry": {"coordinates": [[-74.0, 40.7]]}
        });
        let body = serde_json::json!({ "code": "Ok", "routes": vec![route; 12] });

        let parsed: MapboxDirectionsApiResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.into_routes().len(), MAX_ROUTES);
    }

    #[test]
    fn test_parse_no_routes() {
        let body = serde_json::json!({ "code": "NoRoute", "routes": [] });
        let parsed: MapboxDirectionsApiResponse = serde_json::from_value(body).unwrap();
        assert!(parsed.into_routes().is_empty());
    }

    #[test]
    fn test_parse_geocoding_features() {
        let body = serde_json::json!({
            "type": "FeatureCollection",
            "features": [
                {"place_name": "Empire State Building, New York", "center": [-73.9857, 40.7484]}
            ]
        });

        let parsed: MapboxGeocodingApiResponse = serde_json::from_value(body).unwrap();
        let locations = parsed.into_locations();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].lat, 40.7484);
        assert_eq!(locations[0].lng, -73.9857);
        assert_eq!(
            locations[0].address.as_deref(),
            Some("Empire State Building, New York")
        );
    }
}
