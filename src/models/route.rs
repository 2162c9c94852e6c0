use crate::constants::{DEFAULT_SAFETY_PREFERENCE, FASTEST_DIAL_THRESHOLD, SAFEST_DIAL_THRESHOLD};
use crate::models::Location;
use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject, Value as GeoJsonValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Driving,
    #[default]
    Walking,
}

impl TravelMode {
    /// Returns the Mapbox profile name for this travel mode
    pub fn mapbox_profile(&self) -> &str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mapbox_profile())
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "driving" | "drive" | "car" => Ok(TravelMode::Driving),
            "walking" | "walk" => Ok(TravelMode::Walking),
            _ => Err(format!("Invalid travel mode: '{}'", s)),
        }
    }
}

/// Ranking regime chosen by the caller's 0-100 safety dial.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PreferenceLabel {
    Fastest,
    Balanced,
    Safest,
}

impl fmt::Display for PreferenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreferenceLabel::Fastest => write!(f, "fastest"),
            PreferenceLabel::Balanced => write!(f, "balanced"),
            PreferenceLabel::Safest => write!(f, "safest"),
        }
    }
}

/// Validated safety-preference dial (0 = fastest, 100 = safest).
/// Fractional values are accepted.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SafetyPreference(f64);

impl SafetyPreference {
    pub fn new(value: f64) -> Result<Self, String> {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(format!(
                "safety_preference must be between 0 and 100, got {}",
                value
            ));
        }
        Ok(SafetyPreference(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Both thresholds are inclusive: 70 is safest, 30 is fastest.
    pub fn label(self) -> PreferenceLabel {
        if self.0 >= SAFEST_DIAL_THRESHOLD {
            PreferenceLabel::Safest
        } else if self.0 <= FASTEST_DIAL_THRESHOLD {
            PreferenceLabel::Fastest
        } else {
            PreferenceLabel::Balanced
        }
    }
}

impl Default for SafetyPreference {
    fn default() -> Self {
        SafetyPreference(DEFAULT_SAFETY_PREFERENCE)
    }
}

/// Per-category risk on a 0-10 scale, lower is safer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RouteRatings {
    pub crime: f64,
    pub speeding: f64,
    pub crash: f64,
    pub construction: f64,
    pub flood_risk: f64,
}

/// One alternative from the directions provider, before scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCandidate {
    /// 1-based position in the provider's response
    pub slot: usize,
    /// `[lng, lat]` pairs
    pub coordinates: Vec<[f64; 2]>,
    pub duration_minutes: f64,
    pub distance_km: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredRoute {
    pub id: String,
    pub name: String,
    pub duration_minutes: f64,
    pub distance_km: f64,
    /// Composite score on a 0-10 scale, higher is safer
    pub safety_score: f64,
    pub preference: PreferenceLabel,
    /// `[lng, lat]` pairs
    pub coordinates: Vec<[f64; 2]>,
    pub ratings: RouteRatings,
}

impl ScoredRoute {
    /// GeoJSON LineString feature carrying the scores as properties
    pub fn to_geojson_feature(&self) -> Feature {
        let line = self
            .coordinates
            .iter()
            .map(|pair| pair.to_vec())
            .collect::<Vec<_>>();

        let mut properties = JsonObject::new();
        properties.insert("name".to_string(), self.name.clone().into());
        properties.insert("duration_minutes".to_string(), self.duration_minutes.into());
        properties.insert("distance_km".to_string(), self.distance_km.into());
        properties.insert("safety_score".to_string(), self.safety_score.into());
        properties.insert(
            "preference".to_string(),
            self.preference.to_string().into(),
        );
        if let Ok(ratings) = serde_json::to_value(self.ratings) {
            properties.insert("ratings".to_string(), ratings);
        }

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(GeoJsonValue::LineString(line))),
            id: Some(Id::String(self.id.clone())),
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

// Request/Response types for API endpoints

#[derive(Debug, Deserialize)]
pub struct SafeRouteRequest {
    pub origin: Option<Location>,
    pub destination: Option<Location>,
    #[serde(default)]
    pub mode: TravelMode,
    #[serde(default = "default_safety_preference")]
    pub safety_preference: f64,
}

fn default_safety_preference() -> f64 {
    DEFAULT_SAFETY_PREFERENCE
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RouteResponse {
    pub routes: Vec<ScoredRoute>,
}

impl RouteResponse {
    /// Ranked routes as a FeatureCollection, in ranking order
    pub fn to_feature_collection(&self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self
                .routes
                .iter()
                .map(ScoredRoute::to_geojson_feature)
                .collect(),
            foreign_members: None,
        }
    }
}
