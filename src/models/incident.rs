use crate::constants::{DEFAULT_CRASH_RECENCY_DAYS, DEFAULT_CRIME_RECENCY_DAYS};
use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use time::Date;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum IncidentCategory {
    Crash,
    Crime,
    Construction,
    Speeding,
}

impl IncidentCategory {
    /// Recency window applied when the caller doesn't pick one.
    /// Construction and speeding data are not windowed.
    pub fn default_recency_days(&self) -> Option<u32> {
        match self {
            IncidentCategory::Crash => Some(DEFAULT_CRASH_RECENCY_DAYS),
            IncidentCategory::Crime => Some(DEFAULT_CRIME_RECENCY_DAYS),
            IncidentCategory::Construction | IncidentCategory::Speeding => None,
        }
    }
}

/// Legal severity of a reported crime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CrimeSeverity {
    Felony,
    Misdemeanor,
    #[default]
    ViolationOrOther,
}

impl CrimeSeverity {
    /// Map an upstream law category code. Unknown or missing codes fall into
    /// `ViolationOrOther`.
    pub fn from_law_category(code: Option<&str>) -> Self {
        match code.map(|c| c.trim().to_ascii_uppercase()).as_deref() {
            Some("FELONY") => CrimeSeverity::Felony,
            Some("MISDEMEANOR") => CrimeSeverity::Misdemeanor,
            _ => CrimeSeverity::ViolationOrOther,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrashIncident {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub location: Coordinates,
    #[serde(default, with = "iso_date::option")]
    pub date: Option<Date>,
    pub injuries: u32,
    pub fatalities: u32,
    /// Always at least 1
    pub vehicle_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrimeIncident {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub location: Coordinates,
    #[serde(default, with = "iso_date::option")]
    pub date: Option<Date>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offense: Option<String>,
    #[serde(default)]
    pub severity: CrimeSeverity,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConstructionIncident {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub location: Coordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permit_type: Option<String>,
    #[serde(default, with = "iso_date::option")]
    pub issued: Option<Date>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpeedingIncident {
    #[serde(flatten)]
    pub location: Coordinates,
    pub violations: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_label: Option<String>,
}

/// All incident categories fetched for one bounding box, read-only for the
/// duration of a scoring pass.
#[derive(Debug, Clone, Default)]
pub struct IncidentSnapshot {
    pub crashes: Vec<CrashIncident>,
    pub crimes: Vec<CrimeIncident>,
    pub construction: Vec<ConstructionIncident>,
    pub speeding: Vec<SpeedingIncident>,
}

impl IncidentSnapshot {
    pub fn total(&self) -> usize {
        self.crashes.len() + self.crimes.len() + self.construction.len() + self.speeding.len()
    }
}
