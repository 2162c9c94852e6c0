//! NYC Open Data (Socrata SODA) incident source.
//!
//! Each category lives in its own dataset. Rows come back as string-typed
//! JSON; they are parsed here, anything without usable coordinates is
//! dropped, and the rest is clipped to the requested bounding box.

use crate::config::IncidentSourceConfig;
use crate::constants::*;
use crate::error::{AppError, Result};
use crate::models::{
    BoundingBox, ConstructionIncident, Coordinates, CrashIncident, CrimeIncident, CrimeSeverity,
    SpeedingIncident,
};
use crate::scoring::rates::ProximityRisk;
use crate::services::incidents::IncidentRepository;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

const COORDINATES_PRESENT: &str = "latitude IS NOT NULL AND longitude IS NOT NULL";

/// One Socrata dataset and how to page it.
#[derive(Debug, Clone, Copy)]
struct SocrataDataset {
    id: &'static str,
    /// Label for log messages
    label: &'static str,
    /// Column used for `$order`; `None` leaves upstream order alone
    date_column: Option<&'static str>,
}

const CRASH_DATASET: SocrataDataset = SocrataDataset {
    id: "h9gi-nx95",
    label: "crashes",
    date_column: Some("crash_date"),
};

const CRIME_DATASET: SocrataDataset = SocrataDataset {
    id: "5uac-w243",
    label: "crime",
    date_column: Some("cmplnt_fr_dt"),
};

const SPEEDING_DATASET: SocrataDataset = SocrataDataset {
    id: "hez4-dxbm",
    label: "speeding",
    date_column: None,
};

const CONSTRUCTION_DATASET: SocrataDataset = SocrataDataset {
    id: "3k2p-39jp",
    label: "construction",
    date_column: Some("issuance_date"),
};

#[derive(Clone)]
pub struct OpenDataClient {
    client: Client,
    base_url: String,
    app_token: Option<String>,
    limits: IncidentSourceConfig,
    timeout: Duration,
}

impl OpenDataClient {
    pub fn new(base_url: String, app_token: Option<String>, limits: IncidentSourceConfig) -> Self {
        OpenDataClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            app_token,
            limits,
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn dataset_url(&self, dataset: &SocrataDataset) -> String {
        format!("{}/{}.json", self.base_url, dataset.id)
    }

    fn query_params(&self, dataset: &SocrataDataset, limit: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("$limit", limit.to_string()),
            ("$where", COORDINATES_PRESENT.to_string()),
        ];
        if let Some(column) = dataset.date_column {
            params.push(("$order", format!("{} DESC", column)));
        }
        if let Some(token) = &self.app_token {
            params.push(("$$app_token", token.clone()));
        }
        params
    }

    async fn fetch_rows<R: DeserializeOwned>(
        &self,
        dataset: &SocrataDataset,
        limit: u32,
    ) -> Result<Vec<R>> {
        let url = self.dataset_url(dataset);
        tracing::debug!(dataset = dataset.id, limit, "Fetching {} data", dataset.label);

        let response = self
            .client
            .get(&url)
            .query(&self.query_params(dataset, limit))
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                AppError::IncidentSource(format!("{} request failed: {}", dataset.label, e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                dataset = dataset.id,
                status = %status,
                "Open data HTTP error {}: {}",
                status,
                error_text
            );
            return Err(AppError::IncidentSource(format!(
                "{} HTTP {}: {}",
                dataset.label, status, error_text
            )));
        }

        let rows: Vec<R> = response.json().await.map_err(|e| {
            AppError::IncidentSource(format!("Failed to parse {} rows: {}", dataset.label, e))
        })?;

        tracing::debug!(dataset = dataset.id, rows = rows.len(), "Downloaded {} rows", dataset.label);
        Ok(rows)
    }
}

#[async_trait]
impl IncidentRepository for OpenDataClient {
    async fn crashes(&self, bbox: &BoundingBox, recency_days: u32) -> Result<Vec<CrashIncident>> {
        let rows: Vec<CrashRow> = self
            .fetch_rows(&CRASH_DATASET, self.limits.fetch_limit)
            .await?;
        let cutoff = recency_cutoff(today(), recency_days);

        let crashes = clip_then_window(
            rows.into_iter().filter_map(CrashRow::into_incident),
            bbox,
            self.limits.max_records,
            cutoff,
            |c| c.date,
        );
        tracing::info!(count = crashes.len(), "Loaded {} crashes", crashes.len());
        Ok(crashes)
    }

    async fn crimes(&self, bbox: &BoundingBox, recency_days: u32) -> Result<Vec<CrimeIncident>> {
        let rows: Vec<CrimeRow> = self
            .fetch_rows(&CRIME_DATASET, self.limits.fetch_limit)
            .await?;
        let cutoff = recency_cutoff(today(), recency_days);

        let crimes = clip_then_window(
            rows.into_iter().filter_map(CrimeRow::into_incident),
            bbox,
            self.limits.max_records,
            cutoff,
            |c| c.date,
        );
        tracing::info!(count = crimes.len(), "Loaded {} crimes", crimes.len());
        Ok(crimes)
    }

    async fn construction(&self, bbox: &BoundingBox) -> Result<Vec<ConstructionIncident>> {
        let rows: Vec<ConstructionRow> = self
            .fetch_rows(&CONSTRUCTION_DATASET, UNDATED_INCIDENT_FETCH_LIMIT)
            .await?;

        let sites = clip_to_bbox(
            rows.into_iter().filter_map(ConstructionRow::into_incident),
            bbox,
            self.limits.construction_max_records,
        );
        tracing::info!(count = sites.len(), "Loaded {} construction permits", sites.len());
        Ok(sites)
    }

    async fn speeding(&self, bbox: &BoundingBox) -> Result<Vec<SpeedingIncident>> {
        let rows: Vec<SpeedingRow> = self
            .fetch_rows(&SPEEDING_DATASET, UNDATED_INCIDENT_FETCH_LIMIT)
            .await?;

        let cameras = clip_to_bbox(
            rows.into_iter().filter_map(SpeedingRow::into_incident),
            bbox,
            self.limits.speeding_max_records,
        );
        tracing::info!(count = cameras.len(), "Loaded {} speed cameras", cameras.len());
        Ok(cameras)
    }
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Oldest date still inside a window of `days` ending at `today`.
fn recency_cutoff(today: Date, days: u32) -> Option<Date> {
    today.checked_sub(time::Duration::days(i64::from(days)))
}

fn within_window(date: Option<Date>, cutoff: Option<Date>) -> bool {
    match (date, cutoff) {
        (Some(date), Some(cutoff)) => date >= cutoff,
        _ => true,
    }
}

/// Parse lat/lng strings. Missing, unparsable, out-of-range, or zero
/// coordinates yield `None`.
fn parse_coordinates(lat: Option<&str>, lng: Option<&str>) -> Option<Coordinates> {
    let lat: f64 = lat?.trim().parse().ok()?;
    let lng: f64 = lng?.trim().parse().ok()?;
    if lat == 0.0 || lng == 0.0 {
        return None;
    }
    Coordinates::new(lat, lng).ok()
}

/// Socrata floating timestamps look like `2024-03-09T00:00:00.000`; only the
/// calendar date matters here.
fn parse_socrata_date(value: Option<&str>) -> Option<Date> {
    let day = value?.trim().get(..10)?;
    Date::parse(day, format_description!("[year]-[month]-[day]")).ok()
}

fn parse_count(value: Option<&str>) -> Option<u32> {
    let value = value?.trim();
    value.parse::<u32>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v as u32)
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn clip_to_bbox<T: ProximityRisk>(
    incidents: impl Iterator<Item = T>,
    bbox: &BoundingBox,
    max_records: usize,
) -> Vec<T> {
    incidents
        .filter(|incident| bbox.contains(incident.location()))
        .take(max_records)
        .collect()
}

/// Cap to `max_records` in-box incidents first, then drop the ones older than
/// `cutoff`. Stale rows still use up the cap, so the result can be shorter
/// than `max_records` even when more recent rows exist further down.
fn clip_then_window<T: ProximityRisk>(
    incidents: impl Iterator<Item = T>,
    bbox: &BoundingBox,
    max_records: usize,
    cutoff: Option<Date>,
    date_of: impl Fn(&T) -> Option<Date>,
) -> Vec<T> {
    let mut clipped = clip_to_bbox(incidents, bbox, max_records);
    clipped.retain(|incident| within_window(date_of(incident), cutoff));
    clipped
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CrashRow {
    collision_id: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
    crash_date: Option<String>,
    number_of_persons_injured: Option<String>,
    number_of_persons_killed: Option<String>,
    number_of_vehicles_involved: Option<String>,
}

impl CrashRow {
    fn into_incident(self) -> Option<CrashIncident> {
        let location = parse_coordinates(self.latitude.as_deref(), self.longitude.as_deref())?;
        Some(CrashIncident {
            id: non_empty(self.collision_id),
            location,
            date: parse_socrata_date(self.crash_date.as_deref()),
            injuries: parse_count(self.number_of_persons_injured.as_deref()).unwrap_or(0),
            fatalities: parse_count(self.number_of_persons_killed.as_deref()).unwrap_or(0),
            vehicle_count: parse_count(self.number_of_vehicles_involved.as_deref())
                .unwrap_or(1)
                .max(1),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CrimeRow {
    cmplnt_num: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
    cmplnt_fr_dt: Option<String>,
    ofns_desc: Option<String>,
    law_cat_cd: Option<String>,
}

impl CrimeRow {
    fn into_incident(self) -> Option<CrimeIncident> {
        let location = parse_coordinates(self.latitude.as_deref(), self.longitude.as_deref())?;
        Some(CrimeIncident {
            id: non_empty(self.cmplnt_num),
            location,
            date: parse_socrata_date(self.cmplnt_fr_dt.as_deref()),
            offense: non_empty(self.ofns_desc),
            severity: CrimeSeverity::from_law_category(self.law_cat_cd.as_deref()),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConstructionRow {
    permit_number: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
    worktype: Option<String>,
    description: Option<String>,
    permit_type: Option<String>,
    issuance_date: Option<String>,
}

impl ConstructionRow {
    fn into_incident(self) -> Option<ConstructionIncident> {
        let location = parse_coordinates(self.latitude.as_deref(), self.longitude.as_deref())?;
        Some(ConstructionIncident {
            id: non_empty(self.permit_number),
            location,
            description: non_empty(self.worktype).or_else(|| non_empty(self.description)),
            permit_type: non_empty(self.permit_type),
            issued: parse_socrata_date(self.issuance_date.as_deref()),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SpeedingRow {
    latitude: Option<String>,
    longitude: Option<String>,
    violations: Option<String>,
    camera_location: Option<String>,
}

impl SpeedingRow {
    fn into_incident(self) -> Option<SpeedingIncident> {
        let location = parse_coordinates(self.latitude.as_deref(), self.longitude.as_deref())?;
        Some(SpeedingIncident {
            location,
            violations: parse_count(self.violations.as_deref()).unwrap_or(0),
            camera_label: non_empty(self.camera_location),
        })
    }
}
