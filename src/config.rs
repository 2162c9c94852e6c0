use crate::constants::*;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mapbox_api_key: String,
    /// When set, directions/geocoding go through this proxy with bearer auth
    pub mapbox_base_url: Option<String>,
    pub open_data_base_url: String,
    pub open_data_app_token: Option<String>,
    pub nws_base_url: String,
    pub http_timeout_secs: u64,
    pub incidents: IncidentSourceConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncidentSourceConfig {
    /// Crashes older than this many days are dropped
    pub crash_recency_days: u32,

    /// Crimes older than this many days are dropped
    pub crime_recency_days: u32,

    /// Upstream `$limit` for crash and crime datasets
    pub fetch_limit: u32,

    /// Crash / crime records kept once the bbox filter has run
    pub max_records: usize,

    pub construction_max_records: usize,

    pub speeding_max_records: usize,
}

impl Default for IncidentSourceConfig {
    fn default() -> Self {
        Self {
            crash_recency_days: DEFAULT_CRASH_RECENCY_DAYS,
            crime_recency_days: DEFAULT_CRIME_RECENCY_DAYS,
            fetch_limit: DEFAULT_INCIDENT_FETCH_LIMIT,
            max_records: DEFAULT_INCIDENT_MAX_RECORDS,
            construction_max_records: DEFAULT_CONSTRUCTION_MAX_RECORDS,
            speeding_max_records: DEFAULT_SPEEDING_MAX_RECORDS,
        }
    }
}

impl IncidentSourceConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        Ok(Self {
            crash_recency_days: env::var("CRASH_RECENCY_DAYS")
                .unwrap_or_else(|_| defaults.crash_recency_days.to_string())
                .parse()
                .map_err(|_| "Invalid CRASH_RECENCY_DAYS")?,

            crime_recency_days: env::var("CRIME_RECENCY_DAYS")
                .unwrap_or_else(|_| defaults.crime_recency_days.to_string())
                .parse()
                .map_err(|_| "Invalid CRIME_RECENCY_DAYS")?,

            fetch_limit: env::var("INCIDENT_FETCH_LIMIT")
                .unwrap_or_else(|_| defaults.fetch_limit.to_string())
                .parse()
                .map_err(|_| "Invalid INCIDENT_FETCH_LIMIT")?,

            max_records: env::var("INCIDENT_MAX_RECORDS")
                .unwrap_or_else(|_| defaults.max_records.to_string())
                .parse()
                .map_err(|_| "Invalid INCIDENT_MAX_RECORDS")?,

            construction_max_records: env::var("CONSTRUCTION_MAX_RECORDS")
                .unwrap_or_else(|_| defaults.construction_max_records.to_string())
                .parse()
                .map_err(|_| "Invalid CONSTRUCTION_MAX_RECORDS")?,

            speeding_max_records: env::var("SPEEDING_MAX_RECORDS")
                .unwrap_or_else(|_| defaults.speeding_max_records.to_string())
                .parse()
                .map_err(|_| "Invalid SPEEDING_MAX_RECORDS")?,
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let http_timeout_secs: u64 = env::var("HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_HTTP_TIMEOUT_SECS.to_string())
            .parse()
            .map_err(|_| "Invalid HTTP_TIMEOUT_SECS")?;

        if !(1..=300).contains(&http_timeout_secs) {
            return Err("HTTP_TIMEOUT_SECS must be between 1 and 300 seconds".to_string());
        }

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            mapbox_api_key: env::var("MAPBOX_API_KEY").map_err(|_| "MAPBOX_API_KEY must be set")?,
            mapbox_base_url: env::var("MAPBOX_BASE_URL").ok(),
            open_data_base_url: env::var("OPEN_DATA_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPEN_DATA_BASE_URL.to_string()),
            open_data_app_token: env::var("OPEN_DATA_APP_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
            nws_base_url: env::var("NWS_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_NWS_BASE_URL.to_string()),
            http_timeout_secs,
            incidents: IncidentSourceConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
