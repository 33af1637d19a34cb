//! FRED API integration for the Treasury yield series.
//!
//! The yield-curve signal only needs the newest value of DGS10 and DGS2, so
//! observations are requested newest-first and the first parseable value
//! wins. FRED publishes `"."` for market holidays; those rows are skipped.

use log::warn;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::AppError;

const BASE_URL: &str = "https://api.stlouisfed.org/fred/series/observations";
const OBS_LIMIT: usize = 20;

/// Seam between the pipeline and the rate-series provider.
pub trait RateSource {
    /// Newest finite value of the named series.
    fn latest(&self, series_id: &str) -> Result<f64, AppError>;
}

pub struct FredClient {
    client: Client,
    api_key: Option<String>,
}

impl FredClient {
    /// Build a client from the environment.
    ///
    /// A missing `FRED_API_KEY` is tolerated here; the request itself fails
    /// later and the yield-curve signal degrades to missing data.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("FRED_API_KEY").ok();
        if api_key.is_none() {
            warn!("FRED_API_KEY not set; yield-curve signal will be unavailable");
        }
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

impl RateSource for FredClient {
    fn latest(&self, series_id: &str) -> Result<f64, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::data("Missing FRED_API_KEY in environment (.env)."))?;

        let limit = OBS_LIMIT.to_string();
        let resp = self
            .client
            .get(BASE_URL)
            .query(&[
                ("series_id", series_id),
                ("api_key", api_key),
                ("file_type", "json"),
                ("sort_order", "desc"),
                ("limit", limit.as_str()),
            ])
            .send()
            .map_err(|e| AppError::data(format!("FRED request for {series_id} failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::data(format!(
                "FRED request for {series_id} failed with status {}.",
                resp.status()
            )));
        }

        let body: ObservationsResponse = resp
            .json()
            .map_err(|e| AppError::data(format!("Failed to parse FRED response for {series_id}: {e}")))?;

        // Newest-first, so the first parseable observation is the latest.
        body.observations
            .iter()
            .find_map(|obs| parse_value(&obs.value))
            .ok_or_else(|| AppError::data(format!("No usable observations for series {series_id}.")))
    }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<Observation>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    value: String,
}

fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == "." || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}
