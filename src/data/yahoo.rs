//! Yahoo Finance price acquisition.
//!
//! Fetches daily closes from Yahoo's v8 chart API and collapses every
//! response shape into `Option<Series>`: the adjusted-close column when it
//! carries data, the plain close column otherwise, and `None` when nothing
//! usable comes back. Yahoo has no official API and rotates both symbols and
//! response shapes, so "empty" is a normal answer here, not an error.

use std::time::Duration;

use chrono::DateTime;
use log::warn;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::Series;
use crate::error::AppError;

const CHART_URL: &str = "https://query2.finance.yahoo.com/v8/finance/chart";

/// Relative lookback windows accepted by the chart API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    FiveDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Period::FiveDays => "5d",
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
        }
    }
}

/// Seam between the pipeline and the market-data provider.
///
/// `Ok(None)` means the provider answered but had no usable data for this
/// ticker/window; `Err` means the request itself failed. The resolver and
/// the non-fatal acquisitions only care about the tolerant view.
pub trait PriceSource {
    fn fetch(&self, ticker: &str, period: Period) -> Result<Option<Series>, AppError>;

    /// Like `fetch`, but a failed request degrades to "no data" with a
    /// warning instead of propagating.
    fn fetch_tolerant(&self, ticker: &str, period: Period) -> Option<Series> {
        match self.fetch(ticker, period) {
            Ok(series) => series,
            Err(err) => {
                warn!("fetch {ticker} ({}) failed: {err}", period.as_str());
                None
            }
        }
    }
}

pub struct YahooClient {
    client: Client,
}

impl YahooClient {
    pub fn new() -> Result<Self, AppError> {
        // Yahoo rejects requests without a browser-looking user agent.
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl PriceSource for YahooClient {
    fn fetch(&self, ticker: &str, period: Period) -> Result<Option<Series>, AppError> {
        let resp = self
            .client
            .get(format!("{CHART_URL}/{ticker}"))
            .query(&[
                ("range", period.as_str()),
                ("interval", "1d"),
                ("includeAdjustedClose", "true"),
            ])
            .send()
            .map_err(|e| AppError::data(format!("Chart request for {ticker} failed: {e}")))?;

        // 404 is how the chart API reports unknown/rotated symbols.
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(AppError::data(format!(
                "Chart request for {ticker} failed with status {}.",
                resp.status()
            )));
        }

        let body: ChartResponse = resp
            .json()
            .map_err(|e| AppError::data(format!("Failed to parse chart response for {ticker}: {e}")))?;

        normalize_chart(ticker, body)
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Indicators {
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjCloseData>>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    close: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseData {
    adjclose: Option<Vec<Option<f64>>>,
}

/// Collapse a chart response into a single named series.
///
/// Adjusted close wins over plain close when both carry data. Null slots
/// (holidays, half-populated rows) are skipped. A response with no
/// recognizable price column is absent data, not a shape error.
fn normalize_chart(ticker: &str, resp: ChartResponse) -> Result<Option<Series>, AppError> {
    let result = match resp.chart.result {
        Some(result) => result,
        None => {
            return match resp.chart.error {
                // "Not Found" covers delisted and rotated symbols; callers
                // fall back to the next candidate.
                Some(err) if err.code == "Not Found" => Ok(None),
                Some(err) => Err(AppError::data(format!(
                    "Chart error for {ticker}: {}: {}",
                    err.code, err.description
                ))),
                None => Ok(None),
            };
        }
    };

    let data = match result.into_iter().next() {
        Some(data) => data,
        None => return Ok(None),
    };

    let timestamps = match data.timestamp {
        Some(ts) if !ts.is_empty() => ts,
        _ => return Ok(None),
    };

    let adj = data
        .indicators
        .adjclose
        .and_then(|mut cols| cols.drain(..).next())
        .and_then(|col| col.adjclose);
    let close = data
        .indicators
        .quote
        .into_iter()
        .next()
        .and_then(|q| q.close);

    let column = match (adj, close) {
        (Some(col), _) if col.iter().any(Option::is_some) => col,
        (_, Some(col)) => col,
        _ => {
            warn!("chart response for {ticker} carries no price column");
            return Ok(None);
        }
    };

    let mut points = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let value = match column.get(i).copied().flatten() {
            Some(v) => v,
            None => continue,
        };
        let date = match DateTime::from_timestamp(ts, 0) {
            Some(dt) => dt.naive_utc().date(),
            None => continue,
        };
        points.push((date, value));
    }

    Ok(Series::from_points(points))
}
