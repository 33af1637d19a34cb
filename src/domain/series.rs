//! Normalized time series.
//!
//! Every provider response is collapsed into this one shape before anything
//! downstream looks at it. Absence is expressed as `Option<Series>` at the
//! call sites; a `Series` itself is always non-empty with strictly
//! increasing dates.

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// A time-ordered sequence of (date, value) observations for one instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    points: Vec<(NaiveDate, f64)>,
}

impl Series {
    /// Build a series from raw observations.
    ///
    /// Sorts by date, keeps the last value seen for a duplicated date, and
    /// drops non-finite values. Returns `None` when nothing usable remains —
    /// an empty series is indistinguishable from no data for this pipeline.
    pub fn from_points(points: Vec<(NaiveDate, f64)>) -> Option<Self> {
        let mut by_date = BTreeMap::new();
        for (date, value) in points {
            if value.is_finite() {
                by_date.insert(date, value);
            }
        }
        if by_date.is_empty() {
            return None;
        }
        Some(Self {
            points: by_date.into_iter().collect(),
        })
    }

    /// The most recent observation value — the only value most signals read.
    pub fn latest(&self) -> f64 {
        self.points[self.points.len() - 1].1
    }

    pub fn latest_date(&self) -> NaiveDate {
        self.points[self.points.len() - 1].0
    }

    /// Values in date order, for EMA evaluation.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|(_, v)| *v).collect()
    }

    pub fn points(&self) -> &[(NaiveDate, f64)] {
        &self.points
    }
}

/// Pointwise ratio of two series, inner-joined on date.
///
/// Dates present in only one input are dropped; zero denominators are
/// skipped. Returns `None` when no date survives the join.
pub fn ratio(numerator: &Series, denominator: &Series) -> Option<Series> {
    let mut out = Vec::new();
    let mut den = denominator.points.iter().peekable();
    for &(date, num) in &numerator.points {
        while den.peek().is_some_and(|(d, _)| *d < date) {
            den.next();
        }
        match den.peek() {
            Some(&&(d, v)) if d == date && v != 0.0 => out.push((date, num / v)),
            _ => {}
        }
    }
    Series::from_points(out)
}
