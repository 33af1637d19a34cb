//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while signals are derived
//! - exported to JSON (latest + dated history)
//! - flattened into the SQLite audit table

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A logical instrument plus the ordered ticker symbols considered
/// equivalent proxies for it.
///
/// Only the VIX term-structure points carry more than one candidate: Yahoo
/// rotated those symbols over time (`^VXST` → `^VIX9D`, `^VXV` → `^VIX3M`,
/// `^VXMT` → `^VIX6M`), so both generations are tried in preference order.
#[derive(Debug, Clone, Copy)]
pub struct Instrument {
    pub name: &'static str,
    pub candidates: &'static [&'static str],
}

/// 9-day VIX point of the term structure.
pub const VXST: Instrument = Instrument {
    name: "VXST",
    candidates: &["^VXST", "^VIX9D"],
};

/// 3-month VIX point.
pub const VXV: Instrument = Instrument {
    name: "VXV",
    candidates: &["^VXV", "^VIX3M"],
};

/// 6-month VIX point.
pub const VXMT: Instrument = Instrument {
    name: "VXMT",
    candidates: &["^VXMT", "^VIX6M"],
};

/// Single-ticker instruments (no fallback candidates).
pub const TICKER_VIX: &str = "^VIX";
pub const TICKER_SPX: &str = "^GSPC";
pub const TICKER_HYG: &str = "HYG";
pub const TICKER_JNK: &str = "JNK";

/// FRED series ids for the yield-curve signal.
pub const SERIES_10Y: &str = "DGS10";
pub const SERIES_2Y: &str = "DGS2";

/// Directional trend signal shared by most indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendSignal {
    Bullish,
    Bearish,
    Neutral,
    #[serde(rename = "missing data")]
    MissingData,
}

impl TrendSignal {
    /// Contribution to the composite score: +1 only for an outright
    /// bullish read. Missing data is worth nothing, never a penalty.
    pub fn weight(self) -> i32 {
        match self {
            TrendSignal::Bullish => 1,
            _ => 0,
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            TrendSignal::Bullish => "bullish",
            TrendSignal::Bearish => "bearish",
            TrendSignal::Neutral => "neutral",
            TrendSignal::MissingData => "missing data",
        }
    }
}

/// Relative-performance signal (SPX against the credit ratio).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelativeSignal {
    Overperforms,
    Underperforms,
    #[serde(rename = "missing data")]
    MissingData,
}

impl RelativeSignal {
    pub fn weight(self) -> i32 {
        match self {
            RelativeSignal::Overperforms => 1,
            _ => 0,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            RelativeSignal::Overperforms => "overperforms",
            RelativeSignal::Underperforms => "underperforms",
            RelativeSignal::MissingData => "missing data",
        }
    }
}

/// Yield-curve slope signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveSignal {
    Normal,
    Inverted,
    #[serde(rename = "missing data")]
    MissingData,
}

impl CurveSignal {
    /// An inverted curve subtracts from the score; normal or unknown adds
    /// nothing.
    pub fn weight(self) -> i32 {
        match self {
            CurveSignal::Inverted => -1,
            _ => 0,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CurveSignal::Normal => "normal",
            CurveSignal::Inverted => "inverted",
            CurveSignal::MissingData => "missing data",
        }
    }
}

/// Final coarse market classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Regime {
    #[serde(rename = "risk-on")]
    RiskOn,
    #[serde(rename = "neutral")]
    Neutral,
    #[serde(rename = "risk-off")]
    RiskOff,
}

impl Regime {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Regime::RiskOn => "risk-on",
            Regime::Neutral => "neutral",
            Regime::RiskOff => "risk-off",
        }
    }
}

/// All derived signals for one run.
///
/// Field order is the serialization order; keep it stable so repeated runs
/// produce byte-identical JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSet {
    pub multi_vix: TrendSignal,
    pub credit: TrendSignal,
    pub hyg_trend: TrendSignal,
    pub jnk_trend: TrendSignal,
    pub nhnl: TrendSignal,
    pub spx_vs_credit: RelativeSignal,
    pub spx_long_term: TrendSignal,
    pub yield_curve: CurveSignal,
}

/// The immutable output record for one date.
///
/// Constructed once per run and never mutated afterwards; the writer keys
/// history entries by `date`, so re-running the same day overwrites rather
/// than duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub date: NaiveDate,
    /// Latest observed level per instrument, `null` when acquisition failed.
    /// `BTreeMap` keeps key order deterministic across runs.
    pub values: BTreeMap<String, Option<f64>>,
    pub signals: SignalSet,
    pub score: i32,
    pub regime: Regime,
}

/// Round to two decimals for presentation-stable JSON values.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
