//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initializes logging and the provider clients
//! - runs the acquisition/signal pipeline
//! - persists the snapshot to every output root (JSON + SQLite)
//! - prints the run summary
//!
//! There are no CLI flags: the run is parameterless, configured only by the
//! `FRED_API_KEY` environment variable and the hardcoded instrument lists.

use std::path::Path;

use chrono::Utc;

use crate::data::{FredClient, PriceSource, RateSource, YahooClient};
use crate::domain::Snapshot;
use crate::error::AppError;

pub mod pipeline;

/// Output roots written on every run. The second root feeds the static
/// status page, which fetches `data/latest.json` relative to itself.
pub const OUTPUT_ROOTS: [&str; 2] = ["data", "docs/data"];

/// Entry point for the `regime` binary.
pub fn run() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let quotes = YahooClient::new()?;
    let rates = FredClient::from_env();
    let roots: Vec<&Path> = OUTPUT_ROOTS.iter().map(Path::new).collect();

    let snapshot = run_with(&quotes, &rates, &roots)?;
    println!("{}", crate::report::format_run_summary(&snapshot));
    Ok(())
}

/// Build today's snapshot and persist it: JSON outputs under every root,
/// the SQLite audit row under the first.
///
/// Build happens strictly before the first write, so a fatal acquisition
/// (absent VIX) returns with every root untouched.
pub fn run_with<Q, R>(quotes: &Q, rates: &R, roots: &[&Path]) -> Result<Snapshot, AppError>
where
    Q: PriceSource + ?Sized,
    R: RateSource + ?Sized,
{
    let date = Utc::now().date_naive();
    let snapshot = pipeline::build_snapshot(quotes, rates, date)?;

    for root in roots {
        crate::io::write_root(root, &snapshot)?;
    }
    if let Some(first) = roots.first() {
        crate::io::upsert_snapshot(&first.join("history.sqlite"), &snapshot)?;
    }
    Ok(snapshot)
}
