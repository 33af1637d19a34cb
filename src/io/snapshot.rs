//! JSON snapshot outputs.
//!
//! Per output root:
//!
//! - `latest.json` — overwritten unconditionally
//! - `history/<date>.json` — keyed by run date, so a same-day re-run
//!   overwrites instead of duplicating
//! - `history/index.json` — sorted, de-duplicated ISO-date strings; a
//!   malformed index is rebuilt from scratch rather than aborting the run

use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::Path;

use chrono::NaiveDate;
use log::{info, warn};

use crate::domain::Snapshot;
use crate::error::AppError;

/// Write the snapshot to one output root.
pub fn write_root(root: &Path, snapshot: &Snapshot) -> Result<(), AppError> {
    let history_dir = root.join("history");
    fs::create_dir_all(&history_dir).map_err(|e| {
        AppError::config(format!(
            "Failed to create output directory '{}': {e}",
            history_dir.display()
        ))
    })?;

    write_json(&root.join("latest.json"), snapshot)?;
    write_json(
        &history_dir.join(format!("{}.json", snapshot.date)),
        snapshot,
    )?;
    merge_index(&history_dir.join("index.json"), snapshot.date)?;

    info!("wrote snapshot for {} under {}", snapshot.date, root.display());
    Ok(())
}

fn write_json(path: &Path, snapshot: &Snapshot) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::config(format!("Failed to create '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, snapshot)
        .map_err(|e| AppError::config(format!("Failed to write '{}': {e}", path.display())))
}

/// Merge the run date into the history index: read, insert, sort, dedup,
/// rewrite.
fn merge_index(path: &Path, date: NaiveDate) -> Result<(), AppError> {
    let mut dates = read_index(path);
    dates.push(date.to_string());
    dates.sort();
    dates.dedup();

    let file = File::create(path)
        .map_err(|e| AppError::config(format!("Failed to create '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, &dates)
        .map_err(|e| AppError::config(format!("Failed to write '{}': {e}", path.display())))
}

/// Load the existing index, treating a missing or malformed file as empty.
pub fn read_index(path: &Path) -> Vec<String> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => return Vec::new(),
        Err(err) => {
            warn!("cannot open index '{}': {err}; rebuilding", path.display());
            return Vec::new();
        }
    };
    match serde_json::from_reader(file) {
        Ok(dates) => dates,
        Err(err) => {
            warn!("malformed index '{}': {err}; rebuilding", path.display());
            Vec::new()
        }
    }
}
