//! SQLite audit log.
//!
//! One row per run date in a single `signals` table: flattened instrument
//! levels for SQL-side querying, plus JSON copies of the values, the signal
//! set, and the full payload for forward compatibility. The upsert keys on
//! `date`, so a same-day re-run replaces the row.

use std::path::Path;

use chrono::Utc;
use rusqlite::{Connection, params};

use crate::domain::Snapshot;
use crate::error::AppError;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS signals (
    date         TEXT PRIMARY KEY,
    vxst         REAL,
    vix          REAL,
    vxv          REAL,
    vxmt         REAL,
    spx          REAL,
    hyg          REAL,
    jnk          REAL,
    score        INTEGER,
    regime       TEXT,
    values_json  TEXT NOT NULL,
    signals_json TEXT NOT NULL,
    payload_json TEXT NOT NULL,
    written_at   TEXT NOT NULL
);
";

/// Upsert the snapshot into the audit table at `db_path`.
pub fn upsert_snapshot(db_path: &Path, snapshot: &Snapshot) -> Result<(), AppError> {
    let conn = Connection::open(db_path).map_err(|e| {
        AppError::config(format!("Failed to open '{}': {e}", db_path.display()))
    })?;
    conn.execute_batch(SCHEMA)
        .map_err(|e| AppError::config(format!("Failed to initialize audit schema: {e}")))?;

    let values_json = serde_json::to_string(&snapshot.values)
        .map_err(|e| AppError::config(format!("Failed to serialize values: {e}")))?;
    let signals_json = serde_json::to_string(&snapshot.signals)
        .map_err(|e| AppError::config(format!("Failed to serialize signals: {e}")))?;
    let payload_json = serde_json::to_string(snapshot)
        .map_err(|e| AppError::config(format!("Failed to serialize snapshot: {e}")))?;

    let level = |name: &str| snapshot.values.get(name).copied().flatten();

    conn.execute(
        "INSERT INTO signals (
            date, vxst, vix, vxv, vxmt, spx, hyg, jnk,
            score, regime, values_json, signals_json, payload_json, written_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
         ON CONFLICT(date) DO UPDATE SET
            vxst = excluded.vxst,
            vix = excluded.vix,
            vxv = excluded.vxv,
            vxmt = excluded.vxmt,
            spx = excluded.spx,
            hyg = excluded.hyg,
            jnk = excluded.jnk,
            score = excluded.score,
            regime = excluded.regime,
            values_json = excluded.values_json,
            signals_json = excluded.signals_json,
            payload_json = excluded.payload_json,
            written_at = excluded.written_at",
        params![
            snapshot.date.to_string(),
            level("VXST"),
            level("VIX"),
            level("VXV"),
            level("VXMT"),
            level("SPX"),
            level("HYG"),
            level("JNK"),
            snapshot.score,
            snapshot.regime.display_name(),
            values_json,
            signals_json,
            payload_json,
            Utc::now().to_rfc3339(),
        ],
    )
    .map_err(|e| AppError::config(format!("Failed to upsert audit row: {e}")))?;

    Ok(())
}
