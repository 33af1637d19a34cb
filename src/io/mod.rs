//! Snapshot persistence.
//!
//! - JSON outputs per root: latest + dated history + index (`snapshot`)
//! - relational audit table, upsert-by-date (`sqlite`)

pub mod snapshot;
pub mod sqlite;

pub use snapshot::*;
pub use sqlite::*;
