//! `regime-signals` library crate.
//!
//! The binary (`regime`) is a thin wrapper around this library so that:
//!
//! - the acquisition/signal pipeline is testable without spawning processes
//! - provider clients can be mocked behind the `PriceSource` seam
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
pub mod signals;
