//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the normalized price/yield series (`Series`)
//! - instrument specs with fallback ticker candidates (`Instrument`)
//! - categorical signal enums and the assembled `Snapshot`

pub mod series;
pub mod types;

pub use series::*;
pub use types::*;
