//! Provider clients and acquisition helpers.
//!
//! - Yahoo chart API client + the `PriceSource` seam (`yahoo`)
//! - FRED rate-series client + the `RateSource` seam (`fred`)
//! - ticker/window fallback resolver (`resolve`)

pub mod fred;
pub mod resolve;
pub mod yahoo;

pub use fred::*;
pub use resolve::*;
pub use yahoo::*;
