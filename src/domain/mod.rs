//! Domain types used throughout the fetcher.
//!
//! This module defines:
//!
//! - upstream records (`RawSample`)
//! - normalized outputs (`Observation`, `ObservationKind`)

pub mod types;

pub use types::*;
