//! `awn-fetch` library crate.
//!
//! Fetches the latest sample from an Ambient Weather Network station and
//! normalizes it into metric observations for an irrigation scheduler.
//!
//! The binary (`awn`) is a thin wrapper around this library so that the fetch
//! and conversion logic is testable without spawning processes or touching the
//! network.

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod host;
pub mod report;
pub mod units;
