//! Reporting utilities: formatted terminal and JSON output.

pub mod format;

pub use format::*;
