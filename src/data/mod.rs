//! Upstream data sources.

pub mod ambient;

pub use ambient::{HttpTransport, Transport, fetch_latest};
