//! Ambient Weather Network API integration.
//!
//! One fetch cycle is a single GET for the most recent sample of one device,
//! followed by a field-by-field mapping into normalized observations.

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{error, info};

use crate::config::Configuration;
use crate::domain::{Observation, ObservationKind, RawSample};
use crate::error::FetchError;

const BASE_URL: &str = "https://api.ambientweather.net/v1/devices";
const SAMPLE_LIMIT: &str = "1";

/// Outbound HTTP seam.
pub trait Transport {
    /// Issue a GET. `Ok(None)` means the server answered without a body.
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Option<String>, FetchError>;
}

/// Blocking `reqwest` transport with the client's default timeouts.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Option<String>, FetchError> {
        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(transport_error)?;

        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status().as_u16()));
        }

        let body = resp.text().map_err(transport_error)?;

        if body.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(body))
        }
    }
}

/// Flatten a request error and its causes into one line.
///
/// The URL is dropped so the api keys in the query string never reach logs.
fn transport_error(err: reqwest::Error) -> FetchError {
    let err = err.without_url();
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = std::error::Error::source(cause);
    }
    FetchError::Transport(message)
}

/// Device endpoint for the configured station.
pub fn request_url(config: &Configuration) -> String {
    format!("{BASE_URL}/{}", config.device_id())
}

pub fn request_query(config: &Configuration) -> [(&str, &str); 3] {
    [
        ("apiKey", config.api_key()),
        ("applicationKey", config.application_key()),
        ("limit", SAMPLE_LIMIT),
    ]
}

/// Fetch the latest sample for the configured device and normalize it.
pub fn fetch_latest<T: Transport + ?Sized>(
    transport: &T,
    config: &Configuration,
) -> Result<Vec<Observation>, FetchError> {
    let url = request_url(config);
    info!("Getting data from {url}");

    let parsed = match transport.get(&url, &request_query(config))? {
        Some(body) => parse_samples(&body),
        None => Err(FetchError::NoData),
    };

    let samples = match parsed {
        Err(FetchError::NoData) => {
            error!("Error: {}", FetchError::NoData);
            return Err(FetchError::NoData);
        }
        other => other?,
    };

    observations_from_samples(&samples)
}

/// Parse a response body as an array of samples.
///
/// An empty body or a JSON `null` is reported as [`FetchError::NoData`].
pub fn parse_samples(body: &str) -> Result<Vec<RawSample>, FetchError> {
    if body.trim().is_empty() {
        return Err(FetchError::NoData);
    }

    let value: Value = serde_json::from_str(body)
        .map_err(|e| FetchError::MalformedResponse(format!("invalid JSON: {e}")))?;

    match value {
        Value::Null => Err(FetchError::NoData),
        Value::Array(_) => serde_json::from_value(value)
            .map_err(|e| FetchError::MalformedResponse(format!("unexpected sample shape: {e}"))),
        other => Err(FetchError::MalformedResponse(format!(
            "expected an array of samples, got {}",
            json_type_name(&other)
        ))),
    }
}

pub fn observations_from_samples(samples: &[RawSample]) -> Result<Vec<Observation>, FetchError> {
    let mut out = Vec::with_capacity(samples.len() * ObservationKind::ALL.len());
    for sample in samples {
        out.extend(observations_from_sample(sample)?);
    }
    Ok(out)
}

/// Map one sample to observations, one per recognized field present.
pub fn observations_from_sample(sample: &RawSample) -> Result<Vec<Observation>, FetchError> {
    let timestamp_seconds = sample.timestamp_seconds();
    let mut out = Vec::new();
    for kind in ObservationKind::ALL {
        if let Some(raw) = reading(sample, kind.field())? {
            out.push(Observation {
                kind,
                timestamp_seconds,
                value: kind.normalize(raw),
            });
        }
    }
    Ok(out)
}

fn reading(sample: &RawSample, field: &str) -> Result<Option<f64>, FetchError> {
    let value = match sample.get(field) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match value {
        Some(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(FetchError::MalformedResponse(format!(
            "field '{field}' is not a number"
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
