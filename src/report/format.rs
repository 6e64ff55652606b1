//! Terminal and JSON rendering of observations.
//!
//! Formatting lives here so the fetch path stays free of presentation
//! concerns and output changes are localized.

use serde::Serialize;

use crate::domain::{Observation, ObservationKind};
use crate::error::AppError;

/// Render observations as a fixed-width table.
pub fn format_observations(observations: &[Observation]) -> String {
    if observations.is_empty() {
        return "No observations.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{:<27}{:<19}{:>10}  {}\n",
        "Time (UTC)", "Kind", "Value", "Unit"
    ));
    for obs in observations {
        out.push_str(&format!(
            "{:<27}{:<19}{:>10.2}  {}\n",
            format_time(obs),
            obs.kind.display_name(),
            obs.value,
            obs.kind.unit()
        ));
    }
    out
}

#[derive(Debug, Serialize)]
struct ObservationRecord {
    kind: ObservationKind,
    timestamp: i64,
    time: Option<String>,
    value: f64,
    unit: &'static str,
}

/// Render observations as a pretty-printed JSON array.
pub fn observations_json(observations: &[Observation]) -> Result<String, AppError> {
    let records: Vec<ObservationRecord> = observations
        .iter()
        .map(|obs| ObservationRecord {
            kind: obs.kind,
            timestamp: obs.timestamp_seconds,
            time: obs.time().map(|t| t.to_rfc3339()),
            value: obs.value,
            unit: obs.kind.unit(),
        })
        .collect();

    serde_json::to_string_pretty(&records)
        .map_err(|e| AppError::new(4, format!("Failed to encode observations as JSON: {e}")))
}

fn format_time(obs: &Observation) -> String {
    match obs.time() {
        Some(t) => t.to_rfc3339(),
        None => obs.timestamp_seconds.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Observation> {
        vec![
            Observation {
                kind: ObservationKind::Temperature,
                timestamp_seconds: 1_553_400_000,
                value: 37.0,
            },
            Observation {
                kind: ObservationKind::Pressure,
                timestamp_seconds: 1_553_400_000,
                value: 101.5917,
            },
        ]
    }

    #[test]
    fn empty_table() {
        assert_eq!(format_observations(&[]), "No observations.\n");
    }

    #[test]
    fn table_has_header_and_one_row_per_observation() {
        let table = format_observations(&sample());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Time (UTC)"));
        assert!(lines[1].starts_with("2019-03-24T04:00:00+00:00"));
        assert!(lines[1].contains("Temperature"));
        assert!(lines[1].trim_end().ends_with("37.00  °C"));
        assert!(lines[2].trim_end().ends_with("101.59  kPa"));
    }

    #[test]
    fn json_records_carry_kind_time_and_unit() {
        let json = observations_json(&sample()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        let first = &parsed[0];
        assert_eq!(first["kind"], "temperature");
        assert_eq!(first["timestamp"], 1_553_400_000);
        assert_eq!(first["time"], "2019-03-24T04:00:00+00:00");
        assert_eq!(first["unit"], "°C");
        assert_eq!(parsed[1]["kind"], "pressure");
    }
}
