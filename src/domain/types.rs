//! Shared domain types.
//!
//! `RawSample` is the upstream record as the cloud API returns it; an
//! `Observation` is one normalized scalar derived from a single field of it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::units::{fahrenheit_to_celsius, inches_to_mm, inhg_to_kpa, mph_to_mps, watts_to_megajoules};

/// What an observation measures, in its normalized unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationKind {
    Temperature,
    RelativeHumidity,
    WindSpeed,
    SolarRadiation,
    Rain,
    Pressure,
    DewPoint,
}

impl ObservationKind {
    /// All kinds, in the order fields are checked on each sample.
    pub const ALL: [ObservationKind; 7] = [
        ObservationKind::Temperature,
        ObservationKind::RelativeHumidity,
        ObservationKind::WindSpeed,
        ObservationKind::SolarRadiation,
        ObservationKind::Rain,
        ObservationKind::Pressure,
        ObservationKind::DewPoint,
    ];

    /// Upstream field name carrying this reading.
    pub fn field(self) -> &'static str {
        match self {
            ObservationKind::Temperature => "tempf",
            ObservationKind::RelativeHumidity => "humidity",
            ObservationKind::WindSpeed => "windspeedmph",
            ObservationKind::SolarRadiation => "solarradiation",
            ObservationKind::Rain => "hourlyrainin",
            ObservationKind::Pressure => "baromrelin",
            ObservationKind::DewPoint => "dewPoint",
        }
    }

    /// Normalized unit label.
    pub fn unit(self) -> &'static str {
        match self {
            ObservationKind::Temperature | ObservationKind::DewPoint => "°C",
            ObservationKind::RelativeHumidity => "%",
            ObservationKind::WindSpeed => "m/s",
            ObservationKind::SolarRadiation => "MJ/m²",
            ObservationKind::Rain => "mm",
            ObservationKind::Pressure => "kPa",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ObservationKind::Temperature => "Temperature",
            ObservationKind::RelativeHumidity => "Relative humidity",
            ObservationKind::WindSpeed => "Wind speed",
            ObservationKind::SolarRadiation => "Solar radiation",
            ObservationKind::Rain => "Rain",
            ObservationKind::Pressure => "Pressure",
            ObservationKind::DewPoint => "Dew point",
        }
    }

    /// Convert an upstream (imperial) value into this kind's normalized unit.
    pub fn normalize(self, raw: f64) -> f64 {
        match self {
            ObservationKind::Temperature | ObservationKind::DewPoint => fahrenheit_to_celsius(raw),
            ObservationKind::RelativeHumidity => raw,
            ObservationKind::WindSpeed => mph_to_mps(raw),
            ObservationKind::SolarRadiation => watts_to_megajoules(raw),
            ObservationKind::Rain => inches_to_mm(raw),
            ObservationKind::Pressure => inhg_to_kpa(raw),
        }
    }
}

/// One normalized, timestamped measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub kind: ObservationKind,
    /// Unix seconds (UTC).
    pub timestamp_seconds: i64,
    pub value: f64,
}

impl Observation {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp_seconds, 0)
    }
}

/// One upstream record: `dateutc` in epoch milliseconds plus arbitrary fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawSample {
    pub dateutc: i64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RawSample {
    /// Sample time in whole seconds, floored.
    pub fn timestamp_seconds(&self) -> i64 {
        self.dateutc.div_euclid(1000)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}
