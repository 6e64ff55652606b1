//! Imperial-to-metric conversions for station readings.

const MPS_PER_MPH: f64 = 0.447_04;
const MM_PER_INCH: f64 = 25.4;
const KPA_PER_INHG: f64 = 3.386_39;
/// Seconds per day divided by 1e6: a daily mean in W/m² expressed as MJ/m²/day.
const MJ_PER_WATT_DAY: f64 = 0.0864;

pub fn fahrenheit_to_celsius(value: f64) -> f64 {
    (value - 32.0) * (5.0 / 9.0)
}

pub fn mph_to_mps(value: f64) -> f64 {
    value * MPS_PER_MPH
}

pub fn inches_to_mm(value: f64) -> f64 {
    value * MM_PER_INCH
}

pub fn inhg_to_kpa(value: f64) -> f64 {
    value * KPA_PER_INHG
}

pub fn watts_to_megajoules(value: f64) -> f64 {
    value * MJ_PER_WATT_DAY
}
