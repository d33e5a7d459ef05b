/// Core data types for the flood visualizer.
///
/// This module defines the shared domain model imported by all other modules:
/// the validated `DailyRecord`, its loosely typed input form `RawRecord`,
/// and the `FloodError` type returned by every fallible operation.
/// It contains no I/O.

use chrono::NaiveDate;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

/// Input key for the record date (ISO `YYYY-MM-DD`).
pub const FIELD_DATE: &str = "date";

/// Input key for measured discharge, in m³/s.
pub const FIELD_DISCHARGE: &str = "discharge";

/// Input key for rainfall, in mm.
pub const FIELD_RAINFALL: &str = "rainfall";

/// Input key for forecast discharge, in m³/s.
pub const FIELD_PREDICTED_DISCHARGE: &str = "predictedDischarge";

/// Input key for the danger threshold, in m³/s.
pub const FIELD_DANGER_LEVEL: &str = "dangerLevel";

/// Date format used for parsing and for chart labels.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Record types
// ---------------------------------------------------------------------------

/// One day of river observations, forecast and threshold.
///
/// Constructed only through validation (`ingest::records::validate_record`),
/// so every instance satisfies:
///   discharge, rainfall, predicted_discharge >= 0
///   danger_level > 0
/// and all values are finite.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub discharge: f64,           // m³/s
    pub rainfall: f64,            // mm
    pub predicted_discharge: f64, // m³/s
    pub danger_level: f64,        // m³/s
}

/// A record as it arrives from a caller or a JSON file, before validation.
///
/// Every field is optional and accepts any JSON value, so that a missing or
/// mistyped field is reported as a `ValidationError`
/// naming the field instead of an opaque deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    pub date: Option<serde_json::Value>,
    pub discharge: Option<serde_json::Value>,
    pub rainfall: Option<serde_json::Value>,
    pub predicted_discharge: Option<serde_json::Value>,
    pub danger_level: Option<serde_json::Value>,
}

impl RawRecord {
    /// Builds a fully populated raw record from plain values.
    pub fn new(
        date: &str,
        discharge: f64,
        rainfall: f64,
        predicted_discharge: f64,
        danger_level: f64,
    ) -> Self {
        RawRecord {
            date: Some(serde_json::Value::from(date)),
            discharge: Some(serde_json::Value::from(discharge)),
            rainfall: Some(serde_json::Value::from(rainfall)),
            predicted_discharge: Some(serde_json::Value::from(predicted_discharge)),
            danger_level: Some(serde_json::Value::from(danger_level)),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise while validating, charting or rendering records.
///
/// Any input error aborts the whole visualization call; there is no partial
/// rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum FloodError {
    /// A date string could not be parsed as `YYYY-MM-DD`.
    ParseError {
        index: usize,
        value: String,
        reason: String,
    },
    /// A required field is missing, non-numeric or out of range, or the
    /// record order violates the strict ordering policy.
    ValidationError {
        index: usize,
        field: String,
        reason: String,
    },
    /// The record file itself could not be read or decoded.
    InputError(String),
    /// The plotting backend failed to draw or write the chart.
    RenderError(String),
    /// The alert or chart spec could not be written out.
    OutputError(String),
}

impl std::fmt::Display for FloodError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FloodError::ParseError { index, value, reason } => {
                write!(f, "Parse error in record {}: invalid date '{}': {}", index, value, reason)
            }
            FloodError::ValidationError { index, field, reason } => {
                write!(f, "Validation error in record {} field '{}': {}", index, field, reason)
            }
            FloodError::InputError(msg) => write!(f, "Input error: {}", msg),
            FloodError::RenderError(msg) => write!(f, "Render error: {}", msg),
            FloodError::OutputError(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for FloodError {}

impl FloodError {
    pub(crate) fn validation(index: usize, field: &str, reason: impl Into<String>) -> Self {
        FloodError::ValidationError {
            index,
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
