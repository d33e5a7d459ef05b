/// Daily record parsing and validation.
///
/// Converts loosely typed `RawRecord`s into validated `DailyRecord`s.
/// Input arrives either in-process (the built-in sample, library callers) or
/// as a JSON array of record objects:
///
/// ```json
/// [
///   { "date": "2024-01-01", "discharge": 35000, "rainfall": 45,
///     "predictedDischarge": 36000, "dangerLevel": 45000 }
/// ]
/// ```
///
/// Validation is all-or-nothing: the first bad record aborts the batch and
/// its error names the record index and field.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use log::{debug, warn};
use serde::Deserialize;

use crate::model::{
    DailyRecord, FloodError, RawRecord, DATE_FORMAT, FIELD_DANGER_LEVEL, FIELD_DATE,
    FIELD_DISCHARGE, FIELD_PREDICTED_DISCHARGE, FIELD_RAINFALL,
};

// ---------------------------------------------------------------------------
// Ordering policy
// ---------------------------------------------------------------------------

/// How a batch whose dates are not ascending is handled.
///
/// Duplicate dates are accepted under both policies and only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderingPolicy {
    /// Stable-sort the validated records by date.
    #[default]
    Sort,
    /// Reject the batch at the first record dated before its predecessor.
    Strict,
}

// ---------------------------------------------------------------------------
// JSON input
// ---------------------------------------------------------------------------

/// Parses a JSON array of record objects into raw records.
///
/// Only the JSON shape is checked here; field contents are checked by
/// `validate_records`.
pub fn parse_records_json(json: &str) -> Result<Vec<RawRecord>, FloodError> {
    serde_json::from_str::<Vec<RawRecord>>(json)
        .map_err(|e| FloodError::InputError(format!("invalid record JSON: {}", e)))
}

/// Reads and parses a JSON record file.
pub fn load_records_file(path: &Path) -> Result<Vec<RawRecord>, FloodError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| FloodError::InputError(format!("failed to read {}: {}", path.display(), e)))?;
    let records = parse_records_json(&contents)?;
    debug!("Loaded {} raw records from {}", records.len(), path.display());
    Ok(records)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validates a single raw record at position `index` of its batch.
pub fn validate_record(index: usize, raw: &RawRecord) -> Result<DailyRecord, FloodError> {
    let date_value = match raw.date.as_ref() {
        None | Some(serde_json::Value::Null) => {
            return Err(FloodError::validation(index, FIELD_DATE, "missing"));
        }
        Some(v) => v,
    };
    let date_str = date_value.as_str().ok_or_else(|| {
        FloodError::validation(index, FIELD_DATE, format!("not a string: {}", date_value))
    })?;

    if !is_iso_date_shape(date_str) {
        return Err(FloodError::ParseError {
            index,
            value: date_str.to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        });
    }

    let date = NaiveDate::parse_from_str(date_str, DATE_FORMAT).map_err(|e| {
        FloodError::ParseError {
            index,
            value: date_str.to_string(),
            reason: e.to_string(),
        }
    })?;

    let discharge = non_negative(index, FIELD_DISCHARGE, raw.discharge.as_ref())?;
    let rainfall = non_negative(index, FIELD_RAINFALL, raw.rainfall.as_ref())?;
    let predicted_discharge =
        non_negative(index, FIELD_PREDICTED_DISCHARGE, raw.predicted_discharge.as_ref())?;

    let danger_level = number(index, FIELD_DANGER_LEVEL, raw.danger_level.as_ref())?;
    if danger_level <= 0.0 {
        return Err(FloodError::validation(
            index,
            FIELD_DANGER_LEVEL,
            format!("must be positive, got {}", danger_level),
        ));
    }

    Ok(DailyRecord {
        date,
        discharge,
        rainfall,
        predicted_discharge,
        danger_level,
    })
}

/// Validates a whole batch and applies the ordering policy.
///
/// Returns the records in ascending date order. An empty batch is valid.
pub fn validate_records(
    raw: &[RawRecord],
    policy: OrderingPolicy,
) -> Result<Vec<DailyRecord>, FloodError> {
    let mut records = raw
        .iter()
        .enumerate()
        .map(|(index, r)| validate_record(index, r))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(index) = first_out_of_order(&records) {
        match policy {
            OrderingPolicy::Strict => {
                return Err(FloodError::validation(
                    index,
                    FIELD_DATE,
                    format!(
                        "{} is earlier than the preceding record ({})",
                        records[index].date,
                        records[index - 1].date
                    ),
                ));
            }
            OrderingPolicy::Sort => {
                warn!(
                    "Records are not in ascending date order (first at index {}); sorting by date",
                    index
                );
                records.sort_by_key(|r| r.date);
            }
        }
    }

    let duplicates = duplicate_dates(&records);
    if !duplicates.is_empty() {
        let listed: Vec<String> = duplicates.iter().map(|d| d.to_string()).collect();
        warn!("Duplicate record dates: {}", listed.join(", "));
    }

    Ok(records)
}

/// Index of the first record dated strictly before its predecessor.
pub fn first_out_of_order(records: &[DailyRecord]) -> Option<usize> {
    records
        .windows(2)
        .position(|pair| pair[1].date < pair[0].date)
        .map(|i| i + 1)
}

/// Dates that occur more than once in an ascending batch, each listed once.
pub fn duplicate_dates(records: &[DailyRecord]) -> Vec<NaiveDate> {
    let mut duplicates: Vec<NaiveDate> = records
        .windows(2)
        .filter(|pair| pair[0].date == pair[1].date)
        .map(|pair| pair[0].date)
        .collect();
    duplicates.dedup();
    duplicates
}

/// Exactly four year digits, two month digits and two day digits.
/// chrono's `%Y` alone also takes signs, wider years and surrounding space.
fn is_iso_date_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, &b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn number(index: usize, field: &str, value: Option<&serde_json::Value>) -> Result<f64, FloodError> {
    let value = match value {
        None | Some(serde_json::Value::Null) => {
            return Err(FloodError::validation(index, field, "missing"));
        }
        Some(v) => v,
    };

    let n = value
        .as_f64()
        .ok_or_else(|| FloodError::validation(index, field, format!("not a number: {}", value)))?;

    if !n.is_finite() {
        return Err(FloodError::validation(index, field, "not a finite number"));
    }
    Ok(n)
}

fn non_negative(
    index: usize,
    field: &str,
    value: Option<&serde_json::Value>,
) -> Result<f64, FloodError> {
    let n = number(index, field, value)?;
    if n < 0.0 {
        return Err(FloodError::validation(
            index,
            field,
            format!("must not be negative, got {}", n),
        ));
    }
    Ok(n)
}
