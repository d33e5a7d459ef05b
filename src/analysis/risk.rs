/// Flood risk evaluation.
///
/// A batch is at risk when any single day's predicted discharge meets or
/// exceeds that day's danger level:
///
///   predicted_discharge >= danger_level  →  at risk
///
/// Equality counts as risk. The danger level is supplied per record; there
/// is no global threshold.

use chrono::NaiveDate;

use crate::model::DailyRecord;

/// Returns `true` if the record's predicted discharge reaches its danger level.
pub fn is_at_risk(record: &DailyRecord) -> bool {
    record.predicted_discharge >= record.danger_level
}

/// Returns `true` if any record is at risk. An empty batch is never at risk.
pub fn evaluate_risk(records: &[DailyRecord]) -> bool {
    records.iter().any(is_at_risk)
}

/// Largest `predicted_discharge - danger_level` across the batch.
///
/// Non-negative exactly when `evaluate_risk` is true; `None` when empty.
pub fn max_risk_margin(records: &[DailyRecord]) -> Option<f64> {
    records
        .iter()
        .map(|r| r.predicted_discharge - r.danger_level)
        .reduce(f64::max)
}

/// Dates of every at-risk record, in input order.
pub fn days_at_risk(records: &[DailyRecord]) -> Vec<NaiveDate> {
    records
        .iter()
        .filter(|r| is_at_risk(r))
        .map(|r| r.date)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
