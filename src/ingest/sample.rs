/// Built-in sample dataset: one week of January 2024.
///
/// Used by the binary when no `--data` file is given. The 2024-01-04 record
/// has predicted discharge equal to the danger level, so the sample always
/// raises the flood risk alert.

use crate::model::RawRecord;

/// (date, discharge m³/s, rainfall mm, predicted discharge m³/s, danger level m³/s)
pub const SAMPLE_WEEK: [(&str, f64, f64, f64, f64); 7] = [
    ("2024-01-01", 35_000.0, 45.0, 36_000.0, 45_000.0),
    ("2024-01-02", 37_000.0, 65.0, 39_000.0, 45_000.0),
    ("2024-01-03", 42_000.0, 85.0, 44_000.0, 45_000.0),
    ("2024-01-04", 43_000.0, 75.0, 45_000.0, 45_000.0),
    ("2024-01-05", 41_000.0, 55.0, 42_000.0, 45_000.0),
    ("2024-01-06", 38_000.0, 35.0, 39_000.0, 45_000.0),
    ("2024-01-07", 36_000.0, 25.0, 37_000.0, 45_000.0),
];

/// The sample week as raw records, ready for validation.
pub fn sample_records() -> Vec<RawRecord> {
    SAMPLE_WEEK
        .iter()
        .map(|&(date, discharge, rainfall, predicted, danger)| {
            RawRecord::new(date, discharge, rainfall, predicted, danger)
        })
        .collect()
}
