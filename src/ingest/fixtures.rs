/// Test fixtures: record files in the JSON input format accepted by
/// `ingest::records::parse_records_json`.
///
/// Record object shape:
///   date               - ISO 8601 calendar date as a STRING ("2024-01-04")
///   discharge          - measured flow, m³/s
///   rainfall           - daily precipitation, mm
///   predictedDischarge - forecast flow, m³/s
///   dangerLevel        - hazardous flow threshold, m³/s
///
/// Values are plain JSON numbers; integers and decimals are both accepted.

/// The seven-day January 2024 week. On 2024-01-04 the predicted discharge
/// (45000) reaches the danger level (45000) exactly.
#[cfg(test)]
pub(crate) fn fixture_week_json() -> &'static str {
    r#"[
      { "date": "2024-01-01", "discharge": 35000, "rainfall": 45, "predictedDischarge": 36000, "dangerLevel": 45000 },
      { "date": "2024-01-02", "discharge": 37000, "rainfall": 65, "predictedDischarge": 39000, "dangerLevel": 45000 },
      { "date": "2024-01-03", "discharge": 42000, "rainfall": 85, "predictedDischarge": 44000, "dangerLevel": 45000 },
      { "date": "2024-01-04", "discharge": 43000, "rainfall": 75, "predictedDischarge": 45000, "dangerLevel": 45000 },
      { "date": "2024-01-05", "discharge": 41000, "rainfall": 55, "predictedDischarge": 42000, "dangerLevel": 45000 },
      { "date": "2024-01-06", "discharge": 38000, "rainfall": 35, "predictedDischarge": 39000, "dangerLevel": 45000 },
      { "date": "2024-01-07", "discharge": 36000, "rainfall": 25, "predictedDischarge": 37000, "dangerLevel": 45000 }
    ]"#
}

/// A calm week: predicted discharge stays well under the danger level.
#[cfg(test)]
pub(crate) fn fixture_safe_week_json() -> &'static str {
    r#"[
      { "date": "2024-03-01", "discharge": 12000.5, "rainfall": 2.5, "predictedDischarge": 12500, "dangerLevel": 45000 },
      { "date": "2024-03-02", "discharge": 11800, "rainfall": 0, "predictedDischarge": 12100, "dangerLevel": 45000 },
      { "date": "2024-03-03", "discharge": 11650, "rainfall": 0, "predictedDischarge": 11900, "dangerLevel": 45000 }
    ]"#
}

/// Second record has no rainfall key.
#[cfg(test)]
pub(crate) fn fixture_missing_rainfall_json() -> &'static str {
    r#"[
      { "date": "2024-01-01", "discharge": 35000, "rainfall": 45, "predictedDischarge": 36000, "dangerLevel": 45000 },
      { "date": "2024-01-02", "discharge": 37000, "predictedDischarge": 39000, "dangerLevel": 45000 }
    ]"#
}
