/// Flood risk console alert.
///
/// The alert is a single fixed line written to a caller-supplied writer
/// (stdout in the binary). It is emitted at most once per call, no matter
/// how many days are at risk; the at-risk dates go to the log instead.

use std::io::Write;

use log::warn;

use crate::analysis::risk::{days_at_risk, evaluate_risk};
use crate::model::DailyRecord;

/// The exact alert text.
pub const FLOOD_RISK_MESSAGE: &str =
    "Flood risk detected! River discharge is predicted to reach danger levels.";

/// Writes the alert line if any record is at risk.
///
/// Returns whether the alert fired. Nothing is written for a safe or empty
/// batch.
pub fn report_risk<W: Write>(records: &[DailyRecord], out: &mut W) -> std::io::Result<bool> {
    if !evaluate_risk(records) {
        return Ok(false);
    }

    let days: Vec<String> = days_at_risk(records).iter().map(|d| d.to_string()).collect();
    warn!("Predicted discharge reaches danger level on: {}", days.join(", "));

    writeln!(out, "{}", FLOOD_RISK_MESSAGE)?;
    out.flush()?;
    Ok(true)
}
