/// Flood risk analysis over validated daily records.
///
/// Submodules:
/// - `risk` - the predicted-discharge vs. danger-level rule, plus margins
///   and at-risk days used for log detail.

pub mod risk;
