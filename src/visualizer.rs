/// End-to-end flood visualization pipeline.
///
/// `FloodVisualizer` runs one stateless pass over a batch of records:
///
/// 1. Validate the whole batch (any bad record aborts before anything else)
/// 2. Evaluate flood risk
/// 3. Build the chart description
/// 4. Write the console alert if at risk
/// 5. Hand the chart to the renderer, exactly once
///
/// Steps 4 and 5 are independent consumers of the same evaluation. Nothing
/// is retained between calls.

use std::io::Write;

use log::{debug, info};

use crate::alert::report_risk;
use crate::analysis::risk::{evaluate_risk, max_risk_margin};
use crate::chart::render::ChartRenderer;
use crate::chart::spec::{chart_from_records, ChartSpec};
use crate::ingest::records::{validate_records, OrderingPolicy};
use crate::model::{DailyRecord, FloodError, RawRecord};

/// Result of one visualization pass.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualizationOutcome {
    pub record_count: usize,
    pub flood_risk: bool,
    /// Largest predicted-minus-danger difference; `None` for an empty batch.
    pub max_margin: Option<f64>,
    pub chart: ChartSpec,
}

pub struct FloodVisualizer<R: ChartRenderer> {
    ordering: OrderingPolicy,
    renderer: R,
}

impl<R: ChartRenderer> FloodVisualizer<R> {
    /// Create a visualizer that sorts out-of-order input.
    pub fn new(renderer: R) -> Self {
        Self {
            ordering: OrderingPolicy::default(),
            renderer,
        }
    }

    pub fn with_ordering(mut self, ordering: OrderingPolicy) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn ordering(&self) -> OrderingPolicy {
        self.ordering
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn validate(&self, raw: &[RawRecord]) -> Result<Vec<DailyRecord>, FloodError> {
        validate_records(raw, self.ordering)
    }

    pub fn evaluate_risk(&self, records: &[DailyRecord]) -> bool {
        evaluate_risk(records)
    }

    pub fn build_chart(&self, raw: &[RawRecord]) -> Result<ChartSpec, FloodError> {
        Ok(chart_from_records(&self.validate(raw)?))
    }

    pub fn report_risk<W: Write>(&self, records: &[DailyRecord], out: &mut W) -> Result<bool, FloodError> {
        report_risk(records, out).map_err(|e| FloodError::OutputError(format!("failed to write alert: {}", e)))
    }

    /// Everything except rendering: validate, evaluate, build, report.
    pub fn analyze<W: Write>(&self, raw: &[RawRecord], out: &mut W) -> Result<VisualizationOutcome, FloodError> {
        let records = self.validate(raw)?;
        debug!("Validated {} records ({:?} ordering)", records.len(), self.ordering);

        let flood_risk = self.evaluate_risk(&records);
        let max_margin = max_risk_margin(&records);
        let chart = chart_from_records(&records);

        match max_margin {
            Some(margin) => info!(
                "{} records, flood risk: {}, max predicted-minus-danger margin: {:.1} m³/s",
                records.len(),
                flood_risk,
                margin
            ),
            None => info!("No records supplied; chart will be empty"),
        }

        self.report_risk(&records, out)?;

        Ok(VisualizationOutcome {
            record_count: records.len(),
            flood_risk,
            max_margin,
            chart,
        })
    }

    /// Full pass: `analyze`, then one render call.
    pub fn visualize<W: Write>(&self, raw: &[RawRecord], out: &mut W) -> Result<VisualizationOutcome, FloodError> {
        let outcome = self.analyze(raw, out)?;
        self.renderer.render(&outcome.chart)?;
        Ok(outcome)
    }
}
