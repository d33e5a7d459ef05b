/// Declarative chart description for the river discharge & rainfall chart.
///
/// `build_chart` turns validated records into a `ChartSpec`: four series on
/// a shared date axis, split across two independent value axes, with one
/// combined legend. The spec is backend-neutral; `chart::render` draws it
/// with plotters, and it serializes to JSON for any other renderer.
///
/// Chart layout:
///
/// ```text
///   primary axis   "Discharge (m³/s)"   Current Discharge   solid  #2563eb
///                                       Predicted Discharge dashed #7c3aed
///                                       Danger Level        solid  #dc2626
///   secondary axis "Rainfall (mm)"      Rainfall (mm)       bars   #0891b2
/// ```

use chrono::NaiveDate;
use serde::Serialize;

use crate::ingest::records::{validate_records, OrderingPolicy};
use crate::model::{DailyRecord, FloodError, RawRecord};

// ---------------------------------------------------------------------------
// Fixed labels and palette
// ---------------------------------------------------------------------------

pub const CHART_TITLE: &str = "River Discharge & Rainfall";
pub const DATE_AXIS_LABEL: &str = "Date";
pub const DISCHARGE_AXIS_LABEL: &str = "Discharge (m³/s)";
pub const RAINFALL_AXIS_LABEL: &str = "Rainfall (mm)";

pub const DISCHARGE_LABEL: &str = "Current Discharge";
pub const PREDICTED_LABEL: &str = "Predicted Discharge";
pub const DANGER_LABEL: &str = "Danger Level";
pub const RAINFALL_LABEL: &str = "Rainfall (mm)";

pub const DISCHARGE_COLOR: &str = "#2563eb";
pub const PREDICTED_COLOR: &str = "#7c3aed";
pub const DANGER_COLOR: &str = "#dc2626";
pub const RAINFALL_COLOR: &str = "#0891b2";

/// Fraction of the data span added above and below the discharge axis.
const DISCHARGE_PADDING: f64 = 0.05;

/// Headroom above the tallest rainfall bar.
const RAINFALL_HEADROOM: f64 = 1.1;

// ---------------------------------------------------------------------------
// Spec types
// ---------------------------------------------------------------------------

/// Which value axis a series is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisSide {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Line,
    DashedLine,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendPosition {
    UpperLeft,
}

/// The shared x axis. `start`/`end` are `None` for an empty chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateAxis {
    pub label: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueAxis {
    pub side: AxisSide,
    pub label: String,
    pub color: String,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub kind: SeriesKind,
    pub axis: AxisSide,
    pub color: String,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub kind: SeriesKind,
    pub color: String,
}

/// One legend for both axes: primary entries first, then secondary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub position: LegendPosition,
    pub entries: Vec<LegendEntry>,
}

/// Complete, immutable description of the chart handed to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_axis: DateAxis,
    pub value_axes: Vec<ValueAxis>,
    pub series: Vec<Series>,
    pub legend: Legend,
}

impl ChartSpec {
    pub fn axis(&self, side: AxisSide) -> Option<&ValueAxis> {
        self.value_axes.iter().find(|a| a.side == side)
    }

    pub fn series_on(&self, side: AxisSide) -> impl Iterator<Item = &Series> {
        self.series.iter().filter(move |s| s.axis == side)
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    /// Pretty-printed JSON form of the spec.
    pub fn to_json(&self) -> Result<String, FloodError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| FloodError::OutputError(format!("failed to serialize chart spec: {}", e)))
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// Validates raw input, then builds the chart.
///
/// Fails with `ParseError` for an unparseable date and `ValidationError` for
/// a missing or non-numeric field; nothing is built for a bad batch.
pub fn build_chart(raw: &[RawRecord], policy: OrderingPolicy) -> Result<ChartSpec, FloodError> {
    let records = validate_records(raw, policy)?;
    Ok(chart_from_records(&records))
}

/// Builds the chart from records that are already validated and ordered.
pub fn chart_from_records(records: &[DailyRecord]) -> ChartSpec {
    let series = vec![
        build_series(DISCHARGE_LABEL, SeriesKind::Line, AxisSide::Primary, DISCHARGE_COLOR, records, |r| r.discharge),
        build_series(PREDICTED_LABEL, SeriesKind::DashedLine, AxisSide::Primary, PREDICTED_COLOR, records, |r| {
            r.predicted_discharge
        }),
        build_series(DANGER_LABEL, SeriesKind::Line, AxisSide::Primary, DANGER_COLOR, records, |r| r.danger_level),
        build_series(RAINFALL_LABEL, SeriesKind::Bar, AxisSide::Secondary, RAINFALL_COLOR, records, |r| r.rainfall),
    ];

    let (discharge_min, discharge_max) = discharge_range(records);
    let (rainfall_min, rainfall_max) = rainfall_range(records);

    let value_axes = vec![
        ValueAxis {
            side: AxisSide::Primary,
            label: DISCHARGE_AXIS_LABEL.to_string(),
            color: DISCHARGE_COLOR.to_string(),
            min: discharge_min,
            max: discharge_max,
        },
        ValueAxis {
            side: AxisSide::Secondary,
            label: RAINFALL_AXIS_LABEL.to_string(),
            color: RAINFALL_COLOR.to_string(),
            min: rainfall_min,
            max: rainfall_max,
        },
    ];

    // Primary series come first in `series`, so this order merges the
    // primary axis legend ahead of the secondary one.
    let legend = Legend {
        position: LegendPosition::UpperLeft,
        entries: series
            .iter()
            .map(|s| LegendEntry {
                label: s.label.clone(),
                kind: s.kind,
                color: s.color.clone(),
            })
            .collect(),
    };

    ChartSpec {
        title: CHART_TITLE.to_string(),
        x_axis: DateAxis {
            label: DATE_AXIS_LABEL.to_string(),
            start: records.iter().map(|r| r.date).min(),
            end: records.iter().map(|r| r.date).max(),
        },
        value_axes,
        series,
        legend,
    }
}

fn build_series(
    label: &str,
    kind: SeriesKind,
    axis: AxisSide,
    color: &str,
    records: &[DailyRecord],
    value: impl Fn(&DailyRecord) -> f64,
) -> Series {
    Series {
        label: label.to_string(),
        kind,
        axis,
        color: color.to_string(),
        points: records
            .iter()
            .map(|r| SeriesPoint { date: r.date, value: value(r) })
            .collect(),
    }
}

/// Span of all three discharge series, padded on both sides.
fn discharge_range(records: &[DailyRecord]) -> (f64, f64) {
    let values = records
        .iter()
        .flat_map(|r| [r.discharge, r.predicted_discharge, r.danger_level]);

    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    if min > max {
        return (0.0, 1.0);
    }

    let pad = if max - min > f64::EPSILON {
        (max - min) * DISCHARGE_PADDING
    } else {
        1.0
    };
    ((min - pad).max(0.0), max + pad)
}

/// Bars grow from zero, so the rainfall axis always starts at zero.
fn rainfall_range(records: &[DailyRecord]) -> (f64, f64) {
    let max = records.iter().map(|r| r.rainfall).fold(0.0_f64, f64::max);
    if max > 0.0 {
        (0.0, max * RAINFALL_HEADROOM)
    } else {
        (0.0, 1.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
