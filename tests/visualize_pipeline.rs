/// Integration tests for the visualization pipeline
///
/// These tests drive the public API the way the binary does:
/// 1. JSON record file → parse → validate
/// 2. Risk evaluation and the console alert
/// 3. Chart description handed to a renderer exactly once
/// 4. Chart description written out as JSON
///
/// No display or fonts are needed; drawing goes through a recording renderer.
///
/// Run with: cargo test --test visualize_pipeline

use flood_visualizer::alert::FLOOD_RISK_MESSAGE;
use flood_visualizer::chart::render::ChartRenderer;
use flood_visualizer::chart::spec::{
    build_chart, AxisSide, ChartSpec, SeriesKind, CHART_TITLE, DISCHARGE_AXIS_LABEL, RAINFALL_AXIS_LABEL,
};
use flood_visualizer::ingest::records::{load_records_file, parse_records_json, OrderingPolicy};
use flood_visualizer::ingest::sample::sample_records;
use flood_visualizer::model::FloodError;
use flood_visualizer::FloodVisualizer;

use chrono::NaiveDate;
use std::cell::RefCell;
use std::env;
use std::fs;

const RISKY_WEEK: &str = r#"[
  {"date": "2024-01-01", "discharge": 35000, "rainfall": 45, "predictedDischarge": 37000, "dangerLevel": 45000},
  {"date": "2024-01-02", "discharge": 38000, "rainfall": 60, "predictedDischarge": 40000, "dangerLevel": 45000},
  {"date": "2024-01-03", "discharge": 41000, "rainfall": 80, "predictedDischarge": 43000, "dangerLevel": 45000},
  {"date": "2024-01-04", "discharge": 43000, "rainfall": 75, "predictedDischarge": 45000, "dangerLevel": 45000},
  {"date": "2024-01-05", "discharge": 42000, "rainfall": 50, "predictedDischarge": 44000, "dangerLevel": 45000}
]"#;

const SAFE_WEEK: &str = r#"[
  {"date": "2024-03-01", "discharge": 12000, "rainfall": 4.5, "predictedDischarge": 12500, "dangerLevel": 30000},
  {"date": "2024-03-02", "discharge": 12400, "rainfall": 0, "predictedDischarge": 12800, "dangerLevel": 30000},
  {"date": "2024-03-03", "discharge": 13100, "rainfall": 11.2, "predictedDischarge": 29999, "dangerLevel": 30000}
]"#;

#[derive(Default)]
struct RecordingRenderer {
    rendered: RefCell<Vec<ChartSpec>>,
}

impl ChartRenderer for RecordingRenderer {
    fn render(&self, spec: &ChartSpec) -> Result<(), FloodError> {
        self.rendered.borrow_mut().push(spec.clone());
        Ok(())
    }
}

fn temp_path(name: &str) -> std::path::PathBuf {
    env::temp_dir().join(format!("flood_visualizer_{}_{}", std::process::id(), name))
}

#[test]
fn test_risky_file_alerts_and_renders_once() {
    let path = temp_path("risky_week.json");
    fs::write(&path, RISKY_WEEK).unwrap();
    let raw = load_records_file(&path).expect("record file should load");
    fs::remove_file(&path).ok();

    let visualizer = FloodVisualizer::new(RecordingRenderer::default());
    let mut out = Vec::new();
    let outcome = visualizer.visualize(&raw, &mut out).expect("valid week should visualize");

    assert!(outcome.flood_risk);
    assert_eq!(outcome.record_count, 5);
    assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", FLOOD_RISK_MESSAGE));
    assert_eq!(visualizer.renderer().rendered.borrow().len(), 1);
}

#[test]
fn test_safe_file_is_silent() {
    let raw = parse_records_json(SAFE_WEEK).unwrap();
    let visualizer = FloodVisualizer::new(RecordingRenderer::default());
    let mut out = Vec::new();

    let outcome = visualizer.visualize(&raw, &mut out).unwrap();

    assert!(!outcome.flood_risk, "29999 < 30000 is not a flood risk");
    assert!(out.is_empty());
    assert_eq!(visualizer.renderer().rendered.borrow().len(), 1, "safe data is still charted");
}

#[test]
fn test_chart_layout_for_sample_week() {
    let chart = build_chart(&sample_records(), OrderingPolicy::Sort).unwrap();

    assert_eq!(chart.title, CHART_TITLE);
    assert_eq!(chart.series.len(), 4);
    assert_eq!(chart.value_axes.len(), 2);
    assert_eq!(chart.axis(AxisSide::Primary).unwrap().label, DISCHARGE_AXIS_LABEL);
    assert_eq!(chart.axis(AxisSide::Secondary).unwrap().label, RAINFALL_AXIS_LABEL);

    let secondary: Vec<_> = chart.series_on(AxisSide::Secondary).collect();
    assert_eq!(secondary.len(), 1);
    assert_eq!(secondary[0].kind, SeriesKind::Bar);

    assert_eq!(chart.legend.entries.len(), 4, "one combined legend for both axes");
    assert_eq!(chart.x_axis.start, NaiveDate::from_ymd_opt(2024, 1, 1));
    assert_eq!(chart.x_axis.end, NaiveDate::from_ymd_opt(2024, 1, 7));
}

#[test]
fn test_bad_date_in_file_aborts_without_output() {
    let json = RISKY_WEEK.replace("2024-01-03", "2024-13-40");
    let raw = parse_records_json(&json).unwrap();
    let visualizer = FloodVisualizer::new(RecordingRenderer::default());
    let mut out = Vec::new();

    let err = visualizer.visualize(&raw, &mut out).unwrap_err();

    assert!(matches!(err, FloodError::ParseError { index: 2, .. }), "got {:?}", err);
    assert!(out.is_empty());
    assert!(visualizer.renderer().rendered.borrow().is_empty());
}

#[test]
fn test_non_numeric_field_is_a_validation_error() {
    let json = RISKY_WEEK.replacen("\"rainfall\": 60", "\"rainfall\": \"heavy\"", 1);
    let raw = parse_records_json(&json).unwrap();

    let err = build_chart(&raw, OrderingPolicy::Sort).unwrap_err();

    match err {
        FloodError::ValidationError { index, field, .. } => {
            assert_eq!(index, 1);
            assert_eq!(field, "rainfall");
        }
        other => panic!("expected ValidationError, got {:?}", other),
    }
}

#[test]
fn test_malformed_file_is_an_input_error() {
    let err = parse_records_json("[{\"date\": \"2024-01-01\",").unwrap_err();
    assert!(matches!(err, FloodError::InputError(_)), "got {:?}", err);

    let err = load_records_file(&temp_path("does_not_exist.json")).unwrap_err();
    assert!(matches!(err, FloodError::InputError(_)), "got {:?}", err);
}

#[test]
fn test_chart_spec_json_round_trips_through_file() {
    let chart = build_chart(&sample_records(), OrderingPolicy::Sort).unwrap();
    let path = temp_path("chart.json");

    fs::write(&path, chart.to_json().unwrap()).unwrap();
    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(written["title"], CHART_TITLE);
    assert_eq!(written["series"].as_array().map(|s| s.len()), Some(4));
    assert_eq!(written["value_axes"][1]["label"], RAINFALL_AXIS_LABEL);
}
