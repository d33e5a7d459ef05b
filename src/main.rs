//! Flood Visualizer
//!
//! Plots current discharge, predicted discharge, danger level (left axis)
//! and rainfall bars (right axis) for a run of daily records, and prints a
//! flood risk alert when any day's predicted discharge reaches its danger
//! level.
//!
//! Usage:
//!   cargo run --release                                 # built-in sample week → flood_chart.svg
//!   cargo run --release -- --data week.json -o week.png
//!   cargo run --release -- --emit-spec chart.json --no-render
//!
//! Environment:
//!   FLOOD_CHART_CONFIG - config file path (default flood_chart.toml)
//!   FLOOD_CHART_OUTPUT - chart output path
//!   RUST_LOG           - log filter, overrides [logging] level

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{debug, info};

use flood_visualizer::chart::render::{ChartRenderer, PlottersRenderer};
use flood_visualizer::config::load_config;
use flood_visualizer::ingest::records::{load_records_file, OrderingPolicy};
use flood_visualizer::ingest::sample::sample_records;
use flood_visualizer::logging;
use flood_visualizer::FloodVisualizer;

#[derive(Parser, Debug)]
#[command(
    name = "flood_visualizer",
    version,
    about = "River discharge & rainfall chart with flood risk alert"
)]
struct Cli {
    /// JSON file of daily records (default: built-in January 2024 sample week)
    #[arg(long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Configuration file (default: $FLOOD_CHART_CONFIG or flood_chart.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Chart output file, .svg or .png
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Also write the chart description as JSON
    #[arg(long, value_name = "FILE")]
    emit_spec: Option<PathBuf>,

    /// Evaluate and alert without drawing the chart
    #[arg(long)]
    no_render: bool,

    /// Reject records that are not in ascending date order
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    run(cli, &mut stdout.lock())
}

/// Loads config and records, writes the alert to `out`, then the optional
/// chart spec, then the chart. A render failure leaves the spec in place.
fn run<W: Write>(cli: Cli, out: &mut W) -> anyhow::Result<()> {
    let mut config = load_config(cli.config.as_deref()).context("loading configuration")?;
    if let Some(output) = cli.output {
        config.chart.output = output;
    }
    if cli.strict {
        config.records.ordering = OrderingPolicy::Strict;
    }

    let level = config.logging.level_filter()?;
    logging::init_logger(level, config.logging.file.as_deref()).context("opening log file")?;
    debug!(
        "Configuration: output {} ({}x{}), {:?} ordering",
        config.chart.output.display(),
        config.chart.width,
        config.chart.height,
        config.records.ordering
    );

    let raw = match &cli.data {
        Some(path) => load_records_file(path)?,
        None => {
            info!("No --data file given; using the built-in sample week");
            sample_records()
        }
    };

    let visualizer = FloodVisualizer::new(PlottersRenderer::from_config(&config.chart))
        .with_ordering(config.records.ordering);

    let outcome = visualizer.analyze(&raw, out)?;

    if let Some(path) = &cli.emit_spec {
        let json = outcome.chart.to_json()?;
        fs::write(path, json).with_context(|| format!("writing chart spec to {}", path.display()))?;
        info!("Chart spec written to {}", path.display());
    }

    if !cli.no_render {
        visualizer.renderer().render(&outcome.chart)?;
    }

    Ok(())
}
