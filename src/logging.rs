/// Structured logging for the flood visualizer
///
/// Routes the `log` facade through env_logger with one line per record:
///
///   2024-01-04 06:00:00 UTC WARN  flood_visualizer::visualizer: message
///
/// Output goes to stderr, or is appended to a log file when one is
/// configured. `RUST_LOG` overrides the configured level. The flood risk
/// alert line is not a log record and always goes to stdout.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use env_logger::{Builder, Target};
use log::{Level, LevelFilter};

/// Formats a single log line.
pub fn format_line(timestamp: DateTime<Utc>, level: Level, target: &str, message: &str) -> String {
    format!(
        "{} {:<5} {}: {}",
        timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        level,
        target,
        message
    )
}

fn builder(level: LevelFilter) -> Builder {
    let mut builder = Builder::new();
    builder.filter_level(level);
    builder.parse_env("RUST_LOG");
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{}",
            format_line(Utc::now(), record.level(), record.target(), &record.args().to_string())
        )
    });
    builder
}

/// Initialize the global logger.
///
/// Fails only if the log file cannot be opened. Calling this twice keeps the
/// first logger.
pub fn init_logger(level: LevelFilter, log_file: Option<&Path>) -> std::io::Result<()> {
    let mut builder = builder(level);

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    if builder.try_init().is_err() {
        log::debug!("Logger already initialised; keeping the existing one");
    }
    Ok(())
}
