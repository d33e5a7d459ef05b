/// Configuration loader - parses flood_chart.toml
///
/// Separates output and logging settings from code. Every key is optional;
/// a missing file means built-in defaults:
///
/// ```toml
/// [chart]
/// output = "flood_chart.svg"   # .svg or .png
/// width = 1200
/// height = 600
///
/// [records]
/// ordering = "sort"            # or "strict"
///
/// [logging]
/// level = "info"
/// file = "flood_chart.log"     # optional
/// ```
///
/// Environment overrides (a `.env` file is honoured):
///   FLOOD_CHART_CONFIG - config file path (default `flood_chart.toml`)
///   FLOOD_CHART_OUTPUT - chart output path

use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::LevelFilter;

use crate::ingest::records::OrderingPolicy;

pub const DEFAULT_CONFIG_PATH: &str = "flood_chart.toml";
pub const CONFIG_PATH_ENV: &str = "FLOOD_CHART_CONFIG";
pub const OUTPUT_PATH_ENV: &str = "FLOOD_CHART_OUTPUT";

/// Root configuration structure for TOML parsing
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub chart: ChartConfig,
    pub records: RecordsConfig,
    pub logging: LoggingConfig,
}

/// Chart output settings. The default 1200x600 matches a 12x6 inch figure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("flood_chart.svg"),
            width: 1200,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecordsConfig {
    pub ordering: OrderingPolicy,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                value: self.level.clone(),
            })
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Configuration loading error
#[derive(Debug)]
pub enum ConfigError {
    /// The file exists but could not be read
    Unreadable { path: PathBuf, source: std::io::Error },
    /// The file is not valid TOML or has unknown / mistyped keys
    Malformed { path: PathBuf, message: String },
    /// A key parsed but holds an unusable value
    InvalidValue { key: String, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Unreadable { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            ConfigError::Malformed { path, message } => {
                write!(f, "Failed to parse {}: {}", path.display(), message)
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value for {}: '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Unreadable { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Parses configuration from TOML text. `origin` is only used in errors.
pub fn parse_config(contents: &str, origin: &Path) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| ConfigError::Malformed {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })?;

    if config.chart.width == 0 || config.chart.height == 0 {
        return Err(ConfigError::InvalidValue {
            key: "chart.width/chart.height".to_string(),
            value: format!("{}x{}", config.chart.width, config.chart.height),
        });
    }
    config.logging.level_filter()?;

    Ok(config)
}

/// Loads configuration from `path`, falling back to defaults if the file
/// does not exist.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_config(&contents, path)
}

/// Loads configuration the way the binary does: `.env`, then the config
/// file named by `FLOOD_CHART_CONFIG` (or `explicit_path` if given), then
/// the `FLOOD_CHART_OUTPUT` override.
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let path = match explicit_path {
        Some(p) => p.to_path_buf(),
        None => env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH)),
    };

    let mut config = load_config_from(&path)?;

    if let Ok(output) = env::var(OUTPUT_PATH_ENV) {
        if !output.trim().is_empty() {
            config.chart.output = PathBuf::from(output);
        }
    }

    Ok(config)
}
