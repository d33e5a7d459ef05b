/// flood_visualizer: river discharge & rainfall chart with flood risk alert.
///
/// # Module structure
///
/// ```text
/// flood_visualizer
/// ├── model       - shared data types (DailyRecord, RawRecord, FloodError)
/// ├── config      - flood_chart.toml loader with .env / environment overrides
/// ├── logging     - env_logger setup (console or log file)
/// ├── ingest
/// │   ├── records - JSON record parsing + batch validation + ordering policy
/// │   ├── sample  - built-in one-week sample dataset
/// │   └── fixtures (test only) - JSON record payloads
/// ├── analysis
/// │   └── risk    - predicted discharge vs. danger level evaluation
/// ├── chart
/// │   ├── spec    - declarative dual-axis chart description
/// │   └── render  - ChartRenderer trait + plotters backend
/// ├── alert       - fixed console alert line
/// └── visualizer  - FloodVisualizer: validate → evaluate → build → alert/render
/// ```

/// Public modules
pub mod alert;
pub mod analysis;
pub mod chart;
pub mod config;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod visualizer;

pub use visualizer::{FloodVisualizer, VisualizationOutcome};
