/// River discharge & rainfall chart.
///
/// Submodules:
/// - `spec`   - backend-neutral chart description and `build_chart`.
/// - `render` - `ChartRenderer` trait and the plotters SVG/PNG backend.

pub mod render;
pub mod spec;
