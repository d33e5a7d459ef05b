/// Chart rendering backends.
///
/// `ChartRenderer` is the seam between the pure chart description and the
/// outside world; `FloodVisualizer` calls it exactly once per run. The
/// production implementation, `PlottersRenderer`, draws a `ChartSpec` with
/// plotters onto a dual-coordinate chart and writes it to disk. The output
/// format follows the file extension (`.svg` or `.png`).

use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use log::{debug, info};
use plotters::coord::Shift;
use plotters::coord::types::RangedDateTime;
use plotters::prelude::*;

use crate::chart::spec::{AxisSide, ChartSpec, LegendPosition, SeriesKind};
use crate::config::ChartConfig;
use crate::model::{FloodError, DATE_FORMAT};

/// Half the width of a rainfall bar: bars cover 80% of a day.
const BAR_HALF_WIDTH_MINUTES: i64 = 576;

/// Anything that can present a finished chart description.
pub trait ChartRenderer {
    fn render(&self, spec: &ChartSpec) -> Result<(), FloodError>;
}

// ---------------------------------------------------------------------------
// Output format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    /// Picks the backend from the output file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, FloodError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("svg") => Ok(OutputFormat::Svg),
            Some("png") => Ok(OutputFormat::Png),
            _ => Err(FloodError::RenderError(format!(
                "unsupported chart output '{}': expected a .svg or .png file",
                path.display()
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Plotters renderer
// ---------------------------------------------------------------------------

/// Draws charts to an SVG or PNG file.
#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    output: PathBuf,
    width: u32,
    height: u32,
}

impl PlottersRenderer {
    pub fn new(output: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            output: output.into(),
            width,
            height,
        }
    }

    pub fn from_config(config: &ChartConfig) -> Self {
        Self::new(config.output.clone(), config.width, config.height)
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render(&self, spec: &ChartSpec) -> Result<(), FloodError> {
        let format = OutputFormat::from_path(&self.output)?;
        let size = (self.width, self.height);
        debug!(
            "Rendering {:?} chart {}x{} to {}",
            format,
            self.width,
            self.height,
            self.output.display()
        );

        let result = match format {
            OutputFormat::Svg => {
                let root = SVGBackend::new(&self.output, size).into_drawing_area();
                draw_chart(&root, spec)
            }
            OutputFormat::Png => {
                let root = BitMapBackend::new(&self.output, size).into_drawing_area();
                draw_chart(&root, spec)
            }
        };
        result.map_err(|e| FloodError::RenderError(format!("{}: {}", self.output.display(), e)))?;

        info!("Chart written to {}", self.output.display());
        Ok(())
    }
}

/// Renders a chart to an in-memory SVG document.
pub fn render_svg_string(spec: &ChartSpec, size: (u32, u32)) -> Result<String, FloodError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        draw_chart(&root, spec).map_err(|e| FloodError::RenderError(e.to_string()))?;
    }
    Ok(svg)
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

/// Draws one series with `$chart.$draw(..)` (primary or secondary axis)
/// and evaluates to its series annotation.
macro_rules! draw_kind {
    ($chart:ident . $draw:ident, $kind:expr, $points:ident, $color:expr) => {
        match $kind {
            SeriesKind::Line => $chart.$draw(LineSeries::new($points, $color.stroke_width(2)))?,
            SeriesKind::DashedLine => {
                $chart.$draw(DashedLineSeries::new($points, 8, 5, $color.stroke_width(2)))?
            }
            SeriesKind::Bar => {
                let half = Duration::minutes(BAR_HALF_WIDTH_MINUTES);
                let fill = $color.mix(0.75).filled();
                $chart.$draw(
                    $points
                        .into_iter()
                        .map(move |(x, y)| Rectangle::new([(x - half, 0.0), (x + half, y)], fill)),
                )?
            }
        }
    };
}

fn draw_chart<DB>(root: &DrawingArea<DB, Shift>, spec: &ChartSpec) -> Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let primary = spec
        .axis(AxisSide::Primary)
        .ok_or("chart spec has no primary value axis")?;
    let secondary = spec
        .axis(AxisSide::Secondary)
        .ok_or("chart spec has no secondary value axis")?;
    let primary_color = hex_color(&primary.color)?;
    let secondary_color = hex_color(&secondary.color)?;

    let (x_start, x_end) = x_range(spec.x_axis.start, spec.x_axis.end)?;

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(75)
        .right_y_label_area_size(60)
        .build_cartesian_2d(RangedDateTime::from(x_start..x_end), primary.min..primary.max)?
        .set_secondary_coord(RangedDateTime::from(x_start..x_end), secondary.min..secondary.max);

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(spec.x_axis.label.as_str())
        .y_desc(primary.label.as_str())
        .x_labels(10)
        .x_label_formatter(&|dt: &NaiveDateTime| dt.format(DATE_FORMAT).to_string())
        .y_label_formatter(&|v: &f64| format!("{:.0}", v))
        .y_label_style(("sans-serif", 12).into_font().color(&primary_color))
        .light_line_style(BLACK.mix(0.08))
        .draw()?;

    chart
        .configure_secondary_axes()
        .y_desc(secondary.label.as_str())
        .label_style(("sans-serif", 12).into_font().color(&secondary_color))
        .draw()?;

    for series in &spec.series {
        let color = hex_color(&series.color)?;
        let points: Vec<(NaiveDateTime, f64)> = series
            .points
            .iter()
            .map(|p| (midnight(p.date), p.value))
            .collect();

        let anno = match series.axis {
            AxisSide::Primary => draw_kind!(chart.draw_series, series.kind, points, color),
            AxisSide::Secondary => draw_kind!(chart.draw_secondary_series, series.kind, points, color),
        };
        anno.label(series.label.as_str());

        match series.kind {
            SeriesKind::Bar => {
                let fill = color.mix(0.75).filled();
                anno.legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], fill))
            }
            _ => {
                let stroke = color.stroke_width(2);
                anno.legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], stroke))
            }
        };
    }

    let position = match spec.legend.position {
        LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
    };
    chart
        .configure_series_labels()
        .position(position)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Date axis bounds, widened half a day each side so bars are not clipped.
/// An empty chart gets a one-day window around today.
fn x_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(NaiveDateTime, NaiveDateTime), FloodError> {
    let today = Utc::now().date_naive();
    let start = start.unwrap_or(today);
    let end = end.unwrap_or(start);
    let half_day = Duration::hours(12);

    let lo = midnight(start).checked_sub_signed(half_day);
    let hi = midnight(end).checked_add_signed(half_day);
    lo.zip(hi).ok_or_else(|| {
        FloodError::RenderError(format!("date axis {}..{} is outside the supported calendar", start, end))
    })
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    NaiveDateTime::new(date, NaiveTime::MIN)
}

/// Parses `#rrggbb` into a plotters colour.
pub(crate) fn hex_color(hex: &str) -> Result<RGBColor, FloodError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    let invalid = || FloodError::RenderError(format!("invalid colour '{}'", hex));

    if digits.len() != 6 || !digits.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::spec::build_chart;
    use crate::ingest::records::OrderingPolicy;
    use crate::ingest::sample::sample_records;

    #[test]
    fn test_output_format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("flood.svg")), Ok(OutputFormat::Svg));
        assert_eq!(OutputFormat::from_path(Path::new("out/Flood.PNG")), Ok(OutputFormat::Png));
    }

    #[test]
    fn test_unknown_extension_is_render_error() {
        for path in ["flood.pdf", "flood"] {
            let err = OutputFormat::from_path(Path::new(path)).unwrap_err();
            assert!(matches!(err, FloodError::RenderError(_)), "{}: got {:?}", path, err);
        }
    }

    #[test]
    fn test_render_to_unsupported_path_fails_before_drawing() {
        let chart = build_chart(&sample_records(), OrderingPolicy::Sort).unwrap();
        let renderer = PlottersRenderer::new("flood_chart.gif", 1200, 600);
        let err = renderer.render(&chart).unwrap_err();
        assert!(err.to_string().contains("flood_chart.gif"), "got: {}", err);
    }

    #[test]
    fn test_hex_color_parses_palette() {
        assert_eq!(hex_color("#2563eb").unwrap(), RGBColor(0x25, 0x63, 0xeb));
        assert_eq!(hex_color("0891b2").unwrap(), RGBColor(0x08, 0x91, 0xb2));
    }

    #[test]
    fn test_hex_color_rejects_malformed_input() {
        for bad in ["#2563e", "#zzzzzz", "", "#2563ebff", "#ééé"] {
            assert!(hex_color(bad).is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_x_range_pads_half_a_day() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        let (lo, hi) = x_range(Some(start), Some(end)).unwrap();
        assert_eq!(lo.to_string(), "2023-12-31 12:00:00");
        assert_eq!(hi.to_string(), "2024-01-07 12:00:00");
    }

    #[test]
    fn test_x_range_for_empty_chart_is_one_day() {
        let (lo, hi) = x_range(None, None).unwrap();
        assert_eq!(hi - lo, Duration::hours(24));
    }

    #[test]
    fn test_x_range_at_calendar_limits_is_render_error() {
        let err = x_range(Some(NaiveDate::MIN), Some(NaiveDate::MIN)).unwrap_err();
        assert!(matches!(err, FloodError::RenderError(_)), "got {:?}", err);
    }

    #[test]
    fn test_render_at_calendar_limit_fails_without_panicking() {
        let mut chart = build_chart(&sample_records(), OrderingPolicy::Sort).unwrap();
        chart.x_axis.start = Some(NaiveDate::MIN);
        let err = render_svg_string(&chart, (1200, 600)).unwrap_err();
        assert!(matches!(err, FloodError::RenderError(_)), "got {:?}", err);
    }

    #[test]
    fn test_render_sample_to_svg_file() {
        let chart = build_chart(&sample_records(), OrderingPolicy::Sort).unwrap();
        let path = std::env::temp_dir().join(format!("flood_chart_render_{}.svg", std::process::id()));
        let renderer = PlottersRenderer::new(&path, 1200, 600);

        renderer.render(&chart).expect("sample should render");
        let svg = std::fs::read_to_string(&path).expect("chart file written");
        std::fs::remove_file(&path).ok();

        assert!(svg.contains("<svg"), "not an SVG document");
        assert!(svg.len() > 1000, "chart is suspiciously small: {} bytes", svg.len());
    }

    #[test]
    fn test_render_sample_to_svg_string() {
        let chart = build_chart(&sample_records(), OrderingPolicy::Sort).unwrap();
        let svg = render_svg_string(&chart, (1200, 600)).expect("sample should render");
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("River Discharge &amp; Rainfall") || svg.contains("River Discharge & Rainfall"));
    }
}
