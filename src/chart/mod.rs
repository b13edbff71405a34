//! Chart rendering module
//!
//! This module turns season chart points into SVG documents. Two
//! interchangeable strategies exist, a line chart and a radar chart, both
//! drawn with `plotters` on its SVG backend.

mod line;
mod radar;

pub use line::LineChartRenderer;
pub use radar::RadarChartRenderer;

use crate::season_stats::ChartPoint;
use plotters::style::RGBColor;
use std::fmt;
use thiserror::Error;

/// Lower bound of the rating axis
pub(crate) const RATING_MIN: f64 = 0.0;
/// Upper bound of the rating axis
pub(crate) const RATING_MAX: f64 = 10.0;
/// Legend name of the plotted series
pub(crate) const SERIES_LABEL: &str = "Average Rating";

/// Errors that can occur while rendering or saving a chart
#[derive(Debug, Error)]
pub enum RenderError {
    /// There is nothing to plot
    #[error("No chart points to render")]
    NoPoints,

    /// The plotting backend reported a failure
    #[error("Failed to draw chart: {0}")]
    Drawing(String),

    /// Failed to serialize chart data
    #[error("Failed to serialize chart data: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failed to write the rendered chart to disk
    #[error("Failed to write chart file {path}: {source}")]
    WriteFailed {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

/// Converts any plotters drawing error into a RenderError
pub(crate) fn drawing_error(e: impl fmt::Display) -> RenderError {
    RenderError::Drawing(e.to_string())
}

/// Which chart is shown for a series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartMode {
    /// Ratings over seasons as a line
    #[default]
    Line,
    /// Ratings as a filled polygon, one spoke per season
    Radar,
}

impl ChartMode {
    /// The other chart mode
    pub fn toggled(self) -> Self {
        match self {
            ChartMode::Line => ChartMode::Radar,
            ChartMode::Radar => ChartMode::Line,
        }
    }

    /// Short lowercase name, used in file names
    pub fn slug(self) -> &'static str {
        match self {
            ChartMode::Line => "line",
            ChartMode::Radar => "radar",
        }
    }
}

impl fmt::Display for ChartMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartMode::Line => write!(f, "Line Chart"),
            ChartMode::Radar => write!(f, "Radar Chart"),
        }
    }
}

/// Dimensions and colors of the rendered charts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartOptions {
    /// Width and height of the line chart in pixels
    pub line_size: (u32, u32),
    /// Width and height of the radar chart in pixels
    pub radar_size: (u32, u32),
    /// Stroke and fill color of the plotted series
    pub color: RGBColor,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            line_size: (1100, 300),
            radar_size: (500, 500),
            color: RGBColor(0x88, 0x84, 0xd8),
        }
    }
}

/// Trait for chart strategies that draw season points into an SVG document
pub trait ChartRenderer {
    /// Renders the points and returns the SVG markup
    ///
    /// # Arguments
    ///
    /// * `title` - Caption shown above the chart, normally the series name
    /// * `points` - Positionally indexed season averages
    ///
    /// # Errors
    ///
    /// Returns `RenderError::NoPoints` for an empty point list, or
    /// `RenderError::Drawing` if the backend fails.
    fn render(&self, title: &str, points: &[ChartPoint]) -> Result<String, RenderError>;
}

/// Creates the renderer for a chart mode
pub fn renderer_for(mode: ChartMode, options: &ChartOptions) -> Box<dyn ChartRenderer> {
    match mode {
        ChartMode::Line => Box::new(LineChartRenderer::new(options.line_size, options.color)),
        ChartMode::Radar => Box::new(RadarChartRenderer::new(options.radar_size, options.color)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points() -> Vec<ChartPoint> {
        crate::season_stats::to_points(&[8.1, 8.6, 8.9, 9.3, 9.5])
    }

    #[test]
    fn test_toggle_chart_mode() {
        assert_eq!(ChartMode::default(), ChartMode::Line);
        assert_eq!(ChartMode::Line.toggled(), ChartMode::Radar);
        assert_eq!(ChartMode::Radar.toggled(), ChartMode::Line);
        assert_eq!(ChartMode::Radar.to_string(), "Radar Chart");
    }

    #[test]
    fn test_renderer_for_each_mode_produces_svg() {
        let options = ChartOptions::default();
        for mode in [ChartMode::Line, ChartMode::Radar] {
            let svg = renderer_for(mode, &options)
                .render("Breaking Bad", &points())
                .unwrap();
            assert!(svg.contains("<svg"), "{} output is not svg", mode);
            assert!(svg.contains("Breaking Bad"));
        }
    }

    #[test]
    fn test_renderers_reject_empty_points() {
        let options = ChartOptions::default();
        for mode in [ChartMode::Line, ChartMode::Radar] {
            assert!(matches!(
                renderer_for(mode, &options).render("Empty", &[]),
                Err(RenderError::NoPoints)
            ));
        }
    }
}
