//! Line chart strategy

use super::{ChartRenderer, RATING_MAX, RATING_MIN, RenderError, SERIES_LABEL, drawing_error};
use crate::season_stats::ChartPoint;
use plotters::prelude::*;

/// Draws season ratings as a line over a 0 to 10 rating axis
pub struct LineChartRenderer {
    size: (u32, u32),
    color: RGBColor,
}

impl LineChartRenderer {
    pub fn new(size: (u32, u32), color: RGBColor) -> Self {
        Self { size, color }
    }
}

impl ChartRenderer for LineChartRenderer {
    fn render(&self, title: &str, points: &[ChartPoint]) -> Result<String, RenderError> {
        if points.is_empty() {
            return Err(RenderError::NoPoints);
        }

        let color = self.color;
        let last_season = points.len() as i32;
        let coords: Vec<(i32, f64)> = points
            .iter()
            .map(|p| (p.season as i32, p.rating))
            .collect();

        let mut buffer = String::new();
        {
            let root = SVGBackend::with_string(&mut buffer, self.size).into_drawing_area();
            root.fill(&WHITE).map_err(drawing_error)?;

            // One empty slot on each side keeps the first and last dot off the axes
            let mut chart = ChartBuilder::on(&root)
                .caption(title, ("sans-serif", 20).into_font())
                .margin(10)
                .x_label_area_size(35)
                .y_label_area_size(40)
                .build_cartesian_2d(0..last_season + 1, RATING_MIN..RATING_MAX)
                .map_err(drawing_error)?;

            chart
                .configure_mesh()
                .x_desc("Season")
                .y_desc(SERIES_LABEL)
                .x_labels(points.len() + 2)
                .x_label_formatter(&|season: &i32| {
                    if (1..=last_season).contains(season) {
                        season.to_string()
                    } else {
                        String::new()
                    }
                })
                .draw()
                .map_err(drawing_error)?;

            chart
                .draw_series(LineSeries::new(coords.iter().copied(), color.stroke_width(2)))
                .map_err(drawing_error)?
                .label(SERIES_LABEL)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

            chart
                .draw_series(
                    coords
                        .iter()
                        .map(|&coord| Circle::new(coord, 4, color.filled())),
                )
                .map_err(drawing_error)?;

            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(drawing_error)?;

            root.present().map_err(drawing_error)?;
        }

        Ok(buffer)
    }
}
