//! Radar chart strategy
//!
//! plotters has no polar coordinate system, so the radar is laid out by hand
//! in pixel coordinates on the drawing area below the caption.

use super::{ChartRenderer, RATING_MAX, RATING_MIN, RenderError, SERIES_LABEL, drawing_error};
use crate::season_stats::ChartPoint;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Number of concentric grid rings between the center and the outer edge
const GRID_RINGS: usize = 5;
/// Pixels kept free around the outer ring for the season labels
const LABEL_MARGIN: f64 = 30.0;

/// Draws season ratings as a filled polygon with one spoke per season
pub struct RadarChartRenderer {
    size: (u32, u32),
    color: RGBColor,
}

impl RadarChartRenderer {
    pub fn new(size: (u32, u32), color: RGBColor) -> Self {
        Self { size, color }
    }
}

/// Pixel position of spoke `index` of `count` at `radius` from `center`
///
/// Spoke 0 points straight up and the spokes proceed clockwise.
pub(crate) fn radar_vertex(
    center: (i32, i32),
    radius: f64,
    index: usize,
    count: usize,
) -> (i32, i32) {
    let angle = -FRAC_PI_2 + TAU * index as f64 / count.max(1) as f64;
    (
        center.0 + (radius * angle.cos()).round() as i32,
        center.1 + (radius * angle.sin()).round() as i32,
    )
}

/// Distance from the center for a rating, clamped to the rating axis
fn rating_radius(rating: f64, outer_radius: f64) -> f64 {
    let clamped = rating.clamp(RATING_MIN, RATING_MAX);
    (clamped - RATING_MIN) / (RATING_MAX - RATING_MIN) * outer_radius
}

/// Closed outline through every spoke at the given radius
fn ring(center: (i32, i32), radius: f64, count: usize) -> Vec<(i32, i32)> {
    (0..=count)
        .map(|index| radar_vertex(center, radius, index % count, count))
        .collect()
}

impl ChartRenderer for RadarChartRenderer {
    fn render(&self, title: &str, points: &[ChartPoint]) -> Result<String, RenderError> {
        if points.is_empty() {
            return Err(RenderError::NoPoints);
        }

        let count = points.len();
        let label_style = TextStyle::from(("sans-serif", 14).into_font())
            .pos(Pos::new(HPos::Center, VPos::Center));
        let tick_style = ("sans-serif", 11).into_font().color(&BLACK.mix(0.6));

        let mut buffer = String::new();
        {
            let root = SVGBackend::with_string(&mut buffer, self.size).into_drawing_area();
            root.fill(&WHITE).map_err(drawing_error)?;
            let area = root
                .titled(title, ("sans-serif", 20).into_font())
                .map_err(drawing_error)?;

            let (width, height) = area.dim_in_pixel();
            let center = (width as i32 / 2, height as i32 / 2);
            let outer_radius = (width.min(height) as f64 / 2.0 - LABEL_MARGIN).max(1.0);

            // Polar grid: rings plus one spoke per season
            for step in 1..=GRID_RINGS {
                let radius = outer_radius * step as f64 / GRID_RINGS as f64;
                area.draw(&PathElement::new(ring(center, radius, count), BLACK.mix(0.2)))
                    .map_err(drawing_error)?;

                let value = RATING_MIN + (RATING_MAX - RATING_MIN) * step as f64 / GRID_RINGS as f64;
                let (x, y) = radar_vertex(center, radius, 0, count);
                area.draw(&Text::new(format!("{}", value), (x + 4, y), tick_style.clone()))
                    .map_err(drawing_error)?;
            }

            for (index, point) in points.iter().enumerate() {
                let spoke_end = radar_vertex(center, outer_radius, index, count);
                area.draw(&PathElement::new(vec![center, spoke_end], BLACK.mix(0.2)))
                    .map_err(drawing_error)?;

                let label_pos = radar_vertex(center, outer_radius + LABEL_MARGIN / 2.0, index, count);
                area.draw(&Text::new(
                    point.season.to_string(),
                    label_pos,
                    label_style.clone(),
                ))
                .map_err(drawing_error)?;
            }

            let vertices: Vec<(i32, i32)> = points
                .iter()
                .enumerate()
                .map(|(index, p)| {
                    radar_vertex(center, rating_radius(p.rating, outer_radius), index, count)
                })
                .collect();

            area.draw(&Polygon::new(vertices.clone(), self.color.mix(0.6).filled()))
                .map_err(drawing_error)?;

            let mut outline = vertices;
            outline.push(outline[0]);
            area.draw(&PathElement::new(outline, self.color.stroke_width(2)))
                .map_err(drawing_error)?;

            area.draw(&Text::new(SERIES_LABEL, (8, height as i32 - 16), tick_style.clone()))
                .map_err(drawing_error)?;

            root.present().map_err(drawing_error)?;
        }

        Ok(buffer)
    }
}
