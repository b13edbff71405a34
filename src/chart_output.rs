//! Chart file output
//!
//! Rendered charts are written as standalone SVG files named after the
//! series and the chart mode.

use crate::chart::{ChartMode, RenderError};
use crate::season_stats::ChartPoint;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Sanitizes a series name for use in a file name
///
/// Replaces characters invalid on common filesystems with `-` and trims
/// whitespace and dots from both ends. Falls back to `series` when nothing
/// is left.
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();

    let trimmed = sanitized.trim_matches(|c: char| c.is_whitespace() || c == '.');
    if trimmed.is_empty() {
        "series".to_string()
    } else {
        trimmed.to_string()
    }
}

/// File name of the chart for a series, e.g. `Breaking Bad-radar.svg`
pub fn chart_file_name(series_name: &str, mode: ChartMode) -> String {
    format!("{}-{}.svg", sanitize_filename(series_name), mode.slug())
}

/// Writes rendered SVG markup into `directory`
///
/// # Returns
///
/// The path of the written file
pub fn write_chart(
    directory: &Path,
    series_name: &str,
    mode: ChartMode,
    svg: &str,
) -> Result<PathBuf, RenderError> {
    let path = directory.join(chart_file_name(series_name, mode));

    fs::write(&path, svg).map_err(|e| RenderError::WriteFailed {
        path: path.clone(),
        source: e,
    })?;

    Ok(path)
}

/// Chart data as handed to a renderer, in serializable form
#[derive(Debug, Serialize)]
struct ChartData<'a> {
    series: &'a str,
    points: &'a [ChartPoint],
}

/// Serializes the points of a chart as pretty-printed JSON
///
/// The document has the shape `{"series": name, "points": [{"season", "rating"}]}`.
pub fn points_json(series_name: &str, points: &[ChartPoint]) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(&ChartData {
        series: series_name,
        points,
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Normal Title"), "Normal Title");
        assert_eq!(sanitize_filename("Title: With Colon"), "Title- With Colon");
        assert_eq!(sanitize_filename("Path/With\\Slashes"), "Path-With-Slashes");
        assert_eq!(sanitize_filename("  Spaces  "), "Spaces");
        assert_eq!(sanitize_filename("...dots..."), "dots");
        assert_eq!(sanitize_filename(" ... "), "series");
    }

    #[test]
    fn test_chart_file_name_carries_mode() {
        assert_eq!(chart_file_name("Breaking Bad", ChartMode::Line), "Breaking Bad-line.svg");
        assert_eq!(chart_file_name("M*A*S*H", ChartMode::Radar), "M-A-S-H-radar.svg");
    }

    #[test]
    fn test_points_json_shape() {
        let points = crate::season_stats::to_points(&[7.0, 9.25]);
        let json = points_json("Dark", &points).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "series": "Dark",
                "points": [
                    {"season": 1, "rating": 7.0},
                    {"season": 2, "rating": 9.25}
                ]
            })
        );
    }

    #[test]
    fn test_write_chart_creates_file() {
        let directory = env::temp_dir();
        let path = write_chart(&directory, "tv rating guide test", ChartMode::Line, "<svg/>").unwrap();

        assert_eq!(path, directory.join("tv rating guide test-line.svg"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "<svg/>");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_write_chart_reports_missing_directory() {
        let directory = env::temp_dir().join("tv-rating-guide-missing-dir").join("nested");
        let result = write_chart(&directory, "Any", ChartMode::Radar, "<svg/>");
        assert!(matches!(result, Err(RenderError::WriteFailed { .. })));
    }
}
