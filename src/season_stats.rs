//! Per-season rating statistics
//!
//! This module reduces a flat episode list to one average rating per season
//! and maps those averages onto positionally indexed chart points.

use crate::series_fetch::Episode;
use serde::Serialize;
use std::collections::HashMap;

/// How episodes without a rating take part in a season's mean
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingRating {
    /// Count the episode with a rating of 0
    #[default]
    AsZero,
    /// Leave the episode out of the mean entirely
    Exclude,
}

/// Result of aggregating a series' episodes by season
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeasonSummary {
    /// Number of distinct season labels among the episodes
    pub distinct_season_count: usize,
    /// One rounded mean per season, in first-seen season order
    pub season_averages: Vec<f64>,
}

impl SeasonSummary {
    /// Chart points for these averages, see [`to_points`]
    pub fn points(&self) -> Vec<ChartPoint> {
        to_points(&self.season_averages)
    }
}

/// A position/value pair handed to a chart renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    /// 1-based position of the season, not its original label
    pub season: usize,
    /// Average rating of that season
    pub rating: f64,
}

/// Running sum for one season while folding over episodes
struct SeasonTally {
    sum: f64,
    count: usize,
}

impl SeasonTally {
    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Groups episodes by season and averages each season's ratings
///
/// Seasons appear in the order they are first encountered in `episodes`,
/// and every distinct season yields exactly one average, rounded with
/// [`round_to_hundredths`]. Absent or empty input yields an empty summary.
///
/// # Arguments
///
/// * `episodes` - The series' episodes, if any were fetched
/// * `missing` - Treatment of episodes whose rating is `None`
///
/// # Examples
///
/// ```
/// use tv_rating_guide::{Episode, MissingRating, aggregate};
///
/// let episodes = vec![
///     Episode::rated(1, Some(8.0)),
///     Episode::rated(1, Some(6.0)),
///     Episode::rated(2, Some(9.0)),
/// ];
/// let summary = aggregate(Some(episodes.as_slice()), MissingRating::AsZero);
/// assert_eq!(summary.distinct_season_count, 2);
/// assert_eq!(summary.season_averages, vec![7.0, 9.0]);
/// ```
pub fn aggregate(episodes: Option<&[Episode]>, missing: MissingRating) -> SeasonSummary {
    let episodes = episodes.unwrap_or_default();

    // Season label -> position in `tallies`, which keeps first-seen order
    let mut positions: HashMap<u32, usize> = HashMap::new();
    let tallies = episodes
        .iter()
        .fold(Vec::<SeasonTally>::new(), |mut tallies, episode| {
            let position = *positions.entry(episode.season).or_insert_with(|| {
                tallies.push(SeasonTally { sum: 0.0, count: 0 });
                tallies.len() - 1
            });

            let tally = &mut tallies[position];
            match (episode.rating, missing) {
                (Some(rating), _) => {
                    tally.sum += rating;
                    tally.count += 1;
                }
                (None, MissingRating::AsZero) => tally.count += 1,
                (None, MissingRating::Exclude) => {}
            }

            tallies
        });

    SeasonSummary {
        distinct_season_count: tallies.len(),
        season_averages: tallies
            .iter()
            .map(|tally| round_to_hundredths(tally.mean()))
            .collect(),
    }
}

/// Maps season averages to chart points numbered from 1 by position
pub fn to_points(season_averages: &[f64]) -> Vec<ChartPoint> {
    season_averages
        .iter()
        .enumerate()
        .map(|(index, &rating)| ChartPoint {
            season: index + 1,
            rating,
        })
        .collect()
}

/// Rounds to two decimals, half away from zero on the third decimal digit
///
/// The digit is read from the shortest decimal form of `value`, so a mean
/// that prints as `7.005` becomes `7.01` even though its binary value lies
/// slightly below 7.005.
pub fn round_to_hundredths(value: f64) -> f64 {
    // Beyond this magnitude an f64 has no fractional digits left to round
    if !value.is_finite() || value.abs() >= 1e15 {
        return value;
    }

    let repr = value.abs().to_string();
    let (whole, fraction) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    let Ok(whole) = whole.parse::<u64>() else {
        return value;
    };

    let digit = |index: usize| {
        fraction
            .as_bytes()
            .get(index)
            .map_or(0, |b| u64::from(b.saturating_sub(b'0')))
    };

    let mut hundredths = whole * 100 + digit(0) * 10 + digit(1);
    if digit(2) >= 5 {
        hundredths += 1;
    }

    (hundredths as f64 / 100.0).copysign(value)
}
