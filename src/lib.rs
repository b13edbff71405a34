//! TV Rating Guide - Chart how a tv series is rated season by season
//!
//! This library looks up a series on TVMaze, averages the episode ratings of
//! every season and renders the averages as a line or radar chart.

mod chart;
mod chart_output;
mod controller;
mod season_stats;
mod series_fetch;

// Re-export error types
pub use chart::RenderError;
pub use controller::SearchError;
pub use series_fetch::FetchError;

pub use chart::{
    ChartMode, ChartOptions, ChartRenderer, LineChartRenderer, RadarChartRenderer, renderer_for,
};
pub use chart_output::{chart_file_name, points_json, sanitize_filename, write_chart};
pub use controller::{
    Controller, MIN_CHART_SEASONS, RequestToken, SearchRequest, SearchState, SubmitOutcome,
    TOO_FEW_SEASONS_MESSAGE, View,
};
pub use season_stats::{
    ChartPoint, MissingRating, SeasonSummary, aggregate, round_to_hundredths, to_points,
};
pub use series_fetch::{
    DEFAULT_BASE_URL, Episode, FetchResponse, SeriesFetcher, SeriesResult, TvMazeFetcher,
};

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Progress event emitted while searching and charting
///
/// These events allow library users to track progress and provide feedback,
/// or to stay silent by ignoring them.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// A search request is being sent
    Searching { query: String },

    /// A series was found and loaded
    SeriesFetched {
        series_name: String,
        episode_count: usize,
    },

    /// The search failed; `detail` carries the technical cause if known
    SearchFailed {
        message: String,
        detail: Option<String>,
    },

    /// A response arrived after a newer search had been issued
    StaleResponseDiscarded { query: String },

    /// A chart is being rendered
    RenderingChart { mode: ChartMode },

    /// A chart file was written
    ChartWritten { path: PathBuf },
}

/// Top-level error type for TV Rating Guide operations
///
/// Failed searches are not errors; they are reported through
/// [`SubmitOutcome`] and [`View`].
#[derive(Debug, Error)]
pub enum RatingGuideError {
    /// Error while setting up or using the search service
    #[error("Series fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Error while rendering or saving a chart
    #[error("Chart rendering error: {0}")]
    Render(#[from] RenderError),
}

/// Settings for a search session
#[derive(Debug, Clone, PartialEq)]
pub struct GuideOptions {
    /// Root of the TVMaze API
    pub base_url: String,
    /// Upper bound for one search request
    pub timeout: Duration,
    /// Treatment of unrated episodes when averaging
    pub missing_rating: MissingRating,
    /// Chart shown initially
    pub chart_mode: ChartMode,
    /// Directory chart files are written to
    pub output_dir: PathBuf,
    /// Chart sizes and colors
    pub chart: ChartOptions,
}

impl Default for GuideOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            missing_rating: MissingRating::default(),
            chart_mode: ChartMode::default(),
            output_dir: PathBuf::from("."),
            chart: ChartOptions::default(),
        }
    }
}

impl GuideOptions {
    /// Creates the TVMaze fetcher described by these options
    pub fn fetcher(&self) -> Result<TvMazeFetcher, RatingGuideError> {
        Ok(TvMazeFetcher::new(self.base_url.clone(), self.timeout)?)
    }
}

/// Outcome of a one-shot search
#[derive(Debug, Clone, PartialEq)]
pub struct GuideReport {
    /// What the search did
    pub outcome: SubmitOutcome,
    /// What the chart region shows afterwards
    pub view: View,
    /// Path of the written chart, if a chart was rendered
    pub chart_path: Option<PathBuf>,
}

/// Renders the chart of a view and saves it to the output directory
///
/// Views without a chart are left alone and yield `None`.
pub fn save_chart<F>(
    view: &View,
    options: &GuideOptions,
    mut progress_callback: F,
) -> Result<Option<PathBuf>, RatingGuideError>
where
    F: FnMut(ProgressEvent),
{
    let View::Chart {
        title,
        mode,
        points,
    } = view
    else {
        return Ok(None);
    };

    progress_callback(ProgressEvent::RenderingChart { mode: *mode });
    let svg = renderer_for(*mode, &options.chart).render(title, points)?;
    let path = write_chart(&options.output_dir, title, *mode, &svg)?;

    progress_callback(ProgressEvent::ChartWritten { path: path.clone() });
    Ok(Some(path))
}

/// Searches for a series and charts its season ratings
///
/// This function queries the search service once, decides what to display
/// and, when the series has enough seasons, writes the chart into the
/// configured output directory.
///
/// # Arguments
///
/// * `fetcher` - The service to query, normally [`TvMazeFetcher`]
/// * `query` - The show name to search for
/// * `options` - Session settings
/// * `progress_callback` - Closure called with progress events (can be empty for silent operation)
///
/// # Examples
///
/// ```no_run
/// use tv_rating_guide::{GuideOptions, ProgressEvent, rate_series};
///
/// let options = GuideOptions::default();
/// let fetcher = options.fetcher().unwrap();
/// let report = rate_series(&fetcher, "Breaking Bad", &options, |event| {
///     if let ProgressEvent::ChartWritten { path } = event {
///         println!("Chart saved to {}", path.display());
///     }
/// })
/// .unwrap();
/// println!("{:?}", report.outcome);
/// ```
pub fn rate_series<S, F>(
    fetcher: &S,
    query: &str,
    options: &GuideOptions,
    mut progress_callback: F,
) -> Result<GuideReport, RatingGuideError>
where
    S: SeriesFetcher + ?Sized,
    F: FnMut(ProgressEvent),
{
    let mut controller = Controller::new(options.chart_mode);
    controller.set_query(query);

    let outcome = controller.submit(fetcher, &mut progress_callback);
    let view = controller.view(options.missing_rating);
    let chart_path = save_chart(&view, options, &mut progress_callback)?;

    Ok(GuideReport {
        outcome,
        view,
        chart_path,
    })
}
