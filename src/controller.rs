//! Search interaction state
//!
//! The controller owns everything a front end needs between user actions:
//! the query text, the outcome of the latest search, the chart mode and the
//! request sequence used to drop responses that arrive out of order.

use crate::ProgressEvent;
use crate::chart::ChartMode;
use crate::season_stats::{ChartPoint, MissingRating, aggregate};
use crate::series_fetch::{FetchError, FetchResponse, SeriesFetcher, SeriesResult};
use thiserror::Error;

/// Notice shown instead of a chart for series with two seasons or fewer
pub const TOO_FEW_SEASONS_MESSAGE: &str = "This show has too few seasons to render a chart";

/// Smallest number of distinct seasons that gets a chart
pub const MIN_CHART_SEASONS: usize = 3;

/// User-facing outcome of a failed search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The service answered 404 for the query
    #[error("Could not find series")]
    NotFound,

    /// Any other status, or no usable response at all
    #[error("Error making request")]
    RequestFailed,
}

/// Result of the most recent completed search
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchState {
    /// Nothing searched yet
    #[default]
    Idle,
    /// The latest search succeeded
    Ready(SeriesResult),
    /// The latest search failed; `stale` keeps the series loaded before it
    Failed {
        error: SearchError,
        stale: Option<SeriesResult>,
    },
}

impl SearchState {
    /// Series data currently held, fresh or stale
    pub fn series(&self) -> Option<&SeriesResult> {
        match self {
            SearchState::Idle => None,
            SearchState::Ready(series) => Some(series),
            SearchState::Failed { stale, .. } => stale.as_ref(),
        }
    }

    /// Error of the latest search, if it failed
    pub fn error(&self) -> Option<SearchError> {
        match self {
            SearchState::Failed { error, .. } => Some(*error),
            _ => None,
        }
    }
}

/// Sequence number identifying one issued search
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// A search handed out by [`Controller::begin_search`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub token: RequestToken,
    pub query: String,
}

/// What completing a search did to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A series was loaded and replaced any previous one
    Loaded { series_name: String },
    /// The search failed with a user-facing error
    Failed(SearchError),
    /// A newer search was issued meanwhile; the response was ignored
    Discarded,
}

/// What the chart region shows for the current state
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// No series has been loaded
    Nothing,
    /// The latest search failed
    Error(SearchError),
    /// The series has fewer than [`MIN_CHART_SEASONS`] seasons
    TooFewSeasons,
    /// A chart of the series in the selected mode
    Chart {
        title: String,
        mode: ChartMode,
        points: Vec<ChartPoint>,
    },
}

impl View {
    /// Text shown in place of a chart, if any
    pub fn notice(&self) -> Option<String> {
        match self {
            View::Error(error) => Some(error.to_string()),
            View::TooFewSeasons => Some(TOO_FEW_SEASONS_MESSAGE.to_string()),
            View::Nothing | View::Chart { .. } => None,
        }
    }
}

/// Owns the query, search state and chart mode of one session
#[derive(Debug, Default)]
pub struct Controller {
    query: String,
    state: SearchState,
    chart_mode: ChartMode,
    last_issued: u64,
    pending: Option<RequestToken>,
}

impl Controller {
    pub fn new(chart_mode: ChartMode) -> Self {
        Self {
            chart_mode,
            ..Self::default()
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn chart_mode(&self) -> ChartMode {
        self.chart_mode
    }

    /// Switches between line and radar chart; the search state is untouched
    pub fn toggle_chart_mode(&mut self) -> ChartMode {
        self.chart_mode = self.chart_mode.toggled();
        self.chart_mode
    }

    /// Whether a search has been issued and not completed yet
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Issues a new search for the current query
    ///
    /// The returned token supersedes every earlier one: only its completion
    /// will be applied.
    pub fn begin_search(&mut self) -> SearchRequest {
        self.last_issued += 1;
        let token = RequestToken(self.last_issued);
        self.pending = Some(token);

        SearchRequest {
            token,
            query: self.query.clone(),
        }
    }

    /// Applies the response of the search identified by `token`
    ///
    /// A 200 with a body stores the series, clears the error and empties the
    /// query. A 404 yields `SearchError::NotFound`; every other status, a 200
    /// without body or a fetch error yields `SearchError::RequestFailed`.
    /// Failures keep any previously loaded series as stale data.
    pub fn complete_search(
        &mut self,
        token: RequestToken,
        response: Result<FetchResponse, FetchError>,
    ) -> SubmitOutcome {
        if self.pending != Some(token) {
            return SubmitOutcome::Discarded;
        }
        self.pending = None;

        let error = match response {
            Ok(FetchResponse {
                status: 200,
                body: Some(series),
            }) => {
                let series_name = series.name.clone();
                self.query.clear();
                self.state = SearchState::Ready(series);
                return SubmitOutcome::Loaded { series_name };
            }
            Ok(FetchResponse { status: 404, .. }) => SearchError::NotFound,
            Ok(_) | Err(_) => SearchError::RequestFailed,
        };

        let stale = match std::mem::take(&mut self.state) {
            SearchState::Idle => None,
            SearchState::Ready(series) => Some(series),
            SearchState::Failed { stale, .. } => stale,
        };
        self.state = SearchState::Failed { error, stale };

        SubmitOutcome::Failed(error)
    }

    /// Runs a complete search for the current query with `fetcher`
    ///
    /// # Arguments
    ///
    /// * `fetcher` - The service to query
    /// * `progress_callback` - Closure called with progress events
    pub fn submit<S, F>(&mut self, fetcher: &S, mut progress_callback: F) -> SubmitOutcome
    where
        S: SeriesFetcher + ?Sized,
        F: FnMut(ProgressEvent),
    {
        let request = self.begin_search();
        progress_callback(ProgressEvent::Searching {
            query: request.query.clone(),
        });

        let response = fetcher.fetch(&request.query);
        let detail = match &response {
            Ok(FetchResponse { status: 200, body: None }) => Some("HTTP 200 without body".to_string()),
            Ok(FetchResponse { status: 200, .. }) => None,
            Ok(FetchResponse { status, .. }) => Some(format!("HTTP {}", status)),
            Err(e) => Some(e.to_string()),
        };
        let episode_count = match &response {
            Ok(FetchResponse { body: Some(series), .. }) => series.episodes.len(),
            _ => 0,
        };

        let outcome = self.complete_search(request.token, response);
        match &outcome {
            SubmitOutcome::Loaded { series_name } => {
                progress_callback(ProgressEvent::SeriesFetched {
                    series_name: series_name.clone(),
                    episode_count,
                });
            }
            SubmitOutcome::Failed(error) => {
                progress_callback(ProgressEvent::SearchFailed {
                    message: error.to_string(),
                    detail,
                });
            }
            SubmitOutcome::Discarded => {
                progress_callback(ProgressEvent::StaleResponseDiscarded {
                    query: request.query,
                });
            }
        }

        outcome
    }

    /// Decides what the chart region shows
    ///
    /// Without series data nothing is shown. With data, an error of the
    /// latest search wins over everything else, then series with fewer than
    /// [`MIN_CHART_SEASONS`] seasons get a notice, otherwise the chart in the
    /// current mode. Points are recomputed from the series on every call.
    pub fn view(&self, missing: MissingRating) -> View {
        let Some(series) = self.state.series() else {
            return View::Nothing;
        };

        let summary = aggregate(Some(series.episodes.as_slice()), missing);

        if let Some(error) = self.state.error() {
            return View::Error(error);
        }

        if summary.distinct_season_count < MIN_CHART_SEASONS {
            return View::TooFewSeasons;
        }

        View::Chart {
            title: series.name.clone(),
            mode: self.chart_mode,
            points: summary.points(),
        }
    }
}
