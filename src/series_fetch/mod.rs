/// Data structures and traits for fetching TV series rating data.
///
/// This module provides structures to represent a searched TV series and its
/// episodes with their ratings, as well as the trait implemented by the
/// services that answer a show-name query.
mod tvmaze;
mod tvmaze_types;

pub use tvmaze::{DEFAULT_BASE_URL, TvMazeFetcher};

use thiserror::Error;

/// Errors that can occur while talking to a series search service.
///
/// A non-success HTTP status is not an error at this level; it is reported
/// through [`FetchResponse::status`] and interpreted by the caller.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The search URL could not be built from the configured base URL
    #[error("Invalid search URL: {0}")]
    InvalidUrl(String),

    /// Request to the search service failed before a status was received
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Failed to parse the service's JSON response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),
}

/// A single episode with the rating data needed for aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    /// The season label this episode belongs to
    pub season: u32,
    /// The episode number within the season, if known
    pub number: Option<u32>,
    /// The episode title, if known
    pub name: Option<String>,
    /// Average user rating in [0, 10]; `None` when nobody rated it yet
    pub rating: Option<f64>,
}

impl Episode {
    /// Creates an episode carrying only the fields used for aggregation.
    pub fn rated(season: u32, rating: Option<f64>) -> Self {
        Self {
            season,
            number: None,
            name: None,
            rating,
        }
    }
}

/// A series returned by a successful search, with its flat episode list.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesResult {
    /// The name of the TV series
    pub name: String,
    /// Episodes in the order the service returned them
    pub episodes: Vec<Episode>,
}

/// Raw outcome of a search request: the HTTP status and, for a 200, the body.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,
    /// Parsed series data, present only when the status is 200
    pub body: Option<SeriesResult>,
}

impl FetchResponse {
    /// A 200 response carrying the given series.
    pub fn ok(series: SeriesResult) -> Self {
        Self {
            status: 200,
            body: Some(series),
        }
    }

    /// A response with the given status and no body.
    pub fn status(status: u16) -> Self {
        Self { status, body: None }
    }
}

/// Trait for services that can look up a TV series by name.
///
/// Implementors perform a single request per call; they never retry and
/// never interpret the status code beyond decoding the body of a 200.
pub trait SeriesFetcher {
    /// Searches for the series best matching `query`.
    ///
    /// # Arguments
    ///
    /// * `query` - Free-text show name as entered by the user
    ///
    /// # Returns
    ///
    /// The status code and parsed body, or a FetchError if no status could
    /// be obtained or a 200 body could not be decoded
    fn fetch(&self, query: &str) -> Result<FetchResponse, FetchError>;
}
