/// TVMaze search implementation.
use super::tvmaze_types::{TvMazeEpisode, TvMazeShow};
use super::{Episode, FetchError, FetchResponse, SeriesFetcher, SeriesResult};
use reqwest::Url;
use std::time::Duration;

/// Public TVMaze API root.
pub const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com";

/// Series fetcher for the TVMaze API.
///
/// This fetcher queries https://api.tvmaze.com using the singlesearch
/// endpoint with embedded episodes, so one request yields the show name and
/// every episode rating.
pub struct TvMazeFetcher {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl TvMazeFetcher {
    /// Creates a new TVMaze fetcher.
    ///
    /// # Arguments
    ///
    /// * `base_url` - API root, normally [`DEFAULT_BASE_URL`]
    /// * `timeout` - Upper bound for a whole request including the body
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::RequestError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Builds the singlesearch URL for a query, url-encoding the show name.
    pub(crate) fn search_url(&self, query: &str) -> Result<Url, FetchError> {
        let endpoint = format!(
            "{}/singlesearch/shows",
            self.base_url.trim_end_matches('/')
        );
        Url::parse_with_params(&endpoint, &[("q", query), ("embed", "episodes")])
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", endpoint, e)))
    }

    /// Converts a TVMaze episode to our internal Episode structure.
    fn convert_episode(tvmaze_episode: TvMazeEpisode) -> Episode {
        Episode {
            season: tvmaze_episode.season,
            number: tvmaze_episode.number,
            name: tvmaze_episode.name,
            rating: tvmaze_episode.rating.and_then(|r| r.average),
        }
    }

    /// Converts TVMaze show data to a SeriesResult, keeping API episode order.
    fn convert_to_series(tvmaze_show: TvMazeShow) -> SeriesResult {
        let episodes = tvmaze_show
            .embedded
            .map(|embedded| embedded.episodes)
            .unwrap_or_default()
            .into_iter()
            .map(Self::convert_episode)
            .collect();

        SeriesResult {
            name: tvmaze_show.name,
            episodes,
        }
    }

    /// Decodes a singlesearch JSON body.
    pub(crate) fn parse_body(body: &str) -> Result<SeriesResult, FetchError> {
        let tvmaze_show: TvMazeShow =
            serde_json::from_str(body).map_err(|e| FetchError::ParseError(e.to_string()))?;
        Ok(Self::convert_to_series(tvmaze_show))
    }
}

impl SeriesFetcher for TvMazeFetcher {
    fn fetch(&self, query: &str) -> Result<FetchResponse, FetchError> {
        let url = self.search_url(query)?;

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::RequestError(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            return Ok(FetchResponse::status(status));
        }

        let body = response
            .text()
            .map_err(|e| FetchError::RequestError(e.to_string()))?;

        Ok(FetchResponse::ok(Self::parse_body(&body)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serves exactly one HTTP response on a local port and returns its base URL
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request: Vec<u8> = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let read = stream.read(&mut chunk).unwrap();
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..read]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        (base_url, handle)
    }

    fn fetcher() -> TvMazeFetcher {
        TvMazeFetcher::new(DEFAULT_BASE_URL, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_search_url_encodes_query() {
        let url = fetcher().search_url("Breaking Bad & Co").unwrap();
        assert_eq!(url.path(), "/singlesearch/shows");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "Breaking Bad & Co".to_string()),
                ("embed".to_string(), "episodes".to_string()),
            ]
        );
        assert!(!url.as_str().contains(" & "));
    }

    #[test]
    fn test_search_url_tolerates_trailing_slash() {
        let fetcher = TvMazeFetcher::new("http://localhost:8080/", Duration::from_secs(1)).unwrap();
        let url = fetcher.search_url("x").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/singlesearch/shows?q=x&embed=episodes"
        );
    }

    #[test]
    fn test_search_url_rejects_invalid_base() {
        let fetcher = TvMazeFetcher::new("not a url", Duration::from_secs(1)).unwrap();
        assert!(matches!(
            fetcher.search_url("x"),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_parse_body_keeps_order_and_null_ratings() {
        let body = r#"{
            "id": 169,
            "name": "Breaking Bad",
            "_embedded": {
                "episodes": [
                    {"season": 1, "number": 1, "name": "Pilot", "rating": {"average": 8.2}},
                    {"season": 1, "number": 2, "name": "Cat's in the Bag...", "rating": {"average": null}},
                    {"season": 2, "number": null, "name": null},
                    {"season": 2, "number": 1, "name": "Seven Thirty-Seven", "rating": null}
                ]
            }
        }"#;

        let series = TvMazeFetcher::parse_body(body).unwrap();
        assert_eq!(series.name, "Breaking Bad");
        assert_eq!(series.episodes.len(), 4);
        assert_eq!(series.episodes[0].rating, Some(8.2));
        assert_eq!(series.episodes[0].name.as_deref(), Some("Pilot"));
        assert_eq!(series.episodes[1].rating, None);
        assert_eq!(series.episodes[2].season, 2);
        assert_eq!(series.episodes[2].number, None);
        assert_eq!(series.episodes[2].rating, None);
        assert_eq!(series.episodes[3].rating, None);
    }

    #[test]
    fn test_parse_body_without_embedded_episodes() {
        let series = TvMazeFetcher::parse_body(r#"{"name": "Lonely Show"}"#).unwrap();
        assert_eq!(series.name, "Lonely Show");
        assert!(series.episodes.is_empty());
    }

    #[test]
    fn test_parse_body_rejects_garbage() {
        assert!(matches!(
            TvMazeFetcher::parse_body("<html>"),
            Err(FetchError::ParseError(_))
        ));
    }

    #[test]
    fn test_fetch_passes_non_ok_status_through() {
        for (status_line, status) in [("404 Not Found", 404), ("500 Internal Server Error", 500)] {
            let (base_url, server) = serve_once(status_line, "{\"name\": \"ignored\"}");
            let fetcher = TvMazeFetcher::new(base_url, Duration::from_secs(5)).unwrap();

            let response = fetcher.fetch("missing show").unwrap();

            assert_eq!(response, FetchResponse::status(status));
            server.join().unwrap();
        }
    }

    #[test]
    fn test_fetch_decodes_ok_body() {
        let body = r#"{"name": "Dark", "_embedded": {"episodes": [{"season": 1, "number": 1, "name": "Secrets", "rating": {"average": 8.3}}]}}"#;
        let (base_url, server) = serve_once("200 OK", body);
        let fetcher = TvMazeFetcher::new(base_url, Duration::from_secs(5)).unwrap();

        let response = fetcher.fetch("dark").unwrap();

        assert_eq!(response.status, 200);
        let series = response.body.expect("200 carries a body");
        assert_eq!(series.name, "Dark");
        assert_eq!(series.episodes.len(), 1);
        assert_eq!(series.episodes[0].rating, Some(8.3));

        let request = server.join().unwrap();
        assert!(request.starts_with("GET /singlesearch/shows?q=dark&embed=episodes "));
    }

    #[test]
    fn test_fetch_reports_undecodable_ok_body() {
        let (base_url, server) = serve_once("200 OK", "not json");
        let fetcher = TvMazeFetcher::new(base_url, Duration::from_secs(5)).unwrap();

        assert!(matches!(
            fetcher.fetch("dark"),
            Err(FetchError::ParseError(_))
        ));
        server.join().unwrap();
    }
}
