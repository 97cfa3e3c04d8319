//! HTTP client for the puzzle site.

use std::fmt;
use std::time::Duration;

use reqwest::{StatusCode, blocking::Client, header};
use tracing::{debug, instrument};

use fetchday_core::{
    application::{ApplicationError, ports::PuzzleSource},
    domain::PuzzleId,
    error::{FetchDayError, FetchDayResult},
};

pub const DEFAULT_BASE_URL: &str = "https://adventofcode.com";

const USER_AGENT: &str = concat!(
    "fetch-day/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/cosecruz/fetchday)"
);

/// Blocking client authenticated with a session cookie.
pub struct AocClient {
    client: Client,
    base_url: String,
    session_token: String,
}

impl AocClient {
    pub fn new(session_token: impl Into<String>) -> FetchDayResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, session_token)
    }

    /// Client against another host (mirrors, tests).
    pub fn with_base_url(
        base_url: impl Into<String>,
        session_token: impl Into<String>,
    ) -> FetchDayResult<Self> {
        let base_url = base_url.into();
        let usable = reqwest::Url::parse(&base_url)
            .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host());
        if !usable {
            return Err(FetchDayError::Configuration {
                message: format!("remote.base_url '{base_url}' is not an http(s) URL"),
            });
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApplicationError::FetchFailed {
                url: base_url.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_token: session_token.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self, puzzle), fields(puzzle = %puzzle))]
    fn get(&self, puzzle: &PuzzleId, path: &str) -> FetchDayResult<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");

        let fetch_failed = |reason: String| ApplicationError::FetchFailed {
            url: url.clone(),
            reason,
        };

        let response = self
            .client
            .get(&url)
            .header(header::COOKIE, format!("session={}", self.session_token))
            .send()
            .map_err(|e| fetch_failed(e.to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), "Response received");

        match status {
            s if s.is_success() => Ok(response.text().map_err(|e| fetch_failed(e.to_string()))?),
            StatusCode::NOT_FOUND => Err(ApplicationError::PuzzleNotAvailable {
                puzzle: puzzle.to_string(),
            }
            .into()),
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(ApplicationError::SessionRejected {
                    status: status.as_u16(),
                }
                .into())
            }
            other => Err(fetch_failed(format!("unexpected status {other}")).into()),
        }
    }
}

impl fmt::Debug for AocClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AocClient")
            .field("base_url", &self.base_url)
            .field("session_token", &"<redacted>")
            .finish()
    }
}

impl PuzzleSource for AocClient {
    fn fetch_instructions(&self, puzzle: &PuzzleId) -> FetchDayResult<String> {
        self.get(puzzle, &puzzle.puzzle_path())
    }

    fn fetch_input(&self, puzzle: &PuzzleId) -> FetchDayResult<String> {
        self.get(puzzle, &puzzle.input_path())
    }

    fn puzzle_url(&self, puzzle: &PuzzleId) -> String {
        format!("{}{}", self.base_url, puzzle.puzzle_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fetchday_core::domain::{Day, Year};

    #[test]
    fn trailing_slash_is_dropped() {
        let client = AocClient::with_base_url("http://localhost:8080/", "token").unwrap();
        let puzzle = PuzzleId::new(Year::new(2021).unwrap(), Day::new(1).unwrap());
        assert_eq!(client.puzzle_url(&puzzle), "http://localhost:8080/2021/day/1");
    }

    #[test]
    fn non_http_base_url_is_a_configuration_error() {
        for bad in ["ftp://adventofcode.com", "adventofcode.com", ""] {
            let err = AocClient::with_base_url(bad, "token").unwrap_err();
            assert!(
                matches!(err, FetchDayError::Configuration { .. }),
                "{bad}: {err}"
            );
        }
    }

    #[test]
    fn debug_hides_token() {
        let client = AocClient::new("secret-session").unwrap();
        assert!(!format!("{client:?}").contains("secret-session"));
    }
}
