//! HTTP behaviour of the puzzle site client against a local mock server.

use fetchday_adapters::AocClient;
use fetchday_core::{
    application::{ApplicationError, ports::PuzzleSource},
    domain::{Day, PuzzleId, Year},
    error::FetchDayError,
};
use httpmock::prelude::*;

fn puzzle() -> PuzzleId {
    PuzzleId::new(Year::new(2021).unwrap(), Day::new(1).unwrap())
}

#[test]
fn sends_session_cookie() {
    let server = MockServer::start();
    let input_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/2021/day/1/input")
            .header("cookie", "session=abc123");
        then.status(200).body("199\n200\n208\n");
    });

    let client = AocClient::with_base_url(server.base_url(), "abc123").unwrap();
    let input = client.fetch_input(&puzzle()).unwrap();

    input_mock.assert();
    assert_eq!(input, "199\n200\n208\n");
}

#[test]
fn fetches_the_puzzle_page() {
    let server = MockServer::start();
    let page_mock = server.mock(|when, then| {
        when.method(GET).path("/2021/day/1");
        then.status(200).body("<article><p>Sonar</p></article>");
    });

    let client = AocClient::with_base_url(server.base_url(), "abc123").unwrap();
    let html = client.fetch_instructions(&puzzle()).unwrap();

    page_mock.assert();
    assert!(html.contains("Sonar"));
}

#[test]
fn not_found_means_not_available() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/2021/day/1/input");
        then.status(404);
    });

    let client = AocClient::with_base_url(server.base_url(), "abc123").unwrap();
    let err = client.fetch_input(&puzzle()).unwrap_err();

    assert!(matches!(
        err,
        FetchDayError::Application(ApplicationError::PuzzleNotAvailable { .. })
    ));
}

#[test]
fn bad_session_is_rejected() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/2021/day/1/input");
        then.status(400).body("Puzzle inputs differ by user.  Please log in to get your puzzle input.");
    });

    let client = AocClient::with_base_url(server.base_url(), "expired").unwrap();
    let err = client.fetch_input(&puzzle()).unwrap_err();

    assert!(matches!(
        err,
        FetchDayError::Application(ApplicationError::SessionRejected { status: 400 })
    ));
}

#[test]
fn server_error_is_a_fetch_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/2021/day/1");
        then.status(500);
    });

    let client = AocClient::with_base_url(server.base_url(), "abc123").unwrap();
    let err = client.fetch_instructions(&puzzle()).unwrap_err();

    assert!(err.is_retryable());
}
