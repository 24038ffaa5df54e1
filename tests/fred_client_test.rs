//! HTTP-level tests for the FRED client behind a mock server: payload
//! parsing, missing-value handling, and how the retrying fetcher treats
//! provider failures versus legitimately empty responses.

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use assert_matches::assert_matches;

use econ_dashboard::api::{EconDataProvider, FredClient};
use econ_dashboard::error::FetchError;
use econ_dashboard::fetcher::SeriesFetcher;
use econ_dashboard::models::Config;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn config_for(server: &MockServer) -> Config {
    Config {
        fred_api_key: "test-key".to_string(),
        fred_base_url: format!("{}/fred", server.uri()),
        request_timeout_secs: 5,
        retry_attempts: 3,
        retry_backoff_ms: 0,
        // Keep the limiter delay negligible in tests.
        rate_limit_per_minute: 60_000,
    }
}

#[tokio::test]
async fn observations_parse_with_missing_values_kept_in_place() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fred/series/observations"))
        .and(query_param("series_id", "GDPC1"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("file_type", "json"))
        .and(query_param("observation_start", "2023-01-01"))
        .and(query_param("observation_end", "2023-12-31"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "realtime_start": "2024-01-01",
            "realtime_end": "2024-01-01",
            "units": "lin",
            "observations": [
                { "date": "2023-03-31", "value": "100.5" },
                { "date": "2023-06-30", "value": "." },
                { "date": "2023-09-30", "value": "101.25" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = FredClient::new(&config_for(&server)).unwrap();
    let series = client
        .fetch_series("GDPC1", d(2023, 1, 1), d(2023, 12, 31))
        .await
        .unwrap();

    assert_eq!(series.series_id, "GDPC1");
    assert_eq!(series.points.len(), 3);
    assert_eq!(series.points[0].date, d(2023, 3, 31));
    assert_eq!(series.points[0].value, Some(100.5));
    // The "." observation keeps its timestamp with an undefined value.
    assert_eq!(series.points[1].value, None);
    assert_eq!(series.points[2].value, Some(101.25));
}

#[tokio::test]
async fn provider_errors_are_retried_to_exhaustion() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fred/series/observations"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .expect(3)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let fetcher = SeriesFetcher::new(FredClient::new(&config).unwrap(), &config);

    let err = fetcher
        .fetch("UNRATE", d(2023, 1, 1), d(2023, 12, 31))
        .await
        .unwrap_err();

    assert_matches!(
        err,
        FetchError::RetriesExhausted { attempts: 3, ref series_id, .. } if series_id == "UNRATE"
    );
}

#[tokio::test]
async fn empty_successful_response_is_valid_and_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fred/series/observations"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "observations": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let fetcher = SeriesFetcher::new(FredClient::new(&config).unwrap(), &config);

    let series = fetcher
        .fetch("NODATA", d(2023, 1, 1), d(2023, 12, 31))
        .await
        .unwrap();
    assert!(series.is_empty());
}

#[tokio::test]
async fn undecodable_body_is_a_malformed_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fred/series/observations"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = FredClient::new(&config_for(&server)).unwrap();
    let err = client
        .fetch_series("GDPC1", d(2023, 1, 1), d(2023, 12, 31))
        .await
        .unwrap_err();
    assert_matches!(err, FetchError::Malformed(_));
}
