use chrono::NaiveDate;
use thiserror::Error;

/// Transient failure while retrieving one series from the data provider.
/// Recovered by retry and, at the aggregator boundary, by substituting a
/// placeholder column; never surfaced to the end user as a hard failure.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to data provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned status {status}: {body}")]
    Provider {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed provider response: {0}")]
    Malformed(String),

    #[error("all {attempts} attempts failed for series {series_id}: {source}")]
    RetriesExhausted {
        series_id: String,
        attempts: u32,
        #[source]
        source: Box<FetchError>,
    },
}

/// Caller misuse: rejected immediately, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("no countries selected")]
    EmptyCountryList,

    #[error("unknown country '{0}'")]
    UnknownCountry(String),

    #[error("start date {start} is after end date {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}
