//! Retrying series fetcher.
//!
//! Wraps an [`EconDataProvider`] with the bounded retry policy: up to a fixed
//! number of attempts per series with a short backoff between them. An empty
//! but successful response is a valid "no data" result and is not retried.

use chrono::NaiveDate;
use std::time::Duration;
use tracing::warn;

use crate::api::EconDataProvider;
use crate::error::FetchError;
use crate::models::{Config, RawSeries};

pub struct SeriesFetcher<P> {
    provider: P,
    retry_attempts: u32,
    retry_backoff: Duration,
}

impl<P: EconDataProvider> SeriesFetcher<P> {
    pub fn new(provider: P, config: &Config) -> Self {
        Self {
            provider,
            // At least one attempt, whatever the config says.
            retry_attempts: config.retry_attempts.max(1),
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }

    pub fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Fetch one raw series, retrying transient provider failures. The retry
    /// budget is per call, so concurrent fetches of different series do not
    /// share it.
    pub async fn fetch(
        &self,
        series_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<RawSeries, FetchError> {
        let mut last_error: Option<FetchError> = None;

        for attempt in 1..=self.retry_attempts {
            match self
                .provider
                .fetch_series(series_id, start_date, end_date)
                .await
            {
                Ok(series) => return Ok(series),
                Err(e) => {
                    if attempt < self.retry_attempts {
                        warn!(
                            "Attempt {} failed for {}: {}. Retrying...",
                            attempt, series_id, e
                        );
                        tokio::time::sleep(self.retry_backoff).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        let source = last_error.unwrap_or_else(|| {
            FetchError::Malformed("retry loop exited without an error".to_string())
        });
        Err(FetchError::RetriesExhausted {
            series_id: series_id.to_string(),
            attempts: self.retry_attempts,
            source: Box::new(source),
        })
    }
}
