use chrono::NaiveDate;
use std::time::Duration;

use crate::error::FetchError;
use crate::models::RawSeries;

pub mod fred_client;
pub use fred_client::FredClient;

/// Simple rate limiter for API requests
pub struct ApiRateLimiter {
    delay_ms: u64,
}

impl ApiRateLimiter {
    pub fn new(requests_per_minute: u32) -> Self {
        let delay_ms = if requests_per_minute > 0 {
            60_000 / requests_per_minute as u64
        } else {
            1000 // Default 1 second delay
        };

        Self { delay_ms }
    }

    pub async fn wait(&self) {
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
    }
}

/// A source of economic time series. One call is one provider round-trip;
/// retry policy lives in the fetcher, not here.
#[async_trait::async_trait]
pub trait EconDataProvider: Send + Sync {
    async fn fetch_series(
        &self,
        series_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<RawSeries, FetchError>;
}
