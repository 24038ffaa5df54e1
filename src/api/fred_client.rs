use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::FetchError;
use crate::models::{Config, DataPoint, RawSeries};
use super::{ApiRateLimiter, EconDataProvider};

const OBSERVATIONS_PATH: &str = "/series/observations";

/// FRED API client for the observations endpoint.
///
/// Series ids are opaque; no local validation is attempted. Observations the
/// provider reports as missing (`"."`) keep their timestamp with an undefined
/// value so downstream alignment holds.
pub struct FredClient {
    client: Client,
    base_url: String,
    api_key: String,
    rate_limiter: ApiRateLimiter,
}

/// FRED observations payload (the fields we consume).
#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<Observation>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    date: String,
    value: String,
}

impl FredClient {
    /// Create a new FRED client
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .user_agent("econ-dashboard/1.0")
            .build()?;

        Ok(Self {
            client,
            base_url: config.fred_base_url.trim_end_matches('/').to_string(),
            api_key: config.fred_api_key.clone(),
            rate_limiter: ApiRateLimiter::new(config.rate_limit_per_minute),
        })
    }

    fn observations_url(&self) -> String {
        format!("{}{}", self.base_url, OBSERVATIONS_PATH)
    }
}

#[async_trait::async_trait]
impl EconDataProvider for FredClient {
    async fn fetch_series(
        &self,
        series_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<RawSeries, FetchError> {
        self.rate_limiter.wait().await;

        let url = self.observations_url();
        debug!("Fetching series {} from {} to {}", series_id, start_date, end_date);

        let observation_start = start_date.to_string();
        let observation_end = end_date.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("series_id", series_id),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
                ("sort_order", "asc"),
                ("observation_start", observation_start.as_str()),
                ("observation_end", observation_end.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Provider { status, body });
        }

        let payload: ObservationsResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Malformed(format!("undecodable observations body: {e}")))?;

        let mut points = Vec::with_capacity(payload.observations.len());
        for obs in payload.observations {
            let date = NaiveDate::parse_from_str(&obs.date, "%Y-%m-%d").map_err(|e| {
                FetchError::Malformed(format!("invalid observation date '{}': {e}", obs.date))
            })?;
            points.push(DataPoint {
                date,
                value: parse_observation_value(&obs.value),
            });
        }

        debug!("Retrieved {} observations for {}", points.len(), series_id);
        Ok(RawSeries::new(series_id, points))
    }
}

/// FRED encodes missing observations as "."; anything non-numeric or
/// non-finite is treated the same way.
fn parse_observation_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == "." || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    v.is_finite().then_some(v)
}
