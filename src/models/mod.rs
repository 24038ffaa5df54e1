use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// The three macroeconomic indicators tracked by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorKind {
    Gdp,
    Unemployment,
    Inflation,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 3] = [
        IndicatorKind::Gdp,
        IndicatorKind::Unemployment,
        IndicatorKind::Inflation,
    ];

    /// Human-readable title used in rendered output.
    pub fn title(&self) -> &'static str {
        match self {
            IndicatorKind::Gdp => "GDP Growth",
            IndicatorKind::Unemployment => "Unemployment",
            IndicatorKind::Inflation => "Inflation",
        }
    }

    /// Suffix appended to country columns in the combined CSV export.
    pub fn column_suffix(&self) -> &'static str {
        match self {
            IndicatorKind::Gdp => "GDP",
            IndicatorKind::Unemployment => "Unemployment",
            IndicatorKind::Inflation => "Inflation",
        }
    }
}

/// Native observation cadence of a series, inferred from timestamp spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Annual,
}

impl Frequency {
    /// Infer the cadence from the median gap between consecutive observations.
    /// Returns `None` for series with fewer than two points.
    pub fn infer(dates: &[NaiveDate]) -> Option<Frequency> {
        if dates.len() < 2 {
            return None;
        }
        let mut gaps: Vec<i64> = dates
            .windows(2)
            .map(|w| (w[1] - w[0]).num_days())
            .collect();
        gaps.sort_unstable();
        let median = gaps[gaps.len() / 2];
        Some(match median {
            d if d <= 3 => Frequency::Daily,
            d if d <= 10 => Frequency::Weekly,
            d if d <= 45 => Frequency::Monthly,
            d if d <= 135 => Frequency::Quarterly,
            _ => Frequency::Annual,
        })
    }

    pub fn is_finer_than_quarterly(&self) -> bool {
        matches!(
            self,
            Frequency::Daily | Frequency::Weekly | Frequency::Monthly
        )
    }

    /// Ordinal of the period containing `date`, so that consecutive periods
    /// differ by exactly one.
    pub fn period_index(&self, date: NaiveDate) -> i64 {
        match self {
            Frequency::Daily => i64::from(date.num_days_from_ce()),
            Frequency::Weekly => i64::from(date.num_days_from_ce()) / 7,
            Frequency::Monthly => i64::from(date.year()) * 12 + i64::from(date.month0()),
            Frequency::Quarterly => i64::from(date.year()) * 4 + i64::from(date.month0() / 3),
            Frequency::Annual => i64::from(date.year()),
        }
    }

    /// Number of periods in the inclusive span `[first, last]`.
    pub fn expected_periods(&self, first: NaiveDate, last: NaiveDate) -> usize {
        let span = self.period_index(last) - self.period_index(first) + 1;
        span.max(0) as usize
    }
}

/// Last calendar day of the quarter containing `date`.
pub fn quarter_end(date: NaiveDate) -> NaiveDate {
    let (month, day) = match date.month() {
        1..=3 => (3, 31),
        4..=6 => (6, 30),
        7..=9 => (9, 30),
        _ => (12, 31),
    };
    NaiveDate::from_ymd_opt(date.year(), month, day).expect("valid quarter end")
}

/// Quarter-end dates falling inside `[start, end]`, ascending. Used to build
/// placeholder columns when a country's fetch fails.
pub fn quarter_ends_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut out = Vec::new();
    let mut cursor = quarter_end(start);
    while cursor <= end {
        out.push(cursor);
        // First day of the next quarter, then its end.
        let next = cursor + chrono::Duration::days(1);
        cursor = quarter_end(next);
    }
    out
}

/// Requested observation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whole-year window matching the original dashboard's year selectors:
    /// Jan 1 of `start_year` through Dec 31 of `end_year`.
    pub fn from_years(start_year: i32, end_year: i32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(start_year, 1, 1)?;
        let end = NaiveDate::from_ymd_opt(end_year, 12, 31)?;
        Some(Self { start, end })
    }
}

/// One observation: a timestamp and a possibly-missing value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// Raw time series for one provider series id, ordered by date ascending.
/// Missing observations keep their timestamp with `value: None`.
#[derive(Debug, Clone)]
pub struct RawSeries {
    pub series_id: String,
    pub points: Vec<DataPoint>,
}

impl RawSeries {
    pub fn new(series_id: impl Into<String>, points: Vec<DataPoint>) -> Self {
        Self {
            series_id: series_id.into(),
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn native_frequency(&self) -> Option<Frequency> {
        let dates: Vec<NaiveDate> = self.points.iter().map(|p| p.date).collect();
        Frequency::infer(&dates)
    }
}

/// A raw series after the indicator-specific transformation. Timestamp order
/// is preserved from the raw input; resampling may shorten it but nothing is
/// densified or interpolated.
#[derive(Debug, Clone)]
pub struct TransformedSeries {
    pub points: Vec<DataPoint>,
    pub frequency: Option<Frequency>,
}

impl TransformedSeries {
    pub fn defined_count(&self) -> usize {
        self.points.iter().filter(|p| p.value.is_some()).count()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

/// Data-completeness tier, recomputed per render and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityStatus {
    Good,
    Partial,
    Bad,
}

impl AvailabilityStatus {
    /// Status glyph shown next to each indicator tab.
    pub fn glyph(&self) -> &'static str {
        match self {
            AvailabilityStatus::Good => "🟢",
            AvailabilityStatus::Partial => "🟡",
            AvailabilityStatus::Bad => "🔴",
        }
    }
}

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub fred_api_key: String,
    pub fred_base_url: String,
    pub request_timeout_secs: u64,
    pub retry_attempts: u32,
    pub retry_backoff_ms: u64,
    pub rate_limit_per_minute: u32,
}

impl Config {
    /// Load configuration from environment variables. The FRED API key is
    /// required and has no default; everything else falls back to sane
    /// defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Ok(Config {
            fred_api_key: std::env::var("FRED_API_KEY")
                .map_err(|_| anyhow::anyhow!("FRED_API_KEY environment variable required"))?,
            fred_base_url: std::env::var("FRED_BASE_URL")
                .unwrap_or_else(|_| "https://api.stlouisfed.org/fred".to_string()),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
            retry_attempts: std::env::var("RETRY_ATTEMPTS")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .unwrap_or(3),
            retry_backoff_ms: std::env::var("RETRY_BACKOFF_MS")
                .unwrap_or_else(|_| "500".to_string())
                .parse()
                .unwrap_or(500),
            rate_limit_per_minute: std::env::var("RATE_LIMIT_PER_MINUTE")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .unwrap_or(120),
        })
    }
}
