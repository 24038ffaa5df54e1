//! Multi-country aggregation.
//!
//! For one indicator, fans the fetch+transform pipeline out across the
//! selected countries and assembles the per-country series into a single
//! table keyed by country, rows sorted by date descending. A country whose
//! fetch ultimately fails (or returns no data at all) contributes an
//! all-undefined column spanning the requested range, so the table always has
//! one column per requested country in input order.

use chrono::NaiveDate;
use futures::future::join_all;
use std::collections::{BTreeSet, HashMap};
use tracing::{info, warn};

use crate::api::EconDataProvider;
use crate::catalog::CountryEntry;
use crate::error::InputError;
use crate::fetcher::SeriesFetcher;
use crate::models::{
    quarter_ends_in_range, DataPoint, DateRange, Frequency, IndicatorKind, TransformedSeries,
};
use crate::transform::transform;

/// One country's column in an indicator table.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryColumn {
    pub label: String,
    pub values: Vec<Option<f64>>,
}

/// 2-D view of one indicator across countries: rows are time periods sorted
/// descending, columns follow the input country order.
#[derive(Debug, Clone)]
pub struct IndicatorTable {
    pub indicator: IndicatorKind,
    pub dates: Vec<NaiveDate>,
    pub columns: Vec<CountryColumn>,
}

impl IndicatorTable {
    pub fn row_count(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.columns.is_empty()
    }

    pub fn column_labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    pub fn column(&self, label: &str) -> Option<&CountryColumn> {
        self.columns.iter().find(|c| c.label == label)
    }

    /// Most recent defined value in a column (rows are date-descending).
    pub fn latest_defined(&self, label: &str) -> Option<(NaiveDate, f64)> {
        let column = self.column(label)?;
        self.dates
            .iter()
            .zip(&column.values)
            .find_map(|(date, value)| value.map(|v| (*date, v)))
    }

    /// Copy of the table limited to the `n` most recent rows, for display.
    pub fn top_rows(&self, n: usize) -> IndicatorTable {
        let n = n.min(self.dates.len());
        IndicatorTable {
            indicator: self.indicator,
            dates: self.dates[..n].to_vec(),
            columns: self
                .columns
                .iter()
                .map(|c| CountryColumn {
                    label: c.label.clone(),
                    values: c.values[..n].to_vec(),
                })
                .collect(),
        }
    }
}

/// Fans fetch+transform out across countries for one indicator.
pub struct MultiCountryAggregator<'a, P> {
    fetcher: &'a SeriesFetcher<P>,
}

impl<'a, P: EconDataProvider> MultiCountryAggregator<'a, P> {
    pub fn new(fetcher: &'a SeriesFetcher<P>) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &'a SeriesFetcher<P> {
        self.fetcher
    }

    /// Build the indicator table for the given countries and window.
    ///
    /// Only input-shape violations are errors; a single country's fetch
    /// failure is contained here and becomes a placeholder column.
    pub async fn aggregate(
        &self,
        countries: &[CountryEntry],
        indicator: IndicatorKind,
        range: DateRange,
    ) -> Result<IndicatorTable, InputError> {
        if countries.is_empty() {
            return Err(InputError::EmptyCountryList);
        }
        if range.start > range.end {
            return Err(InputError::InvalidDateRange {
                start: range.start,
                end: range.end,
            });
        }

        info!(
            "📊 Aggregating {} for {} countries ({} to {})",
            indicator.title(),
            countries.len(),
            range.start,
            range.end
        );

        // Per-country fetches are independent; join_all keeps input order.
        let fetches = countries.iter().map(|country| async move {
            let series_id = country.series_id(indicator);
            match self.fetcher.fetch(series_id, range.start, range.end).await {
                Ok(raw) if raw.is_empty() => {
                    info!(
                        "No data for {} ({}); using placeholder column",
                        country.label, series_id
                    );
                    placeholder_series(range)
                }
                Ok(raw) => transform(&raw, indicator),
                Err(e) => {
                    warn!(
                        "❌ Fetch failed for {} ({}): {}. Using placeholder column",
                        country.label, series_id, e
                    );
                    placeholder_series(range)
                }
            }
        });
        let series: Vec<TransformedSeries> = join_all(fetches).await;

        Ok(assemble_table(indicator, countries, &series))
    }
}

/// All-undefined quarterly column spanning the requested range.
fn placeholder_series(range: DateRange) -> TransformedSeries {
    let points = quarter_ends_in_range(range.start, range.end)
        .into_iter()
        .map(|date| DataPoint { date, value: None })
        .collect();
    TransformedSeries {
        points,
        frequency: Some(Frequency::Quarterly),
    }
}

/// Align per-country series on the union of their timestamps and sort rows
/// descending.
fn assemble_table(
    indicator: IndicatorKind,
    countries: &[CountryEntry],
    series: &[TransformedSeries],
) -> IndicatorTable {
    let mut all_dates: BTreeSet<NaiveDate> = BTreeSet::new();
    for s in series {
        all_dates.extend(s.points.iter().map(|p| p.date));
    }
    let dates: Vec<NaiveDate> = all_dates.into_iter().rev().collect();

    let columns = countries
        .iter()
        .zip(series)
        .map(|(country, s)| {
            let by_date: HashMap<NaiveDate, Option<f64>> =
                s.points.iter().map(|p| (p.date, p.value)).collect();
            CountryColumn {
                label: country.label.clone(),
                values: dates
                    .iter()
                    .map(|d| by_date.get(d).copied().flatten())
                    .collect(),
            }
        })
        .collect();

    IndicatorTable {
        indicator,
        dates,
        columns,
    }
}
