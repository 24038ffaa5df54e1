//! Dashboard assembly.
//!
//! One user interaction produces one [`DashboardSnapshot`]: each indicator
//! table is fetched exactly once and every consuming view (tab rendering,
//! side-by-side comparison, CSV export) reads from the same snapshot. Nothing
//! here is retained across interactions.

use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

use crate::aggregator::{IndicatorTable, MultiCountryAggregator};
use crate::api::EconDataProvider;
use crate::availability::classify_table;
use crate::catalog::CountryEntry;
use crate::error::InputError;
use crate::fetcher::SeriesFetcher;
use crate::models::{AvailabilityStatus, DateRange, IndicatorKind};

/// One indicator's table plus its completeness status, handed to the
/// presentation layer together.
#[derive(Debug, Clone)]
pub struct IndicatorView {
    pub table: IndicatorTable,
    pub status: AvailabilityStatus,
}

/// All three indicator views for one selection of countries and dates.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub range: DateRange,
    pub countries: Vec<CountryEntry>,
    pub gdp: IndicatorView,
    pub unemployment: IndicatorView,
    pub inflation: IndicatorView,
}

/// Side-by-side numbers for one indicator: latest defined value per country
/// and the signed difference (first minus second).
#[derive(Debug, Clone, PartialEq)]
pub struct MetricComparison {
    pub indicator: IndicatorKind,
    pub first: Option<f64>,
    pub second: Option<f64>,
    pub difference: Option<f64>,
}

/// Two-country comparison across all indicators.
#[derive(Debug, Clone)]
pub struct CountryComparison {
    pub first_label: String,
    pub second_label: String,
    pub metrics: Vec<MetricComparison>,
}

/// Column-wise concatenation of the three indicator tables, ready for CSV
/// export.
#[derive(Debug, Clone)]
pub struct CombinedTable {
    pub dates: Vec<NaiveDate>,
    pub columns: Vec<CombinedColumn>,
}

#[derive(Debug, Clone)]
pub struct CombinedColumn {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl DashboardSnapshot {
    /// Fetch and assemble all three indicator tables for one interaction.
    pub async fn build<P: EconDataProvider>(
        fetcher: &SeriesFetcher<P>,
        countries: &[CountryEntry],
        range: DateRange,
    ) -> Result<Self, InputError> {
        let aggregator = MultiCountryAggregator::new(fetcher);

        let (gdp, unemployment, inflation) = tokio::try_join!(
            aggregator.aggregate(countries, IndicatorKind::Gdp, range),
            aggregator.aggregate(countries, IndicatorKind::Unemployment, range),
            aggregator.aggregate(countries, IndicatorKind::Inflation, range),
        )?;

        Ok(Self {
            range,
            countries: countries.to_vec(),
            gdp: into_view(gdp),
            unemployment: into_view(unemployment),
            inflation: into_view(inflation),
        })
    }

    pub fn view(&self, indicator: IndicatorKind) -> &IndicatorView {
        match indicator {
            IndicatorKind::Gdp => &self.gdp,
            IndicatorKind::Unemployment => &self.unemployment,
            IndicatorKind::Inflation => &self.inflation,
        }
    }

    pub fn views(&self) -> [&IndicatorView; 3] {
        [&self.gdp, &self.unemployment, &self.inflation]
    }

    /// Latest values and signed differences for two selected countries.
    /// `None` if either label is not part of this snapshot.
    pub fn compare(&self, first: &str, second: &str) -> Option<CountryComparison> {
        let known = |label: &str| self.countries.iter().any(|c| c.label == label);
        if !known(first) || !known(second) {
            return None;
        }

        let metrics = IndicatorKind::ALL
            .iter()
            .map(|&indicator| {
                let table = &self.view(indicator).table;
                let a = table.latest_defined(first).map(|(_, v)| v);
                let b = table.latest_defined(second).map(|(_, v)| v);
                MetricComparison {
                    indicator,
                    first: a,
                    second: b,
                    difference: a.zip(b).map(|(x, y)| x - y),
                }
            })
            .collect();

        Some(CountryComparison {
            first_label: first.to_string(),
            second_label: second.to_string(),
            metrics,
        })
    }

    /// Concatenate the three tables column-wise over the union of their
    /// dates, with indicator-qualified column names (`<country>_GDP`, ...).
    pub fn combined_table(&self) -> CombinedTable {
        let mut all_dates: BTreeSet<NaiveDate> = BTreeSet::new();
        for view in self.views() {
            all_dates.extend(view.table.dates.iter().copied());
        }
        let dates: Vec<NaiveDate> = all_dates.into_iter().rev().collect();

        let mut columns = Vec::new();
        for view in self.views() {
            let table = &view.table;
            let row_of: HashMap<NaiveDate, usize> = table
                .dates
                .iter()
                .enumerate()
                .map(|(i, d)| (*d, i))
                .collect();
            for column in &table.columns {
                columns.push(CombinedColumn {
                    name: format!("{}_{}", column.label, table.indicator.column_suffix()),
                    values: dates
                        .iter()
                        .map(|d| row_of.get(d).and_then(|&i| column.values[i]))
                        .collect(),
                });
            }
        }

        CombinedTable { dates, columns }
    }
}

fn into_view(table: IndicatorTable) -> IndicatorView {
    let status = classify_table(&table);
    IndicatorView { table, status }
}
