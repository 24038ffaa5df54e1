//! Data-completeness classification.
//!
//! Pure functions from a series or table to a three-level status, recomputed
//! per render. Thresholds: 75% and up is Good (inclusive), 25% and up is
//! Partial, anything below — or empty input — is Bad.

use crate::aggregator::IndicatorTable;
use crate::models::{AvailabilityStatus, TransformedSeries};

const GOOD_THRESHOLD: f64 = 0.75;
const PARTIAL_THRESHOLD: f64 = 0.25;

/// Classify a single series: defined values over the expected period count
/// between its first and last timestamps at its own cadence.
pub fn classify_series(series: &TransformedSeries) -> AvailabilityStatus {
    let (Some(first), Some(last)) = (series.first_date(), series.last_date()) else {
        return AvailabilityStatus::Bad;
    };

    // Cadence unknown (single point): fall back to the raw observation count.
    let expected = match series.frequency {
        Some(freq) => freq.expected_periods(first, last),
        None => series.points.len(),
    };
    if expected == 0 {
        return AvailabilityStatus::Bad;
    }

    status_for_ratio(series.defined_count() as f64 / expected as f64)
}

/// Classify a whole table: the mean per-column defined count divided by the
/// table's row count.
///
/// Deliberately *not* the mean of per-column ratios — the two diverge when
/// columns cover different date ranges, and the former matches the observed
/// dashboard behavior.
pub fn classify_table(table: &IndicatorTable) -> AvailabilityStatus {
    if table.is_empty() {
        return AvailabilityStatus::Bad;
    }

    let total_defined: usize = table
        .columns
        .iter()
        .map(|c| c.values.iter().filter(|v| v.is_some()).count())
        .sum();
    let mean_defined = total_defined as f64 / table.columns.len() as f64;

    status_for_ratio(mean_defined / table.row_count() as f64)
}

fn status_for_ratio(ratio: f64) -> AvailabilityStatus {
    if ratio >= GOOD_THRESHOLD {
        AvailabilityStatus::Good
    } else if ratio >= PARTIAL_THRESHOLD {
        AvailabilityStatus::Partial
    } else {
        AvailabilityStatus::Bad
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::CountryColumn;
    use crate::models::{DataPoint, Frequency, IndicatorKind};
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn quarterly(values: &[Option<f64>]) -> TransformedSeries {
        let quarter_ends = [
            d(2023, 3, 31),
            d(2023, 6, 30),
            d(2023, 9, 30),
            d(2023, 12, 31),
        ];
        TransformedSeries {
            points: values
                .iter()
                .zip(quarter_ends)
                .map(|(value, date)| DataPoint { date, value: *value })
                .collect(),
            frequency: Some(Frequency::Quarterly),
        }
    }

    #[test]
    fn series_boundaries_are_inclusive_at_75_percent() {
        // 3 of 4 expected quarters defined: exactly 75%, Good.
        let s = quarterly(&[Some(1.0), Some(2.0), Some(3.0), None]);
        assert_eq!(classify_series(&s), AvailabilityStatus::Good);

        // 2 of 4: Partial.
        let s = quarterly(&[Some(1.0), None, Some(3.0), None]);
        assert_eq!(classify_series(&s), AvailabilityStatus::Partial);

        // 0 of 4: Bad.
        let s = quarterly(&[None, None, None, None]);
        assert_eq!(classify_series(&s), AvailabilityStatus::Bad);
    }

    #[test]
    fn empty_series_is_bad() {
        let s = TransformedSeries {
            points: Vec::new(),
            frequency: Some(Frequency::Quarterly),
        };
        assert_eq!(classify_series(&s), AvailabilityStatus::Bad);
    }

    #[test]
    fn more_defined_values_never_lower_the_tier() {
        // Fill quarters one at a time and check the tier never goes down.
        let mut values = [None, None, None, None];
        let mut previous = classify_series(&quarterly(&values));
        for i in 0..4 {
            values[i] = Some(1.0);
            let current = classify_series(&quarterly(&values));
            let rank = |s: AvailabilityStatus| match s {
                AvailabilityStatus::Bad => 0,
                AvailabilityStatus::Partial => 1,
                AvailabilityStatus::Good => 2,
            };
            assert!(rank(current) >= rank(previous));
            previous = current;
        }
        assert_eq!(previous, AvailabilityStatus::Good);
    }

    fn table(columns: Vec<(&str, Vec<Option<f64>>)>, rows: usize) -> IndicatorTable {
        let dates: Vec<NaiveDate> = (0..rows)
            .map(|i| d(2023, 1, 1) + chrono::Duration::days(i as i64))
            .rev()
            .collect();
        IndicatorTable {
            indicator: IndicatorKind::Gdp,
            dates,
            columns: columns
                .into_iter()
                .map(|(label, values)| CountryColumn {
                    label: label.to_string(),
                    values,
                })
                .collect(),
        }
    }

    #[test]
    fn table_uses_mean_count_over_row_count() {
        // Column A: 4/4 defined, column B: 2/4. Mean defined count is 3 over
        // 4 rows, exactly 75% -> Good.
        let t = table(
            vec![
                ("A", vec![Some(1.0), Some(1.0), Some(1.0), Some(1.0)]),
                ("B", vec![Some(1.0), Some(1.0), None, None]),
            ],
            4,
        );
        assert_eq!(classify_table(&t), AvailabilityStatus::Good);

        // Both columns half-defined: mean count 2 over 4 rows -> Partial.
        let t = table(
            vec![
                ("A", vec![Some(1.0), Some(1.0), None, None]),
                ("B", vec![None, None, Some(1.0), Some(1.0)]),
            ],
            4,
        );
        assert_eq!(classify_table(&t), AvailabilityStatus::Partial);
    }

    #[test]
    fn empty_table_is_bad() {
        let t = table(vec![], 0);
        assert_eq!(classify_table(&t), AvailabilityStatus::Bad);

        let t = table(vec![("A", vec![])], 0);
        assert_eq!(classify_table(&t), AvailabilityStatus::Bad);
    }
}
