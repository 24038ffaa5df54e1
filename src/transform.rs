//! Indicator-specific numeric transformations and frequency normalization.
//!
//! GDP series arrive as levels and become period-over-period percent growth.
//! Unemployment and inflation arrive as rates already; they only get reduced
//! to quarterly cadence when the provider delivers them finer than that.
//! Nothing is ever upsampled or interpolated.

use crate::models::{quarter_end, DataPoint, Frequency, IndicatorKind, RawSeries, TransformedSeries};

/// Apply the transformation for `indicator` to a raw series.
pub fn transform(raw: &RawSeries, indicator: IndicatorKind) -> TransformedSeries {
    match indicator {
        IndicatorKind::Gdp => percent_change(raw),
        IndicatorKind::Unemployment | IndicatorKind::Inflation => resample_if_finer(raw),
    }
}

/// Period-over-period percent growth: out[i] = (raw[i] / raw[i-1] - 1) * 100.
/// The first point has no predecessor and is undefined, as is any point whose
/// neighbor is missing or whose quotient is non-finite (zero denominator).
fn percent_change(raw: &RawSeries) -> TransformedSeries {
    let points = raw
        .points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let value = if i == 0 {
                None
            } else {
                match (raw.points[i - 1].value, point.value) {
                    (Some(prev), Some(curr)) => {
                        let growth = (curr / prev - 1.0) * 100.0;
                        growth.is_finite().then_some(growth)
                    }
                    _ => None,
                }
            };
            DataPoint {
                date: point.date,
                value,
            }
        })
        .collect();

    TransformedSeries {
        points,
        frequency: raw.native_frequency(),
    }
}

/// Reduce to quarterly cadence by keeping the last defined observation of
/// each quarter, stamped at quarter end. Series that are already quarterly or
/// coarser pass through unchanged, so the step is idempotent.
fn resample_if_finer(raw: &RawSeries) -> TransformedSeries {
    let native = raw.native_frequency();
    let needs_resample = native.map_or(false, |f| f.is_finer_than_quarterly());

    if !needs_resample {
        return TransformedSeries {
            points: raw.points.clone(),
            frequency: native,
        };
    }

    // Points arrive date-ascending, so quarters appear in order and the last
    // defined value per quarter wins.
    let mut quarters: Vec<(i64, DataPoint)> = Vec::new();
    for point in &raw.points {
        let key = Frequency::Quarterly.period_index(point.date);
        match quarters.last_mut() {
            Some((last_key, slot)) if *last_key == key => {
                if point.value.is_some() {
                    slot.value = point.value;
                }
            }
            _ => quarters.push((
                key,
                DataPoint {
                    date: quarter_end(point.date),
                    value: point.value,
                },
            )),
        }
    }

    TransformedSeries {
        points: quarters.into_iter().map(|(_, p)| p).collect(),
        frequency: Some(Frequency::Quarterly),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn quarterly_series(values: &[Option<f64>]) -> RawSeries {
        let quarter_ends = [
            d(2023, 3, 31),
            d(2023, 6, 30),
            d(2023, 9, 30),
            d(2023, 12, 31),
            d(2024, 3, 31),
            d(2024, 6, 30),
        ];
        let points = values
            .iter()
            .zip(quarter_ends)
            .map(|(value, date)| DataPoint { date, value: *value })
            .collect();
        RawSeries::new("TEST", points)
    }

    #[test]
    fn gdp_levels_become_percent_growth() {
        let raw = quarterly_series(&[Some(100.0), Some(110.0), Some(99.0)]);
        let out = transform(&raw, IndicatorKind::Gdp);

        assert_eq!(out.points.len(), 3);
        assert_eq!(out.points[0].value, None);
        assert!((out.points[1].value.unwrap() - 10.0).abs() < 1e-9);
        assert!((out.points[2].value.unwrap() - -10.0).abs() < 1e-9);
        // Timestamp domain is preserved.
        assert_eq!(out.points[0].date, raw.points[0].date);
        assert_eq!(out.points[2].date, raw.points[2].date);
    }

    #[test]
    fn gdp_zero_denominator_yields_undefined() {
        let raw = quarterly_series(&[Some(0.0), Some(5.0)]);
        let out = transform(&raw, IndicatorKind::Gdp);
        assert_eq!(out.points[1].value, None);
    }

    #[test]
    fn gdp_missing_neighbors_yield_undefined() {
        let raw = quarterly_series(&[Some(100.0), None, Some(120.0), Some(126.0)]);
        let out = transform(&raw, IndicatorKind::Gdp);
        assert_eq!(out.points[1].value, None); // missing current
        assert_eq!(out.points[2].value, None); // missing predecessor
        assert!((out.points[3].value.unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn monthly_rates_resample_to_quarter_end_last_observation() {
        let points = vec![
            DataPoint { date: d(2024, 1, 31), value: Some(3.1) },
            DataPoint { date: d(2024, 2, 29), value: Some(3.2) },
            DataPoint { date: d(2024, 3, 31), value: Some(3.3) },
            DataPoint { date: d(2024, 4, 30), value: Some(3.4) },
            DataPoint { date: d(2024, 5, 31), value: None },
            DataPoint { date: d(2024, 6, 30), value: None },
        ];
        let raw = RawSeries::new("RATE", points);
        let out = transform(&raw, IndicatorKind::Unemployment);

        assert_eq!(out.frequency, Some(Frequency::Quarterly));
        assert_eq!(out.points.len(), 2);
        assert_eq!(out.points[0], DataPoint { date: d(2024, 3, 31), value: Some(3.3) });
        // Last *defined* observation of Q2 is April's.
        assert_eq!(out.points[1], DataPoint { date: d(2024, 6, 30), value: Some(3.4) });
    }

    #[test]
    fn all_missing_quarter_stays_undefined() {
        let points = vec![
            DataPoint { date: d(2024, 1, 31), value: None },
            DataPoint { date: d(2024, 2, 29), value: None },
            DataPoint { date: d(2024, 3, 31), value: None },
        ];
        let raw = RawSeries::new("RATE", points);
        let out = transform(&raw, IndicatorKind::Inflation);
        assert_eq!(out.points, vec![DataPoint { date: d(2024, 3, 31), value: None }]);
    }

    #[test]
    fn quarterly_identity_transform_is_idempotent() {
        let raw = quarterly_series(&[Some(5.0), Some(5.5), None, Some(6.0)]);
        let once = transform(&raw, IndicatorKind::Inflation);
        let again = transform(
            &RawSeries::new("TEST", once.points.clone()),
            IndicatorKind::Inflation,
        );
        assert_eq!(once.points, again.points);
        assert_eq!(once.points.len(), raw.points.len());
    }

    #[test]
    fn empty_series_transforms_to_empty() {
        let raw = RawSeries::new("EMPTY", Vec::new());
        let out = transform(&raw, IndicatorKind::Gdp);
        assert!(out.points.is_empty());
        assert_eq!(out.frequency, None);
    }
}
