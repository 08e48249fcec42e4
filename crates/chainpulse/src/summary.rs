//!
//! Pure summary computations over raw series and distributions.
//!
//! Everything here is referentially transparent: no I/O, no shared state.
//! Empty input yields `0` (never NaN) so display stays deterministic.
//!

/// Sum of `field` across all records.
pub fn total<T>(series: &[T], field: impl Fn(&T) -> f64) -> f64 {
    series.iter().map(field).sum()
}

/// Arithmetic mean of `field`; 0 for empty input.
#[allow(clippy::cast_precision_loss)]
pub fn average<T>(series: &[T], field: impl Fn(&T) -> f64) -> f64 {
    if series.is_empty() {
        return 0.0;
    }

    total(series, field) / series.len() as f64
}

/// Maximum value of `field`; 0 for empty input.
pub fn peak<T>(series: &[T], field: impl Fn(&T) -> f64) -> f64 {
    series.iter().map(field).fold(0.0, f64::max)
}

/// Last record by input order. Callers must ensure the series is already
/// ordered ascending by timestamp; this does not sort.
#[must_use]
pub const fn latest<T>(series: &[T]) -> Option<&T> {
    series.last()
}

/// Sum of integer counts in a distribution (resource kinds, intent
/// statuses, daily volumes).
pub fn count_total<T>(distribution: &[T], count: impl Fn(&T) -> u64) -> u64 {
    distribution.iter().map(count).sum()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample {
        ts: u64,
        tps: f64,
    }

    fn series() -> Vec<Sample> {
        vec![
            Sample { ts: 1, tps: 10.0 },
            Sample { ts: 2, tps: 20.0 },
            Sample { ts: 3, tps: 5.0 },
        ]
    }

    #[test]
    fn empty_series_yields_zero_everywhere() {
        let empty: Vec<Sample> = vec![];

        assert_eq!(total(&empty, |s| s.tps), 0.0);
        assert_eq!(average(&empty, |s| s.tps), 0.0);
        assert_eq!(peak(&empty, |s| s.tps), 0.0);
        assert!(latest(&empty).is_none());
    }

    #[test]
    fn known_series_summaries() {
        let series = series();

        assert_eq!(total(&series, |s| s.tps), 35.0);
        assert!((average(&series, |s| s.tps) - 11.666_666).abs() < 1e-4);
        assert_eq!(peak(&series, |s| s.tps), 20.0);

        let last = latest(&series).unwrap();
        assert_eq!(last.ts, 3);
        assert_eq!(last.tps, 5.0);
    }

    #[test]
    fn latest_is_input_order_not_timestamp_order() {
        let out_of_order = vec![Sample { ts: 9, tps: 1.0 }, Sample { ts: 2, tps: 7.0 }];

        assert_eq!(latest(&out_of_order).unwrap().ts, 2);
    }

    #[test]
    fn count_total_sums_distribution() {
        struct Slice {
            count: u64,
        }
        let dist = vec![Slice { count: 3 }, Slice { count: 4 }];

        assert_eq!(count_total(&dist, |s| s.count), 7);
        assert_eq!(count_total::<Slice>(&[], |s| s.count), 0);
    }
}
