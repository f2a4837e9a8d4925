//! Aggregator: mean and total of the amount field per dimension key
//!
//! No date range here: statistics run over the whole dataset. Accumulation
//! is plain double-precision sum-then-divide; dataset sizes fit in memory
//! so no streaming scheme is needed.

use crate::dataset::Dataset;
use crate::types::{Dimension, KeyValue};

/// Aggregate statistics for one dimension key
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionStats {
    /// The caller-supplied key, echoed back verbatim
    pub key: String,
    /// Arithmetic mean of `amount`; `None` when no records match
    ///
    /// The undefined case is deliberately distinct from `Some(0.0)`: callers
    /// must be able to tell "no data" apart from a zero average.
    pub mean: Option<f64>,
    /// Sum of `amount`; `0.0` when no records match
    pub total: f64,
    /// Number of matching records
    pub count: usize,
}

/// Sum of `amount` over every record whose key on `dimension` equals `key`
///
/// Returns `0.0` when no records match.
pub fn total_of(dataset: &Dataset, dimension: Dimension, key: &KeyValue) -> f64 {
    dataset
        .records()
        .iter()
        .filter(|r| dimension.key_of(r) == key)
        .map(|r| r.amount)
        .sum()
}

/// Arithmetic mean of `amount` over the records matching `dimension == key`
///
/// Returns `None` when no records match — undefined, not zero.
pub fn mean_of(dataset: &Dataset, dimension: Dimension, key: &KeyValue) -> Option<f64> {
    let mut total = 0.0_f64;
    let mut count = 0_u64;
    for r in dataset.records() {
        if dimension.key_of(r) == key {
            total += r.amount;
            count += 1;
        }
    }
    if count == 0 {
        None
    } else {
        Some(total / count as f64)
    }
}

/// Compute mean and total for one dimension key in a single pass
pub fn statistics_of(dataset: &Dataset, dimension: Dimension, key: &KeyValue) -> DimensionStats {
    let mut total = 0.0_f64;
    let mut count = 0_usize;
    for r in dataset.records() {
        if dimension.key_of(r) == key {
            total += r.amount;
            count += 1;
        }
    }

    DimensionStats {
        key: key.to_string(),
        mean: if count == 0 {
            None
        } else {
            Some(total / count as f64)
        },
        total,
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SalesRecord;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn record(day: u32, store: i64, amount: f64) -> SalesRecord {
        SalesRecord {
            key_sale: format!("s{}", day),
            date: NaiveDate::from_ymd_opt(2023, 11, day).unwrap(),
            key_employee: KeyValue::Text("e".to_string()),
            key_product: KeyValue::Int(1),
            key_store: KeyValue::Int(store),
            amount,
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_total_sums_matching_amounts() {
        let ds = Dataset::new(vec![
            record(14, 23, 100.0),
            record(15, 23, 50.0),
            record(16, 24, 999.0),
        ]);
        assert_eq!(total_of(&ds, Dimension::Store, &KeyValue::Int(23)), 150.0);
    }

    #[test]
    fn test_total_is_zero_when_nothing_matches() {
        let ds = Dataset::new(vec![record(14, 23, 100.0)]);
        assert_eq!(total_of(&ds, Dimension::Store, &KeyValue::Int(99)), 0.0);
    }

    #[test]
    fn test_mean_is_total_over_count() {
        let ds = Dataset::new(vec![
            record(14, 23, 100.0),
            record(15, 23, 50.0),
            record(16, 23, 30.0),
        ]);
        let key = KeyValue::Int(23);
        let mean = mean_of(&ds, Dimension::Store, &key).unwrap();
        assert!((mean - 60.0).abs() < f64::EPSILON);
        assert_eq!(mean, total_of(&ds, Dimension::Store, &key) / 3.0);
    }

    #[test]
    fn test_mean_is_undefined_when_nothing_matches() {
        let ds = Dataset::new(vec![record(14, 23, 100.0)]);
        assert_eq!(mean_of(&ds, Dimension::Store, &KeyValue::Int(99)), None);
    }

    #[test]
    fn test_zero_sum_entity_has_defined_mean() {
        // An entity whose sales cancel out to zero still has data
        let ds = Dataset::new(vec![record(14, 23, 100.0), record(15, 23, -100.0)]);
        let stats = statistics_of(&ds, Dimension::Store, &KeyValue::Int(23));
        assert_eq!(stats.total, 0.0);
        assert_eq!(stats.mean, Some(0.0));
        assert_eq!(stats.count, 2);
    }

    #[test]
    fn test_statistics_of_empty_match() {
        let ds = Dataset::new(vec![record(14, 23, 100.0)]);
        let stats = statistics_of(&ds, Dimension::Store, &KeyValue::Int(99));
        assert_eq!(stats.mean, None);
        assert_eq!(stats.total, 0.0);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.key, "99");
    }
}
