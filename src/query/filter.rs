//! Filter Engine: date-range + dimension-key predicate over the Record Store

use crate::dataset::Dataset;
use crate::types::{DateRange, Dimension, KeyValue, SalesRecord};

/// Return every record whose date falls inside `range` (inclusive) and whose
/// key on `dimension` equals `key` exactly, preserving dataset order
///
/// Equality is exact: no normalization, no case folding. An inverted range
/// is empty by construction, so the scan short-circuits. Zero matches is a
/// valid result, not an error.
pub fn filter_by_dimension<'a>(
    dataset: &'a Dataset,
    range: DateRange,
    dimension: Dimension,
    key: &KeyValue,
) -> Vec<&'a SalesRecord> {
    if range.is_empty() {
        return Vec::new();
    }

    dataset
        .records()
        .iter()
        .filter(|r| range.contains(r.date) && dimension.key_of(r) == key)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 11, day).unwrap()
    }

    fn record(key_sale: &str, day: u32, employee: &str, amount: f64) -> SalesRecord {
        SalesRecord {
            key_sale: key_sale.to_string(),
            date: d(day),
            key_employee: KeyValue::Text(employee.to_string()),
            key_product: KeyValue::Int(1),
            key_store: KeyValue::Int(1),
            amount,
            extra: BTreeMap::new(),
        }
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            record("s1", 14, "1|417", 100.0),
            record("s2", 15, "1|418", 50.0),
            record("s3", 16, "1|417", 25.0),
            record("s4", 15, "1|417", 75.0),
        ])
    }

    #[test]
    fn test_filter_matches_range_and_key() {
        let ds = dataset();
        let key = KeyValue::Text("1|417".to_string());
        let result =
            filter_by_dimension(&ds, DateRange::new(d(14), d(15)), Dimension::Employee, &key);

        assert_eq!(result.len(), 2);
        for r in &result {
            assert!(r.date >= d(14) && r.date <= d(15));
            assert_eq!(r.key_employee, key);
        }
    }

    #[test]
    fn test_filter_preserves_dataset_order() {
        let ds = dataset();
        let key = KeyValue::Text("1|417".to_string());
        let result =
            filter_by_dimension(&ds, DateRange::new(d(14), d(16)), Dimension::Employee, &key);

        let sale_keys: Vec<&str> = result.iter().map(|r| r.key_sale.as_str()).collect();
        assert_eq!(sale_keys, vec!["s1", "s3", "s4"]);
    }

    #[test]
    fn test_inverted_range_returns_empty() {
        let ds = dataset();
        let key = KeyValue::Text("1|417".to_string());
        let result =
            filter_by_dimension(&ds, DateRange::new(d(16), d(14)), Dimension::Employee, &key);
        assert!(result.is_empty());
    }

    #[test]
    fn test_unknown_key_returns_empty() {
        let ds = dataset();
        let key = KeyValue::Text("nonexistent".to_string());
        let result =
            filter_by_dimension(&ds, DateRange::new(d(14), d(16)), Dimension::Employee, &key);
        assert!(result.is_empty());
    }

    #[test]
    fn test_other_dimensions_use_their_own_column() {
        let ds = dataset();
        let result = filter_by_dimension(
            &ds,
            DateRange::new(d(14), d(16)),
            Dimension::Store,
            &KeyValue::Int(1),
        );
        assert_eq!(result.len(), 4);

        let result = filter_by_dimension(
            &ds,
            DateRange::new(d(14), d(16)),
            Dimension::Store,
            &KeyValue::Int(2),
        );
        assert!(result.is_empty());
    }
}
