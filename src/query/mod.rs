//! Query Façade over the Record Store
//!
//! Exposes the three filter operations and three statistics operations as
//! named entry points with uniform contracts. All operations are stateless
//! pure functions over `(&Dataset, parameters)`; "no rows matched" is an
//! empty sequence (filters) or an undefined mean (statistics), never an
//! error. Caller-supplied keys are coerced to the dimension column's
//! load-time type once per call; a key that cannot be coerced matches
//! nothing.

mod filter;
mod statistics;

pub use filter::filter_by_dimension;
pub use statistics::{mean_of, statistics_of, total_of, DimensionStats};

use crate::dataset::Dataset;
use crate::types::{DateRange, Dimension, SalesRecord};

/// Sales for one employee within a date range, in dataset order
pub fn sales_by_employee<'a>(
    dataset: &'a Dataset,
    range: DateRange,
    key_employee: &str,
) -> Vec<&'a SalesRecord> {
    sales_by(dataset, range, Dimension::Employee, key_employee)
}

/// Sales for one product within a date range, in dataset order
pub fn sales_by_product<'a>(
    dataset: &'a Dataset,
    range: DateRange,
    key_product: &str,
) -> Vec<&'a SalesRecord> {
    sales_by(dataset, range, Dimension::Product, key_product)
}

/// Sales for one store within a date range, in dataset order
pub fn sales_by_store<'a>(
    dataset: &'a Dataset,
    range: DateRange,
    key_store: &str,
) -> Vec<&'a SalesRecord> {
    sales_by(dataset, range, Dimension::Store, key_store)
}

/// Mean and total sales amount for one employee
pub fn statistics_by_employee(dataset: &Dataset, key_employee: &str) -> DimensionStats {
    statistics_by(dataset, Dimension::Employee, key_employee)
}

/// Mean and total sales amount for one product
pub fn statistics_by_product(dataset: &Dataset, key_product: &str) -> DimensionStats {
    statistics_by(dataset, Dimension::Product, key_product)
}

/// Mean and total sales amount for one store
pub fn statistics_by_store(dataset: &Dataset, key_store: &str) -> DimensionStats {
    statistics_by(dataset, Dimension::Store, key_store)
}

fn sales_by<'a>(
    dataset: &'a Dataset,
    range: DateRange,
    dimension: Dimension,
    raw_key: &str,
) -> Vec<&'a SalesRecord> {
    match dataset.coerce_key(dimension, raw_key) {
        Some(key) => filter_by_dimension(dataset, range, dimension, &key),
        None => Vec::new(),
    }
}

fn statistics_by(dataset: &Dataset, dimension: Dimension, raw_key: &str) -> DimensionStats {
    match dataset.coerce_key(dimension, raw_key) {
        Some(key) => statistics_of(dataset, dimension, &key),
        None => DimensionStats {
            key: raw_key.to_string(),
            mean: None,
            total: 0.0,
            count: 0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KeyValue;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 11, day).unwrap()
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![SalesRecord {
            key_sale: "1|100".to_string(),
            date: d(14),
            key_employee: KeyValue::Text("1|417".to_string()),
            key_product: KeyValue::Int(9),
            key_store: KeyValue::Int(23),
            amount: 100.0,
            extra: BTreeMap::new(),
        }])
    }

    #[test]
    fn test_sales_by_employee_scenario() {
        let ds = dataset();
        let result = sales_by_employee(&ds, DateRange::new(d(14), d(15)), "1|417");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].key_sale, "1|100");
    }

    #[test]
    fn test_statistics_by_employee_scenario() {
        let ds = dataset();
        let stats = statistics_by_employee(&ds, "1|417");
        assert_eq!(stats.mean, Some(100.0));
        assert_eq!(stats.total, 100.0);
    }

    #[test]
    fn test_unknown_employee_yields_empty() {
        let ds = dataset();
        let result = sales_by_employee(&ds, DateRange::new(d(14), d(15)), "nonexistent");
        assert!(result.is_empty());
    }

    #[test]
    fn test_integer_dimension_accepts_raw_string_key() {
        let ds = dataset();
        let result = sales_by_store(&ds, DateRange::new(d(14), d(15)), "23");
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_uncoercible_key_yields_empty_not_error() {
        let ds = dataset();
        // Store column resolved as integer; a non-numeric key matches nothing
        let result = sales_by_store(&ds, DateRange::new(d(14), d(15)), "not-a-number");
        assert!(result.is_empty());

        let stats = statistics_by_store(&ds, "not-a-number");
        assert_eq!(stats.mean, None);
        assert_eq!(stats.total, 0.0);
        assert_eq!(stats.key, "not-a-number");
    }
}
