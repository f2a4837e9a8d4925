//! Core data types used throughout the sales query API
//!
//! This module defines the fundamental data structures used across the system:
//!
//! # Key Types
//!
//! - **`SalesRecord`**: A single row of the sales dataset (fixed columns plus
//!   passthrough fields preserved verbatim from the source file)
//! - **`KeyValue`**: Dimension key, integer or text depending on the source column
//! - **`Dimension`**: One of the three lookup axes (employee, product, store)
//! - **`DateRange`**: Calendar-date window for filter queries (inclusive bounds)
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use sales_api::types::{DateRange, Dimension, KeyValue};
//!
//! let range = DateRange::new(
//!     NaiveDate::from_ymd_opt(2023, 11, 14).unwrap(),
//!     NaiveDate::from_ymd_opt(2023, 11, 15).unwrap(),
//! );
//! assert!(range.contains(NaiveDate::from_ymd_opt(2023, 11, 14).unwrap()));
//!
//! let key = KeyValue::Text("1|417".to_string());
//! assert_eq!(Dimension::Employee.column(), "KeyEmployee");
//! assert_eq!(key.to_string(), "1|417");
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Representation of a dimension key column, resolved once at load time
///
/// Source files may carry dimension keys as integers or as free-form text.
/// The loader inspects each key column once and fixes its representation for
/// the lifetime of the dataset; queries coerce caller-supplied keys to the
/// column's type instead of re-deciding per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    /// Every value in the column parses as a 64-bit integer
    Integer,
    /// At least one value does not parse as an integer
    Text,
}

/// A dimension key value
///
/// Equality is exact within a representation. Cross-representation equality
/// never happens at query time: caller keys are coerced to the column's
/// [`KeyType`] first, so an `Int` is only ever compared against an `Int`.
///
/// Serializes untagged, so an `Int(42)` becomes JSON `42` and a
/// `Text("1|417")` becomes `"1|417"` — matching the source file verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum KeyValue {
    /// Integer key (column resolved as [`KeyType::Integer`])
    Int(i64),
    /// Text key (column resolved as [`KeyType::Text`])
    Text(String),
}

impl KeyValue {
    /// Coerce a caller-supplied raw key to the given column representation
    ///
    /// Returns `None` when the raw key cannot take the column's type (for
    /// example `"abc"` against an integer column). A failed coercion means
    /// the key can match no record; callers treat it as an empty result,
    /// never an error.
    pub fn coerce(raw: &str, key_type: KeyType) -> Option<Self> {
        match key_type {
            KeyType::Integer => raw.trim().parse::<i64>().ok().map(KeyValue::Int),
            KeyType::Text => Some(KeyValue::Text(raw.to_string())),
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Int(v) => write!(f, "{}", v),
            KeyValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One of the three lookup axes used to filter or aggregate records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// Filter/aggregate on the employee key column
    Employee,
    /// Filter/aggregate on the product key column
    Product,
    /// Filter/aggregate on the store key column
    Store,
}

impl Dimension {
    /// Source-file column name for this dimension
    pub const fn column(&self) -> &'static str {
        match self {
            Dimension::Employee => "KeyEmployee",
            Dimension::Product => "KeyProduct",
            Dimension::Store => "KeyStore",
        }
    }

    /// The key value of `record` on this dimension
    pub fn key_of<'a>(&self, record: &'a SalesRecord) -> &'a KeyValue {
        match self {
            Dimension::Employee => &record.key_employee,
            Dimension::Product => &record.key_product,
            Dimension::Store => &record.key_store,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Employee => write!(f, "employee"),
            Dimension::Product => write!(f, "product"),
            Dimension::Store => write!(f, "store"),
        }
    }
}

/// Calendar-date window for filter queries (inclusive on both ends)
///
/// An inverted range (`start > end`) is deliberately constructible: no date
/// can satisfy both bounds, so filters over it return an empty sequence by
/// construction rather than an error.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use sales_api::types::DateRange;
///
/// let d = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
///
/// let range = DateRange::new(d(2023, 11, 14), d(2023, 11, 15));
/// assert!(range.contains(d(2023, 11, 14))); // start is inclusive
/// assert!(range.contains(d(2023, 11, 15))); // end is inclusive
/// assert!(!range.contains(d(2023, 11, 16)));
///
/// let inverted = DateRange::new(d(2023, 11, 15), d(2023, 11, 14));
/// assert!(inverted.is_empty());
/// assert!(!inverted.contains(d(2023, 11, 14)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    /// First date of the window (inclusive)
    pub start: NaiveDate,
    /// Last date of the window (inclusive)
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a new date range; `start` may be after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Check whether a date falls within this range (inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// True when no date can satisfy both bounds
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

/// One row of the sales dataset
///
/// Field names serialize back to the source-file column names, and the
/// `extra` map flattens passthrough columns into the record, so a serialized
/// `SalesRecord` round-trips the original row shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRecord {
    /// Opaque row identifier
    #[serde(rename = "KeySale")]
    pub key_sale: String,

    /// Calendar date of the sale, no time-of-day component
    #[serde(rename = "KeyDate")]
    pub date: NaiveDate,

    /// Employee dimension key
    #[serde(rename = "KeyEmployee")]
    pub key_employee: KeyValue,

    /// Product dimension key
    #[serde(rename = "KeyProduct")]
    pub key_product: KeyValue,

    /// Store dimension key
    #[serde(rename = "KeyStore")]
    pub key_store: KeyValue,

    /// Monetary value aggregated by the statistics operations
    #[serde(rename = "Amount")]
    pub amount: f64,

    /// Passthrough columns preserved verbatim from the source file,
    /// keyed by header name
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}
