//! Record Store: the in-memory sales dataset and its CSV loader
//!
//! The dataset is loaded exactly once at process start and is read-only for
//! the lifetime of the process. It is passed into the query layer as an
//! explicit value (shared behind `Arc` by the server), never held as a
//! hidden global, so tests can construct synthetic datasets freely.

use crate::error::DatasetError;
use crate::types::{Dimension, KeyType, KeyValue, SalesRecord};
use chrono::NaiveDate;
use csv::StringRecord;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Date format of the `KeyDate` column
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Columns every source file must carry; everything else is passthrough
const REQUIRED_COLUMNS: [&str; 6] = [
    "KeySale",
    "KeyDate",
    "KeyEmployee",
    "KeyProduct",
    "KeyStore",
    "Amount",
];

/// An immutable, ordered sequence of [`SalesRecord`]
///
/// Also remembers the [`KeyType`] each dimension column resolved to at load
/// time, so caller-supplied keys are coerced once per query rather than
/// re-interpreted per row.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<SalesRecord>,
    employee_key_type: KeyType,
    product_key_type: KeyType,
    store_key_type: KeyType,
}

impl Dataset {
    /// Build a dataset from already-typed records
    ///
    /// Each dimension column's [`KeyType`] is inferred from the records: a
    /// column is [`KeyType::Integer`] only when every record carries an
    /// integer key on it. Intended for tests and embedders; the server uses
    /// [`Dataset::load_csv`].
    pub fn new(records: Vec<SalesRecord>) -> Self {
        fn infer(records: &[SalesRecord], dim: Dimension) -> KeyType {
            let all_integers = !records.is_empty()
                && records
                    .iter()
                    .all(|r| matches!(dim.key_of(r), KeyValue::Int(_)));
            if all_integers {
                KeyType::Integer
            } else {
                KeyType::Text
            }
        }

        let employee_key_type = infer(&records, Dimension::Employee);
        let product_key_type = infer(&records, Dimension::Product);
        let store_key_type = infer(&records, Dimension::Store);

        Self {
            records,
            employee_key_type,
            product_key_type,
            store_key_type,
        }
    }

    /// Load the dataset from a CSV file
    ///
    /// The header row must carry `KeySale`, `KeyDate`, `KeyEmployee`,
    /// `KeyProduct`, `KeyStore` and `Amount`; all other columns are kept
    /// verbatim as passthrough fields. `KeyDate` must parse as `YYYY-MM-DD`
    /// in every row and `Amount` as a number; any failure aborts the load.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        let columns = ColumnLayout::resolve(&headers)?;

        let rows = reader
            .records()
            .collect::<Result<Vec<StringRecord>, csv::Error>>()?;

        // Key column representations are fixed once over the whole column,
        // not decided per cell.
        let employee_key_type = resolve_key_type(&rows, columns.key_employee);
        let product_key_type = resolve_key_type(&rows, columns.key_product);
        let store_key_type = resolve_key_type(&rows, columns.key_store);

        let mut records = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let row_number = i + 1;

            let date_cell = cell(row, columns.key_date);
            let date = NaiveDate::parse_from_str(date_cell, DATE_FORMAT).map_err(|_| {
                DatasetError::InvalidDate {
                    row: row_number,
                    value: date_cell.to_string(),
                }
            })?;

            let amount_cell = cell(row, columns.amount);
            let amount: f64 =
                amount_cell
                    .parse()
                    .map_err(|_| DatasetError::InvalidAmount {
                        row: row_number,
                        value: amount_cell.to_string(),
                    })?;

            let mut extra = BTreeMap::new();
            for &(index, ref name) in &columns.passthrough {
                extra.insert(name.clone(), cell(row, index).to_string());
            }

            records.push(SalesRecord {
                key_sale: cell(row, columns.key_sale).to_string(),
                date,
                key_employee: typed_key(row, columns.key_employee, employee_key_type),
                key_product: typed_key(row, columns.key_product, product_key_type),
                key_store: typed_key(row, columns.key_store, store_key_type),
                amount,
                extra,
            });
        }

        info!(
            path = %path.display(),
            records = records.len(),
            employee_keys = ?employee_key_type,
            product_keys = ?product_key_type,
            store_keys = ?store_key_type,
            "Dataset loaded"
        );

        Ok(Self {
            records,
            employee_key_type,
            product_key_type,
            store_key_type,
        })
    }

    /// All records in original file order
    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the dataset holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The key representation a dimension column resolved to at load time
    pub fn key_type(&self, dimension: Dimension) -> KeyType {
        match dimension {
            Dimension::Employee => self.employee_key_type,
            Dimension::Product => self.product_key_type,
            Dimension::Store => self.store_key_type,
        }
    }

    /// Coerce a caller-supplied raw key to the dimension column's type
    ///
    /// `None` means the key cannot match any record (for example a
    /// non-numeric key against an integer column).
    pub fn coerce_key(&self, dimension: Dimension, raw: &str) -> Option<KeyValue> {
        KeyValue::coerce(raw, self.key_type(dimension))
    }
}

/// Column indices resolved from the header row
struct ColumnLayout {
    key_sale: usize,
    key_date: usize,
    key_employee: usize,
    key_product: usize,
    key_store: usize,
    amount: usize,
    /// (index, header name) of every non-required column
    passthrough: Vec<(usize, String)>,
}

impl ColumnLayout {
    fn resolve(headers: &StringRecord) -> Result<Self, DatasetError> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
        };

        let passthrough = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !REQUIRED_COLUMNS.contains(h))
            .map(|(i, h)| (i, h.to_string()))
            .collect();

        Ok(Self {
            key_sale: position("KeySale")?,
            key_date: position("KeyDate")?,
            key_employee: position("KeyEmployee")?,
            key_product: position("KeyProduct")?,
            key_store: position("KeyStore")?,
            amount: position("Amount")?,
            passthrough,
        })
    }
}

fn cell(row: &StringRecord, index: usize) -> &str {
    row.get(index).unwrap_or("")
}

/// A key column is integer-typed only when every cell parses as i64
fn resolve_key_type(rows: &[StringRecord], index: usize) -> KeyType {
    let all_integers = !rows.is_empty()
        && rows
            .iter()
            .all(|row| cell(row, index).parse::<i64>().is_ok());
    if all_integers {
        KeyType::Integer
    } else {
        KeyType::Text
    }
}

fn typed_key(row: &StringRecord, index: usize, key_type: KeyType) -> KeyValue {
    let raw = cell(row, index);
    match key_type {
        // resolve_key_type proved every cell parses
        KeyType::Integer => KeyValue::Int(raw.parse().unwrap_or_default()),
        KeyType::Text => KeyValue::Text(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const SAMPLE: &str = "\
KeySale,KeyDate,KeyEmployee,KeyProduct,KeyStore,Amount,Qty
1|100,2023-11-14,1|417,9,23,100.0,3
1|101,2023-11-15,1|418,9,24,50.5,1
";

    #[test]
    fn test_load_csv_parses_rows_in_order() {
        let file = write_csv(SAMPLE);
        let dataset = Dataset::load_csv(file.path()).unwrap();

        assert_eq!(dataset.len(), 2);
        let first = &dataset.records()[0];
        assert_eq!(first.key_sale, "1|100");
        assert_eq!(
            first.date,
            NaiveDate::from_ymd_opt(2023, 11, 14).unwrap()
        );
        assert_eq!(first.key_employee, KeyValue::Text("1|417".to_string()));
        assert_eq!(first.amount, 100.0);
        assert_eq!(dataset.records()[1].key_sale, "1|101");
    }

    #[test]
    fn test_key_types_resolved_per_column() {
        let file = write_csv(SAMPLE);
        let dataset = Dataset::load_csv(file.path()).unwrap();

        // "1|417" forces the employee column to text; product and store
        // columns are all-integer.
        assert_eq!(dataset.key_type(Dimension::Employee), KeyType::Text);
        assert_eq!(dataset.key_type(Dimension::Product), KeyType::Integer);
        assert_eq!(dataset.key_type(Dimension::Store), KeyType::Integer);
        assert_eq!(dataset.records()[0].key_product, KeyValue::Int(9));
    }

    #[test]
    fn test_passthrough_columns_preserved_verbatim() {
        let file = write_csv(SAMPLE);
        let dataset = Dataset::load_csv(file.path()).unwrap();
        assert_eq!(
            dataset.records()[0].extra.get("Qty"),
            Some(&"3".to_string())
        );
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let file = write_csv("KeySale,KeyDate,KeyEmployee,KeyProduct,Amount\n");
        let err = Dataset::load_csv(file.path()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn(ref c) if c == "KeyStore"));
    }

    #[test]
    fn test_invalid_date_is_fatal() {
        let file = write_csv(
            "KeySale,KeyDate,KeyEmployee,KeyProduct,KeyStore,Amount\n\
             1|100,14-11-2023,1|417,9,23,100.0\n",
        );
        let err = Dataset::load_csv(file.path()).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidDate { row: 1, .. }));
    }

    #[test]
    fn test_invalid_amount_is_fatal() {
        let file = write_csv(
            "KeySale,KeyDate,KeyEmployee,KeyProduct,KeyStore,Amount\n\
             1|100,2023-11-14,1|417,9,23,a-lot\n",
        );
        let err = Dataset::load_csv(file.path()).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidAmount { row: 1, .. }));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        assert!(Dataset::load_csv("/nonexistent/celes.csv").is_err());
    }

    #[test]
    fn test_coerce_key_follows_column_type() {
        let file = write_csv(SAMPLE);
        let dataset = Dataset::load_csv(file.path()).unwrap();

        assert_eq!(
            dataset.coerce_key(Dimension::Product, "9"),
            Some(KeyValue::Int(9))
        );
        // Non-numeric key against the integer product column matches nothing
        assert_eq!(dataset.coerce_key(Dimension::Product, "nine"), None);
        assert_eq!(
            dataset.coerce_key(Dimension::Employee, "1|417"),
            Some(KeyValue::Text("1|417".to_string()))
        );
    }

    #[test]
    fn test_empty_file_loads_empty_dataset() {
        let file = write_csv("KeySale,KeyDate,KeyEmployee,KeyProduct,KeyStore,Amount\n");
        let dataset = Dataset::load_csv(file.path()).unwrap();
        assert!(dataset.is_empty());
    }
}
