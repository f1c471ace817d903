//! TableView Record Model
//!
//! A Record is one row of tabular data keyed by column name; a Dataset is an
//! ordered sequence of records. The column set of a dataset is taken from the
//! keys of its first record, in insertion order.
//!
//! # Examples
//!
//! ```
//! use tableview::{Dataset, Record};
//!
//! let dataset = Dataset::new(vec![
//!     Record::new()
//!         .with("name", "Albania")
//!         .with("region", "Europe")
//!         .with("population", 2_837_743i64),
//!     Record::new()
//!         .with("name", "Japan")
//!         .with("region", "Asia")
//!         .with("population", 125_836_021i64),
//! ]);
//!
//! assert_eq!(dataset.len(), 2);
//! assert_eq!(dataset.columns(), vec!["name", "region", "population"]);
//! assert_eq!(dataset.records()[1].get("region").as_string(), Some("Asia"));
//! ```

use crate::error::ViewError;
use crate::value::ColumnValue;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value as JsonValue};

/// Fields projected from each record returned by the countries endpoint
pub const COUNTRY_FIELDS: [&str; 5] = ["name", "region", "alpha2Code", "alpha3Code", "population"];

static NULL: ColumnValue = ColumnValue::Null;

/// One row of data: ordered (column, value) pairs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(String, ColumnValue)>,
}

impl Record {
    pub fn new() -> Self {
        Record { fields: Vec::new() }
    }

    /// Builder-style insert, used mostly when assembling rows by hand.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<ColumnValue>) -> Self {
        self.insert(column, value.into());
        self
    }

    /// Sets a column's value, keeping the column's original position if it
    /// already exists.
    pub fn insert(&mut self, column: impl Into<String>, value: ColumnValue) {
        let column = column.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((column, value)),
        }
    }

    /// Returns the value of a column; unknown columns read as `Null`.
    pub fn get(&self, column: &str) -> &ColumnValue {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
            .unwrap_or(&NULL)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &ColumnValue> {
        self.fields.iter().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Builds a record from every key of a JSON object.
    pub fn from_json_object(obj: &Map<String, JsonValue>) -> Self {
        Record {
            fields: obj
                .iter()
                .map(|(k, v)| (k.clone(), ColumnValue::from_json(v)))
                .collect(),
        }
    }

    /// Builds a record holding exactly `fields`, in that order.
    ///
    /// Keys not listed are dropped; listed keys missing from the object become `Null`.
    pub fn project(obj: &Map<String, JsonValue>, fields: &[&str]) -> Self {
        Record {
            fields: fields
                .iter()
                .map(|field| {
                    let value = obj.get(*field).map(ColumnValue::from_json).unwrap_or(ColumnValue::Null);
                    (field.to_string(), value)
                })
                .collect(),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Ordered sequence of records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    pub fn empty() -> Self {
        Dataset { records: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Column names taken from the first record; empty for an empty dataset.
    pub fn columns(&self) -> Vec<&str> {
        self.records
            .first()
            .map(|first| first.columns().collect())
            .unwrap_or_default()
    }

    /// Parses a JSON array of objects, projecting `fields` out of every element.
    ///
    /// # Example
    ///
    /// ```
    /// use tableview::{Dataset, COUNTRY_FIELDS};
    ///
    /// let json = r#"[{"name": "Chad", "region": "Africa", "capital": "N'Djamena"}]"#;
    /// let dataset = Dataset::from_json_rows(json, &COUNTRY_FIELDS).unwrap();
    /// assert_eq!(dataset.columns().len(), 5);
    /// assert!(dataset.records()[0].get("population").is_null());
    /// ```
    pub fn from_json_rows(json: &str, fields: &[&str]) -> Result<Dataset, ViewError> {
        let parsed: JsonValue = serde_json::from_str(json)?;
        Self::from_json_value(&parsed, fields)
    }

    /// Same as [`Dataset::from_json_rows`] for an already parsed document.
    pub fn from_json_value(value: &JsonValue, fields: &[&str]) -> Result<Dataset, ViewError> {
        let items = value
            .as_array()
            .ok_or_else(|| ViewError::Decode("expected a JSON array of records".to_string()))?;

        let records = items
            .iter()
            .map(|item| match item.as_object() {
                Some(obj) => Ok(Record::project(obj, fields)),
                None => Err(ViewError::Decode("expected an object in array".to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Dataset::new(records))
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Dataset::new(records)
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Dataset::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_insert_keeps_position() {
        let mut record = Record::new().with("a", 1i64).with("b", 2i64);
        record.insert("a", ColumnValue::Int64(10));

        assert_eq!(record.columns().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(record.get("a").as_i64(), Some(10));
        assert!(record.get("missing").is_null());
    }

    #[test]
    fn test_empty_dataset_has_no_columns() {
        assert!(Dataset::empty().columns().is_empty());
    }

    #[test]
    fn test_projection_drops_and_fills() {
        let json = r#"[
            {"name": "Afghanistan", "region": "Asia", "alpha2Code": "AF",
             "alpha3Code": "AFG", "population": 27657145, "capital": "Kabul"},
            {"name": "Antarctica", "alpha2Code": "AQ", "alpha3Code": "ATA"}
        ]"#;

        let dataset = Dataset::from_json_rows(json, &COUNTRY_FIELDS).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.columns(), COUNTRY_FIELDS.to_vec());

        let first = &dataset.records()[0];
        assert_eq!(first.len(), 5);
        assert!(first.get("capital").is_null());
        assert_eq!(first.get("population").as_i64(), Some(27657145));

        let second = &dataset.records()[1];
        assert!(second.get("region").is_null());
        assert!(second.get("population").is_null());
    }

    #[test]
    fn test_from_json_rejects_non_array() {
        let err = Dataset::from_json_rows(r#"{"status": 404}"#, &COUNTRY_FIELDS).unwrap_err();
        assert!(matches!(err, ViewError::Decode(_)));

        let err = Dataset::from_json_rows("[1, 2]", &COUNTRY_FIELDS).unwrap_err();
        assert!(matches!(err, ViewError::Decode(_)));
    }

    #[test]
    fn test_from_json_object_preserves_key_order() {
        let value = json!({"zeta": 1, "alpha": "x", "mid": null});
        let record = Record::from_json_object(value.as_object().unwrap());
        assert_eq!(record.columns().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_record_serializes_in_column_order() {
        let record = Record::new().with("name", "Peru").with("population", 31_000_000i64);
        let out = serde_json::to_string(&record).unwrap();
        assert_eq!(out, r#"{"name":"Peru","population":31000000}"#);
    }
}
