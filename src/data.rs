//! Test-data records and the rotating data source.

use crate::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// One complete or partial fill-in for the multi-page form: field name to
/// field value. Absent keys, empty values, and the literal token `"null"`
/// (any casing) all mean "leave the control at its default".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestDataRecord {
    fields: HashMap<String, String>,
}

impl TestDataRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Raw field value, if the key exists at all.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(|s| s.as_str())
    }

    /// A field is present iff the key exists, the value is non-empty, and the
    /// value is not the null marker (case-insensitive).
    pub fn is_present(&self, key: &str) -> bool {
        match self.fields.get(key) {
            Some(v) => !v.is_empty() && !v.eq_ignore_ascii_case("null"),
            None => false,
        }
    }

    /// Field value, but only when present per [`is_present`](Self::is_present).
    pub fn present(&self, key: &str) -> Option<&str> {
        if self.is_present(key) {
            self.get(key)
        } else {
            None
        }
    }

    /// Number of keys in the record (present or not).
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TestDataRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Loads a catalog of test-data records once and hands out one record per
/// call, rotating circularly. The cursor is the only mutable state; share the
/// source via `Arc` to get process-wide rotation across concurrent scenarios.
#[derive(Debug)]
pub struct TestDataSource {
    records: Vec<TestDataRecord>,
    cursor: Mutex<usize>,
}

impl TestDataSource {
    /// Root key the backing file is expected to carry.
    pub const DEFAULT_ARRAY_KEY: &'static str = "TestData";

    /// Load a catalog from a JSON file using the default array key.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with_key(path, Self::DEFAULT_ARRAY_KEY)
    }

    /// Load a catalog from a JSON file, naming the root array key.
    pub fn load_with_key<P: AsRef<Path>>(path: P, key: &str) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::DataSource(format!("could not read '{}': {}", path.display(), e))
        })?;
        Self::parse(&json, key)
    }

    /// Parse a catalog from a JSON string.
    pub fn parse(json: &str, key: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(json)
            .map_err(|e| Error::DataSource(format!("invalid json: {e}")))?;

        let entries = root
            .get(key)
            .and_then(Value::as_array)
            .ok_or_else(|| Error::DataSource(format!("missing '{key}' array")))?;

        if entries.is_empty() {
            return Err(Error::DataSource(format!("the '{key}' array is empty")));
        }

        let mut records = Vec::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            records.push(record_from_value(entry, key, i)?);
        }

        debug!("loaded {} test data records", records.len());
        Ok(Self {
            records,
            cursor: Mutex::new(0),
        })
    }

    /// Build a source directly from records. Fails on an empty catalog.
    pub fn from_records(records: Vec<TestDataRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(Error::DataSource("catalog must not be empty".into()));
        }
        Ok(Self {
            records,
            cursor: Mutex::new(0),
        })
    }

    /// Return the next record in strict round-robin order and advance the
    /// cursor. The read-and-increment is atomic: no two callers observe the
    /// same pre-increment cursor value.
    pub fn next_record(&self) -> TestDataRecord {
        let index = {
            let mut cursor = self
                .cursor
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let index = *cursor % self.records.len();
            *cursor = cursor.wrapping_add(1);
            index
        };
        debug!("serving test data record {index}");
        self.records[index].clone()
    }

    /// Number of records in the catalog. Always at least 1.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Read-only view of the catalog, in rotation order.
    pub fn records(&self) -> &[TestDataRecord] {
        &self.records
    }
}

fn record_from_value(entry: &Value, key: &str, index: usize) -> Result<TestDataRecord> {
    let Some(object) = entry.as_object() else {
        return Err(Error::DataSource(format!(
            "entry {index} of '{key}' is not an object"
        )));
    };

    let mut fields = HashMap::with_capacity(object.len());
    for (name, value) in object {
        let value = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => String::new(),
            Value::Array(_) | Value::Object(_) => {
                return Err(Error::DataSource(format!(
                    "field '{name}' of entry {index} is not a scalar"
                )));
            }
        };
        fields.insert(name.clone(), value);
    }
    Ok(TestDataRecord { fields })
}
