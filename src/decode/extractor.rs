//! Record extractor implementation

use crate::error::{Error, Result};
use crate::types::JsonObject;
use serde_json::Value;
use tracing::warn;

/// Extracts records from a response body using a JSONPath
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordExtractor {
    /// JSONPath locating the records
    record_path: String,
    /// Stamped onto every record when set
    profile_id: Option<i64>,
}

impl RecordExtractor {
    /// Create an extractor for the given record path
    pub fn new(record_path: impl Into<String>) -> Self {
        Self {
            record_path: record_path.into(),
            profile_id: None,
        }
    }

    /// Stamp `profile_id` on every extracted record
    #[must_use]
    pub fn with_profile_id(mut self, profile_id: Option<i64>) -> Self {
        self.profile_id = profile_id;
        self
    }

    /// The configured record path
    pub fn record_path(&self) -> &str {
        &self.record_path
    }

    /// Evaluate the record path against `body`.
    ///
    /// A missing or empty node yields no records. The returned iterator is
    /// single-pass; annotation happens as records are pulled.
    pub fn extract(&self, body: &Value) -> Result<Records> {
        let matched = extract_with_jsonpath(body, &self.record_path)?;

        Ok(Records {
            inner: matched.into_iter(),
            profile_id: self.profile_id,
        })
    }
}

/// Lazy sequence of extracted records
#[derive(Debug)]
pub struct Records {
    inner: std::vec::IntoIter<Value>,
    profile_id: Option<i64>,
}

impl Iterator for Records {
    type Item = JsonObject;

    fn next(&mut self) -> Option<Self::Item> {
        for value in self.inner.by_ref() {
            match value {
                Value::Object(mut record) => {
                    if let Some(profile_id) = self.profile_id {
                        record.insert("profile_id".to_string(), Value::from(profile_id));
                    }
                    return Some(record);
                }
                other => {
                    warn!("Skipping non-object record: {other}");
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.inner.len()))
    }
}

/// Follow a simple dot path (`$.a.b`) through nested objects.
///
/// Used for scalar lookups such as `total_pages`; records go through JSONPath.
pub fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    if path.is_empty() || path == "$" {
        return Some(value);
    }

    let mut current = value;
    for part in path.split('.') {
        match current {
            Value::Object(map) => {
                current = map.get(part)?;
            }
            _ => return None,
        }
    }

    Some(current)
}

/// Evaluate a JSONPath expression, returning every matched node
fn extract_with_jsonpath(value: &Value, path: &str) -> Result<Vec<Value>> {
    use jsonpath_rust::JsonPath;

    let jp = JsonPath::try_from(path).map_err(|e| Error::JsonPath {
        message: format!("Invalid JSONPath '{path}': {e}"),
    })?;

    match jp.find(value) {
        Value::Array(arr) => Ok(arr),
        Value::Null => Ok(vec![]),
        other => Ok(vec![other]),
    }
}
