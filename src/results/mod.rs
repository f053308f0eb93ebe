//! Result summaries as produced by the bfs test-suite run.
//!
//! A summary file is a JSON object with a single entry, keyed by an arbitrary
//! label, whose value holds the `pass`, `fail` and optional `skip` counts:
//!
//! ```json
//! { "bfs": { "pass": 120, "fail": 3, "skip": 7 } }
//! ```

use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CompareError, Result};

/// Pass/skip/fail counts of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    pub pass: i64,
    pub skip: i64,
    pub fail: i64,
}

/// A loaded summary file: the single entry's key and its counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    pub key: String,
    #[serde(flatten)]
    pub record: ResultRecord,
}

impl ResultSet {
    pub fn new(key: impl Into<String>, record: ResultRecord) -> Self {
        Self {
            key: key.into(),
            record,
        }
    }

    /// Read and validate a summary file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| CompareError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("read {} bytes from {}", content.len(), path.display());
        Self::from_json(&content, path)
    }

    /// Parse summary JSON. `origin` is only used to label errors.
    pub fn from_json(content: &str, origin: &Path) -> Result<Self> {
        let value: Value = serde_json::from_str(content).map_err(|source| CompareError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        Self::from_value(value, origin)
    }

    fn from_value(value: Value, origin: &Path) -> Result<Self> {
        let Value::Object(entries) = value else {
            return Err(CompareError::NotAnObject {
                path: origin.to_path_buf(),
                what: "result summary".to_string(),
            });
        };

        let count = entries.len();
        let mut entries = entries.into_iter();
        let (key, record) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            _ => {
                return Err(CompareError::EntryCount {
                    path: origin.to_path_buf(),
                    count,
                })
            }
        };

        let Value::Object(fields) = record else {
            return Err(CompareError::NotAnObject {
                path: origin.to_path_buf(),
                what: format!("result '{}'", key),
            });
        };

        let reader = FieldReader {
            origin,
            key: &key,
            fields: &fields,
        };
        let record = ResultRecord {
            pass: reader.required("pass")?,
            skip: reader.optional("skip")?.unwrap_or(0),
            fail: reader.required("fail")?,
        };

        Ok(Self { key, record })
    }
}

struct FieldReader<'a> {
    origin: &'a Path,
    key: &'a str,
    fields: &'a Map<String, Value>,
}

impl FieldReader<'_> {
    fn required(&self, field: &'static str) -> Result<i64> {
        self.optional(field)?
            .ok_or_else(|| CompareError::MissingField {
                path: self.path(),
                key: self.key.to_string(),
                field,
            })
    }

    /// `null` is treated the same as an absent field.
    fn optional(&self, field: &'static str) -> Result<Option<i64>> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => parse_count(value)
                .map(Some)
                .ok_or_else(|| CompareError::InvalidCount {
                    path: self.path(),
                    key: self.key.to_string(),
                    field,
                    value: value.to_string(),
                }),
        }
    }

    fn path(&self) -> PathBuf {
        self.origin.to_path_buf()
    }
}

/// Counts are integers, but the suite runner sometimes writes them as strings.
fn parse_count(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
