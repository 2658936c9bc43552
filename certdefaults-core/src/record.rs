use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CertDefaultsError, Result};

/// A certificate record: an ordered mapping of field name to value.
///
/// Input records are certificate intents written by the operator; output
/// records are the same mapping enriched with the fields the issuer needs.
/// Key order is insertion order, so serialized output follows the input
/// layout with derived keys appended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CertRecord(Map<String, Value>);

impl CertRecord {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build a record from an arbitrary JSON value, which must be a mapping.
    pub fn from_value(index: usize, value: &Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map.clone())),
            other => Err(CertDefaultsError::InvalidRecord {
                index,
                reason: format!("expected a mapping, got {}", kind_of(other)),
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value of `key`, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Value of `key` with absent and null collapsed to `None`.
    pub fn get_present(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Insert or overwrite a field. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drop every field whose value is falsy.
    pub fn pruned(self) -> Self {
        Self(self.0.into_iter().filter(|(_, v)| is_truthy(v)).collect())
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for CertRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<CertRecord> for Value {
    fn from(record: CertRecord) -> Self {
        Value::Object(record.0)
    }
}

/// Truthiness of a field value.
///
/// Null, `false`, numeric zero, and empty strings, sequences and mappings
/// are falsy. Everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
