//! Parsing of intent documents.
//!
//! A document is YAML (JSON is accepted as well) holding either a sequence of
//! certificate intents or a mapping with the sequence under `certs`.

use serde_json::Value;

use crate::error::{CertDefaultsError, Result};
use crate::record::{CertRecord, kind_of};

/// Key under which a mapping document holds its intents.
pub const CERTS_KEY: &str = "certs";

/// Parse document text into an untyped value, unwrapping a `certs` mapping.
pub fn parse_intents(text: &str) -> Result<Value> {
    let doc: Value = serde_yaml::from_str(text)?;
    Ok(match doc {
        Value::Object(mut map) if map.contains_key(CERTS_KEY) => {
            map.remove(CERTS_KEY).unwrap_or(Value::Null)
        }
        Value::Null => Value::Array(Vec::new()),
        other => other,
    })
}

/// Convert an untyped intents value into records.
pub fn records_from_value(value: &Value) -> Result<Vec<CertRecord>> {
    let items = value.as_array().ok_or_else(|| {
        CertDefaultsError::InvalidDocument(format!(
            "expected a sequence of certificate intents, got {}",
            kind_of(value)
        ))
    })?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| CertRecord::from_value(index, item))
        .collect()
}
