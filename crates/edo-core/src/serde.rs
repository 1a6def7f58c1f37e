//! Canonical JSON helpers used for reports and hashing.

use std::collections::BTreeMap;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::errors::{EdoError, ErrorInfo};

fn serde_error(code: &str, err: impl ToString) -> EdoError {
    EdoError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let ordered = map
                .into_iter()
                .map(|(key, value)| (key, canonicalize(value)))
                .collect::<BTreeMap<_, _>>();
            Value::Object(Map::from_iter(ordered))
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Serializes a value into canonical JSON bytes with deterministic key ordering.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, EdoError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("json_serialize", err))?;
    let canonical = canonicalize(value);
    let mut bytes = Vec::new();
    serde_json::to_writer_pretty(&mut bytes, &canonical)
        .map_err(|err| serde_error("json_write", err))?;
    Ok(bytes)
}

/// Deserializes a value from JSON bytes.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, EdoError> {
    serde_json::from_slice(data).map_err(|err| serde_error("json_deserialize", err))
}
