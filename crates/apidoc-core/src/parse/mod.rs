//! Decoding of specification files and read-only views over the decoded tree.
//!
//! Specifications are decoded into a [`serde_json::Value`] rather than typed
//! structs so that malformed sections can still be described in the output
//! document instead of failing the whole file. The views in the submodules
//! read fields lazily and treat wrongly-shaped fields as absent.

pub mod components;
pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod request_body;
pub mod response;
pub mod schema;
pub mod server;
pub mod spec;

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{DecodeError, ShapeError};

/// Decoder selected from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
}

impl SourceFormat {
    /// Pick the decoder for `path`. Extensions are matched case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(SourceFormat::Json),
            "yaml" | "yml" => Some(SourceFormat::Yaml),
            _ => None,
        }
    }
}

/// Decode a specification from YAML.
pub fn from_yaml(input: &str) -> Result<Value, DecodeError> {
    let value: Value = serde_yaml_ng::from_str(input)?;
    Ok(value)
}

/// Decode a specification from JSON.
pub fn from_json(input: &str) -> Result<Value, DecodeError> {
    let value: Value = serde_json::from_str(input)?;
    Ok(value)
}

/// Read and decode a specification file, choosing the decoder by extension.
pub fn from_path(path: &Path) -> Result<Value, DecodeError> {
    let format = SourceFormat::from_path(path)
        .ok_or_else(|| DecodeError::UnsupportedExtension(path.display().to_string()))?;
    let content = fs::read_to_string(path)?;
    match format {
        SourceFormat::Json => from_json(&content),
        SourceFormat::Yaml => from_yaml(&content),
    }
}

/// Name of the JSON kind of `value`, used in diagnostics.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "mapping",
    }
}

/// Text shown for a value in the document: strings verbatim, everything else
/// as compact JSON.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Read `key` from `map` as display text.
pub(crate) fn text_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).map(scalar_text)
}

/// Read `key` from `map` as display text, skipping empty strings and nulls.
pub(crate) fn non_empty_text(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        other => Some(scalar_text(other)),
    }
}

/// Borrow `value` as a mapping or report its kind.
pub(crate) fn expect_mapping<'a>(
    field: &str,
    value: &'a Value,
) -> Result<&'a Map<String, Value>, ShapeError> {
    value.as_object().ok_or_else(|| ShapeError {
        field: field.to_string(),
        expected: "mapping",
        found: kind_of(value),
    })
}

/// Borrow `value` as a sequence or report its kind.
pub(crate) fn expect_sequence<'a>(field: &str, value: &'a Value) -> Result<&'a [Value], ShapeError> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ShapeError {
            field: field.to_string(),
            expected: "sequence",
            found: kind_of(value),
        })
}
