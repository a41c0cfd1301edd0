use serde_json::{Map, Value};

use super::scalar_text;

/// Composition keywords, in the order they are rendered.
pub const COMPOSITION_KEYWORDS: [&str; 3] = ["allOf", "anyOf", "oneOf"];

/// Leaf constraint keys and their display labels, in rendering order.
pub const LEAF_CONSTRAINTS: [(&str, &str); 8] = [
    ("format", "Format"),
    ("enum", "Enum"),
    ("pattern", "Pattern"),
    ("minLength", "MinLength"),
    ("maxLength", "MaxLength"),
    ("minimum", "Minimum"),
    ("maximum", "Maximum"),
    ("default", "Default"),
];

/// A schema node classified by the keys it carries.
///
/// Classification looks at the node only, never at parents or siblings, and
/// follows a fixed precedence: `$ref`, then composition keywords, then
/// `type`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaNode<'a> {
    Reference(&'a Map<String, Value>),
    Composition(&'a Map<String, Value>),
    Object(&'a Map<String, Value>),
    Array(&'a Map<String, Value>),
    /// Any other or missing `type`.
    Leaf(&'a Map<String, Value>),
    /// A bare sequence where a schema was expected.
    List(&'a [Value]),
    Null,
    Invalid(&'a Value),
}

impl<'a> SchemaNode<'a> {
    pub fn classify(value: &'a Value) -> Self {
        let map = match value {
            Value::Object(map) => map,
            Value::Array(items) => return SchemaNode::List(items),
            Value::Null => return SchemaNode::Null,
            other => return SchemaNode::Invalid(other),
        };

        if map.contains_key("$ref") {
            SchemaNode::Reference(map)
        } else if COMPOSITION_KEYWORDS.iter().any(|k| map.contains_key(*k)) {
            SchemaNode::Composition(map)
        } else {
            match map.get("type").and_then(Value::as_str) {
                Some("object") => SchemaNode::Object(map),
                Some("array") => SchemaNode::Array(map),
                _ => SchemaNode::Leaf(map),
            }
        }
    }
}

/// The `type` label of a schema mapping; `any` when absent.
pub fn type_label(map: &Map<String, Value>) -> String {
    map.get("type")
        .map(scalar_text)
        .unwrap_or_else(|| "any".to_string())
}

/// Property names listed under `required`. Non-list values read as none.
pub fn required_names(map: &Map<String, Value>) -> Vec<String> {
    map.get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().map(scalar_text).collect())
        .unwrap_or_default()
}
