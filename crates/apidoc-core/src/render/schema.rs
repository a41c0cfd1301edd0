//! Recursive schema-to-text formatter.
//!
//! [`format_schema`] turns any decoded schema value into indented lines of
//! text. It never fails: unexpected shapes produce a labelled diagnostic line
//! in place of the part that could not be rendered.

use serde_json::{Map, Value};

use crate::parse::schema::{
    COMPOSITION_KEYWORDS, LEAF_CONSTRAINTS, SchemaNode, required_names, type_label,
};
use crate::parse::{kind_of, non_empty_text, scalar_text};

/// Longest preview of an invalid schema value, in characters.
const INVALID_PREVIEW_CHARS: usize = 100;

/// Keys a `$ref` node renders itself instead of listing as siblings.
const REFERENCE_OWN_KEYS: [&str; 3] = ["$ref", "description", "title"];

/// Format `schema` as lines of text, each prefixed with two spaces per level
/// of `indent`.
///
/// The output depends only on the value passed in, so formatting the same
/// value twice gives the same lines.
pub fn format_schema(schema: &Value, indent: usize) -> Vec<String> {
    let mut out = Lines::default();
    write_schema(&mut out, schema, indent);
    out.0
}

#[derive(Default)]
struct Lines(Vec<String>);

impl Lines {
    fn push(&mut self, indent: usize, text: impl AsRef<str>) {
        self.0.push(format!("{}{}", "  ".repeat(indent), text.as_ref()));
    }
}

fn write_schema(out: &mut Lines, value: &Value, indent: usize) {
    let map = match SchemaNode::classify(value) {
        SchemaNode::List(items) => {
            out.push(indent, "Schema list:");
            for item in items {
                write_schema(out, item, indent + 1);
            }
            return;
        }
        SchemaNode::Null => {
            out.push(indent, "Schema is null");
            return;
        }
        SchemaNode::Invalid(other) => {
            let preview: String = scalar_text(other)
                .chars()
                .take(INVALID_PREVIEW_CHARS)
                .collect();
            out.push(
                indent,
                format!(
                    "Invalid schema format: {} - Content: {preview}",
                    kind_of(other)
                ),
            );
            return;
        }
        SchemaNode::Reference(map) => {
            out.push(indent, format!("Reference: {}", scalar_text(&map["$ref"])));
            write_header(out, map, indent);
            write_reference_siblings(out, map, indent);
            map
        }
        SchemaNode::Composition(map) => {
            write_header(out, map, indent);
            write_composition(out, map, indent);
            map
        }
        SchemaNode::Object(map) => {
            write_header(out, map, indent);
            write_object(out, map, indent);
            map
        }
        SchemaNode::Array(map) => {
            write_header(out, map, indent);
            write_array(out, map, indent);
            map
        }
        SchemaNode::Leaf(map) => {
            write_header(out, map, indent);
            write_leaf(out, map, indent);
            map
        }
    };
    write_example(out, map, indent);
}

fn write_header(out: &mut Lines, map: &Map<String, Value>, indent: usize) {
    if let Some(description) = non_empty_text(map, "description") {
        out.push(indent, format!("Description: {description}"));
    }
    if let Some(title) = non_empty_text(map, "title") {
        out.push(indent, format!("Title: {title}"));
    }
}

// Sibling keys of a `$ref` are listed flat, without recursing into them.
fn write_reference_siblings(out: &mut Lines, map: &Map<String, Value>, indent: usize) {
    for (key, value) in map {
        if !REFERENCE_OWN_KEYS.contains(&key.as_str()) {
            out.push(indent, format!("{key}: {}", scalar_text(value)));
        }
    }
}

fn write_composition(out: &mut Lines, map: &Map<String, Value>, indent: usize) {
    for keyword in COMPOSITION_KEYWORDS {
        let Some(value) = map.get(keyword) else {
            continue;
        };
        out.push(indent, format!("{keyword}:"));
        match value {
            Value::Array(variants) => {
                for variant in variants {
                    write_schema(out, variant, indent + 1);
                }
            }
            other => out.push(
                indent + 1,
                format!(
                    "Invalid '{keyword}' format: Expected list, got {}",
                    kind_of(other)
                ),
            ),
        }
    }
}

fn write_object(out: &mut Lines, map: &Map<String, Value>, indent: usize) {
    out.push(indent, "Type: object");

    let required = required_names(map);
    if !required.is_empty() {
        out.push(indent, format!("Required: {}", required.join(", ")));
    }

    match map.get("properties") {
        Some(Value::Object(properties)) => {
            out.push(indent, "Properties:");
            for (name, schema) in properties {
                let marker = if required.contains(name) {
                    " (required)"
                } else {
                    ""
                };
                out.push(indent + 1, format!("- {name}{marker}:"));
                write_schema(out, schema, indent + 2);
            }
        }
        Some(other) => out.push(
            indent,
            format!("Properties: Invalid format ({})", kind_of(other)),
        ),
        None => {}
    }

    match map.get("additionalProperties") {
        None | Some(Value::Null) => {}
        Some(schema @ Value::Object(_)) => {
            out.push(indent, "Additional Properties:");
            write_schema(out, schema, indent + 2);
        }
        Some(allowed) => {
            out.push(indent, "Additional Properties:");
            out.push(indent + 1, format!("Allowed: {}", scalar_text(allowed)));
        }
    }
}

fn write_array(out: &mut Lines, map: &Map<String, Value>, indent: usize) {
    out.push(indent, "Type: array");
    match map.get("items") {
        Some(items) => {
            out.push(indent, "Items:");
            write_schema(out, items, indent + 1);
        }
        None => out.push(indent, "Items: (Not specified)"),
    }
}

fn write_leaf(out: &mut Lines, map: &Map<String, Value>, indent: usize) {
    out.push(indent, format!("Type: {}", type_label(map)));
    for (key, label) in LEAF_CONSTRAINTS {
        let Some(value) = map.get(key) else {
            continue;
        };
        let text = match value {
            Value::Array(values) if key == "enum" => values
                .iter()
                .map(scalar_text)
                .collect::<Vec<_>>()
                .join(", "),
            other => scalar_text(other),
        };
        out.push(indent, format!("{label}: {text}"));
    }
}

fn write_example(out: &mut Lines, map: &Map<String, Value>, indent: usize) {
    let Some(example) = map.get("example") else {
        return;
    };
    match example {
        Value::Object(_) | Value::Array(_) => match serde_json::to_string_pretty(example) {
            Ok(block) => {
                out.push(indent, "Example:");
                for line in block.lines() {
                    out.push(indent, line);
                }
            }
            Err(e) => {
                log::warn!("could not format example value: {e}");
                out.push(indent, format!("Example: {} (raw)", scalar_text(example)));
            }
        },
        scalar => out.push(indent, format!("Example: {}", scalar_text(scalar))),
    }
}
