use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::{scalar_text, text_field};

/// An API parameter, identified by its `(name, in)` pair.
#[derive(Debug, Clone, Copy)]
pub struct Parameter<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Parameter<'a> {
    /// Returns `None` unless `value` is a mapping carrying both `name` and
    /// `in`. Bare `$ref` parameters therefore do not produce a view.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        let map = value.as_object()?;
        if map.contains_key("name") && map.contains_key("in") {
            Some(Self { map })
        } else {
            None
        }
    }

    pub fn key(&self) -> (String, String) {
        (self.name(), self.location())
    }

    pub fn name(&self) -> String {
        text_field(self.map, "name").unwrap_or_default()
    }

    pub fn location(&self) -> String {
        text_field(self.map, "in").unwrap_or_default()
    }

    /// `required` as shown in the document; `false` when absent.
    pub fn required(&self) -> String {
        self.map
            .get("required")
            .map(scalar_text)
            .unwrap_or_else(|| "false".to_string())
    }

    pub fn description(&self) -> Option<String> {
        text_field(self.map, "description")
    }

    /// The `schema` field, skipped when missing, null or empty.
    pub fn schema(&self) -> Option<&'a Value> {
        self.map.get("schema").filter(|s| is_present(s))
    }

    /// Swagger 2.0 parameters declare `type` directly.
    pub fn legacy_type(&self) -> Option<String> {
        text_field(self.map, "type")
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Collect the parameter views from a `parameters` list. Non-list values and
/// unidentifiable entries are ignored.
pub fn parameter_list(value: Option<&Value>) -> Vec<Parameter<'_>> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Parameter::from_value).collect())
        .unwrap_or_default()
}

/// Union of path-level and operation-level parameters, keyed by `(name, in)`.
///
/// A later entry replaces an earlier one with the same key but keeps the
/// earlier position, so operation-level definitions override shared ones.
pub fn merge_parameters<'a>(
    path_level: &[Parameter<'a>],
    operation_level: &[Parameter<'a>],
) -> Vec<Parameter<'a>> {
    let mut merged: IndexMap<(String, String), Parameter<'a>> = IndexMap::new();
    for param in path_level.iter().chain(operation_level) {
        merged.insert(param.key(), *param);
    }
    merged.into_values().collect()
}
