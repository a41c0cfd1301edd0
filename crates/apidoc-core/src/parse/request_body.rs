use serde_json::{Map, Value};

use super::media_type::{MediaType, content_map};
use super::{scalar_text, text_field};

/// A request body definition.
#[derive(Debug, Clone, Copy)]
pub struct RequestBody<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> RequestBody<'a> {
    /// Only mapping values describe a request body.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(|map| Self { map })
    }

    pub fn required(&self) -> String {
        self.map
            .get("required")
            .map(scalar_text)
            .unwrap_or_else(|| "false".to_string())
    }

    pub fn description(&self) -> Option<String> {
        text_field(self.map, "description")
    }

    pub fn content(&self) -> Vec<(&'a str, MediaType<'a>)> {
        content_map(self.map.get("content")).unwrap_or_default()
    }
}
