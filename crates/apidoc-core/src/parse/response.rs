use serde_json::{Map, Value};

use super::media_type::{MediaType, content_map};
use super::text_field;

/// A response definition.
#[derive(Debug, Clone, Copy)]
pub struct Response<'a> {
    map: &'a Map<String, Value>,
}

/// What a response carries, in order of preference.
#[derive(Debug, Clone)]
pub enum ResponseBody<'a> {
    /// OpenAPI 3.x `content` keyed by media type.
    Content(Vec<(&'a str, MediaType<'a>)>),
    /// Swagger 2.0 top-level `schema`.
    LegacySchema(&'a Value),
    None,
}

impl<'a> Response<'a> {
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(|map| Self { map })
    }

    pub fn description(&self) -> Option<String> {
        text_field(self.map, "description")
    }

    pub fn body(&self) -> ResponseBody<'a> {
        if let Some(content) = content_map(self.map.get("content")) {
            return ResponseBody::Content(content);
        }
        match self.map.get("schema") {
            Some(schema) => ResponseBody::LegacySchema(schema),
            None => ResponseBody::None,
        }
    }
}
