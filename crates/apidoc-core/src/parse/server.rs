use serde_json::Value;

use super::non_empty_text;

/// A server URL definition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Server {
    pub url: Option<String>,
    pub description: Option<String>,
}

impl Server {
    /// Entries that are not mappings read as a server with no fields.
    pub fn from_value(value: &Value) -> Self {
        match value.as_object() {
            Some(map) => Self {
                url: non_empty_text(map, "url"),
                description: non_empty_text(map, "description"),
            },
            None => Self::default(),
        }
    }
}
