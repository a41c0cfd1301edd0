use serde_json::{Map, Value};

/// A media type object under `content`.
#[derive(Debug, Clone, Copy)]
pub struct MediaType<'a> {
    map: &'a Map<String, Value>,
}

/// Examples attached to a media type.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaExamples<'a> {
    /// Keyed `examples` mapping. Each value is the example's `value` field
    /// when it has one, otherwise the example object itself.
    Named(Vec<(&'a str, &'a Value)>),
    /// A single `example` value.
    Single(&'a Value),
}

impl<'a> MediaType<'a> {
    pub fn schema(&self) -> Option<&'a Value> {
        self.map.get("schema")
    }

    /// A keyed `examples` mapping takes precedence over a single `example`.
    pub fn examples(&self) -> Option<MediaExamples<'a>> {
        if let Some(named) = self.map.get("examples").and_then(Value::as_object) {
            let entries = named
                .iter()
                .map(|(name, example)| (name.as_str(), example_value(example)))
                .collect();
            return Some(MediaExamples::Named(entries));
        }
        self.map.get("example").map(MediaExamples::Single)
    }
}

fn example_value(example: &Value) -> &Value {
    example
        .as_object()
        .and_then(|obj| obj.get("value"))
        .unwrap_or(example)
}

/// Media types of a `content` mapping in document order. Entries that are
/// not mappings are dropped; a non-mapping `content` yields `None`.
pub fn content_map(value: Option<&Value>) -> Option<Vec<(&str, MediaType<'_>)>> {
    let content = value?.as_object()?;
    Some(
        content
            .iter()
            .filter_map(|(media, spec)| {
                spec.as_object()
                    .map(|map| (media.as_str(), MediaType { map }))
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_named_examples_prefer_value() {
        let content = json!({
            "application/json": {
                "examples": {
                    "cat": {"summary": "A cat", "value": {"name": "Tom"}},
                    "bare": {"name": "Rex"}
                },
                "example": {"ignored": true}
            }
        });
        let media = content_map(Some(&content)).unwrap();
        let Some(MediaExamples::Named(examples)) = media[0].1.examples() else {
            panic!("expected named examples");
        };
        assert_eq!(examples[0], ("cat", &json!({"name": "Tom"})));
        assert_eq!(examples[1], ("bare", &json!({"name": "Rex"})));
    }

    #[test]
    fn test_single_example() {
        let content = json!({"text/plain": {"example": "hello"}});
        let media = content_map(Some(&content)).unwrap();
        assert_eq!(
            media[0].1.examples(),
            Some(MediaExamples::Single(&json!("hello")))
        );
    }

    #[test]
    fn test_non_mapping_entries_dropped() {
        let content = json!({"application/json": "nope", "text/plain": {}});
        let media = content_map(Some(&content)).unwrap();
        assert_eq!(media.len(), 1);
        assert_eq!(media[0].0, "text/plain");
        assert!(content_map(Some(&json!([1]))).is_none());
    }
}
