use serde_json::{Map, Value};

/// Where the named schemas of a specification were found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    /// OpenAPI 3.x `components.schemas`.
    Components,
    /// Swagger 2.0 top-level `definitions`.
    Definitions,
}

impl CatalogSource {
    pub fn heading(&self) -> &'static str {
        match self {
            CatalogSource::Components => "Schemas (Components)",
            CatalogSource::Definitions => "Definitions",
        }
    }
}

/// The named schema collection of a specification.
#[derive(Debug, Clone, Copy)]
pub struct SchemaCatalog<'a> {
    pub source: CatalogSource,
    raw: &'a Value,
}

impl<'a> SchemaCatalog<'a> {
    pub(crate) fn locate(root: &'a Map<String, Value>) -> Option<Self> {
        let components = root
            .get("components")
            .and_then(Value::as_object)
            .and_then(|c| c.get("schemas"));
        if let Some(raw) = components {
            return Some(Self {
                source: CatalogSource::Components,
                raw,
            });
        }
        root.get("definitions").map(|raw| Self {
            source: CatalogSource::Definitions,
            raw,
        })
    }

    /// Named schemas in document order. Empty when the collection is not a
    /// mapping.
    pub fn entries(self) -> impl Iterator<Item = (&'a str, &'a Value)> {
        self.raw
            .as_object()
            .into_iter()
            .flat_map(|map| map.iter().map(|(name, schema)| (name.as_str(), schema)))
    }
}
