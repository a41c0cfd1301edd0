use serde_json::{Map, Value};

use super::components::SchemaCatalog;
use super::operation::PathItem;
use super::server::Server;
use super::{expect_mapping, expect_sequence, kind_of, non_empty_text, text_field};
use crate::error::{DecodeError, ShapeError};

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq)]
pub struct Info {
    pub title: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
}

/// Read-only view over the decoded root of one specification file.
#[derive(Debug, Clone, Copy)]
pub struct Specification<'a> {
    root: &'a Map<String, Value>,
}

impl<'a> Specification<'a> {
    /// Wrap a decoded document. The root must be a mapping.
    pub fn new(value: &'a Value) -> Result<Self, DecodeError> {
        value
            .as_object()
            .map(|root| Self { root })
            .ok_or(DecodeError::NotAMapping(kind_of(value)))
    }

    /// `None` when the specification has no `info` section.
    pub fn info(&self) -> Option<Result<Info, ShapeError>> {
        let value = self.root.get("info")?;
        Some(expect_mapping("info", value).map(|info| Info {
            title: text_field(info, "title"),
            version: text_field(info, "version"),
            description: text_field(info, "description"),
        }))
    }

    /// `None` when `servers` is absent or an empty list.
    pub fn servers(&self) -> Option<Result<Vec<Server>, ShapeError>> {
        let value = self.root.get("servers")?;
        match expect_sequence("servers", value) {
            Ok([]) => None,
            Ok(entries) => Some(Ok(entries.iter().map(Server::from_value).collect())),
            Err(e) => Some(Err(e)),
        }
    }

    /// Path items in document order. Entries whose value is not a mapping are
    /// dropped. `None` when the specification has no `paths` section.
    pub fn paths(&self) -> Option<Result<Vec<(&'a str, PathItem<'a>)>, ShapeError>> {
        let value = self.root.get("paths")?;
        Some(expect_mapping("paths", value).map(|paths| {
            paths
                .iter()
                .filter_map(|(path, item)| {
                    item.as_object()
                        .map(|item| (path.as_str(), PathItem::new(item)))
                })
                .collect()
        }))
    }

    /// Named schemas from `components.schemas`, or the legacy top-level
    /// `definitions` mapping when no component schemas exist.
    pub fn schemas(&self) -> Option<SchemaCatalog<'a>> {
        SchemaCatalog::locate(self.root)
    }

    /// `openapi` or `swagger` version string, whichever is present.
    pub fn version_label(&self) -> Option<String> {
        non_empty_text(self.root, "openapi").or_else(|| non_empty_text(self.root, "swagger"))
    }
}
