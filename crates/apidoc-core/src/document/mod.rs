//! Append-oriented document building.
//!
//! [`DocumentBuilder`] is the seam between document assembly and a concrete
//! output format. Implementations receive text that has already been
//! passed through [`sanitize`].

pub mod outline;

use std::path::Path;

use serde::Serialize;

use crate::error::DocumentError;

pub use outline::{Block, OutlineDocument, OutlineFormat};

/// Deepest heading level accepted by builders. Level 0 is the document title.
pub const MAX_HEADING_LEVEL: u8 = 9;

/// Character styling for a paragraph, plus an optional named style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParagraphStyle {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl ParagraphStyle {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }

    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Self::default()
        }
    }
}

/// A table column: header text and a width hint in inches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub header: String,
    pub width_inches: f32,
}

impl Column {
    pub fn new(header: impl Into<String>, width_inches: f32) -> Self {
        Self {
            header: header.into(),
            width_inches,
        }
    }
}

/// A table with a fixed set of columns. The header row is implied by the
/// columns; `rows` holds the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Check that every row has one cell per column.
    pub fn validate(&self) -> Result<(), DocumentError> {
        let expected = self.columns.len();
        for (row, cells) in self.rows.iter().enumerate() {
            if cells.len() != expected {
                return Err(DocumentError::TableShape {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
        }
        Ok(())
    }

    /// Copy of the table with every header and cell sanitized.
    pub fn sanitized(&self) -> Table {
        Table {
            columns: self
                .columns
                .iter()
                .map(|c| Column::new(sanitize(&c.header), c.width_inches))
                .collect(),
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(|cell| sanitize(cell)).collect())
                .collect(),
        }
    }
}

/// Builds one output document by appending blocks in order.
pub trait DocumentBuilder {
    fn add_heading(&mut self, text: &str, level: u8) -> Result<(), DocumentError>;

    fn add_paragraph(&mut self, text: &str, style: &ParagraphStyle) -> Result<(), DocumentError>;

    /// Append monospace text. Line breaks inside `text` are kept.
    fn add_code_block(&mut self, text: &str) -> Result<(), DocumentError>;

    fn add_table(&mut self, table: &Table) -> Result<(), DocumentError>;

    fn save(&self, path: &Path) -> Result<(), DocumentError>;
}

/// Creates fresh documents of one output format.
pub trait DocumentFormat {
    type Document: DocumentBuilder;

    fn create(&self) -> Self::Document;

    /// File extension of saved documents, without the dot.
    fn extension(&self) -> &str;
}

/// Strip control characters below U+0020 other than tab, line feed and
/// carriage return.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| (*c as u32) >= 0x20 || matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

/// Reject heading levels outside `0..=MAX_HEADING_LEVEL`.
pub fn check_heading_level(level: u8) -> Result<(), DocumentError> {
    if level > MAX_HEADING_LEVEL {
        return Err(DocumentError::HeadingLevel(level));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_control_chars() {
        assert_eq!(sanitize("a\u{0}b\u{7}c\u{1b}d"), "abcd");
        assert_eq!(sanitize("tab\tnl\ncr\r"), "tab\tnl\ncr\r");
        assert_eq!(sanitize("héllo wörld"), "héllo wörld");
    }

    #[test]
    fn test_table_validate() {
        let mut table = Table::new(vec![Column::new("A", 1.0), Column::new("B", 1.0)]);
        table.push_row(vec!["1".into(), "2".into()]);
        assert!(table.validate().is_ok());

        table.push_row(vec!["only one".into()]);
        let err = table.validate().unwrap_err();
        assert!(matches!(
            err,
            DocumentError::TableShape {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_table_sanitized() {
        let mut table = Table::new(vec![Column::new("Na\u{1}me", 1.2)]);
        table.push_row(vec!["i\u{0}d".into()]);
        let clean = table.sanitized();
        assert_eq!(clean.columns[0].header, "Name");
        assert_eq!(clean.rows[0][0], "id");
    }

    #[test]
    fn test_heading_level_bounds() {
        assert!(check_heading_level(0).is_ok());
        assert!(check_heading_level(9).is_ok());
        assert!(check_heading_level(10).is_err());
    }
}
