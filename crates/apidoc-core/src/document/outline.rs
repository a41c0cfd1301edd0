use std::fs;
use std::path::Path;

use serde::Serialize;

use super::{
    DocumentBuilder, DocumentFormat, ParagraphStyle, Table, check_heading_level,
};
use crate::error::DocumentError;

/// One appended block of an [`OutlineDocument`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading {
        level: u8,
        text: String,
    },
    Paragraph {
        text: String,
        #[serde(flatten)]
        style: ParagraphStyle,
    },
    CodeBlock {
        text: String,
    },
    Table(Table),
}

/// In-memory document that records every block it is given.
///
/// Saving writes the recorded blocks as pretty-printed JSON.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OutlineDocument {
    pub blocks: Vec<Block>,
}

impl OutlineDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of every heading at `level`, in order.
    pub fn headings(&self, level: u8) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading { level: l, text } if *l == level => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every table in the document, in order.
    pub fn tables(&self) -> Vec<&Table> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Table(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    /// Text of every paragraph, in order.
    pub fn paragraphs(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Paragraph { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DocumentBuilder for OutlineDocument {
    fn add_heading(&mut self, text: &str, level: u8) -> Result<(), DocumentError> {
        check_heading_level(level)?;
        self.blocks.push(Block::Heading {
            level,
            text: text.to_string(),
        });
        Ok(())
    }

    fn add_paragraph(&mut self, text: &str, style: &ParagraphStyle) -> Result<(), DocumentError> {
        self.blocks.push(Block::Paragraph {
            text: text.to_string(),
            style: style.clone(),
        });
        Ok(())
    }

    fn add_code_block(&mut self, text: &str) -> Result<(), DocumentError> {
        self.blocks.push(Block::CodeBlock {
            text: text.to_string(),
        });
        Ok(())
    }

    fn add_table(&mut self, table: &Table) -> Result<(), DocumentError> {
        table.validate()?;
        self.blocks.push(Block::Table(table.clone()));
        Ok(())
    }

    fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Produces [`OutlineDocument`]s saved as `.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineFormat;

impl DocumentFormat for OutlineFormat {
    type Document = OutlineDocument;

    fn create(&self) -> OutlineDocument {
        OutlineDocument::new()
    }

    fn extension(&self) -> &str {
        "json"
    }
}
