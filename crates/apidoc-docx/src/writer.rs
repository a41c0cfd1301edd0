use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use apidoc_core::document::{
    Block, DocumentBuilder, DocumentFormat, ParagraphStyle, Table, check_heading_level,
};
use apidoc_core::error::DocumentError;

use crate::package;

/// Word document built in memory and written as a `.docx` package on save.
#[derive(Debug, Clone, Default)]
pub struct DocxDocument {
    blocks: Vec<Block>,
}

impl DocxDocument {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentBuilder for DocxDocument {
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
        let parts = package::parts(&self.blocks)?;
        let file = File::create(path)?;
        package::write_package(BufWriter::new(file), &parts)?;
        log::debug!("wrote {} blocks to {}", self.blocks.len(), path.display());
        Ok(())
    }
}

/// Produces [`DocxDocument`]s saved as `.docx`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxFormat;

impl DocumentFormat for DocxFormat {
    type Document = DocxDocument;

    fn create(&self) -> DocxDocument {
        DocxDocument::new()
    }

    fn extension(&self) -> &str {
        "docx"
    }
}
