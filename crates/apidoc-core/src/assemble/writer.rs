use crate::document::{DocumentBuilder, ParagraphStyle, Table, sanitize};
use crate::error::{DocumentError, ShapeError};

/// Wraps a [`DocumentBuilder`] so that every append is sanitized and every
/// failure is contained to the block that caused it.
///
/// A failed block is logged and replaced by a visible placeholder; the count
/// of such replacements is kept for the caller.
pub(crate) struct Writer<'d, D: DocumentBuilder> {
    doc: &'d mut D,
    recovered: usize,
}

impl<'d, D: DocumentBuilder> Writer<'d, D> {
    pub fn new(doc: &'d mut D) -> Self {
        Self { doc, recovered: 0 }
    }

    pub fn recovered(&self) -> usize {
        self.recovered
    }

    /// Heading whose failure is not recoverable.
    pub fn title(&mut self, text: &str, level: u8) -> Result<(), DocumentError> {
        self.doc.add_heading(&sanitize(text), level)
    }

    /// Falls back to a bold paragraph when the heading cannot be added.
    pub fn heading(&mut self, text: &str, level: u8) {
        let text = sanitize(text);
        if let Err(e) = self.doc.add_heading(&text, level) {
            log::warn!("error adding heading '{text}' (level {level}): {e}");
            self.recovered += 1;
            self.paragraph(&text, &ParagraphStyle::bold());
        }
    }

    pub fn paragraph(&mut self, text: &str, style: &ParagraphStyle) {
        let text = sanitize(text);
        if let Err(e) = self.doc.add_paragraph(&text, style) {
            log::warn!("error adding paragraph '{}': {e}", preview(&text));
            self.placeholder(format!("[Error adding content: {e}]"), ParagraphStyle::plain());
        }
    }

    pub fn plain(&mut self, text: &str) {
        self.paragraph(text, &ParagraphStyle::plain());
    }

    pub fn bold(&mut self, text: &str) {
        self.paragraph(text, &ParagraphStyle::bold());
    }

    pub fn italic(&mut self, text: &str) {
        self.paragraph(text, &ParagraphStyle::italic());
    }

    pub fn code_block(&mut self, text: &str) {
        let text = sanitize(text);
        if let Err(e) = self.doc.add_code_block(&text) {
            log::warn!("error adding code block '{}': {e}", preview(&text));
            self.placeholder(
                format!("[Error adding code block: {e}]"),
                ParagraphStyle::plain(),
            );
        }
    }

    /// `label` names the table in the placeholder, e.g. `parameters`.
    pub fn table(&mut self, table: &Table, label: &str, context: &str) {
        if let Err(e) = self.doc.add_table(&table.sanitized()) {
            log::warn!("error creating {label} table for {context}: {e}");
            self.placeholder(
                format!("[Error displaying {label} table]"),
                ParagraphStyle::italic(),
            );
        }
    }

    /// Run one top-level section. A shape error inside it is replaced by a
    /// placeholder and assembly moves on.
    pub fn section<F>(&mut self, name: &str, render: F)
    where
        F: FnOnce(&mut Self) -> Result<(), ShapeError>,
    {
        if let Err(e) = render(self) {
            log::warn!("error rendering {name}: {e}");
            self.placeholder(
                format!("[Error rendering {name}: {e}]"),
                ParagraphStyle::italic(),
            );
        }
    }

    fn placeholder(&mut self, text: String, style: ParagraphStyle) {
        self.recovered += 1;
        if let Err(e) = self.doc.add_paragraph(&sanitize(&text), &style) {
            log::error!("could not add error placeholder: {e}");
        }
    }
}

fn preview(text: &str) -> String {
    text.chars().take(50).collect()
}
