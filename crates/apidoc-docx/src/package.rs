//! The zip container of a `.docx` package.

use std::io::{Seek, Write};

use apidoc_core::document::Block;
use apidoc_core::error::DocumentError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::render::Templates;

/// Render every part of a package holding `blocks`, keyed by part name.
pub fn parts(blocks: &[Block]) -> Result<Vec<(&'static str, String)>, DocumentError> {
    let templates = Templates::new()?;
    Ok(vec![
        ("[Content_Types].xml", templates.content_types()?),
        ("_rels/.rels", templates.package_rels()?),
        ("word/_rels/document.xml.rels", templates.document_rels()?),
        ("word/styles.xml", templates.styles()?),
        ("word/document.xml", templates.document(blocks)?),
    ])
}

/// Write `parts` into a deflated zip archive.
pub fn write_package<W: Write + Seek>(
    sink: W,
    parts: &[(&str, String)],
) -> Result<W, DocumentError> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(sink);

    for (name, content) in parts {
        log::trace!("writing package part {name}");
        zip.start_file(*name, options).map_err(zip_error)?;
        zip.write_all(content.as_bytes())?;
    }

    zip.finish().map_err(zip_error)
}

fn zip_error(e: zip::result::ZipError) -> DocumentError {
    DocumentError::Other(format!("failed to write docx package: {e}"))
}
