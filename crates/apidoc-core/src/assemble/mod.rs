//! Document assembly: walks a decoded specification and appends headings,
//! paragraphs, code blocks and tables to a [`DocumentBuilder`].

mod endpoints;
mod writer;

use serde_json::Value;

use crate::document::DocumentBuilder;
use crate::error::AssembleError;
use crate::parse::spec::{Info, Specification};
use crate::render::format_schema;

use writer::Writer;

/// Outcome of a completed assembly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblyReport {
    /// Blocks that failed and were replaced by an in-document placeholder.
    pub recovered: usize,
}

/// Write the full documentation of `spec` into `doc`.
///
/// `file_name` is shown in the document title. Failures inside a section are
/// contained and reported through [`AssemblyReport::recovered`]; only a
/// failure to write the title itself is returned as an error.
pub fn build_document<D: DocumentBuilder>(
    spec: &Value,
    file_name: &str,
    doc: &mut D,
) -> Result<AssemblyReport, AssembleError> {
    let mut w = Writer::new(doc);
    w.title(&format!("API Specification: {file_name}"), 0)?;

    let spec = match Specification::new(spec) {
        Ok(spec) => spec,
        Err(e) => {
            log::warn!("error rendering {file_name}: {e}");
            w.italic(&format!("[Error rendering specification: {e}]"));
            return Ok(AssemblyReport {
                recovered: w.recovered() + 1,
            });
        }
    };

    if let Some(info) = spec.info() {
        w.section("General Information", |w| {
            write_info(w, &info?);
            Ok(())
        });
    }

    if let Some(servers) = spec.servers() {
        w.section("Servers", |w| {
            let servers = servers?;
            w.heading("Servers", 1);
            for server in servers {
                let url = server.url.as_deref().unwrap_or("N/A");
                let line = match server.description {
                    Some(desc) => format!("- URL: {url} ({desc})"),
                    None => format!("- URL: {url}"),
                };
                w.plain(&line);
            }
            Ok(())
        });
    }

    if let Some(paths) = spec.paths() {
        w.section("API Endpoints", |w| {
            let paths = paths?;
            w.heading("API Endpoints", 1);
            for (path, item) in paths {
                endpoints::write_path(w, path, &item);
            }
            Ok(())
        });
    }

    if let Some(catalog) = spec.schemas() {
        w.section(catalog.source.heading(), |w| {
            w.heading(catalog.source.heading(), 1);
            for (name, schema) in catalog.entries() {
                w.heading(name, 2);
                w.code_block(&format_schema(schema, 0).join("\n"));
            }
            Ok(())
        });
    }

    Ok(AssemblyReport {
        recovered: w.recovered(),
    })
}

/// Write the one-page document produced for a file that could not be read or
/// decoded.
pub fn build_error_document<D: DocumentBuilder>(doc: &mut D, file_name: &str, error: &str) {
    let mut w = Writer::new(doc);
    w.heading(&format!("Error processing: {file_name}"), 1);
    w.plain(&format!("Could not read or parse the file. Error: {error}"));
}

/// Append the notice added to a partially assembled document after a
/// critical failure.
pub fn annotate_critical_error<D: DocumentBuilder>(doc: &mut D, file_name: &str, error: &str) {
    let mut w = Writer::new(doc);
    w.heading(&format!("Critical Error in: {file_name}"), 1);
    w.plain(&format!(
        "An unexpected error occurred while generating documentation for this file: {error}"
    ));
}

fn write_info<D: DocumentBuilder>(w: &mut Writer<'_, D>, info: &Info) {
    w.heading("General Information", 1);
    w.bold(&format!(
        "Title: {}",
        info.title.as_deref().unwrap_or("N/A")
    ));
    w.plain(&format!(
        "Version: {}",
        info.version.as_deref().unwrap_or("N/A")
    ));
    if let Some(description) = &info.description {
        w.plain(&format!("Description: {description}"));
    }
}
