//! Per-file processing: decode, assemble, save.
//!
//! Every file is handled independently. Whatever happens while processing one
//! file ends up in its [`FileOutcome`] and never affects the next file.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::assemble::{annotate_critical_error, build_document, build_error_document};
use crate::config::OutputSettings;
use crate::document::{DocumentBuilder, DocumentFormat};
use crate::error::DecodeError;
use crate::parse::{self, SourceFormat, spec::Specification};

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The full document was saved.
    Generated(PathBuf),
    /// The file was not processed and no document was written.
    Skipped(SkipReason),
    /// Processing failed. `output` is set when an error or partial document
    /// was still saved.
    Failed {
        output: Option<PathBuf>,
        reason: String,
    },
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FileOutcome::Generated(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotFound,
    UnsupportedFormat,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotFound => write!(f, "file not found"),
            SkipReason::UnsupportedFormat => write!(f, "unsupported file format"),
        }
    }
}

/// Tally of a batch run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub processed: usize,
    pub failed: usize,
    pub outcomes: Vec<(PathBuf, FileOutcome)>,
}

impl RunSummary {
    fn record(&mut self, path: &Path, outcome: FileOutcome) {
        if outcome.is_success() {
            self.processed += 1;
        } else {
            self.failed += 1;
        }
        self.outcomes.push((path.to_path_buf(), outcome));
    }
}

/// Progress of a batch run, reported while it happens.
#[derive(Debug, Clone, Copy)]
pub enum RunEvent<'a> {
    Started(&'a Path),
    Finished(&'a Path, &'a FileOutcome),
}

/// Process `paths` strictly in order, one fresh document per file.
pub fn process_files<F, P>(paths: &[P], settings: &OutputSettings, format: &F) -> RunSummary
where
    F: DocumentFormat,
    P: AsRef<Path>,
{
    process_files_with(paths, settings, format, |_| {})
}

/// [`process_files`], calling `observe` before and after each file.
pub fn process_files_with<F, P, O>(
    paths: &[P],
    settings: &OutputSettings,
    format: &F,
    mut observe: O,
) -> RunSummary
where
    F: DocumentFormat,
    P: AsRef<Path>,
    O: FnMut(RunEvent<'_>),
{
    let mut summary = RunSummary::default();
    for path in paths {
        let path = path.as_ref();
        observe(RunEvent::Started(path));
        let outcome = process_file(path, settings, format);
        observe(RunEvent::Finished(path, &outcome));
        summary.record(path, outcome);
    }
    summary
}

/// Process one specification file into one document.
pub fn process_file<F: DocumentFormat>(
    path: &Path,
    settings: &OutputSettings,
    format: &F,
) -> FileOutcome {
    if !path.exists() {
        log::warn!("file not found, skipping: {}", path.display());
        return FileOutcome::Skipped(SkipReason::NotFound);
    }
    if SourceFormat::from_path(path).is_none() {
        log::warn!("skipping unsupported file format: {}", path.display());
        return FileOutcome::Skipped(SkipReason::UnsupportedFormat);
    }

    log::info!("processing {}", path.display());
    let file_name = display_name(path);
    let output = settings.output_path(path, format.extension());
    let mut doc = format.create();

    let spec = match decode(path) {
        Ok(spec) => spec,
        Err(e) => {
            log::error!("error reading or parsing {}: {e}", path.display());
            build_error_document(&mut doc, &file_name, &e.to_string());
            let saved = save(&doc, &output).then_some(output);
            return FileOutcome::Failed {
                output: saved,
                reason: e.to_string(),
            };
        }
    };

    match build_document(&spec, &file_name, &mut doc) {
        Ok(report) => {
            if report.recovered > 0 {
                log::warn!(
                    "{} block(s) of {} could not be rendered and were replaced by placeholders",
                    report.recovered,
                    file_name
                );
            }
            if save(&doc, &output) {
                FileOutcome::Generated(output)
            } else {
                FileOutcome::Failed {
                    output: None,
                    reason: format!("could not save {}", output.display()),
                }
            }
        }
        Err(e) => {
            log::error!("critical error processing content of {}: {e}", path.display());
            annotate_critical_error(&mut doc, &file_name, &e.to_string());
            let saved = save(&doc, &output).then_some(output);
            FileOutcome::Failed {
                output: saved,
                reason: e.to_string(),
            }
        }
    }
}

fn decode(path: &Path) -> Result<Value, DecodeError> {
    let value = parse::from_path(path)?;
    let spec = Specification::new(&value)?;
    if let Some(version) = spec.version_label() {
        log::debug!("{} declares version {version}", path.display());
    }
    Ok(value)
}

fn save<D: DocumentBuilder>(doc: &D, output: &Path) -> bool {
    match doc.save(output) {
        Ok(()) => {
            log::info!("saved {}", output.display());
            true
        }
        Err(e) => {
            log::error!("error saving document '{}': {e}", output.display());
            false
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
