pub mod assemble;
pub mod config;
pub mod document;
pub mod error;
pub mod parse;
pub mod render;
pub mod runner;

pub use assemble::{AssemblyReport, build_document};
pub use document::{DocumentBuilder, DocumentFormat};
pub use render::format_schema;
pub use runner::{
    FileOutcome, RunEvent, RunSummary, process_file, process_files, process_files_with,
};
