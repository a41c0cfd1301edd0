use std::fs;
use std::path::Path;

use apidoc_core::config::OutputSettings;
use apidoc_core::document::{
    DocumentBuilder, DocumentFormat, OutlineDocument, OutlineFormat, ParagraphStyle, Table,
};
use apidoc_core::error::DocumentError;
use apidoc_core::runner::{FileOutcome, RunEvent, SkipReason, process_files, process_files_with};

const PETS: &str = include_str!("fixtures/pets.json");
const PETSTORE: &str = include_str!("fixtures/petstore.yaml");

fn settings(dir: &tempfile::TempDir) -> OutputSettings {
    OutputSettings {
        output_dir: dir.path().join("out"),
        ..OutputSettings::default()
    }
}

#[test]
fn missing_file_does_not_stop_later_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("out")).unwrap();
    let pets = dir.path().join("pets.json");
    let store = dir.path().join("petstore.yml");
    fs::write(&pets, PETS).unwrap();
    fs::write(&store, PETSTORE).unwrap();

    let inputs = vec![dir.path().join("missing.json"), pets, store];
    let summary = process_files(&inputs, &settings(&dir), &OutlineFormat);

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.processed, 2);
    assert_eq!(
        summary.outcomes[0].1,
        FileOutcome::Skipped(SkipReason::NotFound)
    );
    assert!(dir.path().join("out/pets_api_doc.json").exists());
    assert!(dir.path().join("out/petstore_api_doc.json").exists());
}

#[test]
fn unsupported_extension_is_skipped_without_output() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("out")).unwrap();
    let notes = dir.path().join("notes.txt");
    fs::write(&notes, "openapi: 3.0.0").unwrap();

    let summary = process_files(&[notes], &settings(&dir), &OutlineFormat);

    assert_eq!(summary.failed, 1);
    assert_eq!(
        summary.outcomes[0].1,
        FileOutcome::Skipped(SkipReason::UnsupportedFormat)
    );
    assert_eq!(fs::read_dir(dir.path().join("out")).unwrap().count(), 0);
}

#[test]
fn decode_failure_writes_error_document() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("out")).unwrap();
    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{\"openapi\": ").unwrap();

    let summary = process_files(&[&broken], &settings(&dir), &OutlineFormat);
    assert_eq!(summary.failed, 1);

    let expected = dir.path().join("out/broken_api_doc.json");
    match &summary.outcomes[0].1 {
        FileOutcome::Failed { output, .. } => assert_eq!(output.as_ref(), Some(&expected)),
        other => panic!("expected failure, got {other:?}"),
    }

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&expected).unwrap()).unwrap();
    assert_eq!(saved["blocks"][0]["text"], "Error processing: broken.json");
    let message = saved["blocks"][1]["text"].as_str().unwrap();
    assert!(message.starts_with("Could not read or parse the file. Error: failed to parse JSON"));
}

#[test]
fn non_mapping_root_writes_error_document() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("out")).unwrap();
    let list = dir.path().join("list.yaml");
    fs::write(&list, "- a\n- b\n").unwrap();

    let summary = process_files(&[&list], &settings(&dir), &OutlineFormat);
    assert_eq!(summary.failed, 1);
    assert!(dir.path().join("out/list_api_doc.json").exists());
}

#[test]
fn save_failure_is_counted() {
    let dir = tempfile::tempdir().unwrap();
    let pets = dir.path().join("pets.json");
    fs::write(&pets, PETS).unwrap();

    // Output directory is never created.
    let settings = OutputSettings {
        output_dir: dir.path().join("does/not/exist"),
        ..OutputSettings::default()
    };
    let summary = process_files(&[&pets], &settings, &OutlineFormat);

    assert_eq!(summary.processed, 0);
    assert_eq!(summary.failed, 1);
    assert!(matches!(
        summary.outcomes[0].1,
        FileOutcome::Failed { output: None, .. }
    ));
}

/// Outline document that cannot take a title heading.
#[derive(Default)]
struct UntitledDocument(OutlineDocument);

impl DocumentBuilder for UntitledDocument {
    fn add_heading(&mut self, text: &str, level: u8) -> Result<(), DocumentError> {
        if level == 0 {
            return Err(DocumentError::Other("no title".into()));
        }
        self.0.add_heading(text, level)
    }

    fn add_paragraph(&mut self, text: &str, style: &ParagraphStyle) -> Result<(), DocumentError> {
        self.0.add_paragraph(text, style)
    }

    fn add_code_block(&mut self, text: &str) -> Result<(), DocumentError> {
        self.0.add_code_block(text)
    }

    fn add_table(&mut self, table: &Table) -> Result<(), DocumentError> {
        self.0.add_table(table)
    }

    fn save(&self, path: &Path) -> Result<(), DocumentError> {
        self.0.save(path)
    }
}

struct UntitledFormat;

impl DocumentFormat for UntitledFormat {
    type Document = UntitledDocument;

    fn create(&self) -> UntitledDocument {
        UntitledDocument::default()
    }

    fn extension(&self) -> &str {
        "json"
    }
}

#[test]
fn critical_error_saves_annotated_document() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("out")).unwrap();
    let pets = dir.path().join("pets.json");
    fs::write(&pets, PETS).unwrap();

    let summary = process_files(&[&pets], &settings(&dir), &UntitledFormat);
    assert_eq!(summary.processed, 0);
    assert_eq!(summary.failed, 1);

    let expected = dir.path().join("out/pets_api_doc.json");
    match &summary.outcomes[0].1 {
        FileOutcome::Failed { output, reason } => {
            assert_eq!(output.as_deref(), Some(expected.as_path()));
            assert_eq!(reason, "document error: no title");
        }
        other => panic!("expected a failed outcome, got {other:?}"),
    }

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&expected).unwrap()).unwrap();
    assert_eq!(saved["blocks"][0]["kind"], "heading");
    assert_eq!(saved["blocks"][0]["text"], "Critical Error in: pets.json");
    assert_eq!(
        saved["blocks"][1]["text"],
        "An unexpected error occurred while generating documentation for this file: document error: no title"
    );
}

#[test]
fn progress_is_reported_per_file_in_order() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("out")).unwrap();
    let pets = dir.path().join("pets.json");
    fs::write(&pets, PETS).unwrap();
    let missing = dir.path().join("missing.yaml");

    let mut events: Vec<String> = Vec::new();
    let summary = process_files_with(
        &[missing, pets],
        &settings(&dir),
        &OutlineFormat,
        |event| {
            events.push(match event {
                RunEvent::Started(path) => format!("start {}", file_name(path)),
                RunEvent::Finished(path, outcome) => {
                    format!("done {} {}", file_name(path), outcome.is_success())
                }
            })
        },
    );

    assert_eq!(
        events,
        vec![
            "start missing.yaml",
            "done missing.yaml false",
            "start pets.json",
            "done pets.json true",
        ]
    );
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.failed, 1);
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}
