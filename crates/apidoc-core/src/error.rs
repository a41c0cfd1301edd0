use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported file format: {0}")]
    UnsupportedExtension(String),

    #[error("specification root must be a mapping, got {0}")]
    NotAMapping(&'static str),
}

/// A section of the decoded specification has the wrong kind of value.
#[derive(Debug, Error)]
#[error("expected {expected} for `{field}`, got {found}")]
pub struct ShapeError {
    pub field: String,
    pub expected: &'static str,
    pub found: &'static str,
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("table row {row} has {found} cells, expected {expected}")]
    TableShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("heading level {0} is out of range")]
    HeadingLevel(u8),

    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("document error: {0}")]
    Document(#[from] DocumentError),
}
