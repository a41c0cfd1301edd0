use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level project configuration loaded from `.apidoc.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApidocConfig {
    /// Spec files processed when none are given on the command line.
    pub inputs: Vec<String>,
    pub output_dir: String,
    /// Appended to the input file stem to name each output document.
    pub suffix: String,
    pub format: OutputFormat,
}

impl Default for ApidocConfig {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output_dir: ".".to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            format: OutputFormat::Docx,
        }
    }
}

impl ApidocConfig {
    pub fn output_settings(&self) -> OutputSettings {
        OutputSettings {
            output_dir: PathBuf::from(&self.output_dir),
            suffix: self.suffix.clone(),
        }
    }
}

/// Which document writer to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Word-processor document (`.docx`).
    #[default]
    Docx,
    /// JSON dump of the assembled document structure.
    Outline,
}

/// Where and under what name output documents are saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSettings {
    pub output_dir: PathBuf,
    pub suffix: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        ApidocConfig::default().output_settings()
    }
}

impl OutputSettings {
    /// `<output_dir>/<input stem><suffix>.<extension>`
    pub fn output_path(&self, input: &Path, extension: &str) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "spec".to_string());
        self.output_dir
            .join(format!("{stem}{}.{extension}", self.suffix))
    }
}

/// Default output file suffix.
pub const DEFAULT_SUFFIX: &str = "_api_doc";

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".apidoc.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<ApidocConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: ApidocConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# apidoc configuration
inputs: []            # spec files (.json, .yaml, .yml) used when none are passed on the command line
  # - openapi.yaml
  # - legacy-swagger.json

output_dir: .         # where documents are written
suffix: _api_doc      # petstore.yaml -> petstore_api_doc.docx
format: docx          # docx | outline
"#
}
