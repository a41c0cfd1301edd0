use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use apidoc_core::config::{self, ApidocConfig, CONFIG_FILE_NAME, OutputFormat, OutputSettings};
use apidoc_core::document::{DocumentFormat, OutlineDocument, OutlineFormat};
use apidoc_core::runner::SkipReason;
use apidoc_core::{FileOutcome, RunEvent, RunSummary, build_document, parse, process_files_with};
use apidoc_docx::DocxFormat;

#[derive(Parser)]
#[command(
    name = "apidoc",
    about = "Convert OpenAPI and Swagger specifications into Word documents",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one document per specification file
    Generate {
        /// Specification files (.json, .yaml, .yml). Defaults to the config `inputs`
        files: Vec<PathBuf>,

        /// Directory the documents are written to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Output document format
        #[arg(long)]
        format: Option<DocFormat>,
    },

    /// Print the assembled document structure of a specification
    Inspect {
        /// Path to the specification file
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new apidoc configuration
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DocFormat {
    Docx,
    Outline,
}

impl From<DocFormat> for OutputFormat {
    fn from(format: DocFormat) -> Self {
        match format {
            DocFormat::Docx => OutputFormat::Docx,
            DocFormat::Outline => OutputFormat::Outline,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            files,
            output_dir,
            format,
        } => cmd_generate(files, output_dir, format),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "apidoc", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<ApidocConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn cmd_generate(
    files: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
    format: Option<DocFormat>,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();

    let files = if files.is_empty() {
        cfg.inputs.iter().map(PathBuf::from).collect()
    } else {
        files
    };
    if files.is_empty() {
        eprintln!(
            "No input files given. Pass them as arguments or list them under `inputs` in {CONFIG_FILE_NAME}."
        );
        return Ok(());
    }

    let mut settings = cfg.output_settings();
    if let Some(dir) = output_dir {
        settings.output_dir = dir;
    }
    fs::create_dir_all(&settings.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            settings.output_dir.display()
        )
    })?;

    let format = format.map(OutputFormat::from).unwrap_or(cfg.format);
    let summary = match format {
        OutputFormat::Docx => run(&files, &settings, &DocxFormat),
        OutputFormat::Outline => run(&files, &settings, &OutlineFormat),
    };

    print_summary(&summary);
    Ok(())
}

fn run<F: DocumentFormat>(files: &[PathBuf], settings: &OutputSettings, format: &F) -> RunSummary {
    process_files_with(files, settings, format, |event| match event {
        RunEvent::Started(path) => eprintln!("Processing {}...", path.display()),
        RunEvent::Finished(path, outcome) => report_outcome(path, outcome),
    })
}

fn report_outcome(path: &Path, outcome: &FileOutcome) {
    match outcome {
        FileOutcome::Generated(output) => {
            eprintln!("Successfully generated '{}'", output.display());
        }
        FileOutcome::Skipped(SkipReason::NotFound) => {
            eprintln!("Warning: File not found, skipping: {}", path.display());
        }
        FileOutcome::Skipped(SkipReason::UnsupportedFormat) => {
            eprintln!("Skipping unsupported file format: {}", path.display());
        }
        FileOutcome::Failed {
            output: Some(output),
            reason,
        } => {
            eprintln!("Error processing {}: {reason}", path.display());
            eprintln!("  saved error report to '{}'", output.display());
        }
        FileOutcome::Failed {
            output: None,
            reason,
        } => {
            eprintln!("Error processing {}: {reason}", path.display());
        }
    }
}

fn print_summary(summary: &RunSummary) {
    eprintln!("\n--- Processing Complete ---");
    if summary.processed > 0 {
        eprintln!(
            "Successfully generated {} document(s).",
            summary.processed
        );
    }
    if summary.failed > 0 {
        eprintln!(
            "{} file(s) encountered errors or were not found.",
            summary.failed
        );
    }
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let value = parse::from_path(&input)
        .with_context(|| format!("failed to load {}", input.display()))?;

    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());

    let mut doc = OutlineDocument::new();
    let report = build_document(&value, &file_name, &mut doc)?;
    if report.recovered > 0 {
        eprintln!(
            "{} block(s) could not be rendered and were replaced by placeholders",
            report.recovered
        );
    }

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&doc)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&doc)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_args() {
        let cli = Cli::try_parse_from([
            "apidoc",
            "generate",
            "petstore.yaml",
            "legacy.json",
            "--output-dir",
            "docs",
            "--format",
            "outline",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                files,
                output_dir,
                format,
            } => {
                assert_eq!(
                    files,
                    vec![PathBuf::from("petstore.yaml"), PathBuf::from("legacy.json")]
                );
                assert_eq!(output_dir, Some(PathBuf::from("docs")));
                assert_eq!(format.map(OutputFormat::from), Some(OutputFormat::Outline));
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_generate_without_files_uses_config() {
        let cli = Cli::try_parse_from(["apidoc", "generate"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Generate { ref files, output_dir: None, format: None } if files.is_empty()
        ));
    }

    #[test]
    fn test_cli_definition() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }
}
