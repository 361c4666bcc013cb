//! # resume-extract CLI
//!
//! Extracts the text of resumes and cover letters from the command line.
//!
//! ## Commands
//!
//! - `resume-extract extract <FILE>...` - Extract text from one or more files
//! - `resume-extract detect <FILE>...` - Show which extractor a file would use
//!
//! ## Examples
//!
//! ```bash
//! resume-extract extract resume.pdf
//! resume-extract extract a.pdf b.docx notes.txt --json
//! RUST_LOG=resume_extract=debug resume-extract extract cv.docx
//! ```
//!
//! The exit status is 1 when any file could not be extracted.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use resume_extract::{ExtractionConfig, ExtractionOutcome, ExtractionPipeline, UploadedFile};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod output;

#[derive(Parser)]
#[command(name = "resume-extract")]
#[command(about = "Extract plain text from PDF, DOCX and TXT resumes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from one or more files
    Extract {
        /// Files to extract, processed in the given order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print outcomes as JSON instead of plain text
        #[arg(long)]
        json: bool,

        /// Path to config file (default: nearest resume-extract.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Reject files larger than this many bytes
        #[arg(long, value_name = "BYTES")]
        max_file_size: Option<u64>,
    },

    /// Show the detected format of each file without reading it
    Detect {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>, max_file_size: Option<u64>) -> Result<ExtractionConfig> {
    let mut config = match path {
        Some(path) => ExtractionConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ExtractionConfig::discover()
            .context("Failed to load discovered config")?
            .unwrap_or_default(),
    };

    if max_file_size.is_some() {
        config.max_file_size_bytes = max_file_size;
    }
    Ok(config)
}

fn open_files(paths: &[PathBuf]) -> Vec<UploadedFile> {
    paths.iter().map(|path| UploadedFile::from_path(path)).collect()
}

async fn run_extract(files: &[UploadedFile], config: ExtractionConfig) -> Vec<ExtractionOutcome> {
    let pipeline = ExtractionPipeline::new(config);

    if let [file] = files {
        return vec![pipeline.extract_one(file).await];
    }

    pipeline
        .extract_batch(files, |progress| {
            info!(
                completed = progress.completed_count(),
                total = progress.total_count(),
                "Extraction progress {:.0}%",
                progress.percent()
            );
        })
        .await
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            files,
            json,
            config,
            max_file_size,
        } => {
            let config = load_config(config.as_deref(), max_file_size)?;
            let uploads = open_files(&files);
            let outcomes = run_extract(&uploads, config).await;

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            if json {
                output::write_json(&mut out, &outcomes)?;
            } else {
                output::write_text(&mut out, &mut std::io::stderr(), &outcomes)?;
            }

            if outcomes.iter().any(|outcome| outcome.is_err()) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Detect { files } => {
            for (path, file) in files.iter().zip(open_files(&files)) {
                println!(
                    "{}\t{:?}",
                    path.display(),
                    resume_extract::detect(file.name(), file.mime_type())
                );
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use resume_extract::FailureReason;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_extract_args() {
        let cli = Cli::try_parse_from([
            "resume-extract",
            "extract",
            "a.pdf",
            "b.docx",
            "--json",
            "--max-file-size",
            "1024",
        ])
        .unwrap();

        match cli.command {
            Commands::Extract {
                files,
                json,
                config,
                max_file_size,
            } => {
                assert_eq!(files, vec![PathBuf::from("a.pdf"), PathBuf::from("b.docx")]);
                assert!(json);
                assert!(config.is_none());
                assert_eq!(max_file_size, Some(1024));
            }
            Commands::Detect { .. } => panic!("expected extract"),
        }
    }

    #[test]
    fn test_extract_requires_files() {
        assert!(Cli::try_parse_from(["resume-extract", "extract"]).is_err());
    }

    #[test]
    fn test_load_config_flag_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resume-extract.toml");
        fs::write(&path, "max_file_size_bytes = 10\n").unwrap();

        let config = load_config(Some(&path), None).unwrap();
        assert_eq!(config.max_file_size_bytes, Some(10));

        let config = load_config(Some(&path), Some(20)).unwrap();
        assert_eq!(config.max_file_size_bytes, Some(20));
    }


    #[tokio::test]
    async fn test_run_extract_batch() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.txt");
        let bad = dir.path().join("bad.xyz");
        fs::write(&good, "text").unwrap();
        fs::write(&bad, "???").unwrap();

        let uploads = open_files(&[good, bad]);
        let outcomes = run_extract(&uploads, ExtractionConfig::default()).await;

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].as_ref().unwrap().text, "text");
        assert!(outcomes[1].is_err());
    }

    #[tokio::test]
    async fn test_missing_file_does_not_stop_batch() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.txt");
        fs::write(&good, "hello").unwrap();
        let missing = dir.path().join("missing.pdf");

        let uploads = open_files(&[good, missing]);
        let outcomes = run_extract(&uploads, ExtractionConfig::default()).await;

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].as_ref().unwrap().text, "hello");
        let failure = outcomes[1].as_ref().unwrap_err();
        assert_eq!(failure.file_name, "missing.pdf");
        assert_eq!(failure.reason, FailureReason::UnreadableBytes);

        let mut out = Vec::new();
        let mut err = Vec::new();
        output::write_text(&mut out, &mut err, &outcomes).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("hello"));
        assert!(String::from_utf8(err).unwrap().contains("missing.pdf"));
    }
}
