//! Main extraction entry points.
//!
//! [`ExtractionPipeline`] turns one [`UploadedFile`] into an [`ExtractionOutcome`]:
//! format detection, size check, byte acquisition, then the format's extractor.
//! Every error along the way becomes an [`ExtractionFailure`] value.
//!
//! # Functions
//!
//! - [`extract_one`] - Extract a single file with the default pipeline
//! - [`extract_batch`] - Extract an ordered batch with the default pipeline
//! - [`extract_one_sync`] / [`extract_batch_sync`] - Blocking variants

use crate::core::config::ExtractionConfig;
use crate::core::format::{Format, detect};
use crate::core::io::{DefaultFileReader, FileReader};
use crate::extractors::{DocumentExtractor, default_extractor};
use crate::types::{
    BatchProgress, ExtractedDocument, ExtractionFailure, ExtractionFormat, ExtractionOutcome, FailureReason,
    UploadedFile,
};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// Global Tokio runtime for synchronous operations.
///
/// Lazily initialized on first use and shared across all sync wrappers.
/// Building it only fails on resource exhaustion.
static GLOBAL_RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create global Tokio runtime - system may be out of resources")
});

/// Extraction orchestrator with injectable dependencies.
///
/// ```rust,no_run
/// use resume_extract::{ExtractionConfig, ExtractionPipeline, UploadedFile};
///
/// # async fn example() -> resume_extract::Result<()> {
/// let pipeline = ExtractionPipeline::new(ExtractionConfig::default());
/// let file = UploadedFile::from_path("resume.pdf");
/// match pipeline.extract_one(&file).await {
///     Ok(doc) => println!("{}", doc.text),
///     Err(failure) => eprintln!("{}", failure.user_message()),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ExtractionPipeline {
    config: ExtractionConfig,
    reader: Arc<dyn FileReader>,
    plain_text: Arc<dyn DocumentExtractor>,
    pdf: Arc<dyn DocumentExtractor>,
    docx: Arc<dyn DocumentExtractor>,
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

impl std::fmt::Debug for ExtractionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionPipeline")
            .field("config", &self.config)
            .field("plain_text", &self.plain_text.name())
            .field("pdf", &self.pdf.name())
            .field("docx", &self.docx.name())
            .finish_non_exhaustive()
    }
}

impl ExtractionPipeline {
    /// Pipeline wired with the built-in reader and extractors.
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            config,
            reader: Arc::new(DefaultFileReader),
            plain_text: default_extractor(ExtractionFormat::PlainText),
            pdf: default_extractor(ExtractionFormat::Pdf),
            docx: default_extractor(ExtractionFormat::Docx),
        }
    }

    /// Replace the byte source.
    pub fn with_reader(mut self, reader: Arc<dyn FileReader>) -> Self {
        self.reader = reader;
        self
    }

    /// Replace the extractor used for `format`.
    pub fn with_extractor(mut self, format: ExtractionFormat, extractor: Arc<dyn DocumentExtractor>) -> Self {
        match format {
            ExtractionFormat::PlainText => self.plain_text = extractor,
            ExtractionFormat::Pdf => self.pdf = extractor,
            ExtractionFormat::Docx => self.docx = extractor,
        }
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    fn extractor_for(&self, format: ExtractionFormat) -> &Arc<dyn DocumentExtractor> {
        match format {
            ExtractionFormat::PlainText => &self.plain_text,
            ExtractionFormat::Pdf => &self.pdf,
            ExtractionFormat::Docx => &self.docx,
        }
    }

    /// Extract the text of one file.
    ///
    /// Never returns an error type other than [`ExtractionFailure`] and never panics
    /// on bad input. Unsupported and oversized files are rejected before their
    /// content is read.
    pub async fn extract_one(&self, file: &UploadedFile) -> ExtractionOutcome {
        let name = file.name();
        let detected = detect(name, file.mime_type());
        tracing::debug!(file = name, format = ?detected, "Detected format");

        let format = match detected {
            Format::PlainText => ExtractionFormat::PlainText,
            Format::Pdf => ExtractionFormat::Pdf,
            Format::Docx => ExtractionFormat::Docx,
            Format::Unsupported => {
                let failure = ExtractionFailure::new(
                    name,
                    FailureReason::UnsupportedFormat,
                    unsupported_detail(name, file.mime_type()),
                );
                tracing::warn!(file = name, "Rejected unsupported file");
                return Err(failure);
            }
        };

        self.check_size(name, file.byte_length())?;

        let bytes = match self.reader.read(file).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(file = name, error = %e, "Could not read file");
                return Err(ExtractionFailure::new(name, FailureReason::UnreadableBytes, e.to_string()));
            }
        };
        // The file may have grown since it was selected.
        self.check_size(name, bytes.len() as u64)?;

        let extractor = self.extractor_for(format);
        tracing::debug!(file = name, extractor = extractor.name(), bytes = bytes.len(), "Extracting");

        match extractor.extract(bytes).await {
            Ok(content) => Ok(ExtractedDocument::new(name, format, content)),
            Err(e) => {
                let failure = ExtractionFailure::from_error(name, &e);
                tracing::warn!(file = name, reason = %failure.reason, error = %e, "Extraction failed");
                Err(failure)
            }
        }
    }

    fn check_size(&self, name: &str, byte_length: u64) -> Result<(), ExtractionFailure> {
        if !self.config.exceeds_size_limit(byte_length) {
            return Ok(());
        }

        tracing::warn!(file = name, bytes = byte_length, "File exceeds size limit");
        Err(ExtractionFailure::new(
            name,
            FailureReason::UnreadableBytes,
            format!(
                "file is {} bytes, limit is {} bytes",
                byte_length,
                self.config.max_file_size_bytes.unwrap_or_default()
            ),
        ))
    }

    /// Extract an ordered batch. See [`crate::core::batch::extract_batch`].
    pub async fn extract_batch<F>(&self, files: &[UploadedFile], on_progress: F) -> Vec<ExtractionOutcome>
    where
        F: FnMut(&BatchProgress),
    {
        crate::core::batch::extract_batch(self, files, on_progress).await
    }
}

fn unsupported_detail(name: &str, mime_type: &str) -> String {
    match crate::core::format::extension_of(name) {
        Some(ext) => format!("extension .{} is not one of .pdf, .docx, .txt", ext),
        None if mime_type.is_empty() => "no extension and no MIME type".to_string(),
        None => format!("no extension and non-text MIME type {}", mime_type),
    }
}

/// Extract one file with a default pipeline.
pub async fn extract_one(file: &UploadedFile, config: &ExtractionConfig) -> ExtractionOutcome {
    ExtractionPipeline::new(config.clone()).extract_one(file).await
}

/// Extract a batch of files with a default pipeline.
pub async fn extract_batch<F>(files: &[UploadedFile], config: &ExtractionConfig, on_progress: F) -> Vec<ExtractionOutcome>
where
    F: FnMut(&BatchProgress),
{
    ExtractionPipeline::new(config.clone())
        .extract_batch(files, on_progress)
        .await
}

/// Synchronous wrapper for [`extract_one`] on the shared global runtime.
pub fn extract_one_sync(file: &UploadedFile, config: &ExtractionConfig) -> ExtractionOutcome {
    GLOBAL_RUNTIME.block_on(extract_one(file, config))
}

/// Synchronous wrapper for [`extract_batch`] on the shared global runtime.
pub fn extract_batch_sync<F>(files: &[UploadedFile], config: &ExtractionConfig, on_progress: F) -> Vec<ExtractionOutcome>
where
    F: FnMut(&BatchProgress),
{
    GLOBAL_RUNTIME.block_on(extract_batch(files, config, on_progress))
}
