use crate::error::ResumeExtractError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where the bytes of an [`UploadedFile`] live.
#[derive(Debug, Clone)]
pub enum FileContent {
    /// Bytes already held in memory (browser-style upload).
    Bytes(Arc<[u8]>),
    /// Bytes to be read from disk on demand.
    Path(PathBuf),
}

/// Handle to user-supplied content.
///
/// Immutable once created. The pipeline only borrows it; reading the content is the
/// job of a [`FileReader`](crate::core::io::FileReader).
#[derive(Debug, Clone)]
pub struct UploadedFile {
    name: String,
    mime_type: String,
    byte_length: u64,
    content: FileContent,
}

impl UploadedFile {
    /// Wrap an in-memory upload. `mime_type` may be empty.
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            byte_length: bytes.len() as u64,
            content: FileContent::Bytes(bytes),
        }
    }

    /// Reference a file on disk. The MIME hint is guessed from the path.
    ///
    /// The file is only inspected for its size here; `byte_length` is 0 when that
    /// fails. Reading it is left to the pipeline, which reports a missing or
    /// unreadable file as that file's own failure.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let byte_length = match std::fs::metadata(path) {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Could not inspect file");
                0
            }
        };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or_default()
            .to_string();

        Self {
            name,
            mime_type,
            byte_length,
            content: FileContent::Path(path.to_path_buf()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn byte_length(&self) -> u64 {
        self.byte_length
    }

    pub fn content(&self) -> &FileContent {
        &self.content
    }
}

/// Formats the pipeline can produce text from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionFormat {
    PlainText,
    Pdf,
    Docx,
}

impl fmt::Display for ExtractionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionFormat::PlainText => write!(f, "plain text"),
            ExtractionFormat::Pdf => write!(f, "PDF"),
            ExtractionFormat::Docx => write!(f, "DOCX"),
        }
    }
}

/// Raw output of a single format extractor, before it is attributed to a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedContent {
    pub text: String,
    pub page_count: usize,
    /// Partial-extraction diagnostics, e.g. a PDF page that could not be read.
    pub notes: Vec<String>,
}

/// Successful extraction of one uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub source_file_name: String,
    /// Newline-joined text. Empty for a blank document, never absent.
    pub text: String,
    /// Number of PDF pages; 1 for the other formats.
    pub page_count: usize,
    pub extraction_format: ExtractionFormat,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl ExtractedDocument {
    pub(crate) fn new(source_file_name: &str, format: ExtractionFormat, content: ExtractedContent) -> Self {
        Self {
            source_file_name: source_file_name.to_string(),
            text: content.text,
            page_count: content.page_count,
            extraction_format: format,
            notes: content.notes,
        }
    }

    /// True when some part of the document was skipped.
    pub fn is_partial(&self) -> bool {
        !self.notes.is_empty()
    }
}

/// Why a file produced no text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// The bytes could not be acquired (I/O error, permission, size limit).
    UnreadableBytes,
    /// The file type is not one of the accepted formats.
    UnsupportedFormat,
    /// The container opened, but its structure is unusable.
    ParseError,
    /// Not a valid PDF or zip container at all.
    Corrupt,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureReason::UnreadableBytes => "unreadable bytes",
            FailureReason::UnsupportedFormat => "unsupported format",
            FailureReason::ParseError => "parse error",
            FailureReason::Corrupt => "corrupt",
        };
        f.write_str(label)
    }
}

impl From<&ResumeExtractError> for FailureReason {
    fn from(err: &ResumeExtractError) -> Self {
        match err {
            ResumeExtractError::Io(_) => FailureReason::UnreadableBytes,
            ResumeExtractError::Corrupt { .. } => FailureReason::Corrupt,
            ResumeExtractError::UnsupportedFormat(_) => FailureReason::UnsupportedFormat,
            ResumeExtractError::Parsing { .. }
            | ResumeExtractError::Validation { .. }
            | ResumeExtractError::Other(_) => FailureReason::ParseError,
        }
    }
}

/// A file that could not be turned into text.
///
/// Always returned as a value so that one bad file never aborts a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{file_name}: {reason}: {detail}")]
pub struct ExtractionFailure {
    pub file_name: String,
    pub reason: FailureReason,
    pub detail: String,
}

impl ExtractionFailure {
    pub fn new(file_name: impl Into<String>, reason: FailureReason, detail: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            reason,
            detail: detail.into(),
        }
    }

    pub(crate) fn from_error(file_name: &str, err: &ResumeExtractError) -> Self {
        Self::new(file_name, FailureReason::from(err), err.to_string())
    }

    /// Message shown inline to the user for a single-file failure.
    pub fn user_message(&self) -> String {
        match self.reason {
            FailureReason::UnsupportedFormat => format!(
                "{} is not a supported file type. Upload a .pdf, .docx or .txt file.",
                self.file_name
            ),
            FailureReason::UnreadableBytes => format!("Could not read {}.", self.file_name),
            FailureReason::ParseError | FailureReason::Corrupt => {
                format!("Could not parse content from {}.", self.file_name)
            }
        }
    }
}

/// One outcome per input file.
pub type ExtractionOutcome = std::result::Result<ExtractedDocument, ExtractionFailure>;

/// Running state of a batch extraction, handed to the progress callback after each file.
#[derive(Debug)]
pub struct BatchProgress {
    completed_count: usize,
    total_count: usize,
    results: Vec<ExtractionOutcome>,
}

impl BatchProgress {
    pub(crate) fn new(total_count: usize) -> Self {
        Self {
            completed_count: 0,
            total_count,
            results: Vec::with_capacity(total_count),
        }
    }

    pub(crate) fn record(&mut self, outcome: ExtractionOutcome) {
        debug_assert!(self.completed_count < self.total_count);
        self.results.push(outcome);
        self.completed_count += 1;
    }

    pub fn completed_count(&self) -> usize {
        self.completed_count
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Outcomes collected so far, index-aligned with the input files.
    pub fn results(&self) -> &[ExtractionOutcome] {
        &self.results
    }

    pub fn is_complete(&self) -> bool {
        self.completed_count == self.total_count
    }

    /// Completion in percent. An empty batch is complete.
    pub fn percent(&self) -> f64 {
        if self.total_count == 0 {
            return 100.0;
        }
        (self.completed_count as f64 / self.total_count as f64) * 100.0
    }

    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|outcome| outcome.is_err()).count()
    }

    pub fn into_results(self) -> Vec<ExtractionOutcome> {
        self.results
    }
}
