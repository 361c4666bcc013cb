//! Format detection from file name and MIME hint.
//!
//! The file extension decides. The MIME hint is consulted only when the name
//! carries no extension at all, and then only to recognise plain text.

use crate::types::ExtractionFormat;
use serde::{Deserialize, Serialize};

pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const DOCX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const PLAIN_TEXT_MIME_TYPE: &str = "text/plain";

/// Extensions offered by upload pickers, in display order.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["txt", "pdf", "docx"];

/// Result of format detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    PlainText,
    Pdf,
    Docx,
    Unsupported,
}

impl Format {
    /// The extraction format for a supported file, `None` for [`Format::Unsupported`].
    pub fn extraction_format(self) -> Option<ExtractionFormat> {
        match self {
            Format::PlainText => Some(ExtractionFormat::PlainText),
            Format::Pdf => Some(ExtractionFormat::Pdf),
            Format::Docx => Some(ExtractionFormat::Docx),
            Format::Unsupported => None,
        }
    }

    pub fn is_supported(self) -> bool {
        self != Format::Unsupported
    }
}

/// Lower-cased suffix after the last `.`, or `None` when the name has none.
pub fn extension_of(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Classify a file by name and MIME hint.
///
/// ```rust
/// use resume_extract::core::format::{detect, Format};
///
/// assert_eq!(detect("CV.PDF", ""), Format::Pdf);
/// assert_eq!(detect("resume.docx", "application/octet-stream"), Format::Docx);
/// assert_eq!(detect("notes", "text/plain; charset=utf-8"), Format::PlainText);
/// assert_eq!(detect("photo.png", "text/plain"), Format::Unsupported);
/// ```
pub fn detect(file_name: &str, mime_hint: &str) -> Format {
    match extension_of(file_name).as_deref() {
        Some("pdf") => Format::Pdf,
        Some("docx") => Format::Docx,
        Some("txt") => Format::PlainText,
        Some(_) => Format::Unsupported,
        None if is_textual_mime(mime_hint) => Format::PlainText,
        None => Format::Unsupported,
    }
}

/// True when `file_name` carries one of the [`ACCEPTED_EXTENSIONS`].
pub fn accepts(file_name: &str) -> bool {
    extension_of(file_name).is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
}

fn is_textual_mime(mime_hint: &str) -> bool {
    let essence = mime_hint.split(';').next().unwrap_or_default().trim();
    essence
        .get(..5)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("text/"))
}
