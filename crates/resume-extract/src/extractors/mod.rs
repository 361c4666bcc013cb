//! Built-in document extractors.
//!
//! One extractor per [`ExtractionFormat`]. The pipeline holds them behind
//! `Arc<dyn DocumentExtractor>` so tests can substitute fakes.

use crate::Result;
use crate::types::{ExtractedContent, ExtractionFormat};
use async_trait::async_trait;
use std::sync::Arc;

pub mod docx;
pub mod pdf;
pub mod text;

pub use docx::DocxExtractor;
pub use pdf::PdfExtractor;
pub use text::PlainTextExtractor;

/// Turns the bytes of one document into text.
///
/// Implementations take ownership of the bytes so that CPU-bound parsing can be
/// moved onto the blocking pool.
#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Format this extractor handles.
    fn format(&self) -> ExtractionFormat;

    /// Extract text from `content`.
    ///
    /// # Errors
    ///
    /// `Corrupt` when the container is invalid, `Parsing` when its structure is unusable.
    async fn extract(&self, content: Vec<u8>) -> Result<ExtractedContent>;
}

/// The built-in extractor for `format`.
pub fn default_extractor(format: ExtractionFormat) -> Arc<dyn DocumentExtractor> {
    match format {
        ExtractionFormat::PlainText => Arc::new(PlainTextExtractor::new()),
        ExtractionFormat::Pdf => Arc::new(PdfExtractor::new()),
        ExtractionFormat::Docx => Arc::new(DocxExtractor::new()),
    }
}
