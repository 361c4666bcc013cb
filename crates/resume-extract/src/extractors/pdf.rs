//! PDF extractor.

use super::DocumentExtractor;
use crate::Result;
use crate::pdf::extract_text_from_pdf;
use crate::types::{ExtractedContent, ExtractionFormat};
use async_trait::async_trait;

/// Extracts page text from PDF documents with `lopdf`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    fn name(&self) -> &str {
        "pdf-extractor"
    }

    fn format(&self) -> ExtractionFormat {
        ExtractionFormat::Pdf
    }

    async fn extract(&self, content: Vec<u8>) -> Result<ExtractedContent> {
        let extracted = extract_text_from_pdf(content).await?;
        if !extracted.notes.is_empty() {
            tracing::debug!(
                page_count = extracted.page_count,
                skipped = extracted.notes.len(),
                "PDF extracted with unreadable pages"
            );
        }
        Ok(extracted)
    }
}
