//! DOCX extractor.

use super::DocumentExtractor;
use crate::extraction::docx::extract_text;
use crate::types::{ExtractedContent, ExtractionFormat};
use crate::{ResumeExtractError, Result};
use async_trait::async_trait;

/// Extracts paragraph text from Word documents (.docx).
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentExtractor for DocxExtractor {
    fn name(&self) -> &str {
        "docx-extractor"
    }

    fn format(&self) -> ExtractionFormat {
        ExtractionFormat::Docx
    }

    async fn extract(&self, content: Vec<u8>) -> Result<ExtractedContent> {
        let text = tokio::task::spawn_blocking(move || extract_text(&content))
            .await
            .map_err(|e| ResumeExtractError::parsing(format!("Task join error: {}", e)))??;

        Ok(ExtractedContent {
            text,
            page_count: 1,
            notes: Vec::new(),
        })
    }
}
