//! Plain text extractor.

use super::DocumentExtractor;
use crate::Result;
use crate::extraction::text::decode;
use crate::types::{ExtractedContent, ExtractionFormat};
use async_trait::async_trait;

/// Extracts content from plain text files (.txt).
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentExtractor for PlainTextExtractor {
    fn name(&self) -> &str {
        "plain-text-extractor"
    }

    fn format(&self) -> ExtractionFormat {
        ExtractionFormat::PlainText
    }

    async fn extract(&self, content: Vec<u8>) -> Result<ExtractedContent> {
        Ok(ExtractedContent {
            text: decode(&content),
            page_count: 1,
            notes: Vec::new(),
        })
    }
}
