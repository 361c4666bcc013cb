//! Page-ordered PDF text extraction on top of `lopdf`.
//!
//! Page text is pulled through [`PageTextSource`] so that the assembly rules
//! (page order, per-page failure notes, all-pages-failed detection) do not depend
//! on the PDF backend.

use super::error::{PdfError, Result};
use crate::types::ExtractedContent;
use lopdf::content::Content;
use lopdf::{Document, Encoding, Object, ObjectId};
use std::collections::BTreeMap;
use std::panic::{AssertUnwindSafe, catch_unwind};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Kerning offsets in a `TJ` array beyond this many thousandths of an em read as a word gap.
const TJ_WORD_GAP: f32 = -100.0;

/// Anything that can hand out the text of numbered pages.
pub trait PageTextSource {
    /// 1-based page numbers in ascending order.
    fn page_numbers(&self) -> Vec<u32>;

    /// Raw text of one page, one text run per line.
    fn page_text(&self, page: u32) -> Result<String>;
}

/// [`PageTextSource`] backed by a loaded `lopdf` document.
///
/// Page content is walked operator by operator. Every text-positioning operator
/// (`Td`, `TD`, `Tm`, `T*`, `'`, `"`) and every text object boundary starts a new
/// run, so lines drawn inside one `BT ... ET` block stay separate.
pub struct LopdfPages {
    document: Document,
    pages: BTreeMap<u32, ObjectId>,
}

impl LopdfPages {
    /// Load a PDF container from memory.
    ///
    /// Buffers that do not carry the `%PDF-` signature are rejected before the
    /// parser sees them.
    pub fn load(bytes: &[u8]) -> Result<Self> {
        if !has_pdf_signature(bytes) {
            return Err(PdfError::InvalidPdf("missing %PDF- header".to_string()));
        }

        let document = Document::load_mem(bytes)?;
        let pages = document.get_pages();
        Ok(Self { document, pages })
    }

    /// Concatenated, decoded content streams of a page.
    ///
    /// A content reference that does not resolve to a stream, or a stream whose
    /// filters cannot be decoded, fails the page instead of being skipped.
    fn page_content(&self, page_id: ObjectId) -> lopdf::Result<Vec<u8>> {
        let mut content = Vec::new();
        for stream_id in self.document.get_page_contents(page_id) {
            let stream = self.document.get_object(stream_id).and_then(Object::as_stream)?;
            match stream.filters() {
                Ok(filters) if !filters.is_empty() => content.extend(stream.decompressed_content()?),
                _ => content.extend_from_slice(&stream.content),
            }
            content.push(b'\n');
        }
        Ok(content)
    }

    fn read_page(&self, page_id: ObjectId) -> lopdf::Result<String> {
        let encodings: BTreeMap<Vec<u8>, Encoding<'_>> = self
            .document
            .get_page_fonts(page_id)?
            .into_iter()
            .filter_map(|(name, font)| match font.get_font_encoding(&self.document) {
                Ok(encoding) => Some((name, encoding)),
                Err(e) => {
                    tracing::debug!(font = %String::from_utf8_lossy(&name), error = %e, "Skipping font without usable encoding");
                    None
                }
            })
            .collect();

        let content = Content::decode(&self.page_content(page_id)?)?;

        let mut text = String::new();
        let mut encoding = None;
        for operation in &content.operations {
            match operation.operator.as_str() {
                "Tf" => {
                    encoding = operation
                        .operands
                        .first()
                        .and_then(|font| font.as_name().ok())
                        .and_then(|font| encodings.get(font));
                }
                "BT" | "ET" | "Td" | "TD" | "Tm" | "T*" => end_run(&mut text),
                "Tj" | "TJ" => show_text(&mut text, encoding, &operation.operands)?,
                "'" => {
                    end_run(&mut text);
                    show_text(&mut text, encoding, &operation.operands)?;
                }
                "\"" => {
                    end_run(&mut text);
                    show_text(&mut text, encoding, operation.operands.get(2..).unwrap_or_default())?;
                }
                _ => {}
            }
        }

        Ok(text)
    }
}

impl PageTextSource for LopdfPages {
    fn page_numbers(&self) -> Vec<u32> {
        self.pages.keys().copied().collect()
    }

    fn page_text(&self, page: u32) -> Result<String> {
        let Some(&page_id) = self.pages.get(&page) else {
            return Err(PdfError::PageTextFailed {
                page,
                message: "page not found".to_string(),
            });
        };

        match catch_unwind(AssertUnwindSafe(|| self.read_page(page_id))) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(PdfError::PageTextFailed {
                page,
                message: e.to_string(),
            }),
            Err(_) => Err(PdfError::PageTextFailed {
                page,
                message: "text decoder panicked".to_string(),
            }),
        }
    }
}

fn end_run(text: &mut String) {
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
}

/// Append the strings shown by a `Tj`/`TJ` operand list. Text shown before any
/// font with a known encoding is selected cannot be decoded and is dropped.
fn show_text(text: &mut String, encoding: Option<&Encoding<'_>>, operands: &[Object]) -> lopdf::Result<()> {
    let Some(encoding) = encoding else {
        return Ok(());
    };

    for operand in operands {
        match operand {
            Object::String(bytes, _) => text.push_str(&Document::decode_text(encoding, bytes)?),
            Object::Array(items) => show_text(text, Some(encoding), items)?,
            Object::Integer(offset) if (*offset as f32) < TJ_WORD_GAP => text.push(' '),
            Object::Real(offset) if *offset < TJ_WORD_GAP => text.push(' '),
            _ => {}
        }
    }
    Ok(())
}

fn has_pdf_signature(bytes: &[u8]) -> bool {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    bytes[start..].starts_with(PDF_MAGIC)
}

/// Join the text runs of one page with single spaces.
///
/// Runs are trimmed and empty runs dropped, so layout whitespace inside the
/// content stream never leaks into the output.
pub fn join_runs(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|run| !run.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of one page, tagged with its position in the document.
#[derive(Debug)]
pub struct PageOutcome {
    /// Zero-based slot in the page list.
    pub index: usize,
    pub page: u32,
    pub result: Result<String>,
}

/// Assemble per-page outcomes into document text.
///
/// Outcomes may arrive in any order; they are placed into a page-indexed buffer
/// and emitted by slot. Each page contributes its segment plus `\n`. A failed or
/// missing page contributes an empty segment and a note. If no page succeeds the
/// whole document fails.
pub fn assemble_pages(page_count: usize, outcomes: Vec<PageOutcome>) -> Result<ExtractedContent> {
    if page_count == 0 {
        return Ok(ExtractedContent::default());
    }

    let mut slots: Vec<Option<PageOutcome>> = (0..page_count).map(|_| None).collect();
    for outcome in outcomes {
        if let Some(slot) = slots.get_mut(outcome.index) {
            *slot = Some(outcome);
        }
    }

    let mut text = String::new();
    let mut notes = Vec::new();
    let mut readable = 0usize;

    for (index, slot) in slots.into_iter().enumerate() {
        match slot {
            Some(PageOutcome { result: Ok(raw), .. }) => {
                text.push_str(&join_runs(&raw));
                readable += 1;
            }
            Some(PageOutcome { page, result: Err(e), .. }) => {
                tracing::warn!(page, error = %e, "Skipping unreadable PDF page");
                notes.push(note_for(page, &e));
            }
            None => {
                let page = index as u32 + 1;
                notes.push(format!("page {}: no text produced", page));
            }
        }
        text.push('\n');
    }

    if readable == 0 {
        return Err(PdfError::NoReadablePages(page_count));
    }

    Ok(ExtractedContent {
        text,
        page_count,
        notes,
    })
}

fn note_for(page: u32, err: &PdfError) -> String {
    match err {
        PdfError::PageTextFailed { .. } => err.to_string(),
        other => format!("page {}: {}", page, other),
    }
}

/// Extract every page of `source` in page order.
pub fn extract_pages(source: &dyn PageTextSource) -> Result<ExtractedContent> {
    let pages = source.page_numbers();
    let outcomes = pages
        .iter()
        .enumerate()
        .map(|(index, &page)| PageOutcome {
            index,
            page,
            result: source.page_text(page),
        })
        .collect();

    assemble_pages(pages.len(), outcomes)
}

/// Extract the text of a PDF held in memory.
///
/// The parse runs on the blocking pool. A panic while loading the container is
/// reported as an invalid PDF.
pub async fn extract_text_from_pdf(bytes: Vec<u8>) -> Result<ExtractedContent> {
    tokio::task::spawn_blocking(move || {
        let pages = catch_unwind(AssertUnwindSafe(|| LopdfPages::load(&bytes)))
            .map_err(|_| PdfError::InvalidPdf("parser panicked while loading the document".to_string()))??;
        tracing::debug!(page_count = pages.page_numbers().len(), "Loaded PDF document");
        extract_pages(&pages)
    })
    .await
    .map_err(|e| PdfError::ExtractionFailed(e.to_string()))?
}
