//! resume-extract - text extraction for uploaded resumes
//!
//! Turns an uploaded PDF, DOCX or plain text file into a single UTF-8 text blob,
//! or a structured [`ExtractionFailure`] explaining why it could not. Works on one
//! file at a time or on an ordered batch with progress reporting.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use resume_extract::{extract_one_sync, ExtractionConfig, UploadedFile};
//!
//! # fn main() -> resume_extract::Result<()> {
//! let file = UploadedFile::from_path("resume.pdf");
//! match extract_one_sync(&file, &ExtractionConfig::default()) {
//!     Ok(doc) => println!("{} pages:\n{}", doc.page_count, doc.text),
//!     Err(failure) => eprintln!("{}", failure.user_message()),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Core Module** (`core`): format detection, byte acquisition, orchestration, batches, config
//! - **Extractors** (`extractors`): one [`DocumentExtractor`] per supported format
//! - **Extraction** (`extraction`): DOCX paragraph walking and plain text decoding
//! - **PDF** (`pdf`): page-ordered text assembly on top of `lopdf`
//!
//! Accepted extensions are `.pdf`, `.docx` and `.txt`, matched case-insensitively.
//! Nothing is written anywhere: the output is the text plus the source file name.

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod extraction;
pub mod extractors;
pub mod pdf;
pub mod types;

pub use error::{ResumeExtractError, Result};
pub use types::*;

pub use core::batch::extract_batch_with_cancellation;
pub use core::config::ExtractionConfig;
pub use core::extractor::{ExtractionPipeline, extract_batch, extract_batch_sync, extract_one, extract_one_sync};
pub use core::format::{Format, accepts, detect};
pub use core::io::{DefaultFileReader, FileReader};
pub use extractors::DocumentExtractor;
pub use tokio_util::sync::CancellationToken;
