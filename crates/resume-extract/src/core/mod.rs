//! Core extraction orchestration.
//!
//! - **Detection**: [`format::detect`] classifies a file by extension and MIME hint
//! - **I/O**: [`io::FileReader`] acquires the bytes of an uploaded file
//! - **Orchestration**: [`extractor::ExtractionPipeline`] runs one file end to end
//! - **Batches**: [`batch`] processes an ordered list of files with progress reporting
//! - **Configuration**: [`config::ExtractionConfig`] loaded from `resume-extract.toml`
//!
//! # Example
//!
//! ```rust,no_run
//! use resume_extract::core::config::ExtractionConfig;
//! use resume_extract::core::extractor::extract_one;
//! use resume_extract::UploadedFile;
//!
//! # async fn example() -> resume_extract::Result<()> {
//! let file = UploadedFile::from_path("resume.docx");
//! let outcome = extract_one(&file, &ExtractionConfig::default()).await;
//! if let Ok(doc) = outcome {
//!     println!("{}", doc.text);
//! }
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod config;
pub mod extractor;
pub mod format;
pub mod io;

pub use batch::extract_batch_with_cancellation;
pub use config::ExtractionConfig;
pub use extractor::{ExtractionPipeline, extract_batch, extract_batch_sync, extract_one, extract_one_sync};
pub use format::{Format, accepts, detect};
pub use io::{DefaultFileReader, FileReader};
