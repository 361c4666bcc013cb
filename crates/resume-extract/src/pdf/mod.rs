//! PDF text extraction.
//!
//! Loads the container with `lopdf`, reads every page's text runs and assembles
//! them in page order, one line per page.
//!
//! ```rust,no_run
//! use resume_extract::pdf::extract_text_from_pdf;
//!
//! # async fn example() -> resume_extract::Result<()> {
//! let bytes = std::fs::read("resume.pdf")?;
//! let content = extract_text_from_pdf(bytes).await?;
//! println!("{} pages", content.page_count);
//! # Ok(())
//! # }
//! ```
pub mod error;
pub mod text;

pub use error::PdfError;
pub use text::{LopdfPages, PageTextSource, extract_text_from_pdf};
