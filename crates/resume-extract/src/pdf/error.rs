use std::fmt;

#[derive(Debug, Clone)]
pub enum PdfError {
    /// The buffer is not a loadable PDF container.
    InvalidPdf(String),
    /// A single page could not be turned into text.
    PageTextFailed { page: u32, message: String },
    /// Every one of the document's pages failed.
    NoReadablePages(usize),
    /// The blocking worker running the parse did not finish.
    ExtractionFailed(String),
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfError::InvalidPdf(msg) => write!(f, "Invalid PDF: {}", msg),
            PdfError::PageTextFailed { page, message } => write!(f, "page {}: {}", page, message),
            PdfError::NoReadablePages(count) => {
                write!(f, "No readable text on any of the document's {} pages", count)
            }
            PdfError::ExtractionFailed(msg) => write!(f, "Extraction failed: {}", msg),
        }
    }
}

impl std::error::Error for PdfError {}

impl From<lopdf::Error> for PdfError {
    fn from(err: lopdf::Error) -> Self {
        PdfError::InvalidPdf(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PdfError>;
