//! Error types for resume-extract.
//!
//! `ResumeExtractError` is the internal error of the pipeline. It never crosses the
//! orchestrator boundary: [`ExtractionPipeline::extract_one`](crate::ExtractionPipeline::extract_one)
//! converts every error into an [`ExtractionFailure`](crate::ExtractionFailure) value.
//!
//! - `Io` - the file could not be read (permissions, missing file, aborted upload)
//! - `Corrupt` - the container itself is not a valid PDF or zip archive
//! - `Parsing` - the container opened but its structure is unusable
//! - `Validation` - invalid configuration or parameters
//! - `UnsupportedFormat` - the file type is not accepted
use thiserror::Error;

/// Result type alias using `ResumeExtractError`.
pub type Result<T> = std::result::Result<T, ResumeExtractError>;

#[derive(Debug, Error)]
pub enum ResumeExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt document: {message}")]
    Corrupt {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Other(String),
}

impl From<crate::pdf::error::PdfError> for ResumeExtractError {
    fn from(err: crate::pdf::error::PdfError) -> Self {
        use crate::pdf::error::PdfError;

        match err {
            PdfError::InvalidPdf(_) => ResumeExtractError::Corrupt {
                message: err.to_string(),
                source: Some(Box::new(err)),
            },
            _ => ResumeExtractError::Parsing {
                message: err.to_string(),
                source: Some(Box::new(err)),
            },
        }
    }
}

impl From<zip::result::ZipError> for ResumeExtractError {
    fn from(err: zip::result::ZipError) -> Self {
        ResumeExtractError::Corrupt {
            message: format!("not a valid zip container: {}", err),
            source: Some(Box::new(err)),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl ResumeExtractError {
    error_constructor!(corrupt, Corrupt);
    error_constructor!(parsing, Parsing);
    error_constructor!(validation, Validation);
}
