//! Format-specific text extraction functions.
//!
//! These are the synchronous building blocks used by the extractors in
//! [`crate::extractors`]. PDF support lives in [`crate::pdf`].
pub mod docx;
pub mod text;
