//! DOCX extraction integration tests.

use resume_extract::{ExtractionConfig, ExtractionFormat, FailureReason, extract_one};

mod helpers;
use helpers::{build_docx, build_docx_from_body, build_zip, upload};

#[tokio::test]
async fn test_docx_paragraphs() {
    let bytes = build_docx(&["Jane Doe", "", "Experience", "Rust & Go <3"]);
    let file = upload("cv.docx", "", bytes);

    let doc = extract_one(&file, &ExtractionConfig::default()).await.unwrap();

    assert_eq!(doc.text, "Jane Doe\n\nExperience\nRust & Go <3");
    assert_eq!(doc.page_count, 1);
    assert_eq!(doc.extraction_format, ExtractionFormat::Docx);
}

/// Text inside a table appears cell by cell.
#[tokio::test]
async fn test_docx_table_text() {
    let body = "<w:p><w:r><w:t>Skills</w:t></w:r></w:p>\
        <w:tbl><w:tr>\
        <w:tc><w:p><w:r><w:t>Rust</w:t></w:r></w:p></w:tc>\
        <w:tc><w:p><w:r><w:t>5 years</w:t></w:r></w:p></w:tc>\
        </w:tr></w:tbl>";
    let file = upload("cv.docx", "", build_docx_from_body(body));

    let doc = extract_one(&file, &ExtractionConfig::default()).await.unwrap();

    assert_eq!(doc.text, "Skills\nRust\n5 years");
}

/// `resume.docx` labelled as a generic zip is still read as DOCX.
#[tokio::test]
async fn test_docx_with_zip_mime_is_routed_to_docx() {
    let file = upload("resume.docx", "application/zip", build_docx(&["Routed"]));

    let doc = extract_one(&file, &ExtractionConfig::default()).await.unwrap();

    assert_eq!(doc.extraction_format, ExtractionFormat::Docx);
    assert_eq!(doc.text, "Routed");
}

/// A zip without the main document part is a parse error, not corruption.
#[tokio::test]
async fn test_zip_without_main_part_is_parse_error() {
    let bytes = build_zip(&[("docProps/core.xml", "<cp:coreProperties/>")]);
    let file = upload("file.docx", "", bytes);

    let failure = extract_one(&file, &ExtractionConfig::default()).await.unwrap_err();

    assert_eq!(failure.reason, FailureReason::ParseError);
    assert_eq!(failure.file_name, "file.docx");
}

#[tokio::test]
async fn test_non_zip_docx_is_corrupt() {
    let file = upload("file.docx", "", b"plain text pretending".to_vec());

    let failure = extract_one(&file, &ExtractionConfig::default()).await.unwrap_err();

    assert_eq!(failure.reason, FailureReason::Corrupt);
}

#[tokio::test]
async fn test_malformed_document_xml_is_parse_error() {
    let bytes = build_zip(&[("word/document.xml", "<w:document><unclosed>")]);
    let file = upload("broken.docx", "", bytes);

    let failure = extract_one(&file, &ExtractionConfig::default()).await.unwrap_err();

    assert_eq!(failure.reason, FailureReason::ParseError);
}

/// A text box Word stores in both `mc:AlternateContent` branches comes out once.
#[tokio::test]
async fn test_text_box_not_duplicated() {
    let body = "<w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>\
        <w:p><w:r><mc:AlternateContent>\
        <mc:Choice Requires=\"wps\"><w:drawing><w:txbxContent>\
        <w:p><w:r><w:t>jane@example.com</w:t></w:r></w:p>\
        </w:txbxContent></w:drawing></mc:Choice>\
        <mc:Fallback><w:pict><w:txbxContent>\
        <w:p><w:r><w:t>jane@example.com</w:t></w:r></w:p>\
        </w:txbxContent></w:pict></mc:Fallback>\
        </mc:AlternateContent></w:r></w:p>";
    let file = upload("cv.docx", "", build_docx_from_body(body));

    let doc = extract_one(&file, &ExtractionConfig::default()).await.unwrap();

    assert_eq!(doc.text, "Jane Doe\n\njane@example.com");
    assert_eq!(doc.text.matches("jane@example.com").count(), 1);
}
