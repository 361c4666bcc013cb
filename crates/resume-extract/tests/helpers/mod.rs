//! Fixture builders shared by the integration tests.
//!
//! PDFs are assembled with `lopdf`, DOCX packages with `zip`, so no binary
//! fixtures need to be checked in.

#![allow(dead_code)]

use lopdf::{Document, Object, Stream, dictionary};
use resume_extract::UploadedFile;
use std::io::{Cursor, Write};

pub const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const MARKUP_COMPAT_NS: &str = "http://schemas.openxmlformats.org/markup-compatibility/2006";

/// Install a test subscriber once so `RUST_LOG` works while debugging tests.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn escape_pdf_string(text: &str) -> String {
    text.replace('\\', "\\\\").replace('(', "\\(").replace(')', "\\)")
}

/// What a fixture page's `Contents` entry points at.
pub enum PageContents<'a> {
    /// A stream holding these raw content operators.
    Operators(&'a str),
    /// A stream compressed with a filter the decoder does not implement.
    UnsupportedFilter,
    /// A reference to an object missing from the file.
    Dangling,
}

/// Build a PDF with one page per entry; each page draws its runs top to bottom,
/// one text object per run.
pub fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
    let operators: Vec<String> = pages
        .iter()
        .map(|runs| {
            runs.iter()
                .enumerate()
                .map(|(i, run)| {
                    format!(
                        "BT /F1 12 Tf 72 {} Td ({}) Tj ET\n",
                        720 - 16 * i as i64,
                        escape_pdf_string(run)
                    )
                })
                .collect()
        })
        .collect();
    let contents: Vec<PageContents<'_>> = operators.iter().map(|ops| PageContents::Operators(ops)).collect();
    build_pdf_pages(&contents)
}

/// Build a PDF whose pages carry the given raw content operators, with `/F1` bound
/// to Helvetica.
pub fn build_pdf_from_operators(pages: &[&str]) -> Vec<u8> {
    let contents: Vec<PageContents<'_>> = pages.iter().map(|ops| PageContents::Operators(ops)).collect();
    build_pdf_pages(&contents)
}

pub fn build_pdf_pages(pages: &[PageContents<'_>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.4");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut page_ids = Vec::new();
    for contents in pages {
        let content_ref: Object = match contents {
            PageContents::Operators(ops) => doc
                .add_object(Stream::new(dictionary! {}, ops.as_bytes().to_vec()))
                .into(),
            PageContents::UnsupportedFilter => doc
                .add_object(Stream::new(
                    dictionary! { "Filter" => "RunLengthDecode" },
                    b"\x05Hello\x80".to_vec(),
                ))
                .into(),
            PageContents::Dangling => Object::Reference((9999, 0)),
        };

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => resources_id,
            "Contents" => content_ref,
        });
        page_ids.push(page_id);
    }

    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids.iter().map(|id| Object::from(*id)).collect::<Vec<_>>(),
        "Count" => page_ids.len() as i64,
    });

    for page_id in &page_ids {
        if let Ok(Object::Dictionary(dict)) = doc.get_object_mut(*page_id) {
            dict.set("Parent", pages_id);
        }
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// Build a PDF whose pages each carry a single run.
pub fn build_simple_pdf(page_texts: &[&str]) -> Vec<u8> {
    let pages: Vec<[&str; 1]> = page_texts.iter().map(|text| [*text]).collect();
    let page_refs: Vec<&[&str]> = pages.iter().map(|p| p.as_slice()).collect();
    build_pdf(&page_refs)
}

/// Build a zip archive from `(name, content)` entries.
pub fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::FileOptions::<()>::default().compression_method(zip::CompressionMethod::Stored);

    for (name, content) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

/// Build a minimal DOCX package with one `w:p` per paragraph.
pub fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|text| {
            if text.is_empty() {
                "<w:p/>".to_string()
            } else {
                format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", xml_escape(text))
            }
        })
        .collect();
    build_docx_from_body(&body)
}

/// Build a DOCX package around a raw `w:body` fragment.
pub fn build_docx_from_body(body: &str) -> Vec<u8> {
    let content_types = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;
    let rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{}" xmlns:mc="{}"><w:body>{}</w:body></w:document>"#,
        WORDML_NS, MARKUP_COMPAT_NS, body
    );

    build_zip(&[
        ("[Content_Types].xml", content_types),
        ("_rels/.rels", rels),
        ("word/document.xml", &document),
    ])
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

pub fn upload(name: &str, mime_type: &str, bytes: Vec<u8>) -> UploadedFile {
    UploadedFile::from_bytes(name, mime_type, bytes)
}
