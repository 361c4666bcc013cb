//! DOCX (WordprocessingML) text extraction.
//!
//! Opens the package with `zip`, resolves the main document part through the
//! package relationships and walks its paragraphs with `roxmltree`. One output
//! line per `w:p`, in document order, table cells included. Styling, deleted
//! revisions, headers, footers and images are not part of the output.

use crate::error::{ResumeExtractError, Result};
use roxmltree::Node;
use std::io::{Cursor, Read};
use zip::ZipArchive;
use zip::result::ZipError;

const WORDML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const WORDML_STRICT_NS: &str = "http://purl.oclc.org/ooxml/wordprocessingml/main";
const MARKUP_COMPAT_NS: &str = "http://schemas.openxmlformats.org/markup-compatibility/2006";
const OFFICE_DOCUMENT_REL_SUFFIX: &str = "/officeDocument";
const PACKAGE_RELS_PATH: &str = "_rels/.rels";
const DEFAULT_MAIN_PART: &str = "word/document.xml";

/// Extract the paragraph text of a DOCX package.
///
/// # Errors
///
/// - `Corrupt` if the bytes are not a zip archive
/// - `Parsing` if the main document part is missing or is not well-formed XML
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let part_name = main_part_name(&mut archive);
    tracing::debug!(part = %part_name, "Reading DOCX main document part");

    let xml = read_part(&mut archive, &part_name)?;
    let document = roxmltree::Document::parse(&xml)
        .map_err(|e| ResumeExtractError::parsing_with_source(format!("Malformed XML in {}", part_name), e))?;

    let paragraphs: Vec<String> = document
        .descendants()
        .filter(|node| is_wordml(*node, "p") && !in_shadowed_fallback(*node))
        .map(paragraph_text)
        .collect();

    Ok(paragraphs.join("\n"))
}

/// Target of the `officeDocument` relationship, or the conventional location when
/// the package relationships are absent or unusable.
fn main_part_name<R: Read + std::io::Seek>(archive: &mut ZipArchive<R>) -> String {
    let Ok(rels) = read_part(archive, PACKAGE_RELS_PATH) else {
        return DEFAULT_MAIN_PART.to_string();
    };
    let Ok(doc) = roxmltree::Document::parse(&rels) else {
        tracing::debug!("Unparseable package relationships, using default main part");
        return DEFAULT_MAIN_PART.to_string();
    };

    doc.descendants()
        .filter(|node| node.has_tag_name("Relationship"))
        .find(|node| {
            node.attribute("Type")
                .is_some_and(|t| t.ends_with(OFFICE_DOCUMENT_REL_SUFFIX))
        })
        .and_then(|node| node.attribute("Target"))
        .map(|target| target.trim_start_matches('/').to_string())
        .filter(|target| !target.is_empty())
        .unwrap_or_else(|| DEFAULT_MAIN_PART.to_string())
}

fn read_part<R: Read + std::io::Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<String> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => {
            return Err(ResumeExtractError::parsing(format!("Missing part {}", name)));
        }
        Err(e) => {
            return Err(ResumeExtractError::parsing_with_source(format!("Unreadable part {}", name), e));
        }
    };

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| ResumeExtractError::parsing_with_source(format!("Failed to read {}", name), e))?;
    Ok(content)
}

fn is_wordml(node: Node<'_, '_>, local_name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == local_name
        && matches!(node.tag_name().namespace(), Some(WORDML_NS) | Some(WORDML_STRICT_NS))
}

/// Text owned by `paragraph`. Runs inside a nested paragraph (text boxes) belong
/// to the nested one.
fn paragraph_text(paragraph: Node<'_, '_>) -> String {
    let mut text = String::new();

    for node in paragraph.descendants().skip(1).filter(Node::is_element) {
        let owner = node.ancestors().skip(1).find(|a| is_wordml(*a, "p"));
        if owner != Some(paragraph) {
            continue;
        }

        if is_wordml(node, "t") {
            text.push_str(node.text().unwrap_or_default());
        } else if in_run(node) && is_wordml(node, "tab") {
            text.push('\t');
        } else if in_run(node) && (is_wordml(node, "br") || is_wordml(node, "cr")) {
            text.push('\n');
        }
    }

    text
}

/// Word writes text boxes twice, once per `mc:AlternateContent` branch. A
/// `mc:Fallback` is only read when its block has no `mc:Choice`.
fn in_shadowed_fallback(node: Node<'_, '_>) -> bool {
    node.ancestors()
        .filter(|a| is_markup_compat(*a, "Fallback"))
        .any(|fallback| {
            fallback
                .parent()
                .is_some_and(|block| block.children().any(|c| is_markup_compat(c, "Choice")))
        })
}

fn is_markup_compat(node: Node<'_, '_>, local_name: &str) -> bool {
    node.is_element() && node.tag_name().name() == local_name && node.tag_name().namespace() == Some(MARKUP_COMPAT_NS)
}

// `w:tab` also appears under `w:tabs` as a tab-stop definition.
fn in_run(node: Node<'_, '_>) -> bool {
    node.parent().is_some_and(|parent| is_wordml(parent, "r"))
}
