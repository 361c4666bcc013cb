//! Rendering of extraction outcomes.

use anyhow::Result;
use resume_extract::{ExtractedDocument, ExtractionFailure, ExtractionOutcome};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum OutcomeOutput<'a> {
    Extracted(&'a ExtractedDocument),
    Failed(&'a ExtractionFailure),
}

impl<'a> From<&'a ExtractionOutcome> for OutcomeOutput<'a> {
    fn from(outcome: &'a ExtractionOutcome) -> Self {
        match outcome {
            Ok(doc) => OutcomeOutput::Extracted(doc),
            Err(failure) => OutcomeOutput::Failed(failure),
        }
    }
}

/// Write all outcomes as one pretty-printed JSON array.
pub fn write_json(out: &mut impl Write, outcomes: &[ExtractionOutcome]) -> Result<()> {
    let rendered: Vec<OutcomeOutput<'_>> = outcomes.iter().map(OutcomeOutput::from).collect();
    serde_json::to_writer_pretty(&mut *out, &rendered)?;
    writeln!(out)?;
    Ok(())
}

/// Write extracted text to `out` and failure messages to `err`.
///
/// With more than one outcome each document is preceded by a `==> name <==` header.
pub fn write_text(out: &mut impl Write, err: &mut impl Write, outcomes: &[ExtractionOutcome]) -> Result<()> {
    let with_headers = outcomes.len() > 1;

    for outcome in outcomes {
        match outcome {
            Ok(doc) => {
                if with_headers {
                    writeln!(out, "==> {} <==", doc.source_file_name)?;
                }
                out.write_all(doc.text.as_bytes())?;
                if !doc.text.ends_with('\n') {
                    writeln!(out)?;
                }
                for note in &doc.notes {
                    writeln!(err, "{}: {}", doc.source_file_name, note)?;
                }
            }
            Err(failure) => {
                writeln!(err, "{} ({})", failure.user_message(), failure.detail)?;
            }
        }
    }

    Ok(())
}
