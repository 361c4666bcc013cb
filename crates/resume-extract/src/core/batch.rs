//! Ordered batch extraction.
//!
//! Files are processed one at a time in input order. Each file's outcome is
//! recorded whether it succeeded or not, and the caller's progress callback sees
//! the running [`BatchProgress`] after every file.

use crate::core::extractor::ExtractionPipeline;
use crate::types::{BatchProgress, ExtractionOutcome, UploadedFile};
use tokio_util::sync::CancellationToken;

/// Extract every file in `files`, returning one outcome per input at the same index.
///
/// A failing file never stops the batch. Duplicate entries are extracted
/// independently.
pub async fn extract_batch<F>(pipeline: &ExtractionPipeline, files: &[UploadedFile], on_progress: F) -> Vec<ExtractionOutcome>
where
    F: FnMut(&BatchProgress),
{
    run(pipeline, files, on_progress, None).await.into_results()
}

/// Like [`extract_batch`], but stops before the next file once `cancel` fires.
///
/// The returned progress holds the outcomes collected up to that point;
/// `is_complete()` tells whether every file was processed.
pub async fn extract_batch_with_cancellation<F>(
    pipeline: &ExtractionPipeline,
    files: &[UploadedFile],
    on_progress: F,
    cancel: &CancellationToken,
) -> BatchProgress
where
    F: FnMut(&BatchProgress),
{
    run(pipeline, files, on_progress, Some(cancel)).await
}

async fn run<F>(
    pipeline: &ExtractionPipeline,
    files: &[UploadedFile],
    mut on_progress: F,
    cancel: Option<&CancellationToken>,
) -> BatchProgress
where
    F: FnMut(&BatchProgress),
{
    let mut progress = BatchProgress::new(files.len());

    for file in files {
        if cancel.is_some_and(CancellationToken::is_cancelled) {
            tracing::info!(
                completed = progress.completed_count(),
                total = progress.total_count(),
                "Batch extraction cancelled"
            );
            return progress;
        }

        let outcome = pipeline.extract_one(file).await;
        progress.record(outcome);
        on_progress(&progress);
    }

    tracing::info!(
        total = progress.total_count(),
        failed = progress.failure_count(),
        "Batch extraction finished"
    );
    progress
}
