//! Exhaustive cursor-based retrieval of saved items from one upstream source.
//!
//! Each iteration fetches one page, hands every item to the handler in page
//! order, acknowledges each handled item immediately, then advances the
//! cursor to the last item's `source_id` regardless of per-item success. An
//! empty page is the sole termination condition; an optional page budget
//! bounds runtime against a source that never returns one.
//!
//! Failure semantics: a handler failure leaves the item unacknowledged (it
//! is retried on the next full run) and never halts the page loop. A
//! page-fetch failure is fatal for this source's drain and is surfaced to
//! the orchestrator.

use tracing::{error, info, warn};

use crate::contract::{ItemHandler, SavedItemSource};
use crate::error::SourceFetchError;

/// Options for one drain.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrainOptions {
    /// Safety cap on fetched pages. `None` preserves the documented
    /// terminate-only-on-empty-page contract.
    pub max_pages: Option<u32>,
}

/// Counters for one completed drain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub pages: u32,
    pub processed: usize,
    pub acknowledged: usize,
    pub skipped: usize,
}

/// Drain the source to exhaustion, feeding every item to `handler`.
///
/// Acknowledgment is per-item, not batched: a crash mid-page only
/// re-processes unacknowledged items on the next run (at-least-once
/// semantics).
pub async fn drain(
    source: &dyn SavedItemSource,
    handler: &dyn ItemHandler,
    options: &DrainOptions,
) -> Result<DrainReport, SourceFetchError> {
    let mut report = DrainReport::default();
    let mut cursor: Option<String> = None;

    loop {
        if let Some(cap) = options.max_pages {
            if report.pages >= cap {
                warn!(
                    pages = report.pages,
                    "Page budget exhausted before an empty page, stopping drain"
                );
                break;
            }
        }

        let page = source.fetch_page(cursor.as_deref()).await?;
        report.pages += 1;

        if page.items.is_empty() {
            info!(pages = report.pages, "Empty page, source drained");
            break;
        }

        for item in &page.items {
            report.processed += 1;
            if handler.handle(item).await {
                match source.acknowledge(&item.source_id).await {
                    Ok(true) => {
                        info!(source_id = %item.source_id, "Item acknowledged upstream");
                        report.acknowledged += 1;
                    }
                    Ok(false) => {
                        warn!(
                            source_id = %item.source_id,
                            "Upstream declined acknowledgment, item will be re-delivered"
                        );
                        report.skipped += 1;
                    }
                    Err(e) => {
                        error!(
                            source_id = %item.source_id,
                            error = %e,
                            "Failed to acknowledge item, it will be re-delivered"
                        );
                        report.skipped += 1;
                    }
                }
            } else {
                // Handler already logged the cause. Left unacknowledged so
                // the next full run retries it; never retried within a run.
                report.skipped += 1;
            }
        }

        cursor = page.items.last().map(|item| item.source_id.clone());
    }

    Ok(report)
}
