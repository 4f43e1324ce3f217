//! High-level pipeline: classify → route → acknowledge across all configured
//! sources.
//!
//! This module wires the classifier, tag index and router into the per-item
//! [`ItemHandler`] the pagination loop drives, and sequences one drain per
//! configured source. Sources are drained strictly one after another; a
//! fatal page-fetch error in one source is recorded and does not prevent the
//! remaining sources from draining.
//!
//! # Major Types
//! - [`RouteHandler`]: classify + route for one saved item
//! - [`RunReport`] / [`SourceReport`]: per-run outcome for logging and exit
//!   status decisions
//!
//! # Callable From
//! - Used by the CLI crate and by integration tests with mocked capabilities

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::classify::Classifier;
use crate::contract::{ItemHandler, SavedItem, SavedItemSource};
use crate::drain::{drain, DrainOptions, DrainReport};
use crate::error::SourceFetchError;
use crate::route::Router;
use crate::tags::TagIndex;

/// Classifies and routes one saved item. Returns `true` only on confirmed
/// downstream success, so the paginator acknowledges upstream exactly when
/// the sink has the item.
pub struct RouteHandler<'a> {
    classifier: &'a Classifier,
    index: &'a TagIndex,
    router: Router<'a>,
}

impl<'a> RouteHandler<'a> {
    pub fn new(classifier: &'a Classifier, index: &'a TagIndex, router: Router<'a>) -> Self {
        RouteHandler {
            classifier,
            index,
            router,
        }
    }
}

#[async_trait]
impl ItemHandler for RouteHandler<'_> {
    async fn handle(&self, item: &SavedItem) -> bool {
        info!(url = %item.url, "[SYNC] Processing saved item");

        let target = match self.classifier.classify(item, self.index) {
            Ok(target) => target,
            Err(e) => {
                error!(url = %item.url, error = %e, "[SYNC] Classification failed, skipping item");
                return false;
            }
        };

        match self.router.route(&target).await {
            Ok(true) => true,
            Ok(false) => {
                warn!(url = %item.url, "[SYNC] Sink declined item, leaving unacknowledged");
                false
            }
            Err(e) => {
                error!(url = %item.url, error = %e, "[SYNC] Sink error, leaving unacknowledged");
                false
            }
        }
    }
}

/// A configured source with a stable name for logs and reports.
pub struct NamedSource<'a> {
    pub name: &'a str,
    pub source: &'a dyn SavedItemSource,
}

/// Outcome of draining one source.
#[derive(Debug)]
pub struct SourceReport {
    pub name: String,
    pub drain: Result<DrainReport, SourceFetchError>,
}

/// Outcome of one full run.
#[derive(Debug)]
pub struct RunReport {
    pub sources: Vec<SourceReport>,
}

impl RunReport {
    /// True when every configured source failed fatally. The process exits
    /// non-zero only in that case (or on a startup config error).
    pub fn all_failed(&self) -> bool {
        !self.sources.is_empty() && self.sources.iter().all(|s| s.drain.is_err())
    }
}

/// Drain every configured source in order, isolating failures so one
/// source's fatal fetch error does not prevent the others from running.
pub async fn synchronise(
    sources: &[NamedSource<'_>],
    handler: &dyn ItemHandler,
    options: &DrainOptions,
) -> RunReport {
    let mut reports = Vec::with_capacity(sources.len());

    for named in sources {
        info!(source = named.name, "[SYNC] Draining source");
        let outcome = drain(named.source, handler, options).await;
        match &outcome {
            Ok(report) => {
                info!(
                    source = named.name,
                    pages = report.pages,
                    processed = report.processed,
                    acknowledged = report.acknowledged,
                    skipped = report.skipped,
                    "[SYNC] Source drained"
                );
            }
            Err(e) => {
                error!(
                    source = named.name,
                    error = %e,
                    "[SYNC] Source drain failed, continuing with remaining sources"
                );
            }
        }
        reports.push(SourceReport {
            name: named.name.to_string(),
            drain: outcome,
        });
    }

    RunReport { sources: reports }
}
