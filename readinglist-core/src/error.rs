//! Error taxonomy for the routing core.
//!
//! Errors are scoped to how far they may escalate:
//! - [`ClassifyError`] and [`SinkError`] are item-level: the item is skipped
//!   and left unacknowledged, the run continues.
//! - [`SourceFetchError`] is source-level: it aborts that source's drain but
//!   never the remaining sources of a run.
//!
//! Configuration errors are fatal at startup and live in the CLI crate.

use thiserror::Error;

/// A saved item's URL could not be classified.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("malformed url {url:?}: {source}")]
    MalformedUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// A downstream sink (star or bookmark) failed to handle a target.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink transport error: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),
    #[error("sink rejected request: {0}")]
    Rejected(String),
}

impl SinkError {
    pub fn transport(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        SinkError::Transport(Box::new(e))
    }
}

/// An upstream source failed to deliver a page. Fatal for that source's drain.
#[derive(Debug, Error)]
pub enum SourceFetchError {
    #[error("source transport error: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),
    #[error("source protocol error: {0}")]
    Protocol(String),
}

impl SourceFetchError {
    pub fn transport(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        SourceFetchError::Transport(Box::new(e))
    }
}
