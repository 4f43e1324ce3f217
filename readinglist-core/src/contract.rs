//! # contract: capability traits consumed by the routing core
//!
//! This module defines the minimal surface the core needs from its external
//! collaborators: a paginated feed of saved items ([`SavedItemSource`]), the
//! repo-star sink ([`RepoStars`]), the bookmark sink ([`Bookmarks`]), and the
//! per-item handler the pagination loop drives ([`ItemHandler`]).
//!
//! ## Interface & Extensibility
//! - Implement [`SavedItemSource`] to plug in a new upstream feed. Cursor
//!   semantics are the implementor's: cursor-based feeds use it as a page
//!   token, bounded feeds may ignore it and signal exhaustion with an empty
//!   page.
//! - All methods are async and return the core error types; transport and
//!   auth details stay inside the implementor. Clients are explicit session
//!   objects, logged in before they are handed to the core.
//!
//! ## Mocking & Testing
//! - Every trait is annotated for `mockall` (behind the `test-export-mocks`
//!   feature, on by default) so consumers can generate deterministic mocks.

use async_trait::async_trait;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::error::{SinkError, SourceFetchError};

/// A unit of work pulled from an upstream source.
///
/// `source_id` is opaque and source-specific; it is used only to acknowledge
/// the item and, for cursor-based sources, to compute the next page token.
/// Tags may arrive pre-populated (source-provided) or empty, in which case
/// classification falls back to domain tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedItem {
    pub source_id: String,
    pub url: String,
    pub title: String,
    pub tags: Vec<String>,
}

/// One page of saved items. An empty page signals end of stream.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub items: Vec<SavedItem>,
}

/// The bare minimum data needed to create a bookmark downstream.
pub struct NewBookmark<'a> {
    pub url: &'a str,
    /// Already transliterated to plain ASCII by the router.
    pub title: &'a str,
    pub tags: &'a [String],
    /// Leave the entry unread in the bookmark service.
    pub mark_unread: bool,
}

/// Paginated upstream feed of saved items.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait SavedItemSource: Send + Sync {
    /// Fetch one page of items at the given cursor position. `None` means
    /// "start". A page-fetch failure is fatal for this source's drain.
    async fn fetch_page<'a>(&self, cursor: Option<&'a str>) -> Result<Page, SourceFetchError>;

    /// Acknowledge a routed item upstream (unsave / mark read) so it is not
    /// delivered again on the next run.
    async fn acknowledge(&self, source_id: &str) -> Result<bool, SourceFetchError>;
}

/// Repo-star sink capability.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait RepoStars: Send + Sync {
    /// Idempotent check whether the repository is already starred.
    async fn is_starred(&self, owner: &str, repo: &str) -> Result<bool, SinkError>;

    /// Star the repository. Exactly one remote mutation per call.
    async fn star(&self, owner: &str, repo: &str) -> Result<bool, SinkError>;
}

/// Bookmark sink capability.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Bookmarks: Send + Sync {
    /// Create a bookmark. Exactly one remote mutation per call.
    async fn create<'a>(&self, req: NewBookmark<'a>) -> Result<bool, SinkError>;
}

/// Per-item handler driven by the pagination loop. Returns `true` when the
/// item was handled and may be acknowledged upstream.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ItemHandler: Send + Sync {
    async fn handle(&self, item: &SavedItem) -> bool;
}
