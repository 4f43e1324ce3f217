//! Sink routing: dispatch a classified target to the star or bookmark
//! capability and report whether the item was handled.

use deunicode::deunicode;
use tracing::info;

use crate::classify::RouteTarget;
use crate::contract::{Bookmarks, NewBookmark, RepoStars};
use crate::error::SinkError;

/// Dispatches route targets to the two sink capabilities.
///
/// Exactly one remote mutation per call (star or create-bookmark) and no
/// retries; transient failures propagate and are the caller's decision to
/// skip or abort.
pub struct Router<'a> {
    stars: &'a dyn RepoStars,
    bookmarks: &'a dyn Bookmarks,
}

impl<'a> Router<'a> {
    pub fn new(stars: &'a dyn RepoStars, bookmarks: &'a dyn Bookmarks) -> Self {
        Router { stars, bookmarks }
    }

    /// Route one target. `Ok(true)` means handled: the item may be
    /// acknowledged upstream.
    ///
    /// Repo targets are idempotent: an already-starred repo returns `true`
    /// without issuing a second star mutation. Bookmark titles are
    /// transliterated to plain ASCII before submission since downstream
    /// bookmark services do not reliably round-trip non-ASCII titles.
    pub async fn route(&self, target: &RouteTarget) -> Result<bool, SinkError> {
        match target {
            RouteTarget::Repo { owner, repo } => {
                if self.stars.is_starred(owner, repo).await? {
                    info!(owner = %owner, repo = %repo, "Repo previously starred");
                    return Ok(true);
                }
                let starred = self.stars.star(owner, repo).await?;
                if starred {
                    info!(owner = %owner, repo = %repo, "Repo starred successfully");
                }
                Ok(starred)
            }
            RouteTarget::Bookmark { url, title, tags } => {
                if tags.is_empty() {
                    info!(url = %url, "Saving bookmark with no tags");
                } else {
                    info!(url = %url, tags = ?tags, "Saving bookmark with tags");
                }
                let title_ascii = deunicode(title);
                self.bookmarks
                    .create(NewBookmark {
                        url,
                        title: &title_ascii,
                        tags,
                        mark_unread: true,
                    })
                    .await
            }
        }
    }
}
