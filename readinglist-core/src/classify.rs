//! URL classification: decide whether a saved link identifies a hosted
//! source-code repository or a generic web resource, and extract the routing
//! parameters for each case.

use tracing::debug;
use url::Url;

use crate::contract::SavedItem;
use crate::error::ClassifyError;
use crate::tags::TagIndex;

/// The routing decision for one saved item. Consumed exactly once by the
/// router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    /// Link points at a hosted source-code repository; star it.
    Repo { owner: String, repo: String },
    /// Generic web resource; bookmark it with zero or more tags.
    Bookmark {
        url: String,
        title: String,
        tags: Vec<String>,
    },
}

/// Classifies saved items against a configured code-hosting host.
#[derive(Debug, Clone)]
pub struct Classifier {
    code_host: String,
}

impl Classifier {
    pub fn new(code_host: impl Into<String>) -> Self {
        Classifier {
            code_host: code_host.into(),
        }
    }

    /// Classify one saved item.
    ///
    /// A URL on the code host with exactly two non-empty path segments is a
    /// repo target. The exact-depth-two rule is deliberate: issue pages,
    /// gists and user profiles on the same host fall through to bookmark
    /// classification.
    ///
    /// For bookmarks, source-provided tags take precedence; only when the
    /// item carries none are domain tags looked up in the index. An empty
    /// tag set is a valid outcome meaning "save untagged".
    pub fn classify(
        &self,
        item: &SavedItem,
        index: &TagIndex,
    ) -> Result<RouteTarget, ClassifyError> {
        let parsed = Url::parse(&item.url).map_err(|e| ClassifyError::MalformedUrl {
            url: item.url.clone(),
            source: e,
        })?;
        let host = parsed.host_str().unwrap_or_default();

        if host.eq_ignore_ascii_case(&self.code_host) {
            let segments: Vec<&str> = parsed
                .path_segments()
                .map(|s| s.filter(|p| !p.is_empty()).collect())
                .unwrap_or_default();
            if let [owner, repo] = segments[..] {
                return Ok(RouteTarget::Repo {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                });
            }
            debug!(url = %item.url, "Code-host URL without owner/repo path depth, bookmarking");
        }

        let tags = if item.tags.is_empty() {
            index.tags_for_domain(host).to_vec()
        } else {
            item.tags.clone()
        };

        Ok(RouteTarget::Bookmark {
            url: item.url.clone(),
            title: item.title.clone(),
            tags,
        })
    }
}
