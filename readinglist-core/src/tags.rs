//! Inverted tag index built from declarative tag rules.
//!
//! Configuration declares `tag -> {subreddits, domains}`; the index inverts
//! that into `subreddit -> tags` and `domain -> tags` lookups. Built once at
//! startup, immutable afterwards, safe to share.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One declarative tag rule from configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRule {
    pub tag: String,
    #[serde(default)]
    pub subreddits: Vec<String>,
    #[serde(default)]
    pub domains: Vec<String>,
}

/// Inverted mapping from subreddit/domain to applicable tags.
///
/// Keys are lowercased; lookups are case-insensitive. Within a mapped tag
/// set, insertion order follows rule declaration order and duplicates are
/// dropped. Two rules naming the same tag simply union their membership
/// lists under that tag.
#[derive(Debug, Default)]
pub struct TagIndex {
    subreddit_tags: HashMap<String, Vec<String>>,
    domain_tags: HashMap<String, Vec<String>>,
}

fn append_tag(map: &mut HashMap<String, Vec<String>>, key: &str, tag: &str) {
    let entry = map.entry(key.to_lowercase()).or_default();
    if !entry.iter().any(|t| t == tag) {
        entry.push(tag.to_string());
    }
}

impl TagIndex {
    /// Build the index by inverting each rule's membership lists, in rule
    /// declaration order. Deterministic: identical configuration always
    /// yields an identical index.
    pub fn build(rules: &[TagRule]) -> Self {
        let mut index = TagIndex::default();
        for rule in rules {
            for sub in &rule.subreddits {
                append_tag(&mut index.subreddit_tags, sub, &rule.tag);
            }
            for domain in &rule.domains {
                append_tag(&mut index.domain_tags, domain, &rule.tag);
            }
        }
        debug!(
            subreddits = index.subreddit_tags.len(),
            domains = index.domain_tags.len(),
            "Built tag index"
        );
        index
    }

    /// Tags mapped to the given subreddit, or an empty slice if unmapped.
    /// Unmapped input is a normal, expected case, not an error.
    pub fn tags_for_subreddit(&self, name: &str) -> &[String] {
        self.subreddit_tags
            .get(&name.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Tags mapped to the given domain, or an empty slice if unmapped.
    pub fn tags_for_domain(&self, name: &str) -> &[String] {
        self.domain_tags
            .get(&name.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
