//! Tiny Tiny RSS starred-article feed: session-id API, bounded non-cursor
//! page of starred headlines, and unstar acknowledgment.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use readinglist_core::contract::{Page, SavedItem, SavedItemSource};
use readinglist_core::error::SourceFetchError;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

/// The virtual feed holding starred articles.
const STARRED_FEED_ID: i64 = -1;
/// `updateArticle` field selector for the starred flag.
const FIELD_STARRED: i64 = 0;
/// `updateArticle` mode that clears the flag.
const MODE_CLEAR: i64 = 0;

#[derive(Debug, Deserialize)]
struct Headline {
    id: i64,
    link: String,
    title: String,
}

/// Call the tt-rss JSON API and unwrap its `{status, content}` envelope.
async fn api_call(
    http: &reqwest::Client,
    api_url: &str,
    body: Value,
) -> Result<Value, SourceFetchError> {
    let resp = http
        .post(api_url)
        .json(&body)
        .send()
        .await
        .map_err(SourceFetchError::transport)?;
    if !resp.status().is_success() {
        return Err(SourceFetchError::Protocol(format!(
            "tt-rss api returned {}",
            resp.status()
        )));
    }

    let envelope: Value = resp.json().await.map_err(SourceFetchError::transport)?;
    let status = envelope.get("status").and_then(Value::as_i64).unwrap_or(-1);
    if status != 0 {
        let content = envelope.get("content").cloned().unwrap_or(Value::Null);
        return Err(SourceFetchError::Protocol(format!(
            "tt-rss api status {status}: {content}"
        )));
    }
    Ok(envelope.get("content").cloned().unwrap_or(Value::Null))
}

/// Logged-in tt-rss API session serving the user's starred articles.
///
/// The feed is bounded and non-cursor: the first page holds up to
/// `page_size` starred headlines, any subsequent cursor position reports an
/// empty page to signal exhaustion.
pub struct TtrssSession {
    http: reqwest::Client,
    api_url: String,
    session_id: String,
    page_size: u32,
}

impl TtrssSession {
    /// Log in and return a ready session.
    pub async fn login(
        base_url: &str,
        username: &str,
        password: &str,
        page_size: u32,
    ) -> Result<Self> {
        let api_url = format!("{}/api/", base_url.trim_end_matches('/'));
        let http = reqwest::Client::new();

        let content = api_call(
            &http,
            &api_url,
            json!({ "op": "login", "user": username, "password": password }),
        )
        .await
        .context("tt-rss login failed")?;
        let session_id = content
            .get("session_id")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("tt-rss login response carried no session_id"))?
            .to_string();

        info!(base_url = %base_url, username = %username, "Logged into tt-rss");
        Ok(TtrssSession {
            http,
            api_url,
            session_id,
            page_size,
        })
    }
}

#[async_trait]
impl SavedItemSource for TtrssSession {
    async fn fetch_page<'a>(&self, cursor: Option<&'a str>) -> Result<Page, SourceFetchError> {
        if cursor.is_some() {
            // Single bounded batch: anything past the first page is empty.
            return Ok(Page::default());
        }

        let content = api_call(
            &self.http,
            &self.api_url,
            json!({
                "sid": self.session_id,
                "op": "getHeadlines",
                "feed_id": STARRED_FEED_ID,
                "limit": self.page_size,
                "show_excerpt": false,
            }),
        )
        .await?;
        let headlines: Vec<Headline> =
            serde_json::from_value(content).map_err(SourceFetchError::transport)?;

        let page = Page {
            items: headlines
                .into_iter()
                .map(|headline| SavedItem {
                    source_id: headline.id.to_string(),
                    url: headline.link,
                    title: headline.title,
                    tags: vec![],
                })
                .collect(),
        };
        info!(items = page.items.len(), "Fetched tt-rss starred headlines");
        Ok(page)
    }

    async fn acknowledge(&self, source_id: &str) -> Result<bool, SourceFetchError> {
        let content = api_call(
            &self.http,
            &self.api_url,
            json!({
                "sid": self.session_id,
                "op": "updateArticle",
                "article_ids": source_id,
                "mode": MODE_CLEAR,
                "field": FIELD_STARRED,
            }),
        )
        .await?;
        let updated = content.get("updated").and_then(Value::as_i64).unwrap_or(0);
        Ok(updated > 0)
    }
}
