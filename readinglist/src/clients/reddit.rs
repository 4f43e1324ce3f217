//! Reddit saved-links feed: OAuth password-grant session, cursor-paginated
//! listing of saved submissions, and unsave acknowledgment.
//!
//! Items arrive pre-tagged: the session maps each submission's subreddit to
//! tags through the shared [`TagIndex`], so the classifier's source-tag
//! precedence applies downstream.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use readinglist_core::contract::{Page, SavedItem, SavedItemSource};
use readinglist_core::error::SourceFetchError;
use readinglist_core::tags::TagIndex;
use serde::Deserialize;
use tracing::info;

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const DEFAULT_API_BASE: &str = "https://oauth.reddit.com";

/// Credentials for the reddit script-app password grant.
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
    pub user_agent: String,
}

#[derive(Debug, Deserialize)]
struct AccessToken {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Thing>,
}

#[derive(Debug, Deserialize)]
struct Thing {
    kind: String,
    data: ThingData,
}

#[derive(Debug, Deserialize)]
struct ThingData {
    name: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    subreddit: String,
}

/// Map a saved listing to items, keeping only submissions (kind `t3`) and
/// tagging each by its subreddit.
fn listing_to_items(listing: Listing, index: &TagIndex) -> Vec<SavedItem> {
    listing
        .data
        .children
        .into_iter()
        .filter(|thing| thing.kind == "t3")
        .map(|thing| SavedItem {
            tags: index.tags_for_subreddit(&thing.data.subreddit).to_vec(),
            source_id: thing.data.name,
            url: thing.data.url,
            title: thing.data.title,
        })
        .collect()
}

/// Logged-in reddit API session serving the user's saved links.
pub struct RedditSession {
    http: reqwest::Client,
    api_base: String,
    token: String,
    username: String,
    page_size: u32,
    tag_index: Arc<TagIndex>,
}

impl RedditSession {
    /// Perform the password grant and return a ready session.
    pub async fn login(
        credentials: RedditCredentials,
        page_size: u32,
        tag_index: Arc<TagIndex>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(credentials.user_agent.clone())
            .build()?;

        let token: AccessToken = http
            .post(TOKEN_URL)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[
                ("grant_type", "password"),
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await
            .context("reddit token request failed")?
            .error_for_status()
            .context("reddit rejected the token request")?
            .json()
            .await
            .context("reddit token response was not valid JSON")?;

        info!(username = %credentials.username, "Logged into reddit");
        Ok(RedditSession {
            http,
            api_base: DEFAULT_API_BASE.to_string(),
            token: token.access_token,
            username: credentials.username,
            page_size,
            tag_index,
        })
    }
}

#[async_trait]
impl SavedItemSource for RedditSession {
    async fn fetch_page<'a>(&self, cursor: Option<&'a str>) -> Result<Page, SourceFetchError> {
        let url = format!("{}/user/{}/saved", self.api_base, self.username);
        let mut request = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[("type", "links")])
            .query(&[("limit", self.page_size)]);
        if let Some(after) = cursor {
            request = request.query(&[("after", after)]);
        }

        let resp = request.send().await.map_err(SourceFetchError::transport)?;
        if !resp.status().is_success() {
            return Err(SourceFetchError::Protocol(format!(
                "reddit saved listing returned {}",
                resp.status()
            )));
        }
        let listing: Listing = resp.json().await.map_err(SourceFetchError::transport)?;

        let page = Page {
            items: listing_to_items(listing, &self.tag_index),
        };
        info!(items = page.items.len(), cursor = ?cursor, "Fetched reddit saved page");
        Ok(page)
    }

    async fn acknowledge(&self, source_id: &str) -> Result<bool, SourceFetchError> {
        let resp = self
            .http
            .post(format!("{}/api/unsave", self.api_base))
            .bearer_auth(&self.token)
            .form(&[("id", source_id)])
            .send()
            .await
            .map_err(SourceFetchError::transport)?;
        Ok(resp.status().is_success())
    }
}
