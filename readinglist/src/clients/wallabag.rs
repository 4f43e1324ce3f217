//! Wallabag bookmark sink: OAuth password-grant session and entry creation.

use anyhow::{Context, Result};
use async_trait::async_trait;
use readinglist_core::contract::{Bookmarks, NewBookmark};
use readinglist_core::error::SinkError;
use serde::Deserialize;
use tracing::info;

/// Credentials for the wallabag password grant.
pub struct WallabagCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Logged-in wallabag API session.
pub struct WallabagSession {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl WallabagSession {
    /// Perform the OAuth password grant and return a ready session.
    pub async fn login(base_url: &str, credentials: WallabagCredentials) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let http = reqwest::Client::new();

        let token: TokenResponse = http
            .post(format!("{base_url}/oauth/v2/token"))
            .form(&[
                ("grant_type", "password"),
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await
            .context("wallabag token request failed")?
            .error_for_status()
            .context("wallabag rejected the token request")?
            .json()
            .await
            .context("wallabag token response was not valid JSON")?;

        info!(base_url = %base_url, username = %credentials.username, "Logged into wallabag");
        Ok(WallabagSession {
            http,
            base_url,
            access_token: token.access_token,
        })
    }
}

#[async_trait]
impl Bookmarks for WallabagSession {
    async fn create<'a>(&self, req: NewBookmark<'a>) -> Result<bool, SinkError> {
        let payload = serde_json::json!({
            "url": req.url,
            "title": req.title,
            "tags": req.tags.join(","),
            "archive": if req.mark_unread { 0 } else { 1 },
        });

        let resp = self
            .http
            .post(format!("{}/api/entries.json", self.base_url))
            .bearer_auth(&self.access_token)
            .json(&payload)
            .send()
            .await
            .map_err(SinkError::transport)?;

        if resp.status().is_success() {
            info!(url = %req.url, "Created wallabag entry");
            Ok(true)
        } else {
            Err(SinkError::Rejected(format!(
                "wallabag entry creation returned {}",
                resp.status()
            )))
        }
    }
}
