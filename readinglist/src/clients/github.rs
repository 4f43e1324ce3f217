//! GitHub repo-star sink: `is_starred` and `star` against the REST API.

use anyhow::Result;
use async_trait::async_trait;
use readinglist_core::contract::RepoStars;
use readinglist_core::error::SinkError;
use reqwest::StatusCode;
use tracing::info;

const DEFAULT_API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("readinglist/", env!("CARGO_PKG_VERSION"));

/// Token-authenticated GitHub API session.
pub struct GithubSession {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl GithubSession {
    pub fn new(token: String) -> Result<Self> {
        Self::with_base(DEFAULT_API_BASE.to_string(), token)
    }

    /// Point the session at a non-default API base, e.g. a test server or a
    /// GitHub Enterprise instance.
    pub fn with_base(api_base: String, token: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;
        info!(api_base = %api_base, "Initialised GitHub session");
        Ok(GithubSession {
            http,
            api_base,
            token,
        })
    }

    fn star_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/user/starred/{}/{}", self.api_base, owner, repo)
    }
}

#[async_trait]
impl RepoStars for GithubSession {
    async fn is_starred(&self, owner: &str, repo: &str) -> Result<bool, SinkError> {
        let resp = self
            .http
            .get(self.star_url(owner, repo))
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .map_err(SinkError::transport)?;

        match resp.status() {
            StatusCode::NO_CONTENT => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(SinkError::Rejected(format!(
                "unexpected status {status} checking star for {owner}/{repo}"
            ))),
        }
    }

    async fn star(&self, owner: &str, repo: &str) -> Result<bool, SinkError> {
        let resp = self
            .http
            .put(self.star_url(owner, repo))
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("Content-Length", "0")
            .send()
            .await
            .map_err(SinkError::transport)?;

        if resp.status().is_success() {
            info!(owner, repo, "Starred repository");
            Ok(true)
        } else {
            Err(SinkError::Rejected(format!(
                "star for {owner}/{repo} returned {}",
                resp.status()
            )))
        }
    }
}
