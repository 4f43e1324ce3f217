//! `load_config` module: loads the static YAML settings file and injects
//! environment variables for secrets.
//!
//! This is the only place where untrusted YAML is parsed and mapped to
//! strongly-typed internal structs. Credentials never live in the settings
//! file; they are read from the environment (see [`env_keys`]) so a settings
//! file can be committed or shared safely.
//!
//! # Errors
//! Any failure here is a [`ConfigError`]: fatal at startup, surfaced through
//! the CLI boundary before any source is drained.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use readinglist_core::tags::TagRule;
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

/// Environment variable names for all credentials and secrets.
pub mod env_keys {
    pub const REDDIT_CLIENT_ID: &str = "REDDIT_CLIENT_ID";
    pub const REDDIT_CLIENT_SECRET: &str = "REDDIT_CLIENT_SECRET";
    pub const REDDIT_USERNAME: &str = "REDDIT_USERNAME";
    pub const REDDIT_PASSWORD: &str = "REDDIT_PASSWORD";
    pub const REDDIT_USER_AGENT: &str = "REDDIT_USER_AGENT";
    pub const TTRSS_URL: &str = "TTRSS_URL";
    pub const TTRSS_USERNAME: &str = "TTRSS_USERNAME";
    pub const TTRSS_PASSWORD: &str = "TTRSS_PASSWORD";
    pub const GITHUB_TOKEN: &str = "GITHUB_TOKEN";
    pub const WALLABAG_URL: &str = "WALLABAG_URL";
    pub const WALLABAG_CLIENT_ID: &str = "WALLABAG_CLIENT_ID";
    pub const WALLABAG_CLIENT_SECRET: &str = "WALLABAG_CLIENT_SECRET";
    pub const WALLABAG_USERNAME: &str = "WALLABAG_USERNAME";
    pub const WALLABAG_PASSWORD: &str = "WALLABAG_PASSWORD";
}

/// Malformed configuration. Fatal at startup, before any source is drained.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path:?}: {source}")]
    Read {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("duplicate tag name in settings: {0:?}")]
    DuplicateTag(String),
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),
}

fn default_code_host() -> String {
    "github.com".to_string()
}

fn default_page_size() -> u32 {
    100
}

/// The static settings file: tag rules plus non-secret run options.
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Host whose two-segment URLs are treated as repositories.
    #[serde(default = "default_code_host")]
    pub code_host: String,
    /// Declarative tag rules, in declaration order.
    #[serde(default)]
    pub tags: Vec<TagRule>,
    /// Items requested per upstream page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Optional safety cap on pages fetched per source.
    #[serde(default)]
    pub max_pages: Option<u32>,
}

/// Loads and validates the settings file.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading settings from file");

    let content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Settings file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read settings file");
            return Err(ConfigError::Read {
                path: path_ref.to_path_buf(),
                source: e,
            });
        }
    };

    let settings: Settings = match serde_yaml::from_str(&content) {
        Ok(settings) => {
            info!(config_path = ?path_ref, "Parsed settings YAML successfully");
            settings
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse settings YAML");
            return Err(ConfigError::Parse(e));
        }
    };

    // A tag name must be unique within the configuration.
    let mut seen = HashSet::new();
    for rule in &settings.tags {
        if !seen.insert(rule.tag.as_str()) {
            error!(tag = %rule.tag, "Duplicate tag name in settings");
            return Err(ConfigError::DuplicateTag(rule.tag.clone()));
        }
    }

    info!(
        code_host = %settings.code_host,
        tag_rules = settings.tags.len(),
        page_size = settings.page_size,
        "Settings loaded"
    );
    Ok(settings)
}

/// Read a required secret from the environment.
pub fn require_env(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnv(name))
}

/// Read an optional value from the environment with a fallback.
pub fn env_or(name: &str, fallback: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| fallback.to_string())
}
