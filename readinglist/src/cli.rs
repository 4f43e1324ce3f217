//! # readinglist CLI interface
//!
//! Command parsing and the glue that turns settings plus environment
//! credentials into live sessions for the routing core. All business logic
//! (classification, routing, pagination) lives in the `readinglist-core`
//! crate; this module is strictly CLI glue and orchestration.
//!
//! ## How to use
//! - For command-line users: run the installed `readinglist` binary with
//!   `--help`.
//! - For programmatic/integration use: call [`run`] with a constructed
//!   [`Cli`].
//!
//! Credentials are read from the environment (see
//! [`crate::load_config::env_keys`]); the settings file holds only tag rules
//! and run options.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use readinglist_core::classify::Classifier;
use readinglist_core::drain::DrainOptions;
use readinglist_core::route::Router;
use readinglist_core::synchronise::{synchronise, NamedSource, RouteHandler};
use readinglist_core::tags::TagIndex;

use crate::clients::{
    GithubSession, RedditCredentials, RedditSession, TtrssSession, WallabagCredentials,
    WallabagSession,
};
use crate::load_config::{env_keys, env_or, load_settings, require_env};

/// CLI for readinglist: route saved links to stars and bookmarks.
#[derive(Parser)]
#[clap(
    name = "readinglist",
    version,
    about = "Route saved reddit and tt-rss links to GitHub stars and wallabag bookmarks"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Drain all configured sources, routing each saved item to its sink
    Sync {
        /// Path to the YAML settings file
        /// (conventionally ~/.config/readinglist/settings.yaml)
        #[clap(long)]
        config: PathBuf,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Sync { config } => sync(config).await,
    }
}

async fn sync(config_path: PathBuf) -> Result<()> {
    let settings = load_settings(&config_path)?;
    let index = Arc::new(TagIndex::build(&settings.tags));
    let classifier = Classifier::new(settings.code_host.clone());

    // Sinks. Sessions are constructed (and logged in) here; the core never
    // touches authentication.
    let github = GithubSession::new(require_env(env_keys::GITHUB_TOKEN)?)?;
    let wallabag = WallabagSession::login(
        &require_env(env_keys::WALLABAG_URL)?,
        WallabagCredentials {
            client_id: require_env(env_keys::WALLABAG_CLIENT_ID)?,
            client_secret: require_env(env_keys::WALLABAG_CLIENT_SECRET)?,
            username: require_env(env_keys::WALLABAG_USERNAME)?,
            password: require_env(env_keys::WALLABAG_PASSWORD)?,
        },
    )
    .await?;
    let handler = RouteHandler::new(&classifier, &index, Router::new(&github, &wallabag));

    // Sources, drained in configuration order: reddit first, then tt-rss.
    let reddit = RedditSession::login(
        RedditCredentials {
            client_id: require_env(env_keys::REDDIT_CLIENT_ID)?,
            client_secret: require_env(env_keys::REDDIT_CLIENT_SECRET)?,
            username: require_env(env_keys::REDDIT_USERNAME)?,
            password: require_env(env_keys::REDDIT_PASSWORD)?,
            user_agent: env_or(env_keys::REDDIT_USER_AGENT, "readinglist (by /u/unknown)"),
        },
        settings.page_size,
        Arc::clone(&index),
    )
    .await?;
    let ttrss = TtrssSession::login(
        &require_env(env_keys::TTRSS_URL)?,
        &require_env(env_keys::TTRSS_USERNAME)?,
        &require_env(env_keys::TTRSS_PASSWORD)?,
        settings.page_size,
    )
    .await?;

    let sources = [
        NamedSource {
            name: "reddit",
            source: &reddit,
        },
        NamedSource {
            name: "ttrss",
            source: &ttrss,
        },
    ];
    let options = DrainOptions {
        max_pages: settings.max_pages,
    };

    let report = synchronise(&sources, &handler, &options).await;
    for source in &report.sources {
        match &source.drain {
            Ok(drained) => info!(
                source = %source.name,
                acknowledged = drained.acknowledged,
                skipped = drained.skipped,
                "Source summary"
            ),
            Err(e) => info!(source = %source.name, error = %e, "Source failed"),
        }
    }

    if report.all_failed() {
        bail!("every configured source failed to drain");
    }
    Ok(())
}
