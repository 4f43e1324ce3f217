//! Network adapters implementing the core capability traits.
//!
//! Each client is an explicit session object: construction performs any
//! login and fails fast, so the routing core never manages authentication
//! lifecycle. Transport and protocol details stay inside each module; the
//! core only sees the `contract` traits.

pub mod github;
pub mod reddit;
pub mod ttrss;
pub mod wallabag;

pub use github::GithubSession;
pub use reddit::{RedditCredentials, RedditSession};
pub use ttrss::TtrssSession;
pub use wallabag::{WallabagCredentials, WallabagSession};
