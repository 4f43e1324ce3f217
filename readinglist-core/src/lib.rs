#![doc = "readinglist-core: core classification and routing logic for readinglist."]

//! This crate contains all business logic for routing saved links: the tag
//! index, the URL classifier, the sink router and the pagination loop that
//! drains upstream sources. Network clients for the concrete feeds and sinks
//! live in the CLI crate and implement the capability traits in [`contract`].
//!
//! # Usage
//! Construct a [`tags::TagIndex`] from configuration, a [`classify::Classifier`]
//! for the configured code host, wire the sink capabilities into a
//! [`route::Router`], and hand everything to [`synchronise::synchronise`].

pub mod classify;
pub mod contract;
pub mod drain;
pub mod error;
pub mod route;
pub mod synchronise;
pub mod tags;
