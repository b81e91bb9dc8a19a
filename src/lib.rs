//! Nexus Feed - A single-page RSS reader
//!
//! This crate serves one HTML page built per request from a remote RSS feed.
//! Each request fetches the feed, normalizes its items into article records
//! and renders them with inline client-side search and theming.

pub mod config;
pub mod error;
pub mod feed;
pub mod fetcher;
pub mod routes;
