//! # quire-site
//!
//! Turns crawled posts into what the prerender harness consumes:
//! - [`SiteConfig`]: `quire.toml` settings
//! - [`Page`]: one descriptor per route (listings and posts)
//! - [`summary`]: post listings as JSON, table or markdown

pub mod config;
pub mod error;
pub mod pages;
pub mod summary;

pub use config::SiteConfig;
pub use error::SiteError;
pub use pages::{build, dangling_series_links, prerender_pages, Page};
pub use summary::{format_summary, OutputFormat, PostSummary};
