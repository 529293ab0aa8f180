//! # quire-content
//!
//! Reads the content directory and turns it into posts.
//!
//! The content directory is the only source of truth. Every build walks it
//! from scratch, validates each post's frontmatter and derives the metadata
//! the site needs. A single invalid post fails the whole build.

pub mod crawl;
pub mod discover;
pub mod error;
pub mod watcher;

pub use crawl::{build_post, crawl, post_url, sort_posts, CrawlOptions};
pub use discover::{discover, SourceFile};
pub use error::ContentError;
pub use watcher::{ContentEvent, ContentWatcher};
