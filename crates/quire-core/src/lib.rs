//! # quire-core
//!
//! Core types and the frontmatter schema for quire.
//!
//! This crate defines the foundational types used across all other quire crates:
//! - [`RawFrontmatter`]: untyped metadata decoded from a markdown file
//! - [`FrontmatterGate`]: validates raw metadata into [`ValidatedFrontmatter`]
//! - [`Post`] and [`EnrichedFrontmatter`]: the enriched records handed to the site
//! - Reading statistics ([`ReadingStats`], [`reading_stats`])
//! - Error hierarchy ([`QuireError`], [`SchemaError`], [`ValidationError`])
//! - Frontmatter splitting ([`frontmatter`])

pub mod document;
pub mod error;
pub mod frontmatter;
pub mod reading;
pub mod schema;

pub use document::{EnrichedFrontmatter, Post};
pub use error::{QuireError, Result, SchemaError, ValidationError};
pub use frontmatter::RawFrontmatter;
pub use reading::{reading_stats, ReadingStats, DEFAULT_WORDS_PER_MINUTE};
pub use schema::{FrontmatterGate, PartNumber, Series, Title, ValidatedFrontmatter};
