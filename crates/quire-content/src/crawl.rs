//! The crawl pipeline: discover → decode → validate → enrich → sort.

use std::fs;
use std::path::{Path, PathBuf};

use quire_core::frontmatter::parse_document;
use quire_core::{
    reading_stats, EnrichedFrontmatter, FrontmatterGate, Post, DEFAULT_WORDS_PER_MINUTE,
};
use tracing::{debug, info};

use crate::discover::{discover, SourceFile};
use crate::error::ContentError;

/// Knobs for deriving post metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOptions {
    /// Route prefix every post URL is joined under.
    pub blog_prefix: String,
    pub words_per_minute: u32,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            blog_prefix: "/blogs".to_string(),
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

/// Crawl `root` and return every post, most recent first.
///
/// The collection is only returned once every file has been read and
/// validated. Posts with equal dates keep their discovery order.
///
/// # Errors
///
/// Fails on the first unreadable file or invalid frontmatter; no partial
/// result is produced.
pub fn crawl(root: &Path, options: &CrawlOptions) -> Result<Vec<Post>, ContentError> {
    if !root.is_dir() {
        return Err(ContentError::NotADirectory(root.to_path_buf()));
    }

    let mut posts = discover(root)
        .map(|file| file.and_then(|file| load_post(&file, options)))
        .collect::<Result<Vec<_>, _>>()?;
    sort_posts(&mut posts);

    info!(root = %root.display(), posts = posts.len(), "crawled content");
    Ok(posts)
}

fn load_post(file: &SourceFile, options: &CrawlOptions) -> Result<Post, ContentError> {
    let content = fs::read_to_string(&file.path).map_err(|source| ContentError::Io {
        path: file.path.clone(),
        source,
    })?;
    build_post(&file.id, &file.relative, &content, options)
}

/// Turn one markdown file's text into a [`Post`].
///
/// # Errors
///
/// Returns [`ContentError::Frontmatter`] if the frontmatter block cannot be
/// decoded and [`ContentError::Invalid`] if it fails the schema.
pub fn build_post(
    id: &str,
    relative: &str,
    content: &str,
    options: &CrawlOptions,
) -> Result<Post, ContentError> {
    let path = PathBuf::from(relative);
    let (raw, body) = parse_document(content).map_err(|source| ContentError::Frontmatter {
        path: path.clone(),
        source,
    })?;
    let frontmatter =
        FrontmatterGate::validate(&raw).map_err(|source| ContentError::Invalid { path, source })?;

    let stats = reading_stats(body, options.words_per_minute);
    debug!(%id, words = stats.words, minutes = stats.minutes, "enriched post");

    Ok(Post {
        id: id.to_string(),
        path: relative.to_string(),
        contents: body.to_string(),
        meta: EnrichedFrontmatter::new(frontmatter, stats, post_url(&options.blog_prefix, id)),
    })
}

/// Join a post id under the blog prefix, percent-encoding each id segment.
#[must_use]
pub fn post_url(prefix: &str, id: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let encoded = id
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| urlencoding::encode(s).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    if prefix.is_empty() {
        format!("/{encoded}")
    } else if prefix.starts_with('/') {
        format!("{prefix}/{encoded}")
    } else {
        format!("/{prefix}/{encoded}")
    }
}

/// Sort by date, most recent first. Stable, so ties keep their order.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.frontmatter().date.cmp(&a.frontmatter().date));
}
