//! Page descriptors handed to the prerender harness.
//!
//! Listing routes get `{ url, blogs }` with every post; each post gets
//! `{ url, data }`. Listings come first, then posts in date order.

use std::collections::HashSet;

use quire_content::crawl;
use quire_core::Post;
use serde::Serialize;
use tracing::info;

use crate::config::SiteConfig;
use crate::error::SiteError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Page<'a> {
    Listing { url: String, blogs: &'a [Post] },
    Post { url: String, data: &'a Post },
}

impl Page<'_> {
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Listing { url, .. } | Self::Post { url, .. } => url,
        }
    }
}

/// Crawl the configured content directory.
///
/// # Errors
///
/// Propagates the first content failure; see [`quire_content::crawl`].
pub fn build(config: &SiteConfig) -> Result<Vec<Post>, SiteError> {
    Ok(crawl(&config.content_dir, &config.crawl_options())?)
}

/// Describe every page of the site. `posts` must already be sorted.
#[must_use]
pub fn prerender_pages<'a>(posts: &'a [Post], config: &SiteConfig) -> Vec<Page<'a>> {
    let listings = config.listing_routes.iter().map(|url| Page::Listing {
        url: url.clone(),
        blogs: posts,
    });
    let entries = posts.iter().map(|post| Page::Post {
        url: post.url().to_string(),
        data: post,
    });
    let pages: Vec<Page<'a>> = listings.chain(entries).collect();
    info!(pages = pages.len(), "prerender pages");
    pages
}

/// Series `prev`/`next` links that name no known post, as `(post id, target)`.
#[must_use]
pub fn dangling_series_links(posts: &[Post]) -> Vec<(String, String)> {
    let ids: HashSet<&str> = posts.iter().map(|p| p.id.as_str()).collect();
    posts
        .iter()
        .filter_map(|post| Some((post, post.frontmatter().series.as_ref()?)))
        .flat_map(|(post, series)| {
            [&series.prev, &series.next]
                .into_iter()
                .flatten()
                .filter(|target| !ids.contains(target.as_str()))
                .map(|target| (post.id.clone(), target.clone()))
                .collect::<Vec<_>>()
        })
        .collect()
}
