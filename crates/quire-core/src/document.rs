//! Post type: a validated, enriched markdown document.

use serde::Serialize;

use crate::reading::ReadingStats;
use crate::schema::ValidatedFrontmatter;

/// Validated frontmatter plus the fields derived from the post itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedFrontmatter {
    #[serde(flatten)]
    pub frontmatter: ValidatedFrontmatter,

    /// Estimated minutes to read the body, at least 1.
    pub reading_time: u32,
    pub words: usize,

    /// Display title. Mirrors `title` today, exposed separately so pages
    /// never depend on the raw field.
    pub blog_title: String,

    /// Route of the post page, e.g. `/blogs/hello-world`.
    pub url: String,
}

impl EnrichedFrontmatter {
    #[must_use]
    pub fn new(frontmatter: ValidatedFrontmatter, stats: ReadingStats, url: String) -> Self {
        let blog_title = frontmatter.title.as_str().to_string();
        Self {
            frontmatter,
            reading_time: stats.minutes,
            words: stats.words,
            blog_title,
            url,
        }
    }
}

/// A post ready for the site: identity, source body and enriched metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Stable identifier derived from the file path, e.g. `2020/hello-world`.
    pub id: String,

    /// Source path relative to the content root.
    pub path: String,

    /// Markdown body below the frontmatter block.
    pub contents: String,

    #[serde(flatten)]
    pub meta: EnrichedFrontmatter,
}

impl Post {
    #[must_use]
    pub fn url(&self) -> &str {
        &self.meta.url
    }

    #[must_use]
    pub fn frontmatter(&self) -> &ValidatedFrontmatter {
        &self.meta.frontmatter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::RawFrontmatter;
    use crate::schema::FrontmatterGate;

    fn sample() -> Post {
        let raw = RawFrontmatter::from_yaml(
            "title: Hello\nsubtitle: World\ndate: 2020-03-14\ntags: [a]\nauthor: Nathan\n",
        )
        .unwrap();
        let fm = FrontmatterGate::validate(&raw).unwrap();
        Post {
            id: "hello".to_string(),
            path: "hello.md".to_string(),
            contents: "Body".to_string(),
            meta: EnrichedFrontmatter::new(
                fm,
                ReadingStats {
                    words: 1,
                    minutes: 1,
                },
                "/blogs/hello".to_string(),
            ),
        }
    }

    #[test]
    fn blog_title_mirrors_title() {
        let post = sample();
        assert_eq!(post.meta.blog_title, "Hello");
        assert_eq!(post.url(), "/blogs/hello");
    }

    #[test]
    fn post_serializes_flat_with_camel_case_derived_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], "hello");
        assert_eq!(json["contents"], "Body");
        assert_eq!(json["title"], "Hello");
        assert_eq!(json["author"], "Nathan");
        assert_eq!(json["blogTitle"], "Hello");
        assert_eq!(json["readingTime"], 1);
        assert_eq!(json["words"], 1);
        assert_eq!(json["url"], "/blogs/hello");
        assert!(json.get("frontmatter").is_none());
        assert!(json.get("meta").is_none());
    }
}
