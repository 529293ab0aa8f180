//! Site configuration, read from `quire.toml`.
//!
//! ```toml
//! content_dir = "content/blog"
//! blog_prefix = "/blogs"
//! listing_routes = ["/", "/blogs"]
//! words_per_minute = 200
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use quire_content::CrawlOptions;
use quire_core::DEFAULT_WORDS_PER_MINUTE;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SiteError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory holding the markdown posts, relative to the working directory.
    pub content_dir: PathBuf,
    /// Route prefix for post pages.
    pub blog_prefix: String,
    /// Routes that list every post.
    pub listing_routes: Vec<String>,
    pub words_per_minute: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content/blog"),
            blog_prefix: "/blogs".to_string(),
            listing_routes: vec!["/".to_string(), "/blogs".to_string()],
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

impl SiteConfig {
    pub const FILE_NAME: &'static str = "quire.toml";

    /// Parse and check a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Config`] on malformed TOML, unknown keys, a zero
    /// reading speed, or routes that do not start with `/`.
    pub fn from_toml(text: &str) -> Result<Self, SiteError> {
        let config: Self = toml::from_str(text).map_err(|e| SiteError::Config(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// Load the config file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::ConfigIo`] if the file cannot be read, otherwise
    /// see [`SiteConfig::from_toml`].
    pub fn load(path: &Path) -> Result<Self, SiteError> {
        let text = fs::read_to_string(path).map_err(|source| SiteError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded site config");
        Self::from_toml(&text)
    }

    /// Load `dir/quire.toml` if it exists, else fall back to defaults.
    ///
    /// # Errors
    ///
    /// See [`SiteConfig::load`].
    pub fn load_or_default(dir: &Path) -> Result<Self, SiteError> {
        let path = dir.join(Self::FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    #[must_use]
    pub fn crawl_options(&self) -> CrawlOptions {
        CrawlOptions {
            blog_prefix: self.blog_prefix.clone(),
            words_per_minute: self.words_per_minute,
        }
    }

    fn check(&self) -> Result<(), SiteError> {
        if self.words_per_minute == 0 {
            return Err(SiteError::Config(
                "words_per_minute must be greater than zero".to_string(),
            ));
        }
        let mut routes = std::iter::once(&self.blog_prefix).chain(&self.listing_routes);
        if let Some(route) = routes.find(|r| !r.starts_with('/')) {
            return Err(SiteError::Config(format!(
                "route '{route}' must start with '/'"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(SiteConfig::from_toml("").unwrap(), SiteConfig::default());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = SiteConfig::from_toml("blog_prefix = \"/posts\"\nwords_per_minute = 250\n")
            .unwrap();
        assert_eq!(config.blog_prefix, "/posts");
        assert_eq!(config.words_per_minute, 250);
        assert_eq!(config.content_dir, PathBuf::from("content/blog"));
        assert_eq!(config.listing_routes, vec!["/", "/blogs"]);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = SiteConfig::from_toml("blog_prefx = \"/posts\"\n").unwrap_err();
        assert!(err.to_string().contains("blog_prefx"), "{err}");
    }

    #[test]
    fn rejects_zero_reading_speed() {
        assert!(SiteConfig::from_toml("words_per_minute = 0\n").is_err());
    }

    #[test]
    fn rejects_relative_routes() {
        let err = SiteConfig::from_toml("listing_routes = [\"/\", \"blogs\"]\n").unwrap_err();
        assert!(err.to_string().contains("'blogs'"));
    }

    #[test]
    fn load_or_default_reads_file_when_present() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            SiteConfig::load_or_default(dir.path()).unwrap(),
            SiteConfig::default()
        );

        fs::write(
            dir.path().join(SiteConfig::FILE_NAME),
            "content_dir = \"posts\"\n",
        )
        .unwrap();
        let config = SiteConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.content_dir, PathBuf::from("posts"));
    }

    #[test]
    fn crawl_options_follow_config() {
        let config = SiteConfig {
            blog_prefix: "/notes".to_string(),
            words_per_minute: 120,
            ..SiteConfig::default()
        };
        let options = config.crawl_options();
        assert_eq!(options.blog_prefix, "/notes");
        assert_eq!(options.words_per_minute, 120);
    }
}
