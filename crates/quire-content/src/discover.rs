//! Markdown file discovery.

use std::path::{Path, PathBuf};

use tracing::{trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::ContentError;

pub(crate) const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// A markdown file found under the content root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the root without its extension, `/`-separated.
    pub id: String,
    /// Path relative to the root, `/`-separated.
    pub relative: String,
    pub path: PathBuf,
}

/// Lazily walk `root` for markdown files, in file-name order.
///
/// Hidden files and directories (names starting with `.`) are skipped, as
/// are paths that are not valid UTF-8.
pub fn discover(root: &Path) -> impl Iterator<Item = Result<SourceFile, ContentError>> + '_ {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
        .filter_map(move |entry| match entry {
            Ok(entry) if entry.file_type().is_file() && is_markdown(entry.path()) => {
                source_file(root, entry.path()).map(Ok)
            }
            Ok(_) => None,
            Err(source) => Some(Err(ContentError::Walk {
                root: root.to_path_buf(),
                source,
            })),
        })
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

pub(crate) fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.contains(&ext))
}

fn source_file(root: &Path, path: &Path) -> Option<SourceFile> {
    let rel = path.strip_prefix(root).ok()?;
    let Some(parts) = rel
        .iter()
        .map(|c| c.to_str())
        .collect::<Option<Vec<&str>>>()
    else {
        warn!(path = %path.display(), "skipping non UTF-8 path");
        return None;
    };

    let relative = parts.join("/");
    let stem = rel.with_extension("");
    let id = stem
        .iter()
        .filter_map(|c| c.to_str())
        .collect::<Vec<_>>()
        .join("/");

    trace!(%id, "discovered");
    Some(SourceFile {
        id,
        relative,
        path: path.to_path_buf(),
    })
}
