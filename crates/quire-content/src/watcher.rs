//! File system watcher that triggers full rebuilds on content changes.
//!
//! Uses the `notify` crate for cross-platform file system events
//! (FSEvents on macOS, inotify on Linux, ReadDirectoryChanges on Windows).

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::discover::is_markdown;
use crate::error::ContentError;

/// Events emitted by the content watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentEvent {
    /// A markdown file was created or modified.
    Changed(PathBuf),
    /// A markdown file was deleted.
    Removed(PathBuf),
}

impl ContentEvent {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Changed(path) | Self::Removed(path) => path,
        }
    }
}

/// Watches the content directory for markdown changes.
pub struct ContentWatcher {
    _watcher: RecommendedWatcher,
    receiver: mpsc::Receiver<ContentEvent>,
}

impl ContentWatcher {
    /// Start watching `root` recursively.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Watch`] if the watcher cannot be created.
    pub fn start(root: &Path) -> Result<Self, ContentError> {
        let (tx, rx) = mpsc::channel();
        let root_owned = root.to_path_buf();

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            let Ok(event) = res else { return };
            for path in &event.paths {
                if !is_markdown(path) || is_hidden(&root_owned, path) {
                    continue;
                }
                let content_event = match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) => {
                        ContentEvent::Changed(path.clone())
                    }
                    EventKind::Remove(_) => ContentEvent::Removed(path.clone()),
                    _ => continue,
                };
                let _ = tx.send(content_event);
            }
        })
        .map_err(|e| ContentError::Watch(e.to_string()))?;

        watcher
            .watch(root, RecursiveMode::Recursive)
            .map_err(|e| ContentError::Watch(e.to_string()))?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
        })
    }

    /// Wait up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ContentEvent> {
        self.receiver.recv_timeout(timeout).ok()
    }

    /// Drain every event already queued, without blocking.
    pub fn drain(&self) -> Vec<ContentEvent> {
        self.receiver.try_iter().collect()
    }
}

/// Any component below the root starting with `.` hides the path.
fn is_hidden(root: &Path, path: &Path) -> bool {
    path.strip_prefix(root).ok().is_some_and(|rel| {
        rel.iter()
            .filter_map(|c| c.to_str())
            .any(|s| s.starts_with('.'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn watcher_detects_new_post() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("2020")).unwrap();

        let watcher = ContentWatcher::start(root).unwrap();

        let file = root.join("2020").join("new-post.md");
        fs::write(&file, "# New\nContent").unwrap();

        let event = watcher.recv_timeout(Duration::from_secs(2));
        assert!(event.is_some(), "Expected watcher to detect new post");
        match event.unwrap() {
            ContentEvent::Changed(path) => {
                assert!(path.to_string_lossy().contains("new-post.md"));
            }
            other => panic!("Expected Changed event, got {other:?}"),
        }
    }

    #[test]
    fn watcher_detects_deletion() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let file = root.join("to-delete.md");
        fs::write(&file, "# Delete Me").unwrap();

        let watcher = ContentWatcher::start(root).unwrap();

        std::thread::sleep(Duration::from_millis(100));
        fs::remove_file(&file).unwrap();

        // FSEvents may report a change before the removal.
        let mut found_removed = false;
        for _ in 0..10 {
            match watcher.recv_timeout(Duration::from_secs(2)) {
                Some(ContentEvent::Removed(path)) => {
                    assert!(path.to_string_lossy().contains("to-delete.md"));
                    found_removed = true;
                    break;
                }
                Some(ContentEvent::Changed(_)) => continue,
                None => break,
            }
        }
        assert!(found_removed, "Expected watcher to emit Removed event");
    }

    #[test]
    fn watcher_ignores_non_markdown_and_hidden() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join(".drafts")).unwrap();

        let watcher = ContentWatcher::start(root).unwrap();

        fs::write(root.join("cover.png"), "png").unwrap();
        fs::write(root.join(".drafts").join("draft.md"), "# Draft").unwrap();

        let event = watcher.recv_timeout(Duration::from_millis(500));
        assert!(event.is_none(), "Watcher should ignore {event:?}");
    }

    #[test]
    fn watches_every_discoverable_extension() {
        for ext in crate::discover::MARKDOWN_EXTENSIONS {
            assert!(is_markdown(&Path::new("post").with_extension(ext)), "{ext}");
        }
        assert!(!is_markdown(Path::new("notes.txt")));
        assert!(!is_markdown(Path::new("README")));
    }

    #[test]
    fn hidden_check_is_relative_to_root() {
        let root = Path::new("/tmp/.tmpXYZ");
        assert!(!is_hidden(root, &root.join("post.md")));
        assert!(is_hidden(root, &root.join(".drafts/post.md")));
    }
}
