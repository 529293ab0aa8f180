//! Errors raised while reading the content directory.

use std::path::PathBuf;

use quire_core::{QuireError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content root {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to walk {}: {source}", root.display())]
    Walk {
        root: PathBuf,
        source: walkdir::Error,
    },

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Frontmatter { path: PathBuf, source: QuireError },

    #[error("{}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },

    #[error("watch error: {0}")]
    Watch(String),
}

impl ContentError {
    /// The validator's report, if this is a schema failure.
    #[must_use]
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Invalid { source, .. } => Some(source),
            _ => None,
        }
    }
}
