//! Error types for site assembly.

use std::path::PathBuf;

use quire_content::ContentError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("cannot read config {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(String),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
