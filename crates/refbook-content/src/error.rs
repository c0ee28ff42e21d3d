//! Error types for content loading.

use std::path::PathBuf;

use crate::frontmatter::FrontmatterError;

/// Errors that can occur while loading content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Content directory not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {message}")]
    InvalidJson { path: PathBuf, message: String },

    #[error("Frontmatter error in {path}: {source}")]
    Frontmatter {
        path: PathBuf,
        source: FrontmatterError,
    },

    #[error("Invalid content in {path}: {message}")]
    Schema { path: PathBuf, message: String },
}

impl ContentError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn schema(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            message: message.into(),
        }
    }
}
