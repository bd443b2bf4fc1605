//! Error types for Refgraph Core

use std::path::PathBuf;

use thiserror::Error;

use crate::limits::ValidationError;

/// Result type alias using Refgraph's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Refgraph error types
///
/// Only root-level failures escape a scan. Per-file problems are logged and
/// counted in [`crate::ScanStats`] instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Scan root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Scan root is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid asset identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
