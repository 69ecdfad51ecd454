//! Fetch and extraction error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("download of {url} failed ({status}): {message}")]
    Status {
        url: String,
        status: u16,
        message: String,
    },

    /// The URL cannot be parsed or has no file name.
    #[error("invalid archive URL: {0}")]
    InvalidUrl(String),

    /// The archive is corrupt or could not be written out.
    #[error("failed to extract {}: {source}", archive.display())]
    Extract {
        archive: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extraction finished but the expected dataset directory is absent.
    #[error("archive did not contain dataset directory {}", .0.display())]
    MissingDataset(PathBuf),

    /// A path cannot be used as an archive root.
    #[error("invalid dataset path: {}", .0.display())]
    InvalidPath(PathBuf),

    /// Local filesystem error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A blocking extraction task panicked or was cancelled.
    #[error("extraction task failed: {0}")]
    Task(String),
}
