//! Error types for transfer operations
//!
//! Every variant carries the path or remote key it concerns so callers can
//! log the error verbatim without reconstructing context.

use std::path::PathBuf;
use std::time::Duration;

/// Result type alias used throughout coldstore
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by session setup, upload, and delete
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid backend configuration (missing bucket, bad timeout, ...)
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Credential material could not be decoded or was rejected at session open
    #[error("authentication failed: {0}")]
    Auth(String),

    /// A local chunk file could not be opened or stat'ed
    #[error("failed to read local file {path:?}: {source}")]
    LocalIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A chunk transfer exceeded the configured upload timeout
    #[error("upload of {key:?} timed out after {limit:?}")]
    Timeout { key: String, limit: Duration },

    /// A chunk transfer failed while streaming or finalizing the remote write
    #[error("upload of {key:?} failed: {reason}")]
    Transfer { key: String, reason: String },

    /// The remote object already exists and the write was create-only
    ///
    /// Whether this means "already uploaded, carry on" or a genuine collision
    /// is the caller's call.
    #[error("remote object {key:?} already exists")]
    Conflict { key: String },

    /// A remote delete failed, including deletes of objects that do not exist
    #[error("failed to delete remote object {name:?}: {reason}")]
    Remote { name: String, reason: String },
}

impl Error {
    /// True for the create-only collision raised when the remote object
    /// already exists.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict { .. })
    }
}
