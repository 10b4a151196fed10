//! ObjectStore trait for remote object operations
//!
//! This crate is independent of any specific storage SDK; concrete clients
//! (see `coldstore-s3`) implement this trait, and tests substitute fakes.

use async_trait::async_trait;
use tokio::fs::File;

use crate::error::Result;
use crate::path::RemotePath;

/// The two remote operations a backup session issues
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stream `len` bytes from the open file to the remote object at `path`,
    /// creating it only if absent.
    ///
    /// An object already present at `path` must fail the call with
    /// [`Error::Conflict`](crate::Error::Conflict), never be overwritten.
    /// The file handle is consumed and dropped when the call resolves, even
    /// if the surrounding future is cancelled.
    async fn create_object(&self, path: &RemotePath, body: File, len: u64) -> Result<()>;

    /// Delete the remote object at `path` by exact key match.
    ///
    /// Deleting an object that does not exist is an error at this layer.
    async fn delete_object(&self, path: &RemotePath) -> Result<()>;
}
