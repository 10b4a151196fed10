//! Transfer session: upload and delete against one destination
//!
//! A session binds one remote client to one destination for its whole
//! lifetime. Callers wanting parallel backends create independent sessions;
//! the client handle is never shared between logical sessions.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tokio::fs::File;

use crate::config::Destination;
use crate::error::{Error, Result};
use crate::path::{RemotePath, join_key};
use crate::report::{format_duration, rate_mib_per_sec, whole_mib};
use crate::traits::ObjectStore;

/// A live backend session bound to one destination
pub struct Session {
    store: Arc<dyn ObjectStore>,
    dest: Destination,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("dest", &self.dest)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Bind an already-constructed store to a destination.
    ///
    /// Production code goes through a connector such as
    /// `coldstore_s3::connect`; tests hand in fakes here.
    pub fn new(store: Arc<dyn ObjectStore>, dest: Destination) -> Self {
        Self { store, dest }
    }

    pub fn destination(&self) -> &Destination {
        &self.dest
    }

    /// Upload every chunk of one archive, strictly in order.
    ///
    /// `chunk_keys` is the already-ordered part listing of a split archive;
    /// when empty, the archive is a single file and its base name is the one
    /// chunk key. Each chunk is resolved relative to the archive's directory,
    /// streamed to `prefix/key` with create-only semantics, and bounded by
    /// the destination timeout if one is configured.
    ///
    /// The first failing chunk aborts the call; chunks already transferred
    /// stay committed remotely. There is no internal retry.
    pub async fn upload(&self, archive_path: &Path, chunk_keys: &[String]) -> Result<()> {
        if let Some(limit) = self.dest.timeout {
            tracing::debug!(limit = ?limit, "upload timeout configured");
        }

        let single;
        let keys: &[String] = if chunk_keys.is_empty() {
            // Unsplit archive: one chunk named after the file itself,
            // e.g. 2024.01.01.00.00.00.tar.xz
            let name = archive_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            single = [name];
            &single
        } else {
            // Split archive: 2024.01.01.00.00.00/2024.01.01.00.00.00.tar.xz-000, ...
            chunk_keys
        };

        let dir = archive_path.parent().unwrap_or_else(|| Path::new(""));

        for key in keys {
            self.upload_chunk(dir, key).await?;
        }

        Ok(())
    }

    async fn upload_chunk(&self, dir: &Path, key: &str) -> Result<()> {
        let local = dir.join(key);
        let file = File::open(&local).await.map_err(|e| Error::LocalIo {
            path: local.clone(),
            source: e,
        })?;
        let len = file
            .metadata()
            .await
            .map_err(|e| Error::LocalIo {
                path: local.clone(),
                source: e,
            })?
            .len();

        let remote = RemotePath::new(&self.dest.bucket, join_key(&self.dest.prefix, key));

        let start = Instant::now();
        // The file handle moves into the transfer future and drops when it
        // resolves or is cancelled by the timeout.
        let transfer = self.store.create_object(&remote, file, len);
        match self.dest.timeout {
            Some(limit) => match tokio::time::timeout(limit, transfer).await {
                Ok(result) => result?,
                Err(_) => {
                    return Err(Error::Timeout {
                        key: remote.key.clone(),
                        limit,
                    });
                }
            },
            None => transfer.await?,
        }
        let elapsed = start.elapsed();

        tracing::info!(
            "uploaded {} ({} MiB) in {}, {:.1} MiB/s",
            remote,
            whole_mib(len),
            format_duration(elapsed),
            rate_mib_per_sec(len, elapsed),
        );

        Ok(())
    }

    /// Delete one remote object by its relative key.
    ///
    /// Keys ending in a separator are directory placeholders with nothing to
    /// remove remotely; those return success without a store call. Deleting
    /// an object that does not exist is an error, not a success — pruning
    /// callers tolerant of double-delete must filter it.
    pub async fn delete(&self, key: &str) -> Result<()> {
        if key.ends_with('/') {
            return Ok(());
        }

        let remote = RemotePath::new(&self.dest.bucket, join_key(&self.dest.prefix, key));
        self.store.delete_object(&remote).await
    }

    /// Release the client handle. Consuming `self` makes double-close
    /// unrepresentable.
    pub fn close(self) {
        drop(self.store);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockObjectStore;
    use std::io::Write as _;
    use std::time::Duration;

    fn dest(prefix: &str) -> Destination {
        Destination {
            bucket: "coldstore-test".to_string(),
            prefix: prefix.to_string(),
            timeout: Some(Duration::from_secs(300)),
        }
    }

    #[tokio::test]
    async fn test_delete_directory_placeholder_is_noop() {
        let mut store = MockObjectStore::new();
        store.expect_delete_object().times(0);

        let session = Session::new(Arc::new(store), dest("backups"));
        session.delete("2024.01.01.00.00.00/").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_resolves_name_under_prefix() {
        let mut store = MockObjectStore::new();
        store
            .expect_delete_object()
            .withf(|path| path.key == "backups/old.tar.xz")
            .times(1)
            .returning(|_| Ok(()));

        let session = Session::new(Arc::new(store), dest("backups"));
        session.delete("old.tar.xz").await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_error_surfaces() {
        let mut store = MockObjectStore::new();
        store.expect_delete_object().times(1).returning(|path| {
            Err(Error::Remote {
                name: path.to_string(),
                reason: "NoSuchKey".to_string(),
            })
        });

        let session = Session::new(Arc::new(store), dest("backups"));
        let err = session.delete("gone.tar.xz").await.unwrap_err();
        assert!(matches!(err, Error::Remote { .. }));
        assert!(err.to_string().contains("backups/gone.tar.xz"));
    }

    #[tokio::test]
    async fn test_upload_empty_chunk_list_uses_archive_base_name() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("2024.01.01.00.00.00.tar.xz");
        std::fs::File::create(&archive)
            .unwrap()
            .write_all(b"archive bytes")
            .unwrap();

        let mut store = MockObjectStore::new();
        store
            .expect_create_object()
            .withf(|path, _, len| path.key == "backups/2024.01.01.00.00.00.tar.xz" && *len == 13)
            .times(1)
            .returning(|_, _, _| Ok(()));

        let session = Session::new(Arc::new(store), dest("backups"));
        session.upload(&archive, &[]).await.unwrap();
    }

    #[tokio::test]
    async fn test_upload_missing_local_chunk_issues_no_write() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("a.tar.xz");

        let mut store = MockObjectStore::new();
        store.expect_create_object().times(0);

        let session = Session::new(Arc::new(store), dest(""));
        let err = session
            .upload(&archive, &["a.tar.xz-000".to_string()])
            .await
            .unwrap_err();

        match err {
            Error::LocalIo { path, .. } => {
                assert_eq!(path, tmp.path().join("a.tar.xz-000"));
            }
            other => panic!("expected LocalIo, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_upload_empty_prefix_uses_bare_key() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("a.tar.xz");
        std::fs::write(&archive, b"x").unwrap();

        let mut store = MockObjectStore::new();
        store
            .expect_create_object()
            .withf(|path, _, _| path.key == "a.tar.xz")
            .times(1)
            .returning(|_, _, _| Ok(()));

        let session = Session::new(Arc::new(store), dest(""));
        session.upload(&archive, &[]).await.unwrap();
    }
}
