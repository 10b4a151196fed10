//! coldstore-s3: S3 adapter for the coldstore backup storage backend
//!
//! Provides the concrete [`ObjectStore`](coldstore_core::ObjectStore)
//! implementation over aws-sdk-s3 and [`connect`], the session opener the
//! backup cycle calls before uploading or pruning.

use std::sync::Arc;

use coldstore_core::{CredentialBundle, Result, Session, StorageConfig};

pub mod client;

pub use client::S3Client;

/// Open a transfer session against the configured destination.
///
/// Validates the destination, decodes the credential material, and builds
/// the client the session owns for its lifetime. A failed `connect` yields
/// no session; a successful one is released with
/// [`Session::close`](coldstore_core::Session::close).
pub async fn connect(config: &StorageConfig) -> Result<Session> {
    let dest = config.destination()?;
    let credentials = CredentialBundle::from_json(&config.credentials)?;
    let client = S3Client::new(&credentials).await?;

    tracing::debug!(
        bucket = %dest.bucket,
        prefix = %dest.prefix,
        "opened storage session"
    );

    Ok(Session::new(Arc::new(client), dest))
}
