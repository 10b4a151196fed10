//! Backend configuration and credential material
//!
//! Loading and validating the surrounding tool's config file is the caller's
//! job; this module only defines the shape the backend consumes.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Default upload timeout in seconds when the config leaves it unset
pub const DEFAULT_TIMEOUT_SECS: i64 = 300;

/// Backend configuration as consumed from the backup tool's config
///
/// ```yaml
/// bucket: coldstore-test
/// path: backups
/// credentials: '{ "access_key_id": "...", "secret_access_key": "..." }'
/// timeout: 300
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Destination bucket, required
    pub bucket: String,

    /// Key prefix inside the bucket; empty means the bucket root
    #[serde(default)]
    pub path: String,

    /// JSON credential material, consumed once at session open
    pub credentials: String,

    /// Per-chunk upload timeout in seconds; zero or negative disables it
    #[serde(default = "default_timeout")]
    pub timeout: i64,
}

fn default_timeout() -> i64 {
    DEFAULT_TIMEOUT_SECS
}

impl StorageConfig {
    /// Validate the config and extract the destination the session binds to.
    pub fn destination(&self) -> Result<Destination> {
        if self.bucket.is_empty() {
            return Err(Error::Config("bucket must not be empty".to_string()));
        }

        Ok(Destination {
            bucket: self.bucket.clone(),
            prefix: self.path.clone(),
            timeout: timeout_from_secs(self.timeout),
        })
    }
}

fn timeout_from_secs(secs: i64) -> Option<Duration> {
    if secs > 0 {
        Some(Duration::from_secs(secs as u64))
    } else {
        None
    }
}

/// Where a session writes: bucket, key prefix, and the upload timeout
#[derive(Debug, Clone)]
pub struct Destination {
    pub bucket: String,
    pub prefix: String,
    /// `None` disables the per-chunk timeout entirely
    pub timeout: Option<Duration>,
}

/// Decoded service-account-style credential record
///
/// Held only long enough to construct the remote client; the session does not
/// retain it.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialBundle {
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(default)]
    pub session_token: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl CredentialBundle {
    /// Decode the opaque JSON credential material from the config.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| Error::Auth(format!("invalid credential material: {e}")))
    }
}
