//! coldstore-core: transfer engine for the coldstore backup storage backend
//!
//! This crate provides the storage-side core of a backup pipeline:
//! - Backend configuration and credential material
//! - Remote object naming (prefix/key joining)
//! - The ObjectStore trait for remote operations
//! - The Session type: sequential chunk upload with create-only semantics,
//!   per-chunk timeout and throughput reporting, and conditional delete
//!
//! This crate is designed to be independent of any specific storage SDK,
//! allowing for easy testing with fake sessions and potential future support
//! for other backends.

pub mod config;
pub mod error;
pub mod path;
pub mod report;
pub mod session;
pub mod traits;

pub use config::{CredentialBundle, DEFAULT_TIMEOUT_SECS, Destination, StorageConfig};
pub use error::{Error, Result};
pub use path::{RemotePath, join_key};
pub use session::Session;
pub use traits::ObjectStore;
