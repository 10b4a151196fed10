//! Remote object naming
//!
//! Remote names are always the destination prefix joined with a relative
//! chunk key. Keys never become absolute and redundant separators are
//! collapsed at the join point.

/// A fully resolved remote object location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePath {
    pub bucket: String,
    pub key: String,
}

impl RemotePath {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl std::fmt::Display for RemotePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

/// Join a key prefix with a relative key.
///
/// An empty prefix yields the bare key, so objects land at the bucket root.
pub fn join_key(prefix: &str, key: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    let key = key.trim_start_matches('/');

    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}/{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_with_prefix() {
        assert_eq!(join_key("backups", "2024.tar.xz"), "backups/2024.tar.xz");
    }

    #[test]
    fn test_join_empty_prefix_is_bare_key() {
        assert_eq!(join_key("", "2024.tar.xz"), "2024.tar.xz");
    }

    #[test]
    fn test_join_collapses_redundant_separators() {
        assert_eq!(join_key("backups/", "/2024.tar.xz"), "backups/2024.tar.xz");
    }

    #[test]
    fn test_join_nested_prefix() {
        assert_eq!(
            join_key("site/db", "2024.tar.xz-000"),
            "site/db/2024.tar.xz-000"
        );
    }

    #[test]
    fn test_remote_path_display() {
        let path = RemotePath::new("coldstore-test", "backups/a.tar.xz");
        assert_eq!(path.to_string(), "coldstore-test/backups/a.tar.xz");
    }
}
