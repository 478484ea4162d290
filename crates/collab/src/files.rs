//! File storage collaborator boundary
//!
//! Documents arrive as plain strings; classification decides whether the
//! string names a stored object (needs a signed URL), a remote URL, or a
//! local path the host can open directly.

use serde::{Deserialize, Serialize};

/// Default signed-URL lifetime, in seconds.
pub const DEFAULT_EXPIRY_SECS: u64 = 3_600;

/// How to fetch a document given its reference string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentRef {
    /// Relative object path in remote storage; resolve via [`FileStore`].
    Stored(String),
    /// Already-fetchable URL.
    Url(String),
    /// Local filesystem path or bare name.
    Local(String),
}

impl DocumentRef {
    /// A stored reference is a relative path with at least one separator
    /// that is not itself a URL.
    pub fn classify(reference: &str) -> Self {
        if reference.starts_with("http") {
            Self::Url(reference.to_string())
        } else if reference.contains('/') && !reference.starts_with('/') {
            Self::Stored(reference.to_string())
        } else {
            Self::Local(reference.to_string())
        }
    }
}

/// Time-limited fetchable URL for a stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrl {
    pub url: String,
    pub expires_at_ms: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("storage error: {0}")]
    Backend(String),
}

/// Resolves stored references into fetchable URLs.
pub trait FileStore {
    fn signed_url(&self, path: &str, expires_in_secs: u64) -> Result<SignedUrl, FileStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_matches_reference_shape() {
        assert_eq!(
            DocumentRef::classify("user-123/plans/tower-a.pdf"),
            DocumentRef::Stored("user-123/plans/tower-a.pdf".to_string())
        );
        assert_eq!(
            DocumentRef::classify("https://example.com/plan.pdf"),
            DocumentRef::Url("https://example.com/plan.pdf".to_string())
        );
        // Absolute paths are local, not stored objects.
        assert_eq!(
            DocumentRef::classify("/srv/plans/plan.pdf"),
            DocumentRef::Local("/srv/plans/plan.pdf".to_string())
        );
        assert_eq!(
            DocumentRef::classify("plan.pdf"),
            DocumentRef::Local("plan.pdf".to_string())
        );
    }
}
