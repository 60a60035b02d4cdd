//! # Remote Store
//!
//! Abstraction over the backend-as-a-service that owns certificate rows and
//! uploaded files. The browser client implements it over HTTP; tests use an
//! in-memory fake.
//!
//! Futures are not `Send`: the browser runs everything on one event loop.

use async_trait::async_trait;
use thiserror::Error;

use crate::{Certificate, CertificateInsert};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request failed with status {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("Not signed in")]
    Unauthorized,
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result of storing a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Storage key, `{user_id}/{name}`
    pub key: String,
    /// Publicly resolvable URL of the object
    pub public_url: String,
}

#[async_trait(?Send)]
pub trait CertificateStore {
    /// All certificates of `user_id`, newest first
    async fn list_certificates(&self, user_id: &str) -> Result<Vec<Certificate>, StoreError>;

    /// Insert one row and return it with the backend-assigned `id`/`created_at`
    async fn insert_certificate(&self, row: &CertificateInsert) -> Result<Certificate, StoreError>;

    async fn delete_certificate(&self, id: &str) -> Result<(), StoreError>;

    async fn upload_file(
        &self,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredFile, StoreError>;

    async fn delete_file(&self, key: &str) -> Result<(), StoreError>;

    /// Storage key of an object given its public URL, if the URL points into
    /// this store
    fn storage_key_for(&self, public_url: &str) -> Option<String>;
}

/// Recover the storage key from a public object URL of the form
/// `{base}/storage/v1/object/public/{bucket}/{key}`.
pub fn storage_key_from_public_url(public_url: &str, bucket: &str) -> Option<String> {
    let marker = format!("/object/public/{}/", bucket);
    let start = public_url.find(&marker)? + marker.len();
    let key = public_url.get(start..)?;
    let key = key.split(['?', '#']).next().unwrap_or(key);
    (!key.is_empty()).then(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_from_public_url() {
        let url = "https://abc.supabase.co/storage/v1/object/public/certificates/user-1/1704067200000.pdf";
        assert_eq!(
            storage_key_from_public_url(url, "certificates").as_deref(),
            Some("user-1/1704067200000.pdf")
        );
        assert_eq!(
            storage_key_from_public_url(&format!("{}?download=1", url), "certificates").as_deref(),
            Some("user-1/1704067200000.pdf")
        );
        assert_eq!(storage_key_from_public_url(url, "other"), None);
        assert_eq!(storage_key_from_public_url("https://example.com/file.pdf", "certificates"), None);
    }
}
