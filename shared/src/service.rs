//! Certificate service: sequences remote calls for the dashboard's create,
//! upload and delete flows, scoped to the signed-in user.
//!
//! ## Flows
//!
//! - **Load**: the user's certificates, newest first
//! - **Add**: insert with the caller's fields plus `user_id`
//! - **Upload**: store the file under `{user_id}/{millis}.{ext}`, then insert a
//!   certificate pointing at it
//! - **Delete**: remove the stored file first (if any), then the row
//!
//! No retries; every failure is returned to the caller to report.

use chrono::{DateTime, Utc};
use log::{error, info, warn};

use crate::intake::FileMeta;
use crate::store::{CertificateStore, StoreError};
use crate::{Certificate, CertificateInsert, CertificateUser, NewCertificate};

#[derive(Clone, PartialEq)]
pub struct CertificateService<S> {
    store: S,
    user: CertificateUser,
}

impl<S: CertificateStore> CertificateService<S> {
    pub fn new(store: S, user: CertificateUser) -> Self {
        Self { store, user }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn load(&self) -> Result<Vec<Certificate>, StoreError> {
        match self.store.list_certificates(&self.user.id).await {
            Ok(certificates) => {
                info!("Loaded {} certificates", certificates.len());
                Ok(certificates)
            }
            Err(e) => {
                error!("Error loading certificates: {}", e);
                Err(e)
            }
        }
    }

    pub async fn add(&self, certificate: NewCertificate) -> Result<Certificate, StoreError> {
        let row = CertificateInsert {
            certificate,
            user_id: self.user.id.clone(),
        };
        match self.store.insert_certificate(&row).await {
            Ok(stored) => {
                info!("Added certificate {} ({})", stored.id, stored.title);
                Ok(stored)
            }
            Err(e) => {
                error!("Error adding certificate: {}", e);
                Err(e)
            }
        }
    }

    /// Store one file and create its certificate.
    ///
    /// If the insert fails the stored file is removed again so it does not
    /// linger without a record.
    pub async fn upload(
        &self,
        file: &FileMeta,
        bytes: Vec<u8>,
        now: DateTime<Utc>,
    ) -> Result<Certificate, StoreError> {
        let key = file.storage_key(&self.user.id, now);
        let stored = self
            .store
            .upload_file(&key, &file.content_type, bytes)
            .await
            .inspect_err(|e| error!("Error uploading {}: {}", file.name, e))?;

        let certificate = file.to_certificate(stored.public_url.clone(), now.date_naive());
        match self.add(certificate).await {
            Ok(created) => Ok(created),
            Err(e) => {
                if let Err(cleanup) = self.store.delete_file(&stored.key).await {
                    warn!("Could not remove orphaned file {}: {}", stored.key, cleanup);
                }
                Err(e)
            }
        }
    }

    /// Delete a certificate and its stored file
    pub async fn delete(&self, certificate: &Certificate) -> Result<(), StoreError> {
        if let Some(file_url) = certificate.file_url.as_deref().filter(|_| certificate.has_file()) {
            match self.store.storage_key_for(file_url) {
                Some(key) => {
                    self.store
                        .delete_file(&key)
                        .await
                        .inspect_err(|e| error!("Error deleting file {}: {}", key, e))?;
                }
                None => warn!(
                    "Certificate {} has a file URL outside the store, skipping file delete",
                    certificate.id
                ),
            }
        }

        self.store
            .delete_certificate(&certificate.id)
            .await
            .inspect_err(|e| error!("Error deleting certificate {}: {}", certificate.id, e))?;
        info!("Deleted certificate {}", certificate.id);
        Ok(())
    }
}
