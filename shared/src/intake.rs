//! File intake: type/size screening, the upload queue and its per-file status.

use std::future::Future;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::NewCertificate;

/// Largest accepted file, 10 MiB
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Content types the intake accepts
pub const ACCEPTED_CONTENT_TYPES: [&str; 4] =
    ["application/pdf", "image/jpeg", "image/jpg", "image/png"];

/// `accept` attribute of the hidden file picker
pub const FILE_PICKER_ACCEPT: &str = ".pdf,.jpg,.jpeg,.png";

/// Issuer recorded for certificates created straight from an upload
pub const UPLOADED_FILE_ISSUER: &str = "Uploaded file";

/// What the intake knows about a selected file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: String,
    pub content_type: String,
    pub size: u64,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            size,
        }
    }

    /// Lowercased extension of the file name, if any
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_lowercase())
    }

    /// File name without its extension
    pub fn stem(&self) -> &str {
        match self.name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.name,
        }
    }

    /// Check the file against the allow-list and the size ceiling
    pub fn screen(&self) -> Result<(), IntakeRejection> {
        if !ACCEPTED_CONTENT_TYPES.contains(&self.content_type.as_str()) {
            return Err(IntakeRejection::UnsupportedType {
                name: self.name.clone(),
                content_type: self.content_type.clone(),
            });
        }
        if self.size > MAX_FILE_SIZE_BYTES {
            return Err(IntakeRejection::TooLarge {
                name: self.name.clone(),
                size: self.size,
            });
        }
        Ok(())
    }

    /// Key under which the file is stored: `{user_id}/{unix_millis}.{ext}`
    pub fn storage_key(&self, user_id: &str, now: DateTime<Utc>) -> String {
        match self.extension() {
            Some(ext) => format!("{}/{}.{}", user_id, now.timestamp_millis(), ext),
            None => format!("{}/{}", user_id, now.timestamp_millis()),
        }
    }

    /// Certificate payload for a stored upload
    pub fn to_certificate(&self, file_url: String, today: NaiveDate) -> NewCertificate {
        NewCertificate {
            title: self.stem().to_string(),
            issuer: UPLOADED_FILE_ISSUER.to_string(),
            issue_date: today,
            expiry_date: None,
            credential_id: None,
            verification_url: None,
            description: None,
            file_url: Some(file_url),
            file_name: Some(self.name.clone()),
            file_size: Some(self.size),
        }
    }
}

/// Why a selected file was not queued
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeRejection {
    #[error("{name}: unsupported file type {content_type:?} (PDF, JPG or PNG only)")]
    UnsupportedType { name: String, content_type: String },
    #[error("{name}: file is larger than the 10 MB limit")]
    TooLarge { name: String, size: u64 },
    #[error("{name}: wait for the current upload to finish before adding files")]
    Busy { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    Pending,
    Uploading,
    Succeeded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueuedFile<T> {
    pub meta: FileMeta,
    /// Platform file handle (a browser `File` in the frontend)
    pub handle: T,
    pub status: UploadStatus,
}

/// Ordered queue of accepted files with per-file upload status
#[derive(Debug, Clone, PartialEq)]
pub struct UploadQueue<T> {
    items: Vec<QueuedFile<T>>,
}

impl<T> Default for UploadQueue<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Clone> UploadQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[QueuedFile<T>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Queue every acceptable file in selection order; returns the rejections.
    ///
    /// Nothing is queued while a batch is uploading, since the batch writes its
    /// own snapshot of the queue back when it finishes.
    pub fn accept(
        &mut self,
        files: impl IntoIterator<Item = (FileMeta, T)>,
    ) -> Vec<IntakeRejection> {
        if self.is_uploading() {
            return files
                .into_iter()
                .map(|(meta, _)| IntakeRejection::Busy { name: meta.name })
                .collect();
        }
        let mut rejected = Vec::new();
        for (meta, handle) in files {
            match meta.screen() {
                Ok(()) => self.items.push(QueuedFile {
                    meta,
                    handle,
                    status: UploadStatus::Pending,
                }),
                Err(rejection) => {
                    log::debug!("Rejected file: {}", rejection);
                    rejected.push(rejection);
                }
            }
        }
        rejected
    }

    /// Remove a queued file by position; out-of-range positions are ignored
    pub fn remove(&mut self, index: usize) -> Option<QueuedFile<T>> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn is_uploading(&self) -> bool {
        self.items.iter().any(|item| item.status == UploadStatus::Uploading)
    }

    /// Files still to attempt: pending ones and earlier failures
    pub fn to_upload(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item.status, UploadStatus::Pending | UploadStatus::Failed(_)))
            .count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &QueuedFile<T>> {
        self.items
            .iter()
            .filter(|item| matches!(item.status, UploadStatus::Failed(_)))
    }

    pub fn all_succeeded(&self) -> bool {
        !self.items.is_empty()
            && self.items.iter().all(|item| item.status == UploadStatus::Succeeded)
    }

    /// Drop files that were uploaded, leaving failures for a retry
    pub fn clear_succeeded(&mut self) {
        self.items.retain(|item| item.status != UploadStatus::Succeeded);
    }

    fn set_status(&mut self, index: usize, status: UploadStatus) {
        if let Some(item) = self.items.get_mut(index) {
            item.status = status;
        }
    }

    /// Upload every pending or failed file one at a time, in queue order.
    ///
    /// A failed file is marked `Failed` and the batch moves on. `on_progress` is
    /// called after every status change so a view can re-render.
    pub async fn upload_all<F, Fut, E, P>(&mut self, mut upload: F, mut on_progress: P)
    where
        F: FnMut(FileMeta, T) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: std::fmt::Display,
        P: FnMut(&Self),
    {
        let mut attempted = vec![false; self.items.len()];
        while let Some(index) = (0..self.items.len()).find(|&i| {
            !attempted[i]
                && matches!(self.items[i].status, UploadStatus::Pending | UploadStatus::Failed(_))
        }) {
            attempted[index] = true;
            self.set_status(index, UploadStatus::Uploading);
            on_progress(self);

            let (meta, handle) = match self.items.get(index) {
                Some(item) => (item.meta.clone(), item.handle.clone()),
                None => break,
            };
            let name = meta.name.clone();
            match upload(meta, handle).await {
                Ok(()) => self.set_status(index, UploadStatus::Succeeded),
                Err(e) => {
                    log::error!("Upload of {} failed: {}", name, e);
                    self.set_status(index, UploadStatus::Failed(e.to_string()));
                }
            }
            on_progress(self);
        }
    }
}

/// Human-readable size, e.g. "1.5 KB" or "2 MB"
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    let text = format!("{:.2}", rounded);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", text, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{at, date};

    const MIB: u64 = 1024 * 1024;

    fn meta(name: &str, content_type: &str, size: u64) -> (FileMeta, u32) {
        (FileMeta::new(name, content_type, size), 0)
    }

    #[test]
    fn test_accept_filters_type_and_size_preserving_order() {
        let mut queue = UploadQueue::new();
        let rejected = queue.accept(vec![
            meta("big.pdf", "application/pdf", 15 * MIB),
            meta("badge.png", "image/png", 2 * MIB),
            meta("setup.exe", "application/x-msdownload", MIB),
            meta("scan.jpg", "image/jpeg", MIB),
        ]);

        let names: Vec<&str> = queue.items().iter().map(|f| f.meta.name.as_str()).collect();
        assert_eq!(names, vec!["badge.png", "scan.jpg"]);
        assert_eq!(rejected.len(), 2);
        assert!(matches!(rejected[0], IntakeRejection::TooLarge { .. }));
        assert!(matches!(rejected[1], IntakeRejection::UnsupportedType { .. }));
        assert!(queue.items().iter().all(|f| f.status == UploadStatus::Pending));
    }

    #[test]
    fn test_exactly_ten_mib_is_accepted() {
        assert!(FileMeta::new("a.pdf", "application/pdf", MAX_FILE_SIZE_BYTES).screen().is_ok());
        assert!(FileMeta::new("a.pdf", "application/pdf", MAX_FILE_SIZE_BYTES + 1).screen().is_err());
    }

    #[test]
    fn test_rejection_reason_is_readable() {
        let err = FileMeta::new("big.pdf", "application/pdf", 15 * MIB).screen().unwrap_err();
        assert_eq!(err.to_string(), "big.pdf: file is larger than the 10 MB limit");
    }

    #[test]
    fn test_remove_by_position() {
        let mut queue = UploadQueue::new();
        queue.accept(vec![
            meta("a.pdf", "application/pdf", 1),
            meta("b.pdf", "application/pdf", 1),
        ]);
        assert!(queue.remove(5).is_none());
        assert_eq!(queue.remove(0).unwrap().meta.name, "a.pdf");
        assert_eq!(queue.items()[0].meta.name, "b.pdf");
    }

    #[test]
    fn test_storage_key_and_stem() {
        let now = at(2024, 1, 1);
        let file = FileMeta::new("AWS Badge.PNG", "image/png", 10);
        assert_eq!(file.stem(), "AWS Badge");
        assert_eq!(
            file.storage_key("user-1", now),
            format!("user-1/{}.png", now.timestamp_millis())
        );

        let bare = FileMeta::new("scan", "application/pdf", 10);
        assert_eq!(bare.storage_key("u", now), format!("u/{}", now.timestamp_millis()));
        assert_eq!(bare.stem(), "scan");
    }

    #[test]
    fn test_upload_derived_certificate() {
        let file = FileMeta::new("ccna.pdf", "application/pdf", 2048);
        let cert = file.to_certificate("https://x/ccna.pdf".to_string(), date(2024, 6, 1));
        assert_eq!(cert.title, "ccna");
        assert_eq!(cert.issuer, UPLOADED_FILE_ISSUER);
        assert_eq!(cert.file_name.as_deref(), Some("ccna.pdf"));
        assert_eq!(cert.file_size, Some(2048));
    }

    #[tokio::test]
    async fn test_upload_all_is_sequential_and_keeps_failures() {
        let mut queue = UploadQueue::new();
        queue.accept(vec![
            meta("a.pdf", "application/pdf", 1),
            meta("b.pdf", "application/pdf", 1),
            meta("c.pdf", "application/pdf", 1),
        ]);

        let mut order = Vec::new();
        let mut progress_calls = 0;
        queue
            .upload_all(
                |file, _| {
                    order.push(file.name.clone());
                    async move {
                        if file.name == "b.pdf" {
                            Err("storage unavailable")
                        } else {
                            Ok(())
                        }
                    }
                },
                |_| progress_calls += 1,
            )
            .await;

        assert_eq!(order, vec!["a.pdf", "b.pdf", "c.pdf"]);
        assert_eq!(progress_calls, 6);
        assert!(!queue.all_succeeded());
        assert_eq!(
            queue.items()[1].status,
            UploadStatus::Failed("storage unavailable".to_string())
        );

        queue.clear_succeeded();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.to_upload(), 1);

        queue.upload_all(|_, _| async { Ok::<(), String>(()) }, |_| {}).await;
        assert!(queue.all_succeeded());
    }

    #[tokio::test]
    async fn test_files_added_mid_batch_are_refused() {
        let mut queue = UploadQueue::new();
        queue.accept(vec![meta("a.pdf", "application/pdf", 1)]);

        let mut mid_batch = None;
        queue
            .upload_all(
                |_, _| async { Ok::<(), String>(()) },
                |current| {
                    if current.is_uploading() {
                        mid_batch = Some(current.clone());
                    }
                },
            )
            .await;

        let mut shown = mid_batch.unwrap();
        let rejected = shown.accept(vec![meta("b.png", "image/png", 1)]);
        assert_eq!(rejected, vec![IntakeRejection::Busy { name: "b.png".to_string() }]);
        assert_eq!(shown.len(), 1);

        assert!(queue.all_succeeded());
        assert!(queue.accept(vec![meta("b.png", "image/png", 1)]).is_empty());
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(2 * MIB), "2 MB");
    }
}
