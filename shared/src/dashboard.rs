//! Dashboard state: the in-memory certificate list and everything derived
//! from it.
//!
//! Only completed remote operations mutate the list. Every change goes through
//! [`DashboardState::apply`], which also posts the matching notification.

use chrono::{DateTime, Utc};
use log::info;

use crate::filter::{filter_certificates, CertificateFilter, DashboardStats};
use crate::notification::{Notification, NotificationSlot};
use crate::store::StoreError;
use crate::Certificate;

pub const ADD_SUCCESS: &str = "Certificate added successfully!";
pub const ADD_FAILED: &str = "Failed to add certificate. Please try again.";
pub const DELETE_SUCCESS: &str = "Certificate deleted successfully!";
pub const DELETE_FAILED: &str = "Failed to delete certificate. Please try again.";
pub const LOAD_FAILED: &str = "Failed to load certificates.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    Loaded(Result<Vec<Certificate>, StoreError>),
    /// Result of a form submission or a single file upload
    Added(Result<Certificate, StoreError>),
    UploadFailed { file_name: String, error: StoreError },
    DeleteStarted(String),
    Deleted { id: String, result: Result<(), StoreError> },
    SearchChanged(String),
    FilterChanged(CertificateFilter),
    DismissNotification(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub load_state: LoadState,
    /// Newest first
    pub certificates: Vec<Certificate>,
    pub search: String,
    pub filter: CertificateFilter,
    /// Ids with a delete in flight
    pending_deletes: Vec<String>,
    notifications: NotificationSlot,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            load_state: LoadState::Loading,
            certificates: Vec::new(),
            search: String::new(),
            filter: CertificateFilter::All,
            pending_deletes: Vec::new(),
            notifications: NotificationSlot::new(),
        }
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::Loaded(Ok(certificates)) => {
                // Records added while the fetch was in flight stay on top
                let mut merged: Vec<Certificate> = self
                    .certificates
                    .drain(..)
                    .filter(|added| !certificates.iter().any(|loaded| loaded.id == added.id))
                    .collect();
                merged.extend(certificates);
                self.certificates = merged;
                self.load_state = LoadState::Ready;
            }
            DashboardEvent::Loaded(Err(e)) => {
                // never stay in Loading after a failed fetch
                self.load_state = LoadState::Ready;
                self.notify(Notification::error(format!("{} {}", LOAD_FAILED, e)));
            }
            DashboardEvent::Added(Ok(certificate)) => {
                info!("Prepending certificate {}", certificate.id);
                self.certificates.insert(0, certificate);
                self.notify(Notification::success(ADD_SUCCESS));
            }
            DashboardEvent::Added(Err(_)) => {
                self.notify(Notification::error(ADD_FAILED));
            }
            DashboardEvent::UploadFailed { file_name, error } => {
                self.notify(Notification::error(format!(
                    "Failed to upload {}: {}",
                    file_name, error
                )));
            }
            DashboardEvent::DeleteStarted(id) => {
                if !self.pending_deletes.contains(&id) {
                    self.pending_deletes.push(id);
                }
            }
            DashboardEvent::Deleted { id, result } => {
                self.pending_deletes.retain(|pending| pending != &id);
                match result {
                    Ok(()) => {
                        let before = self.certificates.len();
                        self.certificates.retain(|cert| cert.id != id);
                        if self.certificates.len() < before {
                            self.notify(Notification::success(DELETE_SUCCESS));
                        }
                    }
                    Err(_) => self.notify(Notification::error(DELETE_FAILED)),
                }
            }
            DashboardEvent::SearchChanged(search) => self.search = search,
            DashboardEvent::FilterChanged(filter) => self.filter = filter,
            DashboardEvent::DismissNotification(token) => self.notifications.dismiss(token),
        }
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.show(notification);
    }

    /// The record a delete should act on: present in the list and not already
    /// being deleted. `None` makes a repeated delete a no-op.
    pub fn deletable(&self, id: &str) -> Option<&Certificate> {
        if self.pending_deletes.iter().any(|pending| pending == id) {
            return None;
        }
        self.certificates.iter().find(|cert| cert.id == id)
    }

    pub fn is_deleting(&self, id: &str) -> bool {
        self.pending_deletes.iter().any(|pending| pending == id)
    }

    pub fn visible(&self, now: DateTime<Utc>) -> Vec<&Certificate> {
        filter_certificates(&self.certificates, &self.search, self.filter, now)
    }

    pub fn stats(&self, now: DateTime<Utc>) -> DashboardStats {
        DashboardStats::compute(&self.certificates, now)
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    /// Token of the visible notification, used to schedule its dismissal
    pub fn notification_token(&self) -> Option<u64> {
        self.notifications.token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{CertificateForm, Field, EXPIRY_BEFORE_ISSUE};
    use crate::notification::NotificationKind;
    use crate::service::fake::FakeStore;
    use crate::service::CertificateService;
    use crate::test_support::{at, certificate, date};
    use crate::CertificateUser;

    fn ready_with(certificates: Vec<Certificate>) -> DashboardState {
        let mut state = DashboardState::new();
        state.apply(DashboardEvent::Loaded(Ok(certificates)));
        state
    }

    #[test]
    fn test_starts_loading_and_failure_leaves_empty_ready_list() {
        let mut state = DashboardState::new();
        assert_eq!(state.load_state, LoadState::Loading);

        state.apply(DashboardEvent::Loaded(Err(StoreError::Network("offline".into()))));
        assert_eq!(state.load_state, LoadState::Ready);
        assert!(state.certificates.is_empty());
        assert_eq!(state.notification().unwrap().kind, NotificationKind::Error);
    }

    #[test]
    fn test_add_during_load_survives_the_fetch() {
        let mut state = DashboardState::new();
        state.apply(DashboardEvent::Added(Ok(certificate("new", "PMP", "PMI"))));
        state.apply(DashboardEvent::Loaded(Ok(vec![
            certificate("new", "PMP", "PMI"),
            certificate("old", "Java Cert", "Oracle"),
        ])));
        let ids: Vec<&str> = state.certificates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);

        let mut state = DashboardState::new();
        state.apply(DashboardEvent::Added(Ok(certificate("new", "PMP", "PMI"))));
        state.apply(DashboardEvent::Loaded(Ok(vec![certificate("old", "Java Cert", "Oracle")])));
        let ids: Vec<&str> = state.certificates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);
        assert_eq!(state.load_state, LoadState::Ready);
    }

    #[test]
    fn test_failed_load_keeps_records_added_meanwhile() {
        let mut state = DashboardState::new();
        state.apply(DashboardEvent::Added(Ok(certificate("new", "PMP", "PMI"))));
        state.apply(DashboardEvent::Loaded(Err(StoreError::Network("offline".into()))));

        assert_eq!(state.load_state, LoadState::Ready);
        assert_eq!(state.certificates.len(), 1);
        assert_eq!(state.notification().unwrap().kind, NotificationKind::Error);
    }

    #[test]
    fn test_added_is_prepended() {
        let mut state = ready_with(vec![certificate("old", "Java Cert", "Oracle")]);
        state.apply(DashboardEvent::Added(Ok(certificate("new", "PMP", "PMI"))));

        assert_eq!(state.certificates[0].id, "new");
        assert_eq!(state.notification().unwrap().message, ADD_SUCCESS);
    }

    #[test]
    fn test_failed_add_leaves_list_unchanged() {
        let mut state = ready_with(vec![certificate("old", "Java Cert", "Oracle")]);
        state.apply(DashboardEvent::Added(Err(StoreError::Unauthorized)));

        assert_eq!(state.certificates.len(), 1);
        assert_eq!(state.notification().unwrap().message, ADD_FAILED);
    }

    #[test]
    fn test_second_delete_is_a_noop() {
        let mut state = ready_with(vec![certificate("a", "AWS Architect", "AWS")]);

        assert!(state.deletable("a").is_some());
        state.apply(DashboardEvent::DeleteStarted("a".into()));
        assert!(state.deletable("a").is_none());
        assert!(state.is_deleting("a"));

        state.apply(DashboardEvent::Deleted { id: "a".into(), result: Ok(()) });
        assert!(state.certificates.is_empty());
        let token = state.notification_token().unwrap();
        state.apply(DashboardEvent::DismissNotification(token));

        assert!(state.deletable("a").is_none());
        state.apply(DashboardEvent::Deleted { id: "a".into(), result: Ok(()) });
        assert_eq!(state.notification(), None);
    }

    #[test]
    fn test_failed_delete_keeps_record_and_allows_retry() {
        let mut state = ready_with(vec![certificate("a", "AWS Architect", "AWS")]);
        state.apply(DashboardEvent::DeleteStarted("a".into()));
        state.apply(DashboardEvent::Deleted {
            id: "a".into(),
            result: Err(StoreError::Network("offline".into())),
        });

        assert_eq!(state.certificates.len(), 1);
        assert!(state.deletable("a").is_some());
        assert_eq!(state.notification().unwrap().message, DELETE_FAILED);
    }

    #[test]
    fn test_visible_applies_search_and_filter() {
        let mut state = ready_with(vec![
            certificate("1", "AWS Architect", "AWS"),
            certificate("2", "Java Cert", "Oracle"),
        ]);
        state.apply(DashboardEvent::SearchChanged("aws".into()));
        let visible = state.visible(at(2024, 1, 10));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "1");

        state.apply(DashboardEvent::FilterChanged(CertificateFilter::Expiring));
        assert!(state.visible(at(2024, 1, 10)).is_empty());
        assert_eq!(state.stats(at(2024, 1, 10)).total, 2);
    }

    #[tokio::test]
    async fn test_add_flow_end_to_end() {
        let service = CertificateService::new(
            FakeStore::default(),
            CertificateUser { id: "user-1".into(), email: "ada@example.com".into() },
        );
        let mut existing = certificate("old", "Java Cert", "Oracle");
        existing.created_at = at(2023, 5, 1);
        service.store().rows.borrow_mut().push(existing);

        let mut state = DashboardState::new();
        state.apply(DashboardEvent::Loaded(service.load().await));

        let mut form = CertificateForm::new(None);
        form.set_field(Field::Title, "AWS Certified Solutions Architect");
        form.set_field(Field::Issuer, "Amazon Web Services");
        form.set_field(Field::IssueDate, "2024-01-01");
        form.set_field(Field::ExpiryDate, "2023-12-31");
        let errors = form.submit().unwrap_err();
        assert_eq!(errors.get(Field::ExpiryDate), Some(EXPIRY_BEFORE_ISSUE));
        assert!(service.store().calls.borrow().iter().all(|call| call != "insert"));

        form.set_field(Field::ExpiryDate, "2025-01-01");
        let draft = form.submit().unwrap();
        assert_eq!(draft.expiry_date, Some(date(2025, 1, 1)));
        state.apply(DashboardEvent::Added(service.add(draft).await));

        assert_eq!(state.certificates.len(), 2);
        assert_eq!(state.certificates[0].title, "AWS Certified Solutions Architect");
        assert_eq!(state.notification().unwrap().message, ADD_SUCCESS);

        let token = state.notification_token().unwrap();
        state.apply(DashboardEvent::DismissNotification(token));
        assert_eq!(state.notification(), None);
    }

    #[tokio::test]
    async fn test_delete_flow_end_to_end() {
        let service = CertificateService::new(
            FakeStore::default(),
            CertificateUser { id: "user-1".into(), email: "ada@example.com".into() },
        );
        let file = crate::intake::FileMeta::new("badge.png", "image/png", 10);
        let created = service.upload(&file, vec![0; 10], at(2024, 6, 1)).await;

        let mut state = ready_with(Vec::new());
        state.apply(DashboardEvent::Added(created));
        let id = state.certificates[0].id.clone();

        let target = state.deletable(&id).cloned().unwrap();
        state.apply(DashboardEvent::DeleteStarted(id.clone()));
        let result = service.delete(&target).await;
        state.apply(DashboardEvent::Deleted { id: id.clone(), result });

        assert!(state.certificates.is_empty());
        assert!(service.store().files.borrow().is_empty());
        assert_eq!(state.notification().unwrap().message, DELETE_SUCCESS);
    }
}
