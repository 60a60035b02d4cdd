use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub mod dashboard;
pub mod dates;
pub mod filter;
pub mod form;
pub mod intake;
pub mod notification;
pub mod service;
pub mod status;
pub mod store;
pub mod templates;

pub use dashboard::{DashboardEvent, DashboardState, LoadState};
pub use filter::{CertificateFilter, DashboardStats};
pub use form::{CertificateDraft, CertificateForm, Field, FieldErrors};
pub use intake::{FileMeta, IntakeRejection, QueuedFile, UploadQueue, UploadStatus};
pub use notification::{Notification, NotificationKind, NotificationSlot};
pub use service::CertificateService;
pub use status::CertificateStatus;
pub use store::{CertificateStore, StoreError, StoredFile};
pub use templates::{Template, TemplateSelection};

/// A certificate record as stored by the remote backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    /// Opaque identifier assigned by the backend on insert
    pub id: String,
    /// Owner of the record; every query is scoped to it
    pub user_id: String,
    pub title: String,
    /// Issuing organization
    pub issuer: String,
    pub issue_date: NaiveDate,
    /// Always strictly after `issue_date` when present
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub credential_id: Option<String>,
    #[serde(default)]
    pub verification_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Public URL of the stored file, only for records created from an upload
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    /// Backend-assigned creation time, used for ordering and "recent"
    pub created_at: DateTime<Utc>,
}

impl Certificate {
    /// Whether the record is backed by an uploaded file
    pub fn has_file(&self) -> bool {
        self.file_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// Insert payload for a new certificate.
///
/// Carries everything the caller supplies; `id` and `created_at` are assigned by
/// the backend and `user_id` is filled in by the service before insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCertificate {
    pub title: String,
    pub issuer: String,
    pub issue_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

/// Row sent to the backend: the payload plus the owner reference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificateInsert {
    #[serde(flatten)]
    pub certificate: NewCertificate,
    pub user_id: String,
}

/// The authenticated user, supplied by the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateUser {
    pub id: String,
    pub email: String,
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::TimeZone;

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    pub fn certificate(id: &str, title: &str, issuer: &str) -> Certificate {
        Certificate {
            id: id.to_string(),
            user_id: "user-1".to_string(),
            title: title.to_string(),
            issuer: issuer.to_string(),
            issue_date: date(2024, 1, 1),
            expiry_date: None,
            credential_id: None,
            verification_url: None,
            description: None,
            file_url: None,
            file_name: None,
            file_size: None,
            created_at: at(2024, 1, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certificate_deserializes_backend_row() {
        let json = r#"{
            "id": "7f0c",
            "user_id": "user-1",
            "title": "Certified ScrumMaster (CSM)",
            "issuer": "Scrum Alliance",
            "issue_date": "2024-03-01",
            "expiry_date": "2026-03-01",
            "credential_id": null,
            "verification_url": "https://www.scrumalliance.org/",
            "description": null,
            "file_url": null,
            "file_name": null,
            "file_size": null,
            "created_at": "2024-03-02T10:15:00.123456+00:00"
        }"#;

        let cert: Certificate = serde_json::from_str(json).unwrap();
        assert_eq!(cert.issuer, "Scrum Alliance");
        assert_eq!(cert.expiry_date, Some(test_support::date(2026, 3, 1)));
        assert!(!cert.has_file());
    }

    #[test]
    fn test_insert_row_is_flat_and_skips_missing_fields() {
        let insert = CertificateInsert {
            certificate: NewCertificate {
                title: "Java Cert".to_string(),
                issuer: "Oracle".to_string(),
                issue_date: test_support::date(2024, 1, 1),
                expiry_date: None,
                credential_id: Some("OCP-17".to_string()),
                verification_url: None,
                description: None,
                file_url: None,
                file_name: None,
                file_size: None,
            },
            user_id: "user-1".to_string(),
        };

        let value = serde_json::to_value(&insert).unwrap();
        assert_eq!(value["user_id"], "user-1");
        assert_eq!(value["issue_date"], "2024-01-01");
        assert_eq!(value["credential_id"], "OCP-17");
        assert!(value.get("expiry_date").is_none());
    }
}
