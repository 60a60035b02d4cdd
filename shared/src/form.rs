//! Certificate form draft state and field-level validation.
//!
//! The form owns a [`CertificateDraft`] of raw input values plus the current
//! [`FieldErrors`]. It performs no I/O: a successful [`CertificateForm::submit`]
//! hands a [`NewCertificate`] back to the caller, which persists it.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::dates::parse_input_date;
use crate::NewCertificate;

pub const TITLE_REQUIRED: &str = "Certificate title is required";
pub const ISSUER_REQUIRED: &str = "Issuing organization is required";
pub const ISSUE_DATE_REQUIRED: &str = "Issue date is required";
pub const EXPIRY_BEFORE_ISSUE: &str = "Expiry date must be after issue date";
pub const INVALID_URL: &str = "Please enter a valid URL";
pub const INVALID_DATE: &str = "Please enter a valid date";

/// Editable certificate fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    Title,
    Issuer,
    IssueDate,
    ExpiryDate,
    CredentialId,
    VerificationUrl,
    Description,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Self::Title,
        Self::Issuer,
        Self::IssueDate,
        Self::ExpiryDate,
        Self::CredentialId,
        Self::VerificationUrl,
        Self::Description,
    ];

    /// Input `name`/`id` attribute
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Issuer => "issuer",
            Self::IssueDate => "issue_date",
            Self::ExpiryDate => "expiry_date",
            Self::CredentialId => "credential_id",
            Self::VerificationUrl => "verification_url",
            Self::Description => "description",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validation messages keyed by field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Raw, unsaved form values. Dates are kept as `YYYY-MM-DD` input strings.
///
/// Also used as the partial payload of a template: fields left `None` are not
/// touched when the draft is merged into a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateDraft {
    pub title: Option<String>,
    pub issuer: Option<String>,
    pub issue_date: Option<String>,
    pub expiry_date: Option<String>,
    pub credential_id: Option<String>,
    pub verification_url: Option<String>,
    pub description: Option<String>,
}

impl CertificateDraft {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Overlay every field present in `other`, keeping the rest
    pub fn merge(&mut self, other: &CertificateDraft) {
        for field in Field::ALL {
            if let Some(value) = other.get(field) {
                self.set(field, value);
            }
        }
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::Title => &self.title,
            Field::Issuer => &self.issuer,
            Field::IssueDate => &self.issue_date,
            Field::ExpiryDate => &self.expiry_date,
            Field::CredentialId => &self.credential_id,
            Field::VerificationUrl => &self.verification_url,
            Field::Description => &self.description,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Title => &mut self.title,
            Field::Issuer => &mut self.issuer,
            Field::IssueDate => &mut self.issue_date,
            Field::ExpiryDate => &mut self.expiry_date,
            Field::CredentialId => &mut self.credential_id,
            Field::VerificationUrl => &mut self.verification_url,
            Field::Description => &mut self.description,
        }
    }

    /// Trimmed value, `None` when absent or blank
    fn filled(&self, field: Field) -> Option<&str> {
        self.get(field).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Validate every rule and build the insert payload.
    ///
    /// All rules are evaluated so every failing field gets its message.
    pub fn validate(&self) -> Result<NewCertificate, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = self.filled(Field::Title);
        if title.is_none() {
            errors.insert(Field::Title, TITLE_REQUIRED);
        }

        let issuer = self.filled(Field::Issuer);
        if issuer.is_none() {
            errors.insert(Field::Issuer, ISSUER_REQUIRED);
        }

        let issue_date = match self.filled(Field::IssueDate) {
            None => {
                errors.insert(Field::IssueDate, ISSUE_DATE_REQUIRED);
                None
            }
            Some(raw) => {
                let parsed = parse_input_date(raw);
                if parsed.is_none() {
                    errors.insert(Field::IssueDate, INVALID_DATE);
                }
                parsed
            }
        };

        let expiry_date = match self.filled(Field::ExpiryDate) {
            None => None,
            Some(raw) => {
                let parsed = parse_input_date(raw);
                if parsed.is_none() {
                    errors.insert(Field::ExpiryDate, INVALID_DATE);
                }
                parsed
            }
        };

        if let (Some(issued), Some(expires)) = (issue_date, expiry_date) {
            if expires <= issued {
                errors.insert(Field::ExpiryDate, EXPIRY_BEFORE_ISSUE);
            }
        }

        let verification_url = self.filled(Field::VerificationUrl);
        if let Some(raw) = verification_url {
            if Url::parse(raw).is_err() {
                errors.insert(Field::VerificationUrl, INVALID_URL);
            }
        }

        match (title, issuer, issue_date) {
            (Some(title), Some(issuer), Some(issue_date)) if errors.is_empty() => {
                Ok(NewCertificate {
                    title: title.to_string(),
                    issuer: issuer.to_string(),
                    issue_date,
                    expiry_date,
                    credential_id: self.filled(Field::CredentialId).map(str::to_string),
                    verification_url: verification_url.map(str::to_string),
                    description: self.filled(Field::Description).map(str::to_string),
                    file_url: None,
                    file_name: None,
                    file_size: None,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Form state: the draft being edited and the errors from the last submit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateForm {
    pub draft: CertificateDraft,
    pub errors: FieldErrors,
}

impl CertificateForm {
    /// A form pre-filled from an optional partial draft (e.g. a template)
    pub fn new(initial: Option<&CertificateDraft>) -> Self {
        let mut form = Self::default();
        if let Some(initial) = initial {
            form.draft.merge(initial);
        }
        form
    }

    pub fn value(&self, field: Field) -> &str {
        self.draft.get(field).unwrap_or("")
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    /// Edit one field; clears that field's existing error
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
        self.errors.clear(field);
    }

    /// Merge template data, keeping entered values for fields the template omits
    pub fn apply_template(&mut self, data: &CertificateDraft) {
        self.draft.merge(data);
        for field in Field::ALL {
            if data.get(field).is_some() {
                self.errors.clear(field);
            }
        }
    }

    /// Validate the draft. On failure the errors are stored on the form and
    /// nothing is emitted.
    pub fn submit(&mut self) -> Result<NewCertificate, FieldErrors> {
        match self.draft.validate() {
            Ok(certificate) => {
                self.errors = FieldErrors::new();
                Ok(certificate)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }
}
