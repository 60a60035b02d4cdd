//! Expiry status derived from the current time and a certificate's expiry date.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dates::{add_months, start_of_day};
use crate::Certificate;

/// How far ahead an expiry date counts as "expiring soon"
pub const EXPIRING_SOON_MONTHS: u32 = 3;

/// Badge shown on a certificate card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CertificateStatus {
    Expired,
    ExpiringSoon,
    /// Has an expiry date that is further out than the warning window
    Valid,
    /// No expiry date recorded
    NoExpiry,
}

impl CertificateStatus {
    /// Derive the displayed status. Expired takes precedence over expiring soon.
    pub fn of(certificate: &Certificate, now: DateTime<Utc>) -> Self {
        if is_expired(certificate, now) {
            Self::Expired
        } else if is_expiring_soon(certificate, now) {
            Self::ExpiringSoon
        } else if certificate.expiry_date.is_some() {
            Self::Valid
        } else {
            Self::NoExpiry
        }
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::Expired => Some("Expired"),
            Self::ExpiringSoon => Some("Expiring Soon"),
            Self::Valid | Self::NoExpiry => None,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Expired => "status-expired",
            Self::ExpiringSoon => "status-expiring",
            Self::Valid => "status-valid",
            Self::NoExpiry => "status-none",
        }
    }
}

/// Expiry date present and strictly before now
pub fn is_expired(certificate: &Certificate, now: DateTime<Utc>) -> bool {
    certificate
        .expiry_date
        .is_some_and(|expiry| start_of_day(expiry) < now)
}

/// Expiry date present and before now plus three calendar months.
///
/// Expired certificates satisfy this too; callers wanting a single badge use
/// [`CertificateStatus::of`].
pub fn is_expiring_soon(certificate: &Certificate, now: DateTime<Utc>) -> bool {
    let horizon = add_months(now, EXPIRING_SOON_MONTHS);
    certificate
        .expiry_date
        .is_some_and(|expiry| start_of_day(expiry) < horizon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{at, certificate, date};

    fn expiring_on(y: i32, m: u32, d: u32) -> Certificate {
        let mut cert = certificate("c1", "AWS Architect", "AWS");
        cert.expiry_date = Some(date(y, m, d));
        cert
    }

    #[test]
    fn test_expired_takes_precedence() {
        let now = at(2025, 6, 15);
        let cert = expiring_on(2025, 6, 1);

        assert!(is_expired(&cert, now));
        assert!(is_expiring_soon(&cert, now));
        assert_eq!(CertificateStatus::of(&cert, now), CertificateStatus::Expired);
        assert_eq!(CertificateStatus::of(&cert, now).label(), Some("Expired"));
    }

    #[test]
    fn test_expiring_within_three_months() {
        let now = at(2025, 6, 15);
        let cert = expiring_on(2025, 9, 1);

        assert!(!is_expired(&cert, now));
        assert!(is_expiring_soon(&cert, now));
        assert_eq!(CertificateStatus::of(&cert, now), CertificateStatus::ExpiringSoon);
    }

    #[test]
    fn test_expiry_on_the_horizon_is_not_expiring_soon() {
        // now + 3 months is 2025-09-15T12:00, the start of 2025-09-16 is after it
        let now = at(2025, 6, 15);
        let cert = expiring_on(2025, 9, 16);

        assert!(!is_expiring_soon(&cert, now));
        assert_eq!(CertificateStatus::of(&cert, now), CertificateStatus::Valid);
    }

    #[test]
    fn test_no_expiry_date() {
        let now = at(2025, 6, 15);
        let cert = certificate("c1", "Java Cert", "Oracle");

        assert!(!is_expired(&cert, now));
        assert!(!is_expiring_soon(&cert, now));
        assert_eq!(CertificateStatus::of(&cert, now), CertificateStatus::NoExpiry);
        assert_eq!(CertificateStatus::NoExpiry.label(), None);
    }
}
