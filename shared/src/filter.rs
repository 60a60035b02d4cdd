//! Search and filter over the in-memory certificate list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dates::sub_months;
use crate::status::{is_expired, is_expiring_soon};
use crate::Certificate;

/// Window for the "recent" filter
pub const RECENT_MONTHS: u32 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CertificateFilter {
    #[default]
    All,
    /// Created within the last calendar month
    Recent,
    /// Has an expiry date before now plus three months
    Expiring,
}

impl CertificateFilter {
    pub const ALL: [CertificateFilter; 3] = [Self::All, Self::Recent, Self::Expiring];

    /// Value used in the filter `<select>`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Recent => "recent",
            Self::Expiring => "expiring",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All Certificates",
            Self::Recent => "Recently Added",
            Self::Expiring => "Expiring Soon",
        }
    }

    /// Unknown values fall back to `All`
    pub fn from_value(value: &str) -> Self {
        match value {
            "recent" => Self::Recent,
            "expiring" => Self::Expiring,
            _ => Self::All,
        }
    }

    pub fn matches(&self, certificate: &Certificate, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Recent => is_recent(certificate, now),
            Self::Expiring => is_expiring_soon(certificate, now),
        }
    }
}

/// Case-insensitive substring match on title or issuer. An empty term matches everything.
pub fn matches_search(certificate: &Certificate, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    certificate.title.to_lowercase().contains(&term)
        || certificate.issuer.to_lowercase().contains(&term)
}

/// Created within the last calendar month
pub fn is_recent(certificate: &Certificate, now: DateTime<Utc>) -> bool {
    certificate.created_at >= sub_months(now, RECENT_MONTHS)
}

/// Certificates passing both the search term and the active filter, in list order
pub fn filter_certificates<'a>(
    certificates: &'a [Certificate],
    term: &str,
    filter: CertificateFilter,
    now: DateTime<Utc>,
) -> Vec<&'a Certificate> {
    certificates
        .iter()
        .filter(|cert| matches_search(cert, term) && filter.matches(cert, now))
        .collect()
}

/// Summary counts shown above the certificate grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total: usize,
    pub expired: usize,
    /// Expiring soon but not yet expired
    pub expiring_soon: usize,
    pub recent: usize,
}

impl DashboardStats {
    pub fn compute(certificates: &[Certificate], now: DateTime<Utc>) -> Self {
        certificates.iter().fold(Self::default(), |mut stats, cert| {
            stats.total += 1;
            if is_expired(cert, now) {
                stats.expired += 1;
            } else if is_expiring_soon(cert, now) {
                stats.expiring_soon += 1;
            }
            if is_recent(cert, now) {
                stats.recent += 1;
            }
            stats
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{at, certificate, date};

    fn sample() -> Vec<Certificate> {
        vec![
            certificate("1", "AWS Architect", "AWS"),
            certificate("2", "Java Cert", "Oracle"),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive_for_every_filter() {
        let certs = sample();
        let now = at(2024, 1, 10);

        for filter in CertificateFilter::ALL {
            let mut certs = certs.clone();
            // make the AWS certificate pass the recent and expiring filters too
            certs[0].expiry_date = Some(date(2024, 2, 1));
            let found = filter_certificates(&certs, "aws", filter, now);
            assert_eq!(found.len(), 1, "filter {:?}", filter);
            assert_eq!(found[0].title, "AWS Architect");
        }
    }

    #[test]
    fn test_search_matches_issuer() {
        let certs = sample();
        let found = filter_certificates(&certs, "ORACLE", CertificateFilter::All, at(2024, 1, 10));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "2");
    }

    #[test]
    fn test_empty_term_returns_everything_in_order() {
        let certs = sample();
        let found = filter_certificates(&certs, "  ", CertificateFilter::All, at(2024, 1, 10));
        let ids: Vec<&str> = found.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_recent_filter() {
        let mut certs = sample();
        certs[1].created_at = at(2023, 11, 1);
        let found = filter_certificates(&certs, "", CertificateFilter::Recent, at(2024, 1, 10));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");
    }

    #[test]
    fn test_expiring_filter_needs_expiry_date() {
        let mut certs = sample();
        certs[1].expiry_date = Some(date(2024, 3, 1));
        let found = filter_certificates(&certs, "", CertificateFilter::Expiring, at(2024, 1, 10));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "2");
    }

    #[test]
    fn test_filter_value_round_trip() {
        for filter in CertificateFilter::ALL {
            assert_eq!(CertificateFilter::from_value(filter.as_str()), filter);
        }
        assert_eq!(CertificateFilter::from_value("bogus"), CertificateFilter::All);
    }

    #[test]
    fn test_stats() {
        let mut certs = sample();
        certs.push(certificate("3", "PMP", "PMI"));
        certs[0].expiry_date = Some(date(2023, 12, 1));
        certs[1].expiry_date = Some(date(2024, 2, 1));
        certs[2].created_at = at(2023, 6, 1);

        let stats = DashboardStats::compute(&certs, at(2024, 1, 10));
        assert_eq!(
            stats,
            DashboardStats { total: 3, expired: 1, expiring_soon: 1, recent: 2 }
        );
    }
}
