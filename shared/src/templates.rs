//! Static catalog of certificate presets used to pre-fill the form.

use crate::form::CertificateDraft;

/// A preset in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    /// Icon tag rendered by the view
    pub icon: &'static str,
    /// Gradient style tag rendered by the view
    pub color: &'static str,
    pub title: &'static str,
    pub issuer: &'static str,
    pub description: &'static str,
    pub verification_url: Option<&'static str>,
}

impl Template {
    /// Partial certificate data the form is pre-filled with
    pub fn data(&self) -> CertificateDraft {
        CertificateDraft {
            title: Some(self.title.to_string()),
            issuer: Some(self.issuer.to_string()),
            description: Some(self.description.to_string()),
            verification_url: self.verification_url.map(str::to_string),
            ..Default::default()
        }
    }
}

const TEMPLATES: &[Template] = &[
    Template {
        id: "aws-architect",
        name: "AWS Solutions Architect",
        category: "Cloud Computing",
        icon: "shield",
        color: "from-orange-500 to-red-600",
        title: "AWS Certified Solutions Architect - Associate",
        issuer: "Amazon Web Services",
        description: "Validates expertise in designing distributed systems on AWS",
        verification_url: Some("https://aws.amazon.com/certification/verify/"),
    },
    Template {
        id: "google-cloud",
        name: "Google Cloud Professional",
        category: "Cloud Computing",
        icon: "shield",
        color: "from-blue-500 to-indigo-600",
        title: "Google Cloud Professional Cloud Architect",
        issuer: "Google Cloud",
        description: "Demonstrates ability to design and manage Google Cloud solutions",
        verification_url: Some("https://cloud.google.com/certification/"),
    },
    Template {
        id: "microsoft-azure",
        name: "Microsoft Azure Fundamentals",
        category: "Cloud Computing",
        icon: "shield",
        color: "from-cyan-500 to-blue-600",
        title: "Microsoft Azure Fundamentals (AZ-900)",
        issuer: "Microsoft",
        description: "Foundational knowledge of cloud services and Microsoft Azure",
        verification_url: Some("https://docs.microsoft.com/en-us/learn/certifications/"),
    },
    Template {
        id: "cissp",
        name: "CISSP Security",
        category: "Cybersecurity",
        icon: "shield",
        color: "from-red-500 to-pink-600",
        title: "Certified Information Systems Security Professional (CISSP)",
        issuer: "(ISC)² - International Information System Security Certification Consortium",
        description: "Advanced cybersecurity certification for experienced professionals",
        verification_url: Some("https://www.isc2.org/Certifications/CISSP"),
    },
    Template {
        id: "pmp",
        name: "Project Management Professional",
        category: "Project Management",
        icon: "briefcase",
        color: "from-green-500 to-emerald-600",
        title: "Project Management Professional (PMP)",
        issuer: "Project Management Institute (PMI)",
        description: "Globally recognized project management certification",
        verification_url: Some("https://www.pmi.org/certifications/project-management-pmp"),
    },
    Template {
        id: "scrum-master",
        name: "Certified Scrum Master",
        category: "Agile/Scrum",
        icon: "star",
        color: "from-purple-500 to-violet-600",
        title: "Certified ScrumMaster (CSM)",
        issuer: "Scrum Alliance",
        description: "Demonstrates understanding of Scrum framework and ability to act as Scrum Master",
        verification_url: Some("https://www.scrumalliance.org/get-certified/scrum-master-track/certified-scrummaster"),
    },
    Template {
        id: "comptia-security",
        name: "CompTIA Security+",
        category: "Cybersecurity",
        icon: "shield",
        color: "from-red-600 to-orange-600",
        title: "CompTIA Security+ Certification",
        issuer: "CompTIA",
        description: "Entry-level cybersecurity certification covering essential security skills",
        verification_url: Some("https://www.comptia.org/certifications/security"),
    },
    Template {
        id: "cisco-ccna",
        name: "Cisco CCNA",
        category: "Networking",
        icon: "code",
        color: "from-blue-600 to-cyan-600",
        title: "Cisco Certified Network Associate (CCNA)",
        issuer: "Cisco",
        description: "Foundation-level networking certification covering network fundamentals",
        verification_url: Some("https://www.cisco.com/c/en/us/training-events/training-certifications/certifications/associate/ccna.html"),
    },
    Template {
        id: "oracle-java",
        name: "Oracle Java Certification",
        category: "Programming",
        icon: "code",
        color: "from-orange-600 to-red-600",
        title: "Oracle Certified Professional Java SE Developer",
        issuer: "Oracle",
        description: "Validates Java programming skills and knowledge",
        verification_url: Some("https://education.oracle.com/oracle-certification-path/pFamily_48"),
    },
    Template {
        id: "salesforce-admin",
        name: "Salesforce Administrator",
        category: "CRM/Business",
        icon: "briefcase",
        color: "from-blue-500 to-teal-600",
        title: "Salesforce Certified Administrator",
        issuer: "Salesforce",
        description: "Demonstrates skills to configure and manage Salesforce applications",
        verification_url: Some("https://trailhead.salesforce.com/credentials/administrator"),
    },
    Template {
        id: "coursera-course",
        name: "Online Course Certificate",
        category: "Education",
        icon: "book-open",
        color: "from-indigo-500 to-purple-600",
        title: "Course Completion Certificate",
        issuer: "Online Learning Platform",
        description: "Certificate of completion for online course or specialization",
        verification_url: None,
    },
    Template {
        id: "custom",
        name: "Custom Certificate",
        category: "Other",
        icon: "award",
        color: "from-gray-500 to-gray-600",
        title: "",
        issuer: "",
        description: "Create a custom certificate entry",
        verification_url: None,
    },
];

/// Every preset, in catalog order
pub fn catalog() -> &'static [Template] {
    TEMPLATES
}

pub fn find(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|template| template.id == id)
}

/// Categories in the order they first appear in the catalog
pub fn categories() -> Vec<&'static str> {
    let mut seen: Vec<&'static str> = Vec::new();
    for template in TEMPLATES {
        if !seen.contains(&template.category) {
            seen.push(template.category);
        }
    }
    seen
}

/// Catalog grouped by category, categories in first-seen order
pub fn grouped() -> Vec<(&'static str, Vec<&'static Template>)> {
    categories()
        .into_iter()
        .map(|category| {
            let members = TEMPLATES.iter().filter(|t| t.category == category).collect();
            (category, members)
        })
        .collect()
}

/// Staged choice in the template picker. Selecting only stages a preset;
/// [`TemplateSelection::confirm`] hands its data over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TemplateSelection {
    selected: Option<&'static Template>,
}

impl TemplateSelection {
    pub fn select(&mut self, id: &str) {
        if let Some(template) = find(id) {
            self.selected = Some(template);
        }
    }

    pub fn selected(&self) -> Option<&'static Template> {
        self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.is_some_and(|t| t.id == id)
    }

    /// Data of the staged preset, `None` when nothing is staged
    pub fn confirm(&self) -> Option<CertificateDraft> {
        self.selected.map(Template::data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{CertificateForm, Field};

    #[test]
    fn test_categories_in_first_seen_order() {
        assert_eq!(
            categories(),
            vec![
                "Cloud Computing",
                "Cybersecurity",
                "Project Management",
                "Agile/Scrum",
                "Networking",
                "Programming",
                "CRM/Business",
                "Education",
                "Other",
            ]
        );
    }

    #[test]
    fn test_grouping_keeps_catalog_order_within_category() {
        let groups = grouped();
        let (category, members) = &groups[1];
        assert_eq!(*category, "Cybersecurity");
        let ids: Vec<&str> = members.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["cissp", "comptia-security"]);
        assert_eq!(groups.iter().map(|(_, m)| m.len()).sum::<usize>(), catalog().len());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<&str> = catalog().iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog().len());
    }

    #[test]
    fn test_confirm_requires_selection() {
        let mut selection = TemplateSelection::default();
        assert_eq!(selection.confirm(), None);

        selection.select("missing");
        assert_eq!(selection.confirm(), None);

        selection.select("pmp");
        assert!(selection.is_selected("pmp"));
        let data = selection.confirm().unwrap();
        assert_eq!(data.issuer.as_deref(), Some("Project Management Institute (PMI)"));
        assert_eq!(data.issue_date, None);
    }

    #[test]
    fn test_template_prefills_form_without_validating() {
        let data = find("custom").unwrap().data();
        let mut form = CertificateForm::new(Some(&data));
        assert_eq!(form.value(Field::Description), "Create a custom certificate entry");
        assert!(form.errors.is_empty());
        assert!(form.submit().is_err());
    }
}
