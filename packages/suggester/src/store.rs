//! Collaborator interface to the exam/domain record store.
//!
//! The suggester only reads from the store: it looks up an active exam by id
//! and lists the active domains of that exam to attach domain ids to
//! suggestions.

use serde::{Deserialize, Serialize};

use crate::taxonomy::KeywordTaxonomy;

/// An exam record as kept by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamRecord {
    /// Store identifier.
    pub id: u64,
    /// Taxonomy key (e.g. `google_cloud_developer`).
    pub name: String,
    /// Human-readable name.
    pub display_name: String,
    /// Inactive exams are invisible to the suggester.
    pub is_active: bool,
}

/// A domain record as kept by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    /// Store identifier.
    pub id: u64,
    /// Owning exam.
    pub exam_id: u64,
    /// Domain name, matched exactly against taxonomy domain names.
    pub name: String,
    /// Inactive domains are invisible to the suggester.
    pub is_active: bool,
}

/// Read access to exams and domains.
pub trait DomainStore {
    /// Find an active exam by id.
    fn active_exam(&self, exam_id: u64) -> Option<ExamRecord>;

    /// List the active domains of an exam.
    fn active_domains(&self, exam: &ExamRecord) -> Vec<DomainRecord>;

    /// Find an active domain of an exam by exact name.
    fn active_domain_by_name(&self, exam: &ExamRecord, name: &str) -> Option<DomainRecord> {
        self.active_domains(exam)
            .into_iter()
            .find(|domain| domain.name == name)
    }
}

/// Vector-backed store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDomainStore {
    exams: Vec<ExamRecord>,
    domains: Vec<DomainRecord>,
}

impl InMemoryDomainStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every exam and domain of a taxonomy as active.
    ///
    /// Exams get ids `1..` in taxonomy order, domains get ids `1..` across
    /// all exams in declaration order.
    #[must_use]
    pub fn from_taxonomy(taxonomy: &KeywordTaxonomy) -> Self {
        let mut store = Self::new();
        let mut next_domain_id = 1;
        for (exam_id, exam) in (1..).zip(taxonomy.exams()) {
            store.add_exam(ExamRecord {
                id: exam_id,
                name: exam.name().to_string(),
                display_name: exam.display_name().to_string(),
                is_active: true,
            });
            for domain in exam.domains() {
                store.add_domain(DomainRecord {
                    id: next_domain_id,
                    exam_id,
                    name: domain.name().to_string(),
                    is_active: true,
                });
                next_domain_id += 1;
            }
        }
        store
    }

    /// Add an exam record.
    pub fn add_exam(&mut self, exam: ExamRecord) {
        self.exams.push(exam);
    }

    /// Add a domain record.
    pub fn add_domain(&mut self, domain: DomainRecord) {
        self.domains.push(domain);
    }

    /// Find an active exam by taxonomy key.
    #[must_use]
    pub fn active_exam_by_name(&self, name: &str) -> Option<ExamRecord> {
        self.exams
            .iter()
            .find(|exam| exam.is_active && exam.name == name)
            .cloned()
    }
}

impl DomainStore for InMemoryDomainStore {
    fn active_exam(&self, exam_id: u64) -> Option<ExamRecord> {
        self.exams
            .iter()
            .find(|exam| exam.is_active && exam.id == exam_id)
            .cloned()
    }

    fn active_domains(&self, exam: &ExamRecord) -> Vec<DomainRecord> {
        self.domains
            .iter()
            .filter(|domain| domain.is_active && domain.exam_id == exam.id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::GOOGLE_CLOUD_DEVELOPER;

    #[test]
    fn test_from_taxonomy() {
        let store = InMemoryDomainStore::from_taxonomy(&KeywordTaxonomy::builtin());
        let exam = store.active_exam(1).unwrap();
        assert_eq!(exam.name, GOOGLE_CLOUD_DEVELOPER);

        let domains = store.active_domains(&exam);
        assert_eq!(domains.len(), 4);
        assert_eq!(domains[0].id, 1);
        assert!(domains[0].name.starts_with("Section 1"));
        assert_eq!(domains[3].id, 4);
    }

    #[test]
    fn test_inactive_records_are_hidden() {
        let mut store = InMemoryDomainStore::new();
        store.add_exam(ExamRecord {
            id: 7,
            name: "old_exam".to_string(),
            display_name: "Old".to_string(),
            is_active: false,
        });
        assert!(store.active_exam(7).is_none());
        assert!(store.active_exam_by_name("old_exam").is_none());

        store.add_exam(ExamRecord {
            id: 8,
            name: "new_exam".to_string(),
            display_name: "New".to_string(),
            is_active: true,
        });
        store.add_domain(DomainRecord {
            id: 1,
            exam_id: 8,
            name: "Retired".to_string(),
            is_active: false,
        });
        store.add_domain(DomainRecord {
            id: 2,
            exam_id: 8,
            name: "Current".to_string(),
            is_active: true,
        });
        let exam = store.active_exam(8).unwrap();
        assert_eq!(store.active_domains(&exam).len(), 1);
        assert!(store.active_domain_by_name(&exam, "Retired").is_none());
        assert_eq!(store.active_domain_by_name(&exam, "Current").unwrap().id, 2);
    }
}
