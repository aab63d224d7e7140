//! Keyword taxonomy: exams, their domains and weighted keyword phrases.
//!
//! The taxonomy is an immutable value built once and handed to the
//! [`DomainSuggester`](crate::DomainSuggester). A built-in table is
//! available through [`KeywordTaxonomy::builtin`]; other tables can be
//! loaded from YAML:
//!
//! ```yaml
//! exams:
//!   google_cloud_developer:
//!     display_name: Google Professional Cloud Developer
//!     domains:
//!       - name: "Section 3: Deploying applications"
//!         high_weight: [cloud run, gke]
//!         medium_weight: [deployment]
//!         low_weight: [hosting]
//! ```

mod builtin;

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SuggesterError};

pub use builtin::GOOGLE_CLOUD_DEVELOPER;

/// Weight tier of a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightTier {
    /// Topic phrases taken directly from the exam guide.
    High,
    /// Vocabulary strongly associated with the domain.
    Medium,
    /// General vocabulary that leans towards the domain.
    Low,
}

impl WeightTier {
    /// All tiers, strongest first.
    pub const ALL: [WeightTier; 3] = [Self::High, Self::Medium, Self::Low];

    /// Multiplier applied to the keyword scores of this tier.
    #[must_use]
    pub fn weight(self) -> f64 {
        match self {
            Self::High => 3.0,
            Self::Medium => 2.0,
            Self::Low => 1.0,
        }
    }

    /// Key used for this tier in taxonomy files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high_weight",
            Self::Medium => "medium_weight",
            Self::Low => "low_weight",
        }
    }
}

impl fmt::Display for WeightTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword phrases of one domain, grouped by tier.
///
/// Keywords are stored trimmed and lower-cased, without duplicates inside a
/// tier, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainKeywords {
    name: String,
    high: Vec<String>,
    medium: Vec<String>,
    low: Vec<String>,
}

impl DomainKeywords {
    /// Create a domain without keywords.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            high: Vec::new(),
            medium: Vec::new(),
            low: Vec::new(),
        }
    }

    /// Add keywords to a tier.
    #[must_use]
    pub fn with_keywords<I, S>(mut self, tier: WeightTier, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let list = self.tier_mut(tier);
        let mut seen: HashSet<String> = list.iter().cloned().collect();
        for keyword in keywords {
            let normalized = keyword.as_ref().trim().to_lowercase();
            if normalized.is_empty() || !seen.insert(normalized.clone()) {
                continue;
            }
            list.push(normalized);
        }
        self
    }

    /// Domain name as shown to users and stored in exports.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Keywords of one tier.
    #[must_use]
    pub fn keywords(&self, tier: WeightTier) -> &[String] {
        match tier {
            WeightTier::High => &self.high,
            WeightTier::Medium => &self.medium,
            WeightTier::Low => &self.low,
        }
    }

    /// Iterate over `(tier, keywords)` pairs, strongest tier first.
    pub fn tiers(&self) -> impl Iterator<Item = (WeightTier, &[String])> {
        WeightTier::ALL
            .into_iter()
            .map(move |tier| (tier, self.keywords(tier)))
    }

    /// Total number of keywords over all tiers.
    #[must_use]
    pub fn keyword_count(&self) -> usize {
        self.high.len() + self.medium.len() + self.low.len()
    }

    fn tier_mut(&mut self, tier: WeightTier) -> &mut Vec<String> {
        match tier {
            WeightTier::High => &mut self.high,
            WeightTier::Medium => &mut self.medium,
            WeightTier::Low => &mut self.low,
        }
    }
}

/// Domains of one exam, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamTaxonomy {
    name: String,
    display_name: Option<String>,
    domains: Vec<DomainKeywords>,
}

impl ExamTaxonomy {
    /// Create an exam without domains.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
            domains: Vec::new(),
        }
    }

    /// Set the human-readable exam name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Append a domain.
    #[must_use]
    pub fn with_domain(mut self, domain: DomainKeywords) -> Self {
        self.domains.push(domain);
        self
    }

    /// Exam identifier (e.g. `google_cloud_developer`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable name, falling back to the identifier.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Domains in declaration order.
    #[must_use]
    pub fn domains(&self) -> &[DomainKeywords] {
        &self.domains
    }

    /// Find a domain by exact name.
    #[must_use]
    pub fn domain(&self, name: &str) -> Option<&DomainKeywords> {
        self.domains.iter().find(|d| d.name == name)
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SuggesterError::InvalidTaxonomy(
                "exam name must not be empty".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for domain in &self.domains {
            if domain.name.trim().is_empty() {
                return Err(SuggesterError::InvalidTaxonomy(format!(
                    "exam '{}' has a domain without a name",
                    self.name
                )));
            }
            if !seen.insert(domain.name.as_str()) {
                return Err(SuggesterError::InvalidTaxonomy(format!(
                    "exam '{}' lists domain '{}' twice",
                    self.name, domain.name
                )));
            }
        }
        Ok(())
    }
}

/// Mapping from exam identifier to its domain keyword table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordTaxonomy {
    exams: BTreeMap<String, ExamTaxonomy>,
}

impl KeywordTaxonomy {
    /// Create an empty taxonomy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in taxonomy.
    #[must_use]
    pub fn builtin() -> Self {
        let mut exams = BTreeMap::new();
        let exam = builtin::google_cloud_developer();
        exams.insert(exam.name().to_string(), exam);
        Self { exams }
    }

    /// Add an exam, rejecting empty names, duplicate domains and exams that
    /// are already present.
    pub fn insert_exam(&mut self, exam: ExamTaxonomy) -> Result<()> {
        exam.validate()?;
        if self.exams.contains_key(exam.name()) {
            return Err(SuggesterError::InvalidTaxonomy(format!(
                "exam '{}' is defined twice",
                exam.name()
            )));
        }
        self.exams.insert(exam.name().to_string(), exam);
        Ok(())
    }

    /// Builder form of [`insert_exam`](Self::insert_exam).
    pub fn with_exam(mut self, exam: ExamTaxonomy) -> Result<Self> {
        self.insert_exam(exam)?;
        Ok(self)
    }

    /// Look up an exam by identifier.
    #[must_use]
    pub fn exam(&self, name: &str) -> Option<&ExamTaxonomy> {
        self.exams.get(name)
    }

    /// All exams, ordered by identifier.
    pub fn exams(&self) -> impl Iterator<Item = &ExamTaxonomy> {
        self.exams.values()
    }

    /// Whether the taxonomy contains no exams.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exams.is_empty()
    }

    /// Parse a taxonomy from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: TaxonomyFile = serde_yaml_ng::from_str(yaml)?;
        let mut taxonomy = Self::new();
        for (name, exam_file) in file.exams {
            let mut exam = ExamTaxonomy::new(name);
            if let Some(display_name) = exam_file.display_name {
                exam = exam.with_display_name(display_name);
            }
            for domain_file in exam_file.domains {
                exam = exam.with_domain(
                    DomainKeywords::new(domain_file.name)
                        .with_keywords(WeightTier::High, domain_file.high_weight)
                        .with_keywords(WeightTier::Medium, domain_file.medium_weight)
                        .with_keywords(WeightTier::Low, domain_file.low_weight),
                );
            }
            taxonomy.insert_exam(exam)?;
        }
        tracing::debug!(exams = taxonomy.exams.len(), "Loaded keyword taxonomy");
        Ok(taxonomy)
    }

    /// Read and parse a taxonomy YAML file.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }
}

/// On-disk taxonomy layout.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TaxonomyFile {
    exams: BTreeMap<String, ExamFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExamFile {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    domains: Vec<DomainFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DomainFile {
    name: String,
    #[serde(default)]
    high_weight: Vec<String>,
    #[serde(default)]
    medium_weight: Vec<String>,
    #[serde(default)]
    low_weight: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_weight_tier_weights() {
        assert_eq!(WeightTier::High.weight(), 3.0);
        assert_eq!(WeightTier::Medium.weight(), 2.0);
        assert_eq!(WeightTier::Low.weight(), 1.0);
    }

    #[test]
    fn test_with_keywords_normalizes_and_dedups() {
        let domain = DomainKeywords::new("Storage").with_keywords(
            WeightTier::High,
            ["Cloud Storage", " cloud storage ", "", "Bigtable", "bigtable"],
        );
        assert_eq!(
            domain.keywords(WeightTier::High),
            ["cloud storage", "bigtable"]
        );
        assert!(domain.keywords(WeightTier::Low).is_empty());
        assert_eq!(domain.keyword_count(), 2);
    }

    #[test]
    fn test_builtin_contains_google_cloud_developer() {
        let taxonomy = KeywordTaxonomy::builtin();
        let exam = taxonomy.exam(GOOGLE_CLOUD_DEVELOPER).unwrap();
        assert_eq!(exam.domains().len(), 4);
        assert!(taxonomy.exam("aws_developer").is_none());
    }

    #[test]
    fn test_insert_exam_rejects_duplicates() {
        let mut taxonomy = KeywordTaxonomy::new();
        taxonomy.insert_exam(ExamTaxonomy::new("exam")).unwrap();
        let err = taxonomy.insert_exam(ExamTaxonomy::new("exam")).unwrap_err();
        assert!(err.to_string().contains("defined twice"));
    }

    #[test]
    fn test_insert_exam_rejects_duplicate_domain() {
        let exam = ExamTaxonomy::new("exam")
            .with_domain(DomainKeywords::new("A"))
            .with_domain(DomainKeywords::new("A"));
        assert!(KeywordTaxonomy::new().insert_exam(exam).is_err());
    }

    #[test]
    fn test_insert_exam_rejects_empty_names() {
        assert!(KeywordTaxonomy::new()
            .insert_exam(ExamTaxonomy::new("  "))
            .is_err());
        let exam = ExamTaxonomy::new("exam").with_domain(DomainKeywords::new(""));
        assert!(KeywordTaxonomy::new().insert_exam(exam).is_err());
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r#"
exams:
  tiny_exam:
    display_name: Tiny Exam
    domains:
      - name: Compute
        high_weight: [Virtual Machines, gpu]
        low_weight: [server]
      - name: Storage
        medium_weight: [bucket]
"#;
        let taxonomy = KeywordTaxonomy::from_yaml_str(yaml).unwrap();
        let exam = taxonomy.exam("tiny_exam").unwrap();
        assert_eq!(exam.display_name(), "Tiny Exam");
        let compute = exam.domain("Compute").unwrap();
        assert_eq!(
            compute.keywords(WeightTier::High),
            ["virtual machines", "gpu"]
        );
        assert_eq!(compute.keywords(WeightTier::Low), ["server"]);
        assert_eq!(
            exam.domain("Storage").unwrap().keywords(WeightTier::Medium),
            ["bucket"]
        );
    }

    #[test]
    fn test_from_yaml_str_rejects_unknown_tier() {
        let yaml = r#"
exams:
  tiny_exam:
    domains:
      - name: Compute
        urgent_weight: [gpu]
"#;
        let err = KeywordTaxonomy::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, SuggesterError::TaxonomyParse(_)));
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taxonomy.yaml");
        std::fs::write(
            &path,
            "exams:\n  e:\n    domains:\n      - name: D\n        high_weight: [x]\n",
        )
        .unwrap();
        let taxonomy = KeywordTaxonomy::from_yaml_file(&path).unwrap();
        assert!(taxonomy.exam("e").is_some());

        let missing = KeywordTaxonomy::from_yaml_file(&dir.path().join("missing.yaml"));
        assert!(matches!(missing, Err(SuggesterError::Io(_))));
    }
}
