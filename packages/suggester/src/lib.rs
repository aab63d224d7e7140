//! Quizport domain suggester - classify quiz questions into exam domains.
//!
//! Question text is scored against a keyword taxonomy: every exam has a set
//! of domains, every domain has keyword phrases in three weight tiers. The
//! highest-scoring domains are returned with a confidence percentage.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use quizport_suggester::{ConfidenceTier, DomainSuggester, KeywordTaxonomy};
//!
//! let suggester = DomainSuggester::new(Arc::new(KeywordTaxonomy::builtin()));
//! let suggestions = suggester.suggest_domains(
//!     "You are developing a microservices application using Cloud Run with Cloud Load Balancing",
//!     "google_cloud_developer",
//!     3,
//! );
//! assert!(suggestions[0].domain_name.starts_with("Section 1"));
//! assert!(suggestions[0].confidence_level >= ConfidenceTier::Medium);
//! ```
//!
//! # Architecture
//!
//! - [`taxonomy`]: Exams, domains and weighted keywords (built-in or YAML)
//! - [`scoring`]: Text normalization and keyword scoring
//! - [`confidence`]: Confidence curve and tiers
//! - [`store`]: Collaborator interface to exam/domain records
//! - [`suggester`]: The suggestion service
//! - [`config`]: Scoring constants
//! - [`error`]: Error types and Result alias

pub mod config;
pub mod confidence;
pub mod error;
pub mod scoring;
pub mod store;
pub mod suggester;
pub mod taxonomy;

pub use confidence::{calculate_confidence, ConfidenceTier};
pub use error::{Result, SuggesterError};
pub use store::{DomainRecord, DomainStore, ExamRecord, InMemoryDomainStore};
pub use suggester::{DomainSuggester, DomainSuggestion, EnrichedSuggestion, SuggestionRequest};
pub use taxonomy::{
    DomainKeywords, ExamTaxonomy, KeywordTaxonomy, WeightTier, GOOGLE_CLOUD_DEVELOPER,
};
