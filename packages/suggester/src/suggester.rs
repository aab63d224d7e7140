//! Domain suggestion service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::confidence::{calculate_confidence, ConfidenceTier};
use crate::error::{Result, SuggesterError};
use crate::scoring::score_domains;
use crate::store::DomainStore;
use crate::taxonomy::KeywordTaxonomy;

/// One ranked domain suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSuggestion {
    /// Domain name from the taxonomy.
    pub domain_name: String,
    /// Raw weighted score, rounded to two decimals.
    pub score: f64,
    /// Confidence percentage in `[5, 95]`, rounded to one decimal.
    pub confidence: f64,
    /// Bucket of the unrounded confidence.
    pub confidence_level: ConfidenceTier,
}

/// A suggestion with the store identity of its domain attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedSuggestion {
    /// The underlying suggestion.
    #[serde(flatten)]
    pub suggestion: DomainSuggestion,
    /// Store id of the domain, `None` when the store has no active domain
    /// with this name.
    pub domain_id: Option<u64>,
}

/// Request for the exam-scoped entry points.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    /// Question text to classify.
    #[serde(default)]
    pub question_text: String,
    /// Store id of the exam.
    #[serde(default)]
    pub exam_id: Option<u64>,
}

impl SuggestionRequest {
    /// Create a request.
    #[must_use]
    pub fn new(question_text: impl Into<String>, exam_id: u64) -> Self {
        Self {
            question_text: question_text.into(),
            exam_id: Some(exam_id),
        }
    }

    /// Check required fields and return the trimmed text and exam id.
    pub fn validate(&self) -> Result<(&str, u64)> {
        let text = self.question_text.trim();
        if text.is_empty() {
            return Err(SuggesterError::MissingQuestionText);
        }
        let exam_id = self.exam_id.ok_or(SuggesterError::MissingExamId)?;
        Ok((text, exam_id))
    }
}

/// Scores question text against a keyword taxonomy.
///
/// The suggester holds no mutable state; one instance can serve concurrent
/// callers.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use quizport_suggester::{DomainSuggester, KeywordTaxonomy, GOOGLE_CLOUD_DEVELOPER};
///
/// let suggester = DomainSuggester::new(Arc::new(KeywordTaxonomy::builtin()));
/// let suggestions = suggester.suggest_domains(
///     "How do you roll back a Cloud Run revision after a failed deploy?",
///     GOOGLE_CLOUD_DEVELOPER,
///     3,
/// );
/// assert!(!suggestions.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct DomainSuggester {
    taxonomy: Arc<KeywordTaxonomy>,
}

impl DomainSuggester {
    /// Create a suggester over a taxonomy.
    #[must_use]
    pub fn new(taxonomy: Arc<KeywordTaxonomy>) -> Self {
        Self { taxonomy }
    }

    /// The taxonomy this suggester scores against.
    #[must_use]
    pub fn taxonomy(&self) -> &KeywordTaxonomy {
        &self.taxonomy
    }

    /// Rank the domains of `exam_name` for `question_text`.
    ///
    /// Returns at most `top_n` suggestions with a positive score, best
    /// first. Domains with equal scores keep taxonomy order. Empty text or
    /// an unknown exam gives an empty list.
    pub fn suggest_domains(
        &self,
        question_text: &str,
        exam_name: &str,
        top_n: usize,
    ) -> Vec<DomainSuggestion> {
        if question_text.trim().is_empty() || exam_name.is_empty() {
            return Vec::new();
        }
        let Some(exam) = self.taxonomy.exam(exam_name) else {
            tracing::debug!(exam = exam_name, "Exam not in taxonomy");
            return Vec::new();
        };

        let mut scores = score_domains(question_text, exam);
        scores.sort_by(|a, b| b.1.total_cmp(&a.1));

        let max_score = scores.first().map_or(0.0, |(_, score)| *score);

        scores
            .into_iter()
            .take(top_n)
            .filter(|(_, score)| *score > 0.0)
            .map(|(name, score)| {
                let confidence = calculate_confidence(score, max_score);
                DomainSuggestion {
                    domain_name: name.to_string(),
                    score: round_to(score, 2),
                    confidence: round_to(confidence, 1),
                    confidence_level: ConfidenceTier::from_confidence(confidence),
                }
            })
            .collect()
    }

    /// Suggestions for an exam held in the store, with domain ids attached.
    ///
    /// # Errors
    /// `MissingQuestionText` or `MissingExamId` when the request lacks a
    /// required field. An unknown or inactive exam is not an error and
    /// yields an empty list.
    pub fn suggestions_for_exam<S: DomainStore + ?Sized>(
        &self,
        store: &S,
        request: &SuggestionRequest,
        top_n: usize,
    ) -> Result<Vec<EnrichedSuggestion>> {
        let (text, exam_id) = request.validate()?;

        let Some(exam) = store.active_exam(exam_id) else {
            tracing::debug!(exam_id, "No active exam with this id");
            return Ok(Vec::new());
        };

        let domains = store.active_domains(&exam);
        let enriched = self
            .suggest_domains(text, &exam.name, top_n)
            .into_iter()
            .map(|suggestion| {
                let domain_id = domains
                    .iter()
                    .find(|domain| domain.name == suggestion.domain_name)
                    .map(|domain| domain.id);
                if domain_id.is_none() {
                    tracing::warn!(
                        exam = %exam.name,
                        domain = %suggestion.domain_name,
                        "Suggested domain has no active store record"
                    );
                }
                EnrichedSuggestion {
                    suggestion,
                    domain_id,
                }
            })
            .collect();

        Ok(enriched)
    }

    /// The top suggestion, if it reaches `min_confidence` and maps to a
    /// domain in the store.
    ///
    /// # Errors
    /// Same as [`suggestions_for_exam`](Self::suggestions_for_exam).
    pub fn best_domain_for_question<S: DomainStore + ?Sized>(
        &self,
        store: &S,
        request: &SuggestionRequest,
        min_confidence: f64,
    ) -> Result<Option<EnrichedSuggestion>> {
        let best = self
            .suggestions_for_exam(store, request, 1)?
            .into_iter()
            .next()
            .filter(|best| {
                best.suggestion.confidence >= min_confidence && best.domain_id.is_some()
            });
        Ok(best)
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
