//! Keyword matching and per-domain scoring.

use std::sync::LazyLock;

use quizport_shared::{clean_text, word_count};
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::config::{
    LENGTH_BONUS_PER_WORD, PARTIAL_MATCH_RATIO, PARTIAL_MATCH_WORD_SCORE, PHRASE_BONUS,
    WORD_BONUS,
};
use crate::taxonomy::{DomainKeywords, ExamTaxonomy};

/// Characters that are not word characters, whitespace, `-`, `.` or `/`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DISALLOWED_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s\-./]").expect("valid regex"));

/// Prepare free text for keyword matching.
///
/// Applies [`clean_text`], folds compatibility characters (NFKC),
/// lower-cases, and replaces every character other than word characters,
/// whitespace, `-`, `.` and `/` with a space before collapsing whitespace
/// again. Replacing rather than deleting keeps `"run,gke"` as two words.
///
/// # Examples
/// ```
/// use quizport_suggester::scoring::normalize_for_matching;
///
/// assert_eq!(
///     normalize_for_matching("Use Pub/Sub (or Cloud Tasks)!"),
///     "use pub/sub or cloud tasks"
/// );
/// ```
pub fn normalize_for_matching(text: &str) -> String {
    let folded: String = clean_text(text).nfkc().collect::<String>().to_lowercase();
    clean_text(&DISALLOWED_CHARS.replace_all(&folded, " "))
}

/// Score one keyword against already normalized text.
///
/// A verbatim occurrence scores `occurrences * bonus * (1 + 0.3 * words)`
/// where `bonus` is 1.5 for phrases and 1.0 for single words. Otherwise a
/// multi-word keyword of which at least 60% of the words occur scores
/// `0.3` per occurring word. Matching is by substring, so `"service"` also
/// matches inside `"microservices"`.
pub fn score_keyword(normalized_text: &str, keyword: &str) -> f64 {
    let keyword = keyword.to_lowercase();
    if keyword.is_empty() {
        return 0.0;
    }

    let words: Vec<&str> = keyword.split_whitespace().collect();
    let occurrences = normalized_text.matches(keyword.as_str()).count();

    if occurrences > 0 {
        let bonus = if keyword.contains(' ') {
            PHRASE_BONUS
        } else {
            WORD_BONUS
        };
        let length_bonus = word_count(&keyword) as f64 * LENGTH_BONUS_PER_WORD;
        return occurrences as f64 * bonus * (1.0 + length_bonus);
    }

    if words.len() > 1 {
        let matching = words
            .iter()
            .filter(|word| normalized_text.contains(*word))
            .count();
        if matching as f64 >= words.len() as f64 * PARTIAL_MATCH_RATIO {
            return matching as f64 * PARTIAL_MATCH_WORD_SCORE;
        }
    }

    0.0
}

/// Weighted raw score of one domain against normalized text.
pub fn score_domain(normalized_text: &str, domain: &DomainKeywords) -> f64 {
    domain
        .tiers()
        .map(|(tier, keywords)| {
            let tier_score: f64 = keywords
                .iter()
                .map(|keyword| score_keyword(normalized_text, keyword))
                .sum();
            tier_score * tier.weight()
        })
        .sum()
}

/// Raw scores of every domain of an exam, in declaration order.
///
/// The text is normalized here; callers pass the original question text.
pub fn score_domains<'a>(text: &str, exam: &'a ExamTaxonomy) -> Vec<(&'a str, f64)> {
    let normalized = normalize_for_matching(text);
    exam.domains()
        .iter()
        .map(|domain| (domain.name(), score_domain(&normalized, domain)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::WeightTier;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_normalize_for_matching() {
        assert_eq!(
            normalize_for_matching("  Deploy to GKE, then   Cloud Run! "),
            "deploy to gke then cloud run"
        );
        assert_eq!(
            normalize_for_matching("a/b testing & oauth 2.0"),
            "a/b testing oauth 2.0"
        );
        assert_eq!(normalize_for_matching(""), "");
    }

    #[test]
    fn test_normalize_for_matching_folds_compatibility_characters() {
        assert_eq!(normalize_for_matching("ＧＫＥ"), "gke");
    }

    #[test]
    fn test_score_single_word() {
        // 1 occurrence * 1.0 * (1 + 0.3)
        assert!(approx(score_keyword("use gke today", "gke"), 1.3));
        // 2 occurrences
        assert!(approx(score_keyword("gke and gke", "gke"), 2.6));
    }

    #[test]
    fn test_score_phrase() {
        // 1 occurrence * 1.5 * (1 + 0.6)
        assert!(approx(score_keyword("deploy on cloud run now", "cloud run"), 2.4));
    }

    #[test]
    fn test_score_partial_match() {
        // "cloud" and "mesh" occur, "service" does not: 2/3 >= 60%
        assert!(approx(
            score_keyword("cloud with a mesh", "cloud service mesh"),
            0.6
        ));
        // 1/2 words is below 60%
        assert!(approx(score_keyword("cloud only", "cloud tasks"), 0.0));
    }

    #[test]
    fn test_partial_match_never_applies_to_single_words() {
        assert!(approx(score_keyword("bigquery", "spanner"), 0.0));
    }

    #[test]
    fn test_substring_matching() {
        assert!(approx(score_keyword("microservices", "service"), 1.3));
    }

    #[test]
    fn test_score_domain_applies_tier_weights() {
        let domain = DomainKeywords::new("D")
            .with_keywords(WeightTier::High, ["gke"])
            .with_keywords(WeightTier::Medium, ["gke"])
            .with_keywords(WeightTier::Low, ["gke"]);
        // 1.3 * (3 + 2 + 1)
        assert!(approx(score_domain("gke", &domain), 7.8));
    }

    #[test]
    fn test_score_domains_preserves_declaration_order() {
        let exam = ExamTaxonomy::new("e")
            .with_domain(DomainKeywords::new("B").with_keywords(WeightTier::Low, ["x"]))
            .with_domain(DomainKeywords::new("A").with_keywords(WeightTier::Low, ["y"]));
        let scores = score_domains("Y", &exam);
        assert_eq!(scores[0].0, "B");
        assert_eq!(scores[1].0, "A");
        assert!(approx(scores[1].1, 1.3));
    }
}
