//! Scoring constants for the domain suggester.

/// Number of suggestions returned when the caller does not ask for a count.
pub const DEFAULT_TOP_N: usize = 3;

/// Minimum confidence for the best-domain shortcut.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 40.0;

/// Multiplier for a verbatim keyword match containing a space.
pub const PHRASE_BONUS: f64 = 1.5;

/// Multiplier for a verbatim single-word keyword match.
pub const WORD_BONUS: f64 = 1.0;

/// Added to the match multiplier for every word in the keyword.
///
/// Longer keywords are more specific, so a three-word phrase scores
/// `1 + 3 * 0.3` times a single occurrence.
pub const LENGTH_BONUS_PER_WORD: f64 = 0.3;

/// Share of a multi-word keyword's words that must occur for a partial match.
pub const PARTIAL_MATCH_RATIO: f64 = 0.6;

/// Score per matching word on the partial-match path.
pub const PARTIAL_MATCH_WORD_SCORE: f64 = 0.3;

/// Lower bound of reported confidence.
pub const MIN_CONFIDENCE: f64 = 5.0;

/// Upper bound of reported confidence.
pub const MAX_CONFIDENCE: f64 = 95.0;
