//! Confidence curve and confidence tiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{MAX_CONFIDENCE, MIN_CONFIDENCE};

/// Human-readable bucket of a confidence percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfidenceTier {
    /// Below 35.
    #[serde(rename = "Very Low")]
    VeryLow,
    /// 35 up to 55.
    Low,
    /// 55 up to 75.
    Medium,
    /// 75 and above.
    High,
}

impl ConfidenceTier {
    /// Bucket a confidence percentage.
    #[must_use]
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 75.0 {
            Self::High
        } else if confidence >= 55.0 {
            Self::Medium
        } else if confidence >= 35.0 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    /// Label used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Confidence percentage of a score relative to the best score.
///
/// The relative score `x = score / max_score * 100` goes through a piecewise
/// linear curve that flattens towards the top, and the result is clamped to
/// `[5, 95]`:
///
/// | x | confidence |
/// |---|---|
/// | ≥ 80 | 85 + 0.5 (x − 80) |
/// | ≥ 60 | 70 + 0.75 (x − 60) |
/// | ≥ 40 | 50 + (x − 40) |
/// | ≥ 20 | 30 + (x − 20) |
/// | < 20 | 1.5 x |
///
/// A non-positive `max_score` yields the lower bound.
#[must_use]
pub fn calculate_confidence(score: f64, max_score: f64) -> f64 {
    if max_score <= 0.0 {
        return MIN_CONFIDENCE;
    }

    let relative = score / max_score * 100.0;
    let confidence = if relative >= 80.0 {
        85.0 + (relative - 80.0) * 0.5
    } else if relative >= 60.0 {
        70.0 + (relative - 60.0) * 0.75
    } else if relative >= 40.0 {
        50.0 + (relative - 40.0)
    } else if relative >= 20.0 {
        30.0 + (relative - 20.0)
    } else {
        relative * 1.5
    };

    confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_top_score_is_capped() {
        assert!(approx(calculate_confidence(10.0, 10.0), 95.0));
    }

    #[test]
    fn test_curve_segments() {
        assert!(approx(calculate_confidence(80.0, 100.0), 85.0));
        assert!(approx(calculate_confidence(70.0, 100.0), 77.5));
        assert!(approx(calculate_confidence(50.0, 100.0), 60.0));
        assert!(approx(calculate_confidence(25.0, 100.0), 35.0));
        assert!(approx(calculate_confidence(10.0, 100.0), 15.0));
    }

    #[test]
    fn test_lower_clamp() {
        assert!(approx(calculate_confidence(1.0, 100.0), 5.0));
        assert!(approx(calculate_confidence(0.0, 0.0), 5.0));
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(ConfidenceTier::from_confidence(95.0), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_confidence(75.0), ConfidenceTier::High);
        assert_eq!(
            ConfidenceTier::from_confidence(74.9),
            ConfidenceTier::Medium
        );
        assert_eq!(
            ConfidenceTier::from_confidence(55.0),
            ConfidenceTier::Medium
        );
        assert_eq!(ConfidenceTier::from_confidence(35.0), ConfidenceTier::Low);
        assert_eq!(
            ConfidenceTier::from_confidence(34.9),
            ConfidenceTier::VeryLow
        );
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(ConfidenceTier::VeryLow.to_string(), "Very Low");
        assert_eq!(ConfidenceTier::High.to_string(), "High");
    }
}
