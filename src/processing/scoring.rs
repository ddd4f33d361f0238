//! Weighted aggregation of sub-scores and hiring recommendation

use serde::{Deserialize, Serialize};
use std::fmt;

pub const SKILL_WEIGHT: f64 = 0.5;
pub const SIMILARITY_WEIGHT: f64 = 0.3;
pub const EXPERIENCE_WEIGHT: f64 = 0.2;

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `0.5 * skills + 0.3 * similarity + 0.2 * experience`, rounded to 2 decimals
pub fn overall_score(skill_match: f64, text_similarity: f64, experience_match: f64) -> f64 {
    let overall = skill_match * SKILL_WEIGHT
        + text_similarity * SIMILARITY_WEIGHT
        + experience_match * EXPERIENCE_WEIGHT;

    round2(overall).clamp(0.0, 100.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    Strong,
    Good,
    Possible,
    Weak,
}

impl Recommendation {
    pub const ALL: [Recommendation; 4] = [
        Recommendation::Strong,
        Recommendation::Good,
        Recommendation::Possible,
        Recommendation::Weak,
    ];

    /// Thresholds are inclusive lower bounds, checked highest first
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            Recommendation::Strong
        } else if score >= 60.0 {
            Recommendation::Good
        } else if score >= 40.0 {
            Recommendation::Possible
        } else {
            Recommendation::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Recommendation::Strong => "STRONG MATCH",
            Recommendation::Good => "GOOD MATCH",
            Recommendation::Possible => "POSSIBLE MATCH",
            Recommendation::Weak => "WEAK MATCH",
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            Recommendation::Strong => "Schedule Interview",
            Recommendation::Good => "Review Carefully",
            Recommendation::Possible => "Consider for Junior Role",
            Recommendation::Weak => "Not Recommended",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} - {}", self.label(), self.action())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        assert!((SKILL_WEIGHT + SIMILARITY_WEIGHT + EXPERIENCE_WEIGHT - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_equal_sub_scores_yield_same_overall() {
        for x in [0.0, 12.5, 33.33, 50.0, 87.65, 100.0] {
            assert_eq!(overall_score(x, x, x), x);
        }
    }

    #[test]
    fn test_worked_example_is_good_match() {
        let overall = overall_score(50.0, 60.0, 100.0);
        assert_eq!(overall, 63.0);
        assert_eq!(Recommendation::from_score(overall), Recommendation::Good);
    }

    #[test]
    fn test_recommendation_boundaries() {
        assert_eq!(Recommendation::from_score(75.0), Recommendation::Strong);
        assert_eq!(Recommendation::from_score(74.99), Recommendation::Good);
        assert_eq!(Recommendation::from_score(60.0), Recommendation::Good);
        assert_eq!(Recommendation::from_score(40.0), Recommendation::Possible);
        assert_eq!(Recommendation::from_score(39.99), Recommendation::Weak);
        assert_eq!(Recommendation::from_score(0.0), Recommendation::Weak);
    }

    #[test]
    fn test_display_includes_action() {
        assert_eq!(Recommendation::Strong.to_string(), "STRONG MATCH - Schedule Interview");
    }
}
