//! Fairness aggregation.
//!
//! Four sub-dimensions are combined into one aggregate with a fixed weight
//! table. Sub-scores come either from a per-category table (local mode) or
//! from model text (remote mode); the weights are the same in both.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::conflict::ConflictCategory;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Sub-score used when model text does not state a dimension.
pub const DEFAULT_REMOTE_SUB_SCORE: f64 = 0.7;

/// Weights for the four fairness dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct FairnessWeights {
    pub rights_protection: f64,
    pub procedural_fairness: f64,
    pub outcome_equity: f64,
    pub implementation_feasibility: f64,
}

impl FairnessWeights {
    /// The only weight table in use. Sums to exactly 1.0.
    pub const STANDARD: Self = Self {
        rights_protection: 0.35,
        procedural_fairness: 0.20,
        outcome_equity: 0.30,
        implementation_feasibility: 0.15,
    };

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.rights_protection
            + self.procedural_fairness
            + self.outcome_equity
            + self.implementation_feasibility
    }
}

impl Default for FairnessWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Weighted fairness evaluation of a conflict resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct FairnessAssessment {
    pub rights_protection: f64,
    pub procedural_fairness: f64,
    pub outcome_equity: f64,
    pub implementation_feasibility: f64,
    pub weights: FairnessWeights,
    /// Weighted sum in [0, 1]
    pub aggregate: f64,
}

impl FairnessAssessment {
    /// Build an assessment from sub-scores. Each is clamped to [0, 1] before
    /// weighting and the aggregate is clamped again.
    pub fn new(
        rights_protection: f64,
        procedural_fairness: f64,
        outcome_equity: f64,
        implementation_feasibility: f64,
    ) -> Self {
        let weights = FairnessWeights::STANDARD;
        let rights_protection = clamp_unit(rights_protection);
        let procedural_fairness = clamp_unit(procedural_fairness);
        let outcome_equity = clamp_unit(outcome_equity);
        let implementation_feasibility = clamp_unit(implementation_feasibility);

        let aggregate = clamp_unit(
            rights_protection * weights.rights_protection
                + procedural_fairness * weights.procedural_fairness
                + outcome_equity * weights.outcome_equity
                + implementation_feasibility * weights.implementation_feasibility,
        );

        Self {
            rights_protection,
            procedural_fairness,
            outcome_equity,
            implementation_feasibility,
            weights,
            aggregate,
        }
    }

    /// Local mode: look up the fixed sub-scores for a category.
    pub fn for_category(category: ConflictCategory) -> Self {
        let (rights, procedural, outcome, feasibility) = match category {
            ConflictCategory::Boundary => (0.80, 0.75, 0.70, 0.65),
            ConflictCategory::IndividualVsCommunity => (0.75, 0.80, 0.70, 0.60),
            ConflictCategory::Inheritance => (0.85, 0.75, 0.80, 0.75),
            ConflictCategory::ResourceUse => (0.70, 0.75, 0.75, 0.70),
            ConflictCategory::Interdepartmental => (0.70, 0.70, 0.65, 0.55),
            ConflictCategory::General => (0.70, 0.70, 0.70, 0.70),
        };
        Self::new(rights, procedural, outcome, feasibility)
    }

    /// Remote mode: capture "<dimension> score ... <number>" from model text,
    /// defaulting each missing dimension to [`DEFAULT_REMOTE_SUB_SCORE`].
    pub fn from_model_text(text: &str) -> Self {
        let [rights, procedural, outcome, feasibility] = dimension_patterns();
        let capture = |re: &Regex| {
            re.captures(text)
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse::<f64>().ok())
                .unwrap_or(DEFAULT_REMOTE_SUB_SCORE)
        };

        Self::new(
            capture(rights),
            capture(procedural),
            capture(outcome),
            capture(feasibility),
        )
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn dimension_patterns() -> &'static [Regex; 4] {
    static PATTERNS: OnceLock<[Regex; 4]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let build = |dimension: &str| {
            Regex::new(&format!(
                r"(?i){dimension}\s+score[^0-9]{{0,20}}?(\d+(?:\.\d+)?|\.\d+)"
            ))
            .expect("fairness dimension regex must compile")
        };
        [
            build(r"rights?\s+protection"),
            build(r"procedural\s+fairness"),
            build(r"outcome\s+equity"),
            build(r"implementation\s+feasibility"),
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        assert!((FairnessWeights::STANDARD.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_every_category_aggregate_in_range() {
        for category in ConflictCategory::all() {
            let assessment = FairnessAssessment::for_category(category);
            assert!((0.0..=1.0).contains(&assessment.aggregate), "{category}");
        }
    }

    #[test]
    fn test_general_aggregate() {
        let assessment = FairnessAssessment::for_category(ConflictCategory::General);
        assert!((assessment.aggregate - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_sub_scores_clamped() {
        let assessment = FairnessAssessment::new(1.7, -0.2, f64::NAN, 0.5);
        assert_eq!(assessment.rights_protection, 1.0);
        assert_eq!(assessment.procedural_fairness, 0.0);
        assert_eq!(assessment.outcome_equity, 0.0);
        assert!((assessment.aggregate - (0.35 + 0.5 * 0.15)).abs() < 1e-9);
    }

    #[test]
    fn test_from_model_text() {
        let text = "Rights protection score: 0.9\n\
                    Procedural fairness score is 0.6\n\
                    Implementation feasibility score - 4";

        let assessment = FairnessAssessment::from_model_text(text);
        assert_eq!(assessment.rights_protection, 0.9);
        assert_eq!(assessment.procedural_fairness, 0.6);
        assert_eq!(assessment.outcome_equity, DEFAULT_REMOTE_SUB_SCORE);
        assert_eq!(assessment.implementation_feasibility, 1.0);
    }

    #[test]
    fn test_from_model_text_leading_dot() {
        let assessment =
            FairnessAssessment::from_model_text("Rights protection score: .4, outcome equity score .85");
        assert_eq!(assessment.rights_protection, 0.4);
        assert_eq!(assessment.outcome_equity, 0.85);
    }

    #[test]
    fn test_from_empty_text_defaults() {
        let assessment = FairnessAssessment::from_model_text("");
        assert!((assessment.aggregate - DEFAULT_REMOTE_SUB_SCORE).abs() < 1e-9);
    }
}
