//! Scheme scoring and top-N selection.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{SchemeCandidate, CATALOG, MAX_SCHEME_SCORE};
use crate::context::AdvisoryContext;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Number of schemes selected per recommendation.
pub const TOP_N: usize = 3;

/// Implementation-score bonus for high-priority requests.
pub const HIGH_PRIORITY_BONUS: f64 = 0.1;

/// A scheme selected for recommendation, with its rendered text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct RankedRecommendation {
    pub name: String,
    /// In [0, 10]
    pub score: f64,
    pub rationale: String,
    pub steps: Vec<String>,
    pub outcomes: String,
    pub risks: String,
}

impl RankedRecommendation {
    fn from_scored(candidate: &SchemeCandidate, score: f64) -> Self {
        let text = &candidate.text;
        Self {
            name: candidate.name.to_string(),
            score,
            rationale: text.rationale.to_string(),
            steps: text.steps.iter().map(|s| s.to_string()).collect(),
            outcomes: text.outcomes.to_string(),
            risks: text.risks.to_string(),
        }
    }
}

/// Score every candidate, preserving catalog order.
pub fn score_all<'a>(
    candidates: &'a [SchemeCandidate],
    context: &AdvisoryContext,
) -> Vec<(&'a SchemeCandidate, f64)> {
    candidates.iter().map(|c| (c, c.score(context))).collect()
}

/// Rank `candidates` against a context and keep the best `n`.
///
/// The sort is stable, so equal scores keep catalog order.
pub fn rank_candidates(
    candidates: &[SchemeCandidate],
    context: &AdvisoryContext,
    n: usize,
) -> Vec<RankedRecommendation> {
    let mut scored = score_all(candidates, context);
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    let ranked: Vec<RankedRecommendation> = scored
        .into_iter()
        .take(n)
        .map(|(candidate, score)| RankedRecommendation::from_scored(candidate, score))
        .collect();

    debug!(
        selected = ?ranked.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        "Schemes ranked"
    );

    ranked
}

/// Rank the fixed catalog and keep the top [`TOP_N`].
pub fn rank(context: &AdvisoryContext) -> Vec<RankedRecommendation> {
    rank_candidates(CATALOG, context, TOP_N)
}

/// Mean selected score normalized to [0, 1], plus [`HIGH_PRIORITY_BONUS`]
/// for high-priority requests, clamped to [0, 1].
pub fn implementation_score(ranked: &[RankedRecommendation], context: &AdvisoryContext) -> f64 {
    let base = if ranked.is_empty() {
        0.0
    } else {
        let total: f64 = ranked.iter().map(|r| r.score).sum();
        total / (ranked.len() as f64 * MAX_SCHEME_SCORE)
    };

    let bonus = if context.is_high_priority() {
        HIGH_PRIORITY_BONUS
    } else {
        0.0
    };

    (base + bonus).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SchemeText;
    use crate::context::RawContext;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn small_farmer_context() -> AdvisoryContext {
        RawContext::with_descriptor("small farmer")
            .focus("irrigation")
            .land_value("agriculturalLand", 40)
            .land_value("forestCover", 10)
            .build()
    }

    #[test]
    fn test_small_farmer_irrigation_example() {
        let ranked = rank(&small_farmer_context());
        let names: Vec<_> = ranked.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(ranked.len(), TOP_N);
        assert_eq!(names[0], "PMKSY");
        assert_eq!(names[1], "PM-KISAN");
        assert!(!names.contains(&"PM-JAY"));
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        // Nothing matches, so every scheme scores 0 and order is the catalog's.
        let ranked = rank(&RawContext::default().build());
        let names: Vec<_> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["PM-KISAN", "PMKSY", "MGNREGA"]);
        assert!(ranked.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn test_smaller_catalog() {
        fn always_five(_: &AdvisoryContext) -> f64 {
            5.0
        }
        let tiny = [SchemeCandidate {
            name: "Only Scheme",
            tags: &[],
            score_fn: always_five,
            text: SchemeText::GENERIC,
        }];

        let ranked = rank_candidates(&tiny, &small_farmer_context(), TOP_N);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].rationale, SchemeText::GENERIC.rationale);
    }

    #[test]
    fn test_candidate_text_is_rendered() {
        fn always_three(_: &AdvisoryContext) -> f64 {
            3.0
        }
        // Shares a catalog name but carries its own text.
        let custom = [SchemeCandidate {
            name: "PMKSY",
            tags: &[],
            score_fn: always_three,
            text: SchemeText {
                rationale: "Village tank desilting",
                steps: &["Survey the tank"],
                outcomes: "Restored storage",
                risks: "Monsoon delays",
            },
        }];

        let ranked = rank_candidates(&custom, &small_farmer_context(), TOP_N);
        assert_eq!(ranked[0].rationale, "Village tank desilting");
        assert_eq!(ranked[0].steps, vec!["Survey the tank"]);
        assert_eq!(ranked[0].risks, "Monsoon delays");
    }

    #[test]
    fn test_unbounded_score_fn_is_clamped() {
        fn runaway(_: &AdvisoryContext) -> f64 {
            42.0
        }
        let wild = [SchemeCandidate {
            name: "Runaway",
            tags: &[],
            score_fn: runaway,
            text: SchemeText::GENERIC,
        }];

        let ranked = rank_candidates(&wild, &small_farmer_context(), TOP_N);
        assert_eq!(ranked[0].score, MAX_SCHEME_SCORE);
    }

    #[test]
    fn test_implementation_score() {
        let context = small_farmer_context();
        let ranked = rank(&context);
        // 8 + 7 + 1 (MGNREGA) over 30
        assert!((implementation_score(&ranked, &context) - 16.0 / 30.0).abs() < 1e-9);

        let high = RawContext::with_descriptor("small farmer")
            .focus("irrigation")
            .priority("High")
            .land_value("agriculturalLand", 40)
            .build();
        let ranked_high = rank(&high);
        assert!((implementation_score(&ranked_high, &high) - (16.0 / 30.0 + 0.1)).abs() < 1e-9);

        assert_eq!(implementation_score(&[], &high), HIGH_PRIORITY_BONUS);
    }

    proptest! {
        #[test]
        fn proptest_scores_bounded_and_unique(
            descriptor in "[a-z ]{0,60}",
            forest in -50.0f64..200.0,
            agri in -50.0f64..2000.0,
            population in 0u32..20000,
        ) {
            let context = RawContext::with_descriptor(descriptor)
                .land_value("forestCover", forest)
                .land_value("agriculturalLand", agri)
                .land_value("population", population)
                .build();

            for scheme in CATALOG {
                let score = scheme.score(&context);
                prop_assert!((0.0..=MAX_SCHEME_SCORE).contains(&score));
            }

            let ranked = rank(&context);
            prop_assert!(ranked.len() <= TOP_N);
            let unique: HashSet<_> = ranked.iter().map(|r| r.name.clone()).collect();
            prop_assert_eq!(unique.len(), ranked.len());
            prop_assert_eq!(rank(&context), ranked);
        }
    }
}
