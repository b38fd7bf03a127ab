//! Narrative rendering for the local engine.
//!
//! Output is assembled in a fixed section order from the context and the
//! static tables, so identical input always yields byte-identical text.

use crate::conflict::ConflictCase;
use crate::context::AdvisoryContext;
use crate::fairness::FairnessAssessment;
use crate::fraud::{ClaimRecord, FraudAssessment};
use crate::ranking::RankedRecommendation;
use crate::signals::KeywordSignals;

const DEFAULT_TARGET: &str = "the target community";

/// Render ranked schemes as recommendation text.
pub fn recommendations(context: &AdvisoryContext, ranked: &[RankedRecommendation]) -> String {
    let mut out = String::new();
    out.push_str(&summary_line(context));
    out.push_str("\n\n");

    if ranked.is_empty() {
        out.push_str("No scheme in the catalog matched this context.\n");
        return out;
    }

    for (i, rec) in ranked.iter().enumerate() {
        out.push_str(&format!("{}. {} (score {:.1}/10)\n", i + 1, rec.name, rec.score));
        out.push_str(&format!("   Why it fits: {}\n", rec.rationale));
        out.push_str("   Implementation steps:\n");
        for step in &rec.steps {
            out.push_str(&format!("   - {}\n", step));
        }
        out.push_str(&format!("   Expected outcomes: {}\n", rec.outcomes));
        out.push_str(&format!("   Risks: {}\n\n", rec.risks));
    }

    out.push_str("Phased implementation plan:\n");
    out.push_str(&format!(
        "Phase 1 (0–3 months): Enrol eligible households in {} and complete documentation.\n",
        ranked[0].name
    ));
    if ranked.len() > 1 {
        let rest: Vec<&str> = ranked[1..].iter().map(|r| r.name.as_str()).collect();
        out.push_str(&format!(
            "Phase 2 (3–9 months): Roll out {} in convergence with the first scheme.\n",
            rest.join(" and ")
        ));
    } else {
        out.push_str("Phase 2 (3–9 months): Expand coverage to remaining eligible households.\n");
    }
    out.push_str(
        "Phase 3 (9–18 months): Review outcomes with the Gram Sabha and adjust scheme mix.\n",
    );

    out
}

fn summary_line(context: &AdvisoryContext) -> String {
    let target = if context.target_descriptor().is_empty() {
        DEFAULT_TARGET
    } else {
        context.target_descriptor()
    };

    let location = context.location();
    let place: Vec<&str> = [location.district.as_str(), location.state.as_str()]
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect();
    let place = if place.is_empty() {
        String::new()
    } else {
        format!(" in {}", place.join(", "))
    };

    let land = context.land();
    format!(
        "Recommendations for {}{} (total area {} ha, forest cover {}%, agricultural land {} ha, population {}).",
        target,
        place,
        land.total_area,
        land.forest_cover,
        land.agricultural_land,
        land.population
    )
}

/// Render a conflict analysis from the category template and keyword signals.
pub fn conflict_analysis(
    case: &ConflictCase,
    signals: &KeywordSignals,
    fairness: &FairnessAssessment,
    document_count: usize,
) -> String {
    let template = case.normalized_category.template();
    let mut out = String::new();

    if signals.urgent {
        out.push_str("URGENT: the description indicates an immediate threat; prioritise interim protection.\n\n");
    }

    out.push_str(&format!("Conflict type: {}\n", case.normalized_category.title()));
    out.push_str(&format!("Summary: {}\n\n", template.summary));

    out.push_str("Root causes:\n");
    for cause in template.root_causes {
        out.push_str(&format!("- {}\n", cause));
    }
    if let Some(cause) = &signals.additional_root_cause {
        out.push_str(&format!("- {}\n", cause));
    }

    out.push_str("\nResolution steps:\n");
    let extra = signals.additional_resolution_step.iter().map(String::as_str);
    for (i, step) in template.resolution_steps.iter().copied().chain(extra).enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, step));
    }

    out.push_str("\nLegal framework:\n");
    for law in template.legal_framework {
        out.push_str(&format!("- {}\n", law));
    }
    if let Some(hint) = &signals.state_specific_rule_hint {
        out.push_str(&format!("- State rule: {}\n", hint));
    }

    if !case.parties_involved.is_empty() {
        out.push_str("\nParties involved:\n");
        for (party, detail) in &case.parties_involved {
            out.push_str(&format!("- {}: {}\n", party, detail));
        }
    }

    out.push_str(&format!("\nSupporting documents provided: {}\n", document_count));
    out.push_str(&format!(
        "Recommended approach: {}\nExpected timeline: {}\nFairness score: {:.2}\n",
        template.recommended_approach, template.timeline, fairness.aggregate
    ));

    out
}

/// Render the local fraud check outcome for a claim.
pub fn fraud_analysis(record: &ClaimRecord, assessment: &FraudAssessment) -> String {
    let mut out = String::new();
    let claim_id = if record.claim_id.is_empty() {
        "(unnumbered)"
    } else {
        record.claim_id.as_str()
    };

    out.push_str(&format!(
        "Fraud check for claim {} ({:?} review)\n",
        claim_id, assessment.check_type
    ));
    out.push_str(&format!(
        "Risk score: {:.2}\nPrimary concern: {}\n\n",
        assessment.risk_score, assessment.primary_concern
    ));

    out.push_str("Anomalies:\n");
    if assessment.findings.is_empty() {
        out.push_str("- None detected\n");
    }
    for finding in &assessment.findings {
        out.push_str(&format!("- [{}] {}\n", finding.concern, finding.description));
    }

    out.push_str("\nVerification steps:\n");
    for (i, step) in assessment.verification_steps().iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, step));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RawContext;
    use crate::fraud::FraudCheckType;
    use crate::ranking;
    use std::collections::BTreeMap;

    fn context() -> AdvisoryContext {
        RawContext::with_descriptor("Small farmer")
            .focus("irrigation")
            .land_value("totalArea", 120)
            .land_value("agriculturalLand", 40)
            .land_value("forestCover", 10)
            .land_value("population", 850)
            .located("Odisha", "Koraput")
            .build()
    }

    #[test]
    fn test_recommendations_layout() {
        let context = context();
        let text = recommendations(&context, &ranking::rank(&context));

        assert!(text.starts_with(
            "Recommendations for small farmer in Koraput, Odisha (total area 120 ha, forest cover 10%, agricultural land 40 ha, population 850)."
        ));
        assert!(text.contains("1. PMKSY (score 8.0/10)"));
        assert!(text.contains("2. PM-KISAN (score 7.0/10)"));
        assert!(text.contains("Why it fits:"));
        assert!(text.contains("Phase 1 (0–3 months): Enrol eligible households in PMKSY"));
        assert!(text.contains("Phase 3 (9–18 months)"));
    }

    #[test]
    fn test_recommendations_deterministic() {
        let first = recommendations(&context(), &ranking::rank(&context()));
        let second = recommendations(&context(), &ranking::rank(&context()));
        assert_eq!(first, second);
    }

    #[test]
    fn test_summary_defaults() {
        let context = RawContext::default().build();
        let text = recommendations(&context, &[]);
        assert!(text.starts_with("Recommendations for the target community (total area 0 ha"));
    }

    #[test]
    fn test_conflict_analysis_with_signals() {
        let mut parties = BTreeMap::new();
        parties.insert("Claimant".to_string(), "Ramesh Gond".to_string());
        parties.insert("Neighbour".to_string(), "Forest department plantation".to_string());
        let description = "Urgent boundary dispute in Odisha, lawyer engaged";
        let case = ConflictCase::new("Boundary dispute", description, parties);
        let signals = KeywordSignals::extract(description);
        let fairness = FairnessAssessment::for_category(case.normalized_category);

        let text = conflict_analysis(&case, &signals, &fairness, 2);

        assert!(text.starts_with("URGENT:"));
        assert!(text.contains("Recommended approach: Joint Verification and Mediation"));
        assert!(text.contains("- State rule:"));
        assert!(text.contains("- Claimant: Ramesh Gond\n- Neighbour:"));
        assert!(text.contains("Supporting documents provided: 2"));
        assert_eq!(text, conflict_analysis(&case, &signals, &fairness, 2));
    }

    #[test]
    fn test_conflict_analysis_general_fallback() {
        let case = ConflictCase::new("xyz unrelated", "nothing specific", BTreeMap::new());
        let signals = KeywordSignals::extract(&case.description);
        let fairness = FairnessAssessment::for_category(case.normalized_category);

        let text = conflict_analysis(&case, &signals, &fairness, 0);
        assert!(!text.starts_with("URGENT"));
        assert!(text.contains("Recommended approach: Standard Process"));
        assert!(!text.contains("Parties involved"));
    }

    #[test]
    fn test_fraud_analysis() {
        let record = ClaimRecord {
            claim_id: "IFR-9".to_string(),
            claimant_name: "Lakshmi".to_string(),
            ..Default::default()
        };
        let assessment = FraudAssessment::evaluate(&record, &[], FraudCheckType::Comprehensive);
        let text = fraud_analysis(&record, &assessment);

        assert!(text.starts_with("Fraud check for claim IFR-9 (Comprehensive review)"));
        assert!(text.contains("[Document Authenticity]"));
        assert!(text.contains("Primary concern: Document Authenticity"));
    }
}
