//! Prompt assembly for the remote model.
//!
//! Prompts ask for the phrases the extraction heuristics look for
//! ("risk score", "<dimension> score", a day/week/month range), so remote
//! answers can be mapped back onto the structured response fields.

use forest_advisory::{AdvisoryContext, ClaimRecord, ConflictCase, FraudCheckType, CATALOG};

const SYSTEM_PROMPT: &str = "You are an advisor to Indian forest-land administrators working under the \
Forest Rights Act, 2006. Give practical, lawful, community-centred guidance. Be concise and concrete.";

/// Builds gateway prompts from request data.
pub struct PromptAssembler;

impl PromptAssembler {
    pub fn system_prompt() -> &'static str {
        SYSTEM_PROMPT
    }

    /// Prompt for scheme recommendations.
    pub fn recommendation(context: &AdvisoryContext) -> String {
        let land = context.land();
        let location = context.location();
        let mut prompt = String::new();

        prompt.push_str("Recommend the three most suitable government schemes for this community.\n\n");
        prompt.push_str(&format!("Target: {}\n", context.target_descriptor()));
        if !location.state.is_empty() || !location.district.is_empty() {
            prompt.push_str(&format!("Location: {}, {}\n", location.district, location.state));
        }
        prompt.push_str(&format!(
            "Land: total {} ha, forest cover {}%, agricultural {} ha, population {}\n",
            land.total_area, land.forest_cover, land.agricultural_land, land.population
        ));
        if !context.focus_area().is_empty() {
            prompt.push_str(&format!("Focus area: {}\n", context.focus_area()));
        }
        if !context.priority().is_empty() {
            prompt.push_str(&format!("Priority: {}\n", context.priority()));
        }

        let names: Vec<&str> = CATALOG.iter().map(|s| s.name).collect();
        prompt.push_str(&format!("\nChoose from: {}.\n", names.join(", ")));
        prompt.push_str(
            "For each scheme explain why it fits, the implementation steps, expected outcomes and risks. \
State whether the plan is feasible and sustainable.\n",
        );

        prompt
    }

    /// Prompt for a conflict analysis.
    pub fn conflict(case: &ConflictCase, documents: &[String]) -> String {
        let mut prompt = String::new();

        prompt.push_str("Analyse this forest rights dispute and propose a resolution.\n\n");
        prompt.push_str(&format!(
            "Conflict type: {} (classified as {})\n",
            case.raw_type,
            case.normalized_category.title()
        ));
        prompt.push_str(&format!("Description: {}\n", case.description));

        if !case.parties_involved.is_empty() {
            prompt.push_str("Parties:\n");
            for (party, detail) in &case.parties_involved {
                prompt.push_str(&format!("- {}: {}\n", party, detail));
            }
        }
        if !documents.is_empty() {
            prompt.push_str(&format!("Documents on file: {}\n", documents.join(", ")));
        }

        prompt.push_str(
            "\nInclude root causes, resolution steps, the legal framework, whether mediation, legal \
or community-based resolution is recommended, and an expected timeline as a range (for example \
30-60 days). Finish with four lines: rights protection score, procedural fairness score, outcome \
equity score and implementation feasibility score, each between 0 and 1.\n",
        );

        prompt
    }

    /// Prompt for a fraud check.
    pub fn fraud(record: &ClaimRecord, similar: &[ClaimRecord], check_type: FraudCheckType) -> String {
        let mut prompt = String::new();

        prompt.push_str(&format!(
            "Review this forest rights claim for possible fraud ({:?} check).\n\n",
            check_type
        ));
        prompt.push_str(&format!(
            "Claim {}: {} of {}, survey {}, {} claim for {} ha",
            record.claim_id,
            record.claimant_name,
            record.village,
            record.survey_number,
            record.claim_type,
            record.claimed_area
        ));
        if let Some(year) = record.occupation_since {
            prompt.push_str(&format!(", occupied since {}", year));
        }
        prompt.push_str(&format!(", {} document(s)\n", record.documents.len()));

        if !similar.is_empty() {
            prompt.push_str("Similar records:\n");
            for other in similar {
                prompt.push_str(&format!(
                    "- {}: {} of {}, survey {}\n",
                    other.claim_id, other.claimant_name, other.village, other.survey_number
                ));
            }
        }

        prompt.push_str(
            "\nReport any duplicate, overlapping, forged, inconsistent or area-exceeding details, \
and give an overall risk score between 0 and 1.\n",
        );

        prompt
    }
}
