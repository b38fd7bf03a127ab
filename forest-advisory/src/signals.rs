//! Keyword signal extraction from dispute narratives.

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

const URGENT_TERMS: &[&str] = &["urgent", "immediate", "violence", "threat", "eviction", "clash"];
const LEGAL_TERMS: &[&str] = &[
    "court",
    "lawyer",
    "advocate",
    "litigation",
    "legal action",
    "legal notice",
    "case filed",
    "fir filed",
    "petition",
];
const MIGRATION_TERMS: &[&str] = &["migrat", "displace", "relocat"];
const ILLEGAL_EXTRACTION_TERMS: &[&str] = &["illegal", "mining", "logging", "felling", "smuggl", "poach"];

/// State name → rule hint. Evaluated in order, first match wins.
const STATE_RULE_HINTS: &[(&str, &str)] = &[
    (
        "odisha",
        "Odisha routes FRA title corrections through the Sub-Divisional Level Committee under the state's 2008 implementation guidelines.",
    ),
    (
        "maharashtra",
        "Maharashtra permits Gram Sabhas to manage community forest resources directly, including tendu and bamboo sale.",
    ),
    (
        "chhattisgarh",
        "Chhattisgarh requires joint revenue-forest verification before any community forest resource title is amended.",
    ),
    (
        "madhya pradesh",
        "Madhya Pradesh reviews rejected claims through the Van Mitra portal; check whether the claim was re-examined there.",
    ),
    (
        "jharkhand",
        "Jharkhand claims in Fifth Schedule areas must also respect customary rights recorded under the CNT and SPT Acts.",
    ),
    (
        "telangana",
        "Telangana podu cultivation claims are verified against satellite imagery of the cutoff year before titles are issued.",
    ),
];

const ILLEGAL_EXTRACTION_ROOT_CAUSE: &str =
    "Illegal extraction of forest resources is degrading the disputed area and sharpening competing claims.";
const MIGRATION_ROOT_CAUSE: &str =
    "Migration or displacement has altered traditional patterns of occupation and resource use.";
const LEGAL_RESOLUTION_STEP: &str =
    "Coordinate with the District Legal Services Authority so pending litigation and the administrative process do not conflict.";
const URGENT_RESOLUTION_STEP: &str =
    "Convene an emergency meeting of the Sub-Divisional Level Committee within 7 days and secure the status quo on the ground.";

/// Signals extracted from free text. Stateless and derived per invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct KeywordSignals {
    pub urgent: bool,
    pub legal_case_likely: bool,
    pub migration_mentioned: bool,
    pub illegal_extraction_mentioned: bool,
    pub state_specific_rule_hint: Option<String>,
    pub additional_root_cause: Option<String>,
    pub additional_resolution_step: Option<String>,
}

impl KeywordSignals {
    /// Scan text for the fixed term groups.
    ///
    /// Terms match at the start of a word; no negation handling.
    pub fn extract(text: &str) -> Self {
        let lower = text.to_lowercase();
        let has = |terms: &[&str]| terms.iter().any(|t| contains_term(&lower, t));

        let urgent = has(URGENT_TERMS);
        let legal_case_likely = has(LEGAL_TERMS);
        let migration_mentioned = has(MIGRATION_TERMS);
        let illegal_extraction_mentioned = has(ILLEGAL_EXTRACTION_TERMS);

        let state_specific_rule_hint = STATE_RULE_HINTS
            .iter()
            .find(|(state, _)| lower.contains(state))
            .map(|(_, hint)| hint.to_string());

        let additional_root_cause = if illegal_extraction_mentioned {
            Some(ILLEGAL_EXTRACTION_ROOT_CAUSE.to_string())
        } else if migration_mentioned {
            Some(MIGRATION_ROOT_CAUSE.to_string())
        } else {
            None
        };

        let additional_resolution_step = if legal_case_likely {
            Some(LEGAL_RESOLUTION_STEP.to_string())
        } else if urgent {
            Some(URGENT_RESOLUTION_STEP.to_string())
        } else {
            None
        };

        Self {
            urgent,
            legal_case_likely,
            migration_mentioned,
            illegal_extraction_mentioned,
            state_specific_rule_hint,
            additional_root_cause,
            additional_resolution_step,
        }
    }

    /// Whether any signal fired.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Whether `term` occurs in `haystack` at the start of a word. Terms are
/// stems, so anything may follow ("migrat" matches "migrated").
pub(crate) fn contains_term(haystack: &str, term: &str) -> bool {
    haystack.match_indices(term).any(|(at, _)| {
        haystack[..at]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_has_no_signals() {
        let signals = KeywordSignals::extract("Two families disagree about a plot.");
        assert!(signals.is_empty());
    }

    #[test]
    fn test_urgent_and_legal() {
        let signals =
            KeywordSignals::extract("Threat of EVICTION; the family has filed a petition in court.");

        assert!(signals.urgent);
        assert!(signals.legal_case_likely);
        assert_eq!(
            signals.additional_resolution_step.as_deref(),
            Some(LEGAL_RESOLUTION_STEP)
        );
    }

    #[test]
    fn test_root_cause_prefers_illegal_extraction() {
        let signals = KeywordSignals::extract("Illegal logging after families were displaced.");

        assert!(signals.migration_mentioned);
        assert!(signals.illegal_extraction_mentioned);
        assert_eq!(
            signals.additional_root_cause.as_deref(),
            Some(ILLEGAL_EXTRACTION_ROOT_CAUSE)
        );
    }

    #[test]
    fn test_terms_match_word_starts_only() {
        let signals = KeywordSignals::extract("Officials are determining the plot line");
        assert!(!signals.illegal_extraction_mentioned);
        assert_eq!(signals.additional_root_cause, None);

        let signals = KeywordSignals::extract("Mining leases were granted upstream.");
        assert!(signals.illegal_extraction_mentioned);
    }

    #[test]
    fn test_state_hint_first_match() {
        let signals = KeywordSignals::extract("Villages on the Odisha - Chhattisgarh border");
        let hint = signals.state_specific_rule_hint.unwrap();
        assert!(hint.starts_with("Odisha"));
    }
}
