//! Structured-field extraction from free-form model output.
//!
//! Every extractor is best-effort and total: when the text does not contain
//! what is looked for, a documented default is returned.

use std::sync::OnceLock;

use regex::Regex;

use crate::catalog::CATALOG;
use crate::ranking::TOP_N;
use crate::signals::contains_term;

/// Timeline used when the text names no day/week/month range.
pub const DEFAULT_TIMELINE: &str = "30–60 days";
/// Risk score used when the text never mentions "risk" with a number.
pub const DEFAULT_RISK_SCORE: f64 = 0.3;
/// Approach label when no approach keyword is present.
pub const DEFAULT_APPROACH: &str = "Standard Process";
/// Concern label when no concern keyword is present.
pub const DEFAULT_PRIMARY_CONCERN: &str = "General Verification";

const BASE_IMPLEMENTATION_SCORE: f64 = 0.5;
const IMPLEMENTATION_KEYWORD_STEP: f64 = 0.1;

const POSITIVE_KEYWORDS: &[&str] = &[
    "feasible",
    "effective",
    "sustainable",
    "beneficial",
    "successful",
    "recommended",
];

/// Keyword → approach label, first match wins.
const APPROACH_KEYWORDS: &[(&str, &str)] = &[
    ("mediation", "Mediation"),
    ("legal", "Legal Resolution"),
    ("community", "Community-based Resolution"),
];

/// Keyword stems → anomaly label, in reporting order.
const ANOMALY_KEYWORDS: &[(&[&str], &str)] = &[
    (&["duplicate"], "Duplicate claim detected"),
    (&["overlap"], "Overlapping land boundaries"),
    (&["forg", "fabricat"], "Possible document forgery"),
    (&["inconsisten"], "Inconsistent claim details"),
    (&["exceed"], "Claimed area exceeds statutory limit"),
];

/// Keyword stem → primary concern, first match wins.
const CONCERN_KEYWORDS: &[(&str, &str)] = &[
    ("duplicate", "Duplicate Claim"),
    ("forg", "Document Authenticity"),
    ("overlap", "Boundary Overlap"),
];

fn timeline_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\d+\s*(?:-|–|to)\s*\d+\s*(?:days?|weeks?|months?)")
            .expect("timeline regex must compile")
    })
}

fn risk_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)risk[^0-9]{0,30}?(\d+(?:\.\d+)?|\.\d+)").expect("risk regex must compile")
    })
}

/// Catalog scheme names mentioned in the text, in catalog order, at most
/// [`TOP_N`].
pub fn funding_schemes(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    CATALOG
        .iter()
        .filter(|s| lower.contains(&s.name.to_lowercase()))
        .take(TOP_N)
        .map(|s| s.name.to_string())
        .collect()
}

/// `0.5 + 0.1` per positive keyword present, capped at 1.0.
pub fn implementation_score(text: &str) -> f64 {
    let lower = text.to_lowercase();
    let hits = POSITIVE_KEYWORDS
        .iter()
        .filter(|k| lower.contains(*k))
        .count();

    (BASE_IMPLEMENTATION_SCORE + IMPLEMENTATION_KEYWORD_STEP * hits as f64).min(1.0)
}

/// Approach label for the first keyword (in table order) present at the
/// start of a word, so "illegal" does not read as "legal".
pub fn recommended_approach(text: &str) -> String {
    let lower = text.to_lowercase();
    APPROACH_KEYWORDS
        .iter()
        .find(|(keyword, _)| contains_term(&lower, keyword))
        .map(|(_, label)| *label)
        .unwrap_or(DEFAULT_APPROACH)
        .to_string()
}

/// First day/week/month range in the text, or [`DEFAULT_TIMELINE`].
pub fn timeline(text: &str) -> String {
    timeline_re()
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| DEFAULT_TIMELINE.to_string())
}

/// First number following "risk", capped at 1.0, or [`DEFAULT_RISK_SCORE`].
pub fn risk_score(text: &str) -> f64 {
    risk_re()
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(|score| score.min(1.0))
        .unwrap_or(DEFAULT_RISK_SCORE)
}

/// Anomaly labels for every keyword group present.
pub fn anomalies(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    ANOMALY_KEYWORDS
        .iter()
        .filter(|(stems, _)| stems.iter().any(|s| lower.contains(s)))
        .map(|(_, label)| label.to_string())
        .collect()
}

/// Primary concern label for the first keyword present.
pub fn primary_concern(text: &str) -> String {
    let lower = text.to_lowercase();
    CONCERN_KEYWORDS
        .iter()
        .find(|(stem, _)| lower.contains(stem))
        .map(|(_, label)| *label)
        .unwrap_or(DEFAULT_PRIMARY_CONCERN)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_funding_schemes_catalog_order() {
        let text = "Start with pmksy, then MGNREGA. PM-KISAN support also helps. CAMPA later.";
        assert_eq!(funding_schemes(text), vec!["PM-KISAN", "PMKSY", "MGNREGA"]);
        assert!(funding_schemes("nothing relevant").is_empty());
    }

    #[test]
    fn test_implementation_score() {
        assert_eq!(implementation_score("plain"), 0.5);
        assert!((implementation_score("Feasible and effective") - 0.7).abs() < 1e-9);
        let all = POSITIVE_KEYWORDS.join(" ");
        assert_eq!(implementation_score(&all), 1.0);
    }

    #[test]
    fn test_recommended_approach_table_order() {
        assert_eq!(recommended_approach("community first, mediation next"), "Mediation");
        assert_eq!(recommended_approach("Pursue LEGAL remedies"), "Legal Resolution");
        assert_eq!(recommended_approach("Community dialogue"), "Community-based Resolution");
        assert_eq!(recommended_approach("no keywords"), DEFAULT_APPROACH);
        assert_eq!(recommended_approach("illegal felling reported"), DEFAULT_APPROACH);
    }

    #[test]
    fn test_timeline() {
        assert_eq!(timeline("Expect resolution in 2-3 months."), "2-3 months");
        assert_eq!(timeline("Between 45 to 90 days, then 1-2 weeks"), "45 to 90 days");
        assert_eq!(timeline("soon"), DEFAULT_TIMELINE);
    }

    #[test]
    fn test_risk_score() {
        assert_eq!(risk_score("The overall risk score of 0.65 is moderate."), 0.65);
        assert_eq!(risk_score("Risk: 7"), 1.0);
        assert_eq!(risk_score("Overall risk score of .65"), 0.65);
        assert_eq!(risk_score("Everything looks fine, score 0.9"), DEFAULT_RISK_SCORE);
    }

    #[test]
    fn test_anomalies_and_concern() {
        let text = "Possible forgery of the survey map; claim overlaps a neighbour's plot.";
        assert_eq!(
            anomalies(text),
            vec!["Overlapping land boundaries", "Possible document forgery"]
        );
        assert_eq!(primary_concern(text), "Document Authenticity");
        assert!(anomalies("clean").is_empty());
        assert_eq!(primary_concern("clean"), DEFAULT_PRIMARY_CONCERN);
    }
}
