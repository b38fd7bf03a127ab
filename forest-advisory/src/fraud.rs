//! Local claim-record anomaly checks.
//!
//! A fixed, ordered list of checks is run against a forest rights claim and
//! the similar records supplied with it. Each finding carries a weight; the
//! risk score is a base plus the sum of weights, capped at 1.0.

use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Risk attributed to any claim before checks run.
pub const BASE_RISK: f64 = 0.1;
/// Statutory ceiling on an individual forest rights claim, in hectares.
pub const INDIVIDUAL_AREA_CAP_HECTARES: f64 = 4.0;
/// Last year of occupation that qualifies (the cutoff is 13 December 2005).
pub const OCCUPATION_CUTOFF_YEAR: i32 = 2005;
/// Supporting documents expected with a claim.
pub const MIN_SUPPORTING_DOCUMENTS: usize = 2;

pub const NO_SIGNIFICANT_CONCERN: &str = "No Significant Concern";

const STANDING_VERIFICATION_STEP: &str =
    "Cross-verify the claim with the Gram Sabha resolution and Forest Rights Committee records";

/// A forest rights claim as submitted for verification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase", default)]
pub struct ClaimRecord {
    pub claim_id: String,
    pub claimant_name: String,
    pub village: String,
    pub district: String,
    pub survey_number: String,
    /// "individual" or "community"
    pub claim_type: String,
    /// Hectares
    pub claimed_area: f64,
    /// Year occupation began, if stated
    pub occupation_since: Option<i32>,
    pub documents: Vec<String>,
}

impl ClaimRecord {
    fn is_individual(&self) -> bool {
        !self.claim_type.trim().eq_ignore_ascii_case("community")
    }
}

/// Which checks a fraud request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum FraudCheckType {
    /// Duplicate and overlap checks only
    Duplicate,
    /// Evidence and eligibility checks only
    Document,
    /// Everything
    #[default]
    Comprehensive,
}

impl FraudCheckType {
    /// Parse a free-text check type; unknown values run every check.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "duplicate" | "duplicates" => Self::Duplicate,
            "document" | "documents" => Self::Document,
            _ => Self::Comprehensive,
        }
    }

    fn includes(&self, group: CheckGroup) -> bool {
        match self {
            Self::Comprehensive => true,
            Self::Duplicate => group == CheckGroup::Duplicate,
            Self::Document => group == CheckGroup::Document,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CheckGroup {
    Duplicate,
    Document,
}

/// One anomaly raised by a check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct FraudFinding {
    pub concern: String,
    pub description: String,
    pub weight: f64,
    pub verification_step: String,
}

/// Result of the local fraud check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct FraudAssessment {
    pub check_type: FraudCheckType,
    pub findings: Vec<FraudFinding>,
    /// In [0, 1]
    pub risk_score: f64,
    pub primary_concern: String,
}

impl FraudAssessment {
    /// Run the ordered checks for `check_type`.
    pub fn evaluate(
        record: &ClaimRecord,
        similar_records: &[ClaimRecord],
        check_type: FraudCheckType,
    ) -> Self {
        let mut findings = Vec::new();

        if check_type.includes(CheckGroup::Duplicate) {
            findings.extend(check_duplicate_claimant(record, similar_records));
            findings.extend(check_survey_overlap(record, similar_records));
        }
        if check_type.includes(CheckGroup::Document) {
            findings.extend(check_area_cap(record));
            findings.extend(check_occupation_cutoff(record));
            findings.extend(check_evidence(record));
        }

        let risk_score = (BASE_RISK + findings.iter().map(|f| f.weight).sum::<f64>()).min(1.0);

        // Highest weight wins; on ties the earlier check is kept.
        let primary_concern = findings
            .iter()
            .fold(None::<&FraudFinding>, |best, f| match best {
                Some(b) if b.weight >= f.weight => Some(b),
                _ => Some(f),
            })
            .map(|f| f.concern.clone())
            .unwrap_or_else(|| NO_SIGNIFICANT_CONCERN.to_string());

        debug!(
            claim_id = %record.claim_id,
            findings = findings.len(),
            risk_score,
            "Fraud checks evaluated"
        );

        Self {
            check_type,
            findings,
            risk_score,
            primary_concern,
        }
    }

    /// Anomaly descriptions in check order.
    pub fn anomalies(&self) -> Vec<String> {
        self.findings.iter().map(|f| f.description.clone()).collect()
    }

    /// Per-finding verification steps followed by the standing step.
    pub fn verification_steps(&self) -> Vec<String> {
        self.findings
            .iter()
            .map(|f| f.verification_step.clone())
            .chain(std::iter::once(STANDING_VERIFICATION_STEP.to_string()))
            .collect()
    }
}

fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn is_other_claim(record: &ClaimRecord, other: &ClaimRecord) -> bool {
    record.claim_id.is_empty() || record.claim_id != other.claim_id
}

fn check_duplicate_claimant(record: &ClaimRecord, similar: &[ClaimRecord]) -> Option<FraudFinding> {
    let name = normalize_name(&record.claimant_name);
    if name.is_empty() {
        return None;
    }
    let village = normalize_name(&record.village);

    let duplicate = similar.iter().find(|other| {
        is_other_claim(record, other)
            && normalize_name(&other.claimant_name) == name
            && normalize_name(&other.village) == village
    })?;

    Some(FraudFinding {
        concern: "Duplicate Claim".to_string(),
        description: format!(
            "Claimant '{}' already appears in claim {} from the same village",
            record.claimant_name.trim(),
            if duplicate.claim_id.is_empty() { "(unnumbered)" } else { duplicate.claim_id.as_str() }
        ),
        weight: 0.35,
        verification_step: "Compare both claims' family details and Gram Sabha entries to rule out a repeat filing".to_string(),
    })
}

fn check_survey_overlap(record: &ClaimRecord, similar: &[ClaimRecord]) -> Option<FraudFinding> {
    let survey = record.survey_number.trim();
    if survey.is_empty() {
        return None;
    }

    similar
        .iter()
        .find(|other| is_other_claim(record, other) && other.survey_number.trim() == survey)?;

    Some(FraudFinding {
        concern: "Boundary Overlap".to_string(),
        description: format!("Survey number {} is also claimed in another record", survey),
        weight: 0.30,
        verification_step: "Conduct a joint field survey of the overlapping survey number with GPS demarcation".to_string(),
    })
}

fn check_area_cap(record: &ClaimRecord) -> Option<FraudFinding> {
    if !record.is_individual() || record.claimed_area <= INDIVIDUAL_AREA_CAP_HECTARES {
        return None;
    }

    Some(FraudFinding {
        concern: "Area Limit".to_string(),
        description: format!(
            "Individual claim of {:.2} ha exceeds the {} ha ceiling",
            record.claimed_area, INDIVIDUAL_AREA_CAP_HECTARES
        ),
        weight: 0.25,
        verification_step: "Measure the area under actual occupation and restrict recognition to the statutory ceiling".to_string(),
    })
}

fn check_occupation_cutoff(record: &ClaimRecord) -> Option<FraudFinding> {
    let year = record.occupation_since.filter(|y| *y > OCCUPATION_CUTOFF_YEAR)?;

    Some(FraudFinding {
        concern: "Eligibility".to_string(),
        description: format!(
            "Occupation since {} is after the 13 December {} cutoff",
            year, OCCUPATION_CUTOFF_YEAR
        ),
        weight: 0.30,
        verification_step: "Check satellite imagery and elder testimony for occupation before the cutoff date".to_string(),
    })
}

fn check_evidence(record: &ClaimRecord) -> Option<FraudFinding> {
    let count = record.documents.iter().filter(|d| !d.trim().is_empty()).count();
    if count >= MIN_SUPPORTING_DOCUMENTS {
        return None;
    }

    Some(FraudFinding {
        concern: "Document Authenticity".to_string(),
        description: format!(
            "Only {} supporting document(s) provided; at least {} are expected",
            count, MIN_SUPPORTING_DOCUMENTS
        ),
        weight: 0.15,
        verification_step: "Collect at least two independent forms of evidence listed in Rule 13 of the FRA Rules".to_string(),
    })
}
