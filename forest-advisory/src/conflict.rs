//! Conflict category normalization.
//!
//! Free-text conflict labels are mapped onto a closed set of categories by
//! an ordered table of `(pattern, category)` pairs. The first matching
//! pattern wins, so a label mentioning both a boundary and an inheritance
//! resolves to [`ConflictCategory::Boundary`].

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Closed set of dispute categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum ConflictCategory {
    /// Demarcation and encroachment disputes
    Boundary,
    /// Individual titles overlapping community forest rights
    IndividualVsCommunity,
    /// Succession to an existing title
    Inheritance,
    /// Jurisdiction between revenue, forest and other departments
    Interdepartmental,
    /// Grazing, NTFP collection and other use rights
    ResourceUse,
    /// Anything the pattern table does not recognize
    General,
}

impl ConflictCategory {
    /// Get the wire/label form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boundary => "boundary",
            Self::IndividualVsCommunity => "individual_vs_community",
            Self::Inheritance => "inheritance",
            Self::Interdepartmental => "interdepartmental",
            Self::ResourceUse => "resource_use",
            Self::General => "general",
        }
    }

    /// Human-readable title used in rendered analyses.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Boundary => "Boundary Dispute",
            Self::IndividualVsCommunity => "Individual vs Community Rights",
            Self::Inheritance => "Inheritance / Succession",
            Self::Interdepartmental => "Inter-departmental Dispute",
            Self::ResourceUse => "Resource Use Dispute",
            Self::General => "General Forest Rights Dispute",
        }
    }

    /// All categories, in pattern-precedence order with `General` last.
    pub fn all() -> [Self; 6] {
        [
            Self::Boundary,
            Self::IndividualVsCommunity,
            Self::Inheritance,
            Self::ResourceUse,
            Self::Interdepartmental,
            Self::General,
        ]
    }

    /// The fixed response template for this category.
    pub fn template(&self) -> &'static ConflictTemplate {
        match self {
            Self::Boundary => &BOUNDARY_TEMPLATE,
            Self::IndividualVsCommunity => &INDIVIDUAL_VS_COMMUNITY_TEMPLATE,
            Self::Inheritance => &INHERITANCE_TEMPLATE,
            Self::Interdepartmental => &INTERDEPARTMENTAL_TEMPLATE,
            Self::ResourceUse => &RESOURCE_USE_TEMPLATE,
            Self::General => &GENERAL_TEMPLATE,
        }
    }
}

impl Default for ConflictCategory {
    fn default() -> Self {
        Self::General
    }
}

impl std::fmt::Display for ConflictCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered precedence table. Order is load-bearing.
const CATEGORY_PATTERNS: &[(&str, ConflictCategory)] = &[
    (r"boundar|demarcat|encroach|border", ConflictCategory::Boundary),
    (
        r"individual.*community|community.*individual|community forest right|\bcfr\b|collective right|overlapping right",
        ConflictCategory::IndividualVsCommunity,
    ),
    (
        r"inherit|succession|\bheirs?\b|ancestral|widow|partition",
        ConflictCategory::Inheritance,
    ),
    (
        r"resource|ntfp|minor forest produce|grazing|fishing|bamboo|tendu|firewood|fuelwood",
        ConflictCategory::ResourceUse,
    ),
    (
        r"department|inter-?department|jurisdiction|revenue land|forest dept",
        ConflictCategory::Interdepartmental,
    ),
];

fn compiled_patterns() -> &'static [(Regex, ConflictCategory)] {
    static PATTERNS: OnceLock<Vec<(Regex, ConflictCategory)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        CATEGORY_PATTERNS
            .iter()
            .map(|(pattern, category)| {
                (
                    Regex::new(pattern).expect("conflict category regex must compile"),
                    *category,
                )
            })
            .collect()
    })
}

/// Maps free-text conflict labels to a [`ConflictCategory`].
pub struct ConflictNormalizer;

impl ConflictNormalizer {
    /// Normalize a raw label. Never fails; unmatched text is `General`.
    pub fn normalize(raw: &str) -> ConflictCategory {
        let text = raw.trim().to_lowercase();

        let category = compiled_patterns()
            .iter()
            .find(|(pattern, _)| pattern.is_match(&text))
            .map(|(_, category)| *category)
            .unwrap_or(ConflictCategory::General);

        debug!(raw = %raw, category = %category, "Conflict label normalized");

        category
    }

    /// The pattern table in evaluation order, for audit output.
    pub fn precedence() -> impl Iterator<Item = (&'static str, ConflictCategory)> {
        CATEGORY_PATTERNS.iter().copied()
    }
}

/// A dispute under analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct ConflictCase {
    pub raw_type: String,
    pub normalized_category: ConflictCategory,
    pub description: String,
    /// Party label → description, ordered by label
    pub parties_involved: BTreeMap<String, String>,
}

impl ConflictCase {
    /// Create a case, normalizing the raw type immediately.
    pub fn new(
        raw_type: impl Into<String>,
        description: impl Into<String>,
        parties_involved: BTreeMap<String, String>,
    ) -> Self {
        let raw_type = raw_type.into();
        let normalized_category = ConflictNormalizer::normalize(&raw_type);

        Self {
            raw_type,
            normalized_category,
            description: description.into(),
            parties_involved,
        }
    }
}

/// Fixed response content for one conflict category.
#[derive(Debug)]
pub struct ConflictTemplate {
    pub summary: &'static str,
    pub root_causes: &'static [&'static str],
    pub resolution_steps: &'static [&'static str],
    pub legal_framework: &'static [&'static str],
    pub recommended_approach: &'static str,
    pub timeline: &'static str,
}

static BOUNDARY_TEMPLATE: ConflictTemplate = ConflictTemplate {
    summary: "The dispute concerns the physical extent of a claimed parcel and where it meets neighbouring claims or forest land.",
    root_causes: &[
        "Claimed boundaries were never jointly surveyed or marked on the ground.",
        "Revenue and forest maps use different base layers and disagree at the edges.",
        "Gradual encroachment has shifted informal markers over time.",
    ],
    resolution_steps: &[
        "Conduct a joint field verification with the Forest Rights Committee, revenue and forest staff in the presence of all parties.",
        "Record GPS coordinates of the agreed boundary and overlay them on the cadastral map.",
        "Place the verified map before the Gram Sabha for approval.",
        "Forward the approved map to the Sub-Divisional Level Committee for title correction.",
    ],
    legal_framework: &[
        "Forest Rights Act, 2006, Section 6 (claim verification process)",
        "FRA Rules, 2008, Rule 12 (field verification in presence of claimants)",
    ],
    recommended_approach: "Joint Verification and Mediation",
    timeline: "45–90 days",
};

static INDIVIDUAL_VS_COMMUNITY_TEMPLATE: ConflictTemplate = ConflictTemplate {
    summary: "An individual claim overlaps land or resources that the community claims collectively.",
    root_causes: &[
        "Individual and community forest resource claims were filed without reconciling shared areas.",
        "Customary use boundaries were not documented when the community claim was prepared.",
    ],
    resolution_steps: &[
        "Map the individual plot against the community forest resource boundary.",
        "Hold a Gram Sabha meeting to record customary use of the overlapping area.",
        "Negotiate a carve-out or usufruct arrangement acceptable to both parties.",
        "Record the resolution and amend the claim forms before SDLC review.",
    ],
    legal_framework: &[
        "Forest Rights Act, 2006, Section 3(1)(i) (community forest resource rights)",
        "Forest Rights Act, 2006, Section 5 (Gram Sabha powers)",
    ],
    recommended_approach: "Gram Sabha-led Reconciliation",
    timeline: "60–120 days",
};

static INHERITANCE_TEMPLATE: ConflictTemplate = ConflictTemplate {
    summary: "Heirs disagree over succession to an existing or pending forest rights title.",
    root_causes: &[
        "The original title holder died before the title was issued or updated.",
        "Family members dispute the share or eligibility of widows and daughters.",
    ],
    resolution_steps: &[
        "Establish the list of legal heirs through the Gram Sabha and local records.",
        "Confirm that the title remains heritable but not alienable, as the Act requires.",
        "Issue the title jointly in the names of spouses or recognized heirs.",
    ],
    legal_framework: &[
        "Forest Rights Act, 2006, Section 4(4) (rights heritable, not alienable)",
        "Forest Rights Act, 2006, Section 4(4) (joint titles for spouses)",
    ],
    recommended_approach: "Legal Heir Verification",
    timeline: "30–60 days",
};

static RESOURCE_USE_TEMPLATE: ConflictTemplate = ConflictTemplate {
    summary: "Parties compete over access to grazing, minor forest produce or other shared resources.",
    root_causes: &[
        "Seasonal access rules for shared resources are unwritten or contested.",
        "Rising commercial value of produce has increased pressure on common areas.",
    ],
    resolution_steps: &[
        "Document existing seasonal and customary use patterns with all user groups.",
        "Draft a community resource management plan with harvesting and grazing rules.",
        "Have the Gram Sabha adopt the plan and appoint a monitoring committee.",
    ],
    legal_framework: &[
        "Forest Rights Act, 2006, Section 3(1)(c) (minor forest produce)",
        "Forest Rights Act, 2006, Section 3(1)(d) (grazing and fishing rights)",
    ],
    recommended_approach: "Community Resource Management Agreement",
    timeline: "30–90 days",
};

static INTERDEPARTMENTAL_TEMPLATE: ConflictTemplate = ConflictTemplate {
    summary: "Government departments disagree over jurisdiction or the status of the land under claim.",
    root_causes: &[
        "Land is recorded differently in revenue and forest department registers.",
        "No single authority has been designated to settle overlapping records.",
    ],
    resolution_steps: &[
        "Constitute a coordination committee of revenue, forest and tribal welfare officers.",
        "Reconcile the registers for the disputed survey numbers.",
        "Issue a joint order clarifying land status before the claim proceeds.",
    ],
    legal_framework: &[
        "Forest Rights Act, 2006, Section 6(8) (committee composition)",
        "FRA Rules, 2008, Rule 8 (District Level Committee functions)",
    ],
    recommended_approach: "Inter-departmental Coordination Committee",
    timeline: "60–90 days",
};

static GENERAL_TEMPLATE: ConflictTemplate = ConflictTemplate {
    summary: "The dispute does not fall into a recognized category and follows the standard claim process.",
    root_causes: &[
        "Incomplete documentation or unclear claim history.",
        "Limited awareness of the claim process among the parties.",
    ],
    resolution_steps: &[
        "Collect statements and documents from all parties.",
        "Refer the matter to the Forest Rights Committee for verification.",
        "Place findings before the Gram Sabha and the Sub-Divisional Level Committee.",
    ],
    legal_framework: &["Forest Rights Act, 2006, Section 6 (authorities and procedure)"],
    recommended_approach: "Standard Process",
    timeline: "30–60 days",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_beats_inheritance() {
        assert_eq!(
            ConflictNormalizer::normalize("Boundary dispute between legal heirs after inheritance"),
            ConflictCategory::Boundary
        );
    }

    #[test]
    fn test_boundary_beats_resource_use() {
        assert_eq!(
            ConflictNormalizer::normalize("boundary dispute over grazing land"),
            ConflictCategory::Boundary
        );
    }

    #[test]
    fn test_each_category() {
        let cases = [
            ("Encroachment on claimed plot", ConflictCategory::Boundary),
            ("Individual claim vs community CFR", ConflictCategory::IndividualVsCommunity),
            ("Succession after death of title holder", ConflictCategory::Inheritance),
            ("Tendu leaf collection", ConflictCategory::ResourceUse),
            ("Forest department vs revenue jurisdiction", ConflictCategory::Interdepartmental),
        ];

        for (label, expected) in cases {
            assert_eq!(ConflictNormalizer::normalize(label), expected, "label: {label}");
        }
    }

    #[test]
    fn test_unmatched_is_general() {
        let category = ConflictNormalizer::normalize("xyz unrelated");
        assert_eq!(category, ConflictCategory::General);
        assert_eq!(category.template().recommended_approach, "Standard Process");
        assert_eq!(ConflictNormalizer::normalize("   "), ConflictCategory::General);
    }

    #[test]
    fn test_case_normalizes_on_construction() {
        let case = ConflictCase::new("  INHERITANCE ", "Two brothers", BTreeMap::new());
        assert_eq!(case.normalized_category, ConflictCategory::Inheritance);
        assert_eq!(case.raw_type, "  INHERITANCE ");
    }

    #[test]
    fn test_precedence_order_is_exposed() {
        let order: Vec<_> = ConflictNormalizer::precedence().map(|(_, c)| c).collect();
        assert_eq!(
            order,
            vec![
                ConflictCategory::Boundary,
                ConflictCategory::IndividualVsCommunity,
                ConflictCategory::Inheritance,
                ConflictCategory::ResourceUse,
                ConflictCategory::Interdepartmental,
            ]
        );
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&ConflictCategory::IndividualVsCommunity).unwrap();
        assert_eq!(json, "\"individual_vs_community\"");
    }
}
