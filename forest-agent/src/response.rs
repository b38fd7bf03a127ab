//! Advisory response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use forest_advisory::{ConflictCategory, FairnessAssessment};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Which path produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum EngineMode {
    /// Fields extracted from remote model text
    Remote,
    /// Deterministic local engine
    Local,
}

impl EngineMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Local => "local",
        }
    }
}

impl std::fmt::Display for EngineMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ranked scheme recommendations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub request_id: String,
    pub recommendations_text: String,
    /// At most three names
    pub funding_scheme_names: Vec<String>,
    /// In [0, 1]
    pub implementation_score: f64,
    pub mode: EngineMode,
    pub generated_at: DateTime<Utc>,
}

/// Conflict analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct ConflictAnalysisResponse {
    pub request_id: String,
    pub analysis_text: String,
    pub recommended_approach: String,
    pub normalized_category: ConflictCategory,
    pub fairness: FairnessAssessment,
    /// Fairness aggregate, in [0, 1]
    pub fairness_score: f64,
    pub timeline_text: String,
    pub mode: EngineMode,
    pub generated_at: DateTime<Utc>,
}

/// Fraud check outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct FraudCheckResponse {
    pub request_id: String,
    pub analysis_text: String,
    /// In [0, 1]
    pub risk_score: f64,
    pub primary_concern: String,
    pub anomalies: Vec<String>,
    pub verification_steps: Vec<String>,
    pub mode: EngineMode,
    pub generated_at: DateTime<Utc>,
}
