//! Advisory request types.
//!
//! Field names are camelCase on the wire. `validate()` is the only place a
//! request can be rejected; everything past it is total.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use forest_advisory::context::RawLandData;
use forest_advisory::{ClaimRecord, FraudCheckType, RawContext};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::service::ServiceError;

/// Focus and priority hints for a recommendation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase", default)]
pub struct Guidelines {
    pub focus_area: Option<String>,
    pub priority: Option<String>,
}

/// Request for ranked scheme recommendations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecommendationRequest {
    pub target_descriptor: Option<String>,
    pub land_data: Option<RawLandData>,
    pub guidelines: Guidelines,
    pub state: Option<String>,
    pub district: Option<String>,
}

impl RecommendationRequest {
    pub fn new(target_descriptor: impl Into<String>, land_data: RawLandData) -> Self {
        Self {
            target_descriptor: Some(target_descriptor.into()),
            land_data: Some(land_data),
            ..Default::default()
        }
    }

    pub fn with_guidelines(mut self, focus_area: impl Into<String>, priority: impl Into<String>) -> Self {
        self.guidelines = Guidelines {
            focus_area: Some(focus_area.into()),
            priority: Some(priority.into()),
        };
        self
    }

    pub fn located(mut self, state: impl Into<String>, district: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self.district = Some(district.into());
        self
    }

    /// Reject requests without a descriptor or land data.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if is_blank(self.target_descriptor.as_deref()) {
            return Err(ServiceError::InvalidRequest(
                "targetDescriptor is required".to_string(),
            ));
        }
        if self.land_data.is_none() {
            return Err(ServiceError::InvalidRequest("landData is required".to_string()));
        }
        Ok(())
    }

    /// Raw fields for the context builder.
    pub fn to_raw_context(&self) -> RawContext {
        RawContext {
            target_descriptor: self.target_descriptor.clone(),
            focus_area: self.guidelines.focus_area.clone(),
            priority: self.guidelines.priority.clone(),
            land: self.land_data.clone(),
            state: self.state.clone(),
            district: self.district.clone(),
        }
    }
}

/// Record the dispute is attached to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase", default)]
pub struct RecordContext {
    pub claim_id: Option<String>,
    pub village: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
}

/// Request for a conflict analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConflictAnalysisRequest {
    pub conflict_type: String,
    pub description: String,
    /// Party label → details; non-string values are rendered as JSON
    pub parties_involved: BTreeMap<String, Value>,
    pub record_context: Option<RecordContext>,
    pub documents: Vec<String>,
}

impl ConflictAnalysisRequest {
    pub fn new(conflict_type: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            conflict_type: conflict_type.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn with_party(mut self, label: impl Into<String>, details: impl Into<Value>) -> Self {
        self.parties_involved.insert(label.into(), details.into());
        self
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.conflict_type.trim().is_empty() {
            return Err(ServiceError::InvalidRequest("conflictType is required".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(ServiceError::InvalidRequest("description is required".to_string()));
        }
        Ok(())
    }

    /// Parties with every value flattened to display text.
    pub fn parties_as_text(&self) -> BTreeMap<String, String> {
        self.parties_involved
            .iter()
            .map(|(label, value)| {
                let text = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (label.clone(), text)
            })
            .collect()
    }

    /// Text scanned for keyword signals: the description plus any state on
    /// the attached record.
    pub fn signal_text(&self) -> String {
        match self.record_context.as_ref().and_then(|r| r.state.as_deref()) {
            Some(state) => format!("{} {}", self.description, state),
            None => self.description.clone(),
        }
    }
}

/// Request for a fraud check on a claim record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FraudCheckRequest {
    pub record_data: Option<ClaimRecord>,
    pub similar_records: Vec<ClaimRecord>,
    pub check_type: Option<String>,
}

impl FraudCheckRequest {
    pub fn new(record: ClaimRecord) -> Self {
        Self {
            record_data: Some(record),
            ..Default::default()
        }
    }

    pub fn with_similar(mut self, records: Vec<ClaimRecord>) -> Self {
        self.similar_records = records;
        self
    }

    pub fn with_check_type(mut self, check_type: impl Into<String>) -> Self {
        self.check_type = Some(check_type.into());
        self
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        self.record().map(|_| ())
    }

    /// The claim under review.
    pub fn record(&self) -> Result<&ClaimRecord, ServiceError> {
        self.record_data
            .as_ref()
            .ok_or_else(|| ServiceError::InvalidRequest("recordData is required".to_string()))
    }

    pub fn check_type(&self) -> FraudCheckType {
        self.check_type
            .as_deref()
            .map(FraudCheckType::parse)
            .unwrap_or_default()
    }
}

fn is_blank(text: Option<&str>) -> bool {
    text.map_or(true, |t| t.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommendation_from_json() {
        let request: RecommendationRequest = serde_json::from_value(serde_json::json!({
            "targetDescriptor": "Small farmer",
            "landData": { "agriculturalLand": 40, "forestCover": "10" },
            "guidelines": { "focusArea": "irrigation", "priority": "high" },
            "state": "Odisha"
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        let context = request.to_raw_context().build();
        assert_eq!(context.land().forest_cover, 10.0);
        assert!(context.is_high_priority());
        assert_eq!(context.location().state, "Odisha");
    }

    #[test]
    fn test_recommendation_validation() {
        let missing_land = RecommendationRequest {
            target_descriptor: Some("tribal village".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            missing_land.validate(),
            Err(ServiceError::InvalidRequest(msg)) if msg.contains("landData")
        ));

        let blank = RecommendationRequest::new("  ", RawLandData::default());
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_conflict_parties_and_signal_text() {
        let mut request = ConflictAnalysisRequest::new("boundary", "Fence moved overnight")
            .with_party("claimant", "Ramesh Gond")
            .with_party("plots", serde_json::json!([12, 13]));
        request.record_context = Some(RecordContext {
            state: Some("Telangana".to_string()),
            ..Default::default()
        });

        let parties = request.parties_as_text();
        assert_eq!(parties["claimant"], "Ramesh Gond");
        assert_eq!(parties["plots"], "[12,13]");
        assert_eq!(request.signal_text(), "Fence moved overnight Telangana");
        assert!(ConflictAnalysisRequest::new("", "x").validate().is_err());
    }

    #[test]
    fn test_fraud_request() {
        let request: FraudCheckRequest = serde_json::from_value(serde_json::json!({
            "recordData": { "claimId": "IFR-1", "claimedArea": 2.5 },
            "checkType": "duplicate"
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(request.check_type(), FraudCheckType::Duplicate);
        assert_eq!(FraudCheckRequest::default().check_type(), FraudCheckType::Comprehensive);
        assert!(FraudCheckRequest::default().validate().is_err());
    }
}
