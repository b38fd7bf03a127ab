//! Context builder.
//!
//! Normalizes raw request fields into the canonical [`AdvisoryContext`]
//! used by every scorer. Building never fails: missing text becomes an empty
//! string and missing or malformed numbers become `0.0`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Forest cover (percent) at or above which a parcel is treated as
/// conservation-focused regardless of the stated focus area.
pub const CONSERVATION_FOREST_COVER: f64 = 40.0;

const TRIBAL_TERMS: &[&str] = &["tribal", "adivasi", "forest", "scheduled tribe", "vanvasi"];
const SMALL_FARMER_TERMS: &[&str] = &["small farmer", "marginal", "smallholder", "farmer"];
const WOMEN_GROUP_TERMS: &[&str] = &["women", "shg", "self help", "self-help", "mahila"];
const HOUSING_TERMS: &[&str] = &["housing", "shelter", "awas", "pucca house"];
const LIVELIHOOD_TERMS: &[&str] = &[
    "livelihood",
    "income",
    "employment",
    "job",
    "ntfp",
    "minor forest produce",
];
const HEALTHCARE_TERMS: &[&str] = &["health", "medical", "hospital", "nutrition"];
const EDUCATION_TERMS: &[&str] = &["education", "school", "literacy", "skill"];
const IRRIGATION_TERMS: &[&str] = &["irrigation", "water", "canal", "drip"];
const CONSERVATION_TERMS: &[&str] = &["conservation", "afforestation", "biodiversity"];

/// Raw, unvalidated land statistics as they arrive on a request.
///
/// Values are kept as JSON so numeric strings and garbage can both be
/// tolerated at normalization time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLandData {
    #[serde(default)]
    pub total_area: Option<Value>,
    #[serde(default)]
    pub forest_cover: Option<Value>,
    #[serde(default)]
    pub agricultural_land: Option<Value>,
    #[serde(default)]
    pub population: Option<Value>,
}

/// Raw request fields feeding the context builder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContext {
    /// Free-text description of the target population
    #[serde(default)]
    pub target_descriptor: Option<String>,
    #[serde(default)]
    pub focus_area: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub land: Option<RawLandData>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
}

impl RawContext {
    /// Create raw context with a target descriptor.
    pub fn with_descriptor(descriptor: impl Into<String>) -> Self {
        Self {
            target_descriptor: Some(descriptor.into()),
            ..Default::default()
        }
    }

    /// Set the focus area.
    pub fn focus(mut self, focus_area: impl Into<String>) -> Self {
        self.focus_area = Some(focus_area.into());
        self
    }

    /// Set the priority.
    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Set a land statistic by its wire name (`totalArea`, `forestCover`,
    /// `agriculturalLand`, `population`). Unknown names are ignored.
    pub fn land_value(mut self, field: &str, value: impl Into<Value>) -> Self {
        let value = Some(value.into());
        let land = self.land.get_or_insert_with(RawLandData::default);
        match field {
            "totalArea" => land.total_area = value,
            "forestCover" => land.forest_cover = value,
            "agriculturalLand" => land.agricultural_land = value,
            "population" => land.population = value,
            _ => {}
        }
        self
    }

    /// Set the location.
    pub fn located(mut self, state: impl Into<String>, district: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self.district = Some(district.into());
        self
    }

    /// Normalize into an [`AdvisoryContext`].
    pub fn build(&self) -> AdvisoryContext {
        AdvisoryContext::from_raw(self)
    }
}

/// Normalized land statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct LandData {
    /// Hectares
    pub total_area: f64,
    /// Percent of total area
    pub forest_cover: f64,
    /// Hectares
    pub agricultural_land: f64,
    pub population: f64,
}

/// Administrative location, original casing preserved for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Location {
    pub state: String,
    pub district: String,
}

/// Boolean facts derived from descriptor and focus text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct ContextFlags {
    pub is_tribal: bool,
    pub is_small_farmer: bool,
    pub is_women_group: bool,
    pub wants_housing: bool,
    pub wants_livelihood: bool,
    pub wants_healthcare: bool,
    pub wants_education: bool,
    pub wants_irrigation: bool,
    pub conservation_focus: bool,
}

/// Canonical scoring context. Built once per request, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryContext {
    target_descriptor: String,
    focus_area: String,
    priority: String,
    land: LandData,
    location: Location,
    flags: ContextFlags,
}

impl AdvisoryContext {
    /// Normalize raw request fields.
    pub fn from_raw(raw: &RawContext) -> Self {
        let target_descriptor = normalize_text(raw.target_descriptor.as_deref());
        let focus_area = normalize_text(raw.focus_area.as_deref());
        let priority = normalize_text(raw.priority.as_deref());

        let land = raw
            .land
            .as_ref()
            .map(|l| LandData {
                total_area: number_or_zero(l.total_area.as_ref()),
                forest_cover: number_or_zero(l.forest_cover.as_ref()),
                agricultural_land: number_or_zero(l.agricultural_land.as_ref()),
                population: number_or_zero(l.population.as_ref()),
            })
            .unwrap_or_default();

        let location = Location {
            state: raw.state.as_deref().unwrap_or_default().trim().to_string(),
            district: raw.district.as_deref().unwrap_or_default().trim().to_string(),
        };

        let flags = derive_flags(&target_descriptor, &focus_area, &land);

        debug!(?flags, "Advisory context built");

        Self {
            target_descriptor,
            focus_area,
            priority,
            land,
            location,
            flags,
        }
    }

    pub fn target_descriptor(&self) -> &str {
        &self.target_descriptor
    }

    pub fn focus_area(&self) -> &str {
        &self.focus_area
    }

    pub fn priority(&self) -> &str {
        &self.priority
    }

    /// Whether the request was marked high priority.
    pub fn is_high_priority(&self) -> bool {
        self.priority == "high"
    }

    pub fn land(&self) -> &LandData {
        &self.land
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn flags(&self) -> &ContextFlags {
        &self.flags
    }
}

fn normalize_text(text: Option<&str>) -> String {
    text.unwrap_or_default().trim().to_lowercase()
}

/// Accepts JSON numbers and numeric strings. Anything else, including
/// negative and non-finite values, is `0.0`.
fn number_or_zero(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(n) if n.is_finite() && n >= 0.0 => n,
        _ => 0.0,
    }
}

fn mentions_any(text: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| text.contains(term))
}

fn derive_flags(descriptor: &str, focus_area: &str, land: &LandData) -> ContextFlags {
    let combined = format!("{} {}", descriptor, focus_area);

    ContextFlags {
        is_tribal: mentions_any(&combined, TRIBAL_TERMS),
        is_small_farmer: mentions_any(&combined, SMALL_FARMER_TERMS),
        is_women_group: mentions_any(&combined, WOMEN_GROUP_TERMS),
        wants_housing: mentions_any(&combined, HOUSING_TERMS),
        wants_livelihood: mentions_any(&combined, LIVELIHOOD_TERMS),
        wants_healthcare: mentions_any(&combined, HEALTHCARE_TERMS),
        wants_education: mentions_any(&combined, EDUCATION_TERMS),
        wants_irrigation: mentions_any(&combined, IRRIGATION_TERMS),
        conservation_focus: mentions_any(focus_area, CONSERVATION_TERMS)
            || land.forest_cover >= CONSERVATION_FOREST_COVER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_default() {
        let context = RawContext::default().build();

        assert_eq!(context.target_descriptor(), "");
        assert_eq!(context.focus_area(), "");
        assert_eq!(*context.land(), LandData::default());
        assert_eq!(*context.flags(), ContextFlags::default());
        assert!(!context.is_high_priority());
    }

    #[test]
    fn test_text_is_lowercased_before_flags() {
        let context = RawContext::with_descriptor("  ADIVASI Women SHG ")
            .focus("Livelihood")
            .priority("HIGH")
            .build();

        assert_eq!(context.target_descriptor(), "adivasi women shg");
        assert!(context.flags().is_tribal);
        assert!(context.flags().is_women_group);
        assert!(context.flags().wants_livelihood);
        assert!(context.is_high_priority());
    }

    #[test]
    fn test_malformed_numbers_become_zero() {
        let context = RawContext::with_descriptor("village")
            .land_value("totalArea", "not a number")
            .land_value("forestCover", json!(null))
            .land_value("agriculturalLand", " 12.5 ")
            .land_value("population", -40)
            .build();

        assert_eq!(context.land().total_area, 0.0);
        assert_eq!(context.land().forest_cover, 0.0);
        assert_eq!(context.land().agricultural_land, 12.5);
        assert_eq!(context.land().population, 0.0);
    }

    #[test]
    fn test_conservation_from_forest_cover() {
        let dense = RawContext::with_descriptor("village")
            .land_value("forestCover", 40)
            .build();
        let sparse = RawContext::with_descriptor("village")
            .land_value("forestCover", 39.9)
            .build();
        let stated = RawContext::with_descriptor("village")
            .focus("Biodiversity conservation")
            .build();

        assert!(dense.flags().conservation_focus);
        assert!(!sparse.flags().conservation_focus);
        assert!(stated.flags().conservation_focus);
    }

    #[test]
    fn test_raw_context_deserializes_wire_names() {
        let raw: RawContext = serde_json::from_value(json!({
            "targetDescriptor": "Small Farmer",
            "focusArea": "irrigation",
            "land": { "agriculturalLand": 40, "forestCover": "10" },
            "state": "Odisha",
            "district": "Koraput"
        }))
        .unwrap();

        let context = raw.build();
        assert!(context.flags().is_small_farmer);
        assert!(context.flags().wants_irrigation);
        assert_eq!(context.land().forest_cover, 10.0);
        assert_eq!(context.location().district, "Koraput");
    }
}
