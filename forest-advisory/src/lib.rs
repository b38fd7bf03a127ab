//! Forest Advisory - deterministic heuristic engine
//!
//! Local decision engine for forest-land administration. Everything here is a
//! pure function over request data and fixed, process-wide tables:
//!
//! - [`AdvisoryContext`]: normalized land/demographic snapshot with derived flags
//! - [`KeywordSignals`]: salient-term signals extracted from dispute narratives
//! - [`ConflictCategory`]: ordered-pattern conflict classification
//! - [`FairnessAssessment`]: weighted four-dimension fairness aggregate
//! - [`catalog`] / [`ranking`]: scheme scoring and deterministic top-N selection
//! - [`render`]: structured narrative output for all three advisory products
//! - [`extraction`]: heuristics that recover the same fields from model text
//! - [`fraud`]: local claim-record anomaly checks
//!
//! # Architecture
//!
//! ```text
//! RawContext ──build()──▶ AdvisoryContext
//!                              │
//!        ┌─────────────────────┼──────────────────────┐
//!        ▼                     ▼                      ▼
//!   catalog::score      ConflictNormalizer     FraudAssessment
//!        │              + KeywordSignals              │
//!        ▼              + FairnessAssessment          │
//!   ranking::rank              │                      │
//!        └──────────────▶ render ◀────────────────────┘
//! ```
//!
//! No function in this crate returns an error: unknown input resolves to a
//! documented default.

pub mod catalog;
pub mod conflict;
pub mod context;
pub mod extraction;
pub mod fairness;
pub mod fraud;
pub mod ranking;
pub mod render;
pub mod signals;

// Re-export main types
pub use catalog::{SchemeCandidate, SchemeText, CATALOG};
pub use conflict::{ConflictCase, ConflictCategory, ConflictNormalizer};
pub use context::{AdvisoryContext, ContextFlags, LandData, Location, RawContext};
pub use fairness::{FairnessAssessment, FairnessWeights};
pub use fraud::{ClaimRecord, FraudAssessment, FraudCheckType};
pub use ranking::{RankedRecommendation, TOP_N};
pub use signals::KeywordSignals;
