//! Forest Agent - two-path advisory pipeline
//!
//! Wraps the deterministic engine in `forest-advisory` with an optional
//! remote model:
//! - Trait-based gateway backends (OpenAI-compatible HTTP, mock)
//! - Request validation at the boundary
//! - Prompt assembly for the three advisory products
//! - One remote/local decision per request, with local fallback on any
//!   gateway failure or timeout
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            AdvisoryService              │
//! │   recommend / analyze_conflict / fraud  │
//! └────────────────┬────────────────────────┘
//!                  │ generate()
//!      ┌───────────┴───────────┐
//!      ▼                       ▼
//! ┌─────────────┐       ┌──────────────────┐
//! │ LlmBackend  │  err  │ forest-advisory  │
//! │ (OpenAI/    │──────▶│ local engine     │
//! │  Mock)      │       │                  │
//! └─────────────┘       └──────────────────┘
//! ```

pub mod backend;
pub mod config;
pub mod prompt;
pub mod request;
pub mod response;
pub mod service;

// Re-export main types for convenience
pub use backend::{CompletionRequest, CompletionResponse, GatewayError, LlmBackend};
pub use config::{AdvisorConfig, ConfigError};
pub use request::{ConflictAnalysisRequest, FraudCheckRequest, RecommendationRequest};
pub use response::{
    ConflictAnalysisResponse, EngineMode, FraudCheckResponse, RecommendationResponse,
};
pub use service::{AdvisoryService, ServiceError};
