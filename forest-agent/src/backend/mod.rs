//! Remote model gateway.
//!
//! - OpenAI-compatible HTTP backend (OpenAI, vLLM, Ollama, ...)
//! - Mock backend for tests and offline runs

pub mod mock;
pub mod openai;
pub mod traits;

pub use mock::MockBackend;
pub use openai::OpenAiBackend;
pub use traits::{
    CompletionRequest, CompletionResponse, FinishReason, GatewayError, LlmBackend,
    ModelCapabilities, Usage,
};
