//! AdvisoryService - main entry point for advisory requests.
//!
//! Each request runs one linear pipeline: validate, build inputs, try the
//! remote gateway once, then either extract fields from the model text or
//! compute them with the local engine. Gateway failures never reach callers.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use forest_advisory::{
    extraction, ranking, render, ConflictCase, FairnessAssessment, FraudAssessment, KeywordSignals,
};

use crate::backend::{CompletionRequest, GatewayError, LlmBackend};
use crate::config::AdvisorConfig;
use crate::prompt::PromptAssembler;
use crate::request::{ConflictAnalysisRequest, FraudCheckRequest, RecommendationRequest};
use crate::response::{
    ConflictAnalysisResponse, EngineMode, FraudCheckResponse, RecommendationResponse,
};

/// Error types for the service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Service not initialized
    #[error("Service not initialized - call initialize() first")]
    NotInitialized,

    /// Request validation error
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Advisory pipeline with an optional remote gateway.
pub struct AdvisoryService {
    config: AdvisorConfig,
    gateway: RwLock<Option<Arc<dyn LlmBackend>>>,
    initialized: RwLock<bool>,
}

impl AdvisoryService {
    pub fn new(config: AdvisorConfig) -> Self {
        Self {
            config,
            gateway: RwLock::new(None),
            initialized: RwLock::new(false),
        }
    }

    pub fn service_id(&self) -> &str {
        &self.config.service.service_id
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Attach the gateway (or none, for local-only operation) and accept
    /// requests.
    pub async fn initialize(&self, gateway: Option<Arc<dyn LlmBackend>>) -> Result<(), ServiceError> {
        info!(service_id = %self.service_id(), "Initializing AdvisoryService");

        let gateway = if self.config.service.local_only {
            if gateway.is_some() {
                info!("local_only set, gateway will not be used");
            }
            None
        } else {
            gateway
        };

        if let Some(backend) = &gateway {
            if backend.is_available().await {
                info!(backend = %backend.id(), "Gateway available");
            } else {
                warn!(backend = %backend.id(), "Gateway not reachable, requests may fall back to local engine");
            }
        }

        *self.gateway.write().await = gateway;
        *self.initialized.write().await = true;

        info!("AdvisoryService initialized");
        Ok(())
    }

    /// Drop the gateway and stop accepting requests.
    pub async fn shutdown(&self) {
        *self.gateway.write().await = None;
        *self.initialized.write().await = false;
        info!(service_id = %self.service_id(), "AdvisoryService shut down");
    }

    pub async fn is_initialized(&self) -> bool {
        *self.initialized.read().await
    }

    /// Whether a gateway is attached.
    pub async fn has_gateway(&self) -> bool {
        self.gateway.read().await.is_some()
    }

    /// Rank schemes for a community.
    pub async fn recommend(
        &self,
        request: RecommendationRequest,
    ) -> Result<RecommendationResponse, ServiceError> {
        self.ensure_initialized().await?;
        request.validate()?;

        let request_id = uuid::Uuid::new_v4().to_string();
        let context = request.to_raw_context().build();
        let prompt = PromptAssembler::recommendation(&context);

        let response = match self.generate(&request_id, prompt).await {
            Some(text) => RecommendationResponse {
                funding_scheme_names: extraction::funding_schemes(&text),
                implementation_score: extraction::implementation_score(&text),
                recommendations_text: text,
                mode: EngineMode::Remote,
                request_id,
                generated_at: Utc::now(),
            },
            None => {
                let ranked = ranking::rank(&context);
                RecommendationResponse {
                    recommendations_text: render::recommendations(&context, &ranked),
                    funding_scheme_names: ranked.iter().map(|r| r.name.clone()).collect(),
                    implementation_score: ranking::implementation_score(&ranked, &context),
                    mode: EngineMode::Local,
                    request_id,
                    generated_at: Utc::now(),
                }
            }
        };

        info!(
            request_id = %response.request_id,
            mode = %response.mode,
            schemes = ?response.funding_scheme_names,
            "Recommendation generated"
        );

        Ok(response)
    }

    /// Analyse a dispute.
    pub async fn analyze_conflict(
        &self,
        request: ConflictAnalysisRequest,
    ) -> Result<ConflictAnalysisResponse, ServiceError> {
        self.ensure_initialized().await?;
        request.validate()?;

        let request_id = uuid::Uuid::new_v4().to_string();
        let case = ConflictCase::new(
            &request.conflict_type,
            &request.description,
            request.parties_as_text(),
        );
        let category = case.normalized_category;
        let prompt = PromptAssembler::conflict(&case, &request.documents);

        let (analysis_text, recommended_approach, fairness, timeline_text, mode) =
            match self.generate(&request_id, prompt).await {
                Some(text) => (
                    text.clone(),
                    extraction::recommended_approach(&text),
                    FairnessAssessment::from_model_text(&text),
                    extraction::timeline(&text),
                    EngineMode::Remote,
                ),
                None => {
                    let signals = KeywordSignals::extract(&request.signal_text());
                    let fairness = FairnessAssessment::for_category(category);
                    let template = category.template();
                    (
                        render::conflict_analysis(&case, &signals, &fairness, request.documents.len()),
                        template.recommended_approach.to_string(),
                        fairness,
                        template.timeline.to_string(),
                        EngineMode::Local,
                    )
                }
            };

        info!(
            request_id = %request_id,
            mode = %mode,
            category = %category,
            fairness = fairness.aggregate,
            "Conflict analysis generated"
        );

        Ok(ConflictAnalysisResponse {
            request_id,
            analysis_text,
            recommended_approach,
            normalized_category: category,
            fairness_score: fairness.aggregate,
            fairness,
            timeline_text,
            mode,
            generated_at: Utc::now(),
        })
    }

    /// Check a claim record for signs of fraud.
    pub async fn check_fraud(
        &self,
        request: FraudCheckRequest,
    ) -> Result<FraudCheckResponse, ServiceError> {
        self.ensure_initialized().await?;
        let record = request.record()?;

        let request_id = uuid::Uuid::new_v4().to_string();
        let check_type = request.check_type();
        // Needed in both modes: verification steps always come from the checks.
        let assessment = FraudAssessment::evaluate(record, &request.similar_records, check_type);
        let prompt = PromptAssembler::fraud(record, &request.similar_records, check_type);

        let response = match self.generate(&request_id, prompt).await {
            Some(text) => FraudCheckResponse {
                risk_score: extraction::risk_score(&text),
                primary_concern: extraction::primary_concern(&text),
                anomalies: extraction::anomalies(&text),
                verification_steps: assessment.verification_steps(),
                analysis_text: text,
                mode: EngineMode::Remote,
                request_id,
                generated_at: Utc::now(),
            },
            None => FraudCheckResponse {
                analysis_text: render::fraud_analysis(record, &assessment),
                risk_score: assessment.risk_score,
                primary_concern: assessment.primary_concern.clone(),
                anomalies: assessment.anomalies(),
                verification_steps: assessment.verification_steps(),
                mode: EngineMode::Local,
                request_id,
                generated_at: Utc::now(),
            },
        };

        info!(
            request_id = %response.request_id,
            mode = %response.mode,
            risk_score = response.risk_score,
            "Fraud check generated"
        );

        Ok(response)
    }

    async fn ensure_initialized(&self) -> Result<(), ServiceError> {
        if self.is_initialized().await {
            Ok(())
        } else {
            Err(ServiceError::NotInitialized)
        }
    }

    /// The single remote/local decision point for a request.
    ///
    /// Returns model text, or `None` when the local engine must answer.
    async fn generate(&self, request_id: &str, prompt: String) -> Option<String> {
        let gateway = self.gateway.read().await.clone()?;
        let settings = &self.config.gateway;

        let completion = CompletionRequest::prompt(prompt)
            .with_system(PromptAssembler::system_prompt())
            .with_max_tokens(settings.max_tokens)
            .with_temperature(settings.temperature);

        debug!(request_id, backend = %gateway.id(), "Calling gateway");
        let start = Instant::now();

        let outcome = match tokio::time::timeout(settings.timeout(), gateway.complete(completion)).await {
            Ok(result) => result.and_then(|r| {
                if r.content.trim().is_empty() {
                    Err(GatewayError::EmptyResponse)
                } else {
                    Ok(r.content)
                }
            }),
            Err(_) => Err(GatewayError::Timeout {
                after_ms: settings.timeout_ms,
            }),
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        match outcome {
            Ok(text) => {
                debug!(request_id, duration_ms, "Gateway answered");
                Some(text)
            }
            Err(error) => {
                warn!(request_id, duration_ms, %error, "Gateway failed, using local engine");
                None
            }
        }
    }
}
