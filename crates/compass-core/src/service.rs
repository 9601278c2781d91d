//! The generation service seam and its Gemini implementation.
//!
//! [`PlanService`] is the single outbound dependency of plan generation: one
//! request in, raw response text out. The text is handed to the validator
//! untouched, so a service implementation never interprets the plan.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    error::{CompassError, Result},
    request::GenerationRequest,
};

/// Default endpoint root for the Gemini API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// Default client-level request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// An external service that turns a generation request into raw text.
///
/// Implementations perform exactly one call per invocation and never retry.
#[async_trait]
pub trait PlanService: Send + Sync {
    /// Issue the request and return the raw text payload.
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

/// Client for Gemini's `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl GeminiClient {
    /// Create a client with an explicit credential, endpoint and timeout.
    ///
    /// # Errors
    ///
    /// Returns `CompassError::Configuration` if the key is empty or the HTTP
    /// client cannot be constructed.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(CompassError::Configuration {
                message: "API key must not be empty".to_string(),
            });
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CompassError::Configuration {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    fn request_body(request: &GenerationRequest) -> GeminiRequest<'_> {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user"),
                parts: vec![GeminiPart {
                    text: &request.prompt,
                }],
            }],
            system_instruction: GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: &request.system_instruction,
                }],
            },
            generation_config: GeminiGenerationConfig {
                response_mime_type: &request.response_mime_type,
                response_schema: &request.response_schema,
                max_output_tokens: request.budget.max_output_tokens(),
                thinking_config: GeminiThinkingConfig {
                    thinking_budget: request.budget.thinking_budget(),
                },
            },
        }
    }
}

#[async_trait]
impl PlanService for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        debug!(
            "GeminiClient generating plan with model {} ({} prompt bytes)",
            request.model,
            request.prompt.len()
        );

        let response = self
            .http
            .post(self.endpoint(&request.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(request))
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to generation service: {e}");
                CompassError::transport("Failed to reach generation service").with_source(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Generation service returned {status}: {message}");
            return Err(CompassError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GeminiResponse = response.json().await.map_err(|e| {
            error!("Failed to read generation service response: {e}");
            CompassError::transport("Failed to read generation service response").with_source(e)
        })?;

        if let Some(reason) = body.finish_reason() {
            debug!("Generation finished with reason {reason}");
        }

        Ok(body.text())
    }
}

// Gemini API request/response structures

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    system_instruction: GeminiContent<'a>,
    generation_config: GeminiGenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a serde_json::Value,
    max_output_tokens: u32,
    thinking_config: GeminiThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

impl GeminiResponse {
    /// Text of the first candidate, excluding thought summaries.
    ///
    /// Empty when the service produced no candidate; the validator decides
    /// what an empty payload means.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter(|part| !part.thought)
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    fn finish_reason(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.finish_reason.as_deref())
    }
}
