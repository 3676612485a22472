//! Gemini - Google Gemini `generateContent` provider
//!
//! One request per turn: the system prompt goes in `systemInstruction`, the
//! assembled user message in `contents`, sampling settings in
//! `generationConfig`. Failures are returned as-is; the session decides
//! what the user hears.

use crate::completion::{CompletionRequest, CompletionResponse, TokenUsage};
use crate::error::{Error, Result};
use crate::message::{Message, MessageRole};
use crate::provider::LlmProvider;
use crate::util::{mask_api_key, truncate_safe};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Key variables, in lookup order
const KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Longest slice of an error body kept in messages
const ERROR_BODY_LIMIT: usize = 300;

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: SamplingConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SamplingConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop_sequences: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<Usage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    finish_reason: Option<String>,
}

impl Candidate {
    fn joined_text(&self) -> String {
        self.content
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Usage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: String,
}

/// Map a non-success HTTP reply to an error without echoing credentials
fn classify_failure(status: StatusCode, body: &str) -> Error {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Error::RateLimit;
    }

    let detail = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if envelope.error.message.to_lowercase().contains("api key") => {
            "credentials rejected, check GEMINI_API_KEY".to_string()
        }
        Ok(envelope) => format!(
            "{}: {}",
            envelope.error.status,
            truncate_safe(&envelope.error.message, ERROR_BODY_LIMIT)
        ),
        Err(_) => format!("HTTP {}", status.as_u16()),
    };

    if status.is_server_error() {
        Error::ServerError(detail)
    } else {
        Error::Api(detail)
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// First non-blank key among `KEY_VARS`
fn first_key(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    KEY_VARS
        .iter()
        .find_map(|name| lookup(name).filter(|key| !key.trim().is_empty()))
}

/// Gemini provider configuration
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key
    pub api_key: String,
    /// Base URL
    pub base_url: String,
    /// Model used when a request names none
    pub default_model: String,
    /// Output cap used when a request sets none
    pub default_max_tokens: u32,
    /// Request timeout
    pub timeout: Duration,
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &mask_api_key(&self.api_key))
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl GeminiConfig {
    /// Configuration with the given key and stock defaults
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            default_max_tokens: 200,
            timeout: Duration::from_secs(60),
        }
    }

    /// Read `GEMINI_API_KEY` (falling back to `GOOGLE_API_KEY`) and an
    /// optional `GEMINI_BASE_URL`
    pub fn from_env() -> Result<Self> {
        let api_key = first_key(|name| std::env::var(name).ok()).ok_or_else(|| {
            Error::NotConfigured("set GEMINI_API_KEY to enable replies".to_string())
        })?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
            config.base_url = base_url;
        }

        info!(api_key = %mask_api_key(&config.api_key), "Gemini key loaded");
        Ok(config)
    }

    /// Set default model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Set default output cap
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.default_max_tokens = max_tokens;
        self
    }

    /// Set request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ============================================================================
// Provider
// ============================================================================

/// Google Gemini provider
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    /// Build the HTTP client for this configuration
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Split off the system prompt; empty assistant turns are dropped
    fn to_contents(messages: &[Message]) -> (Option<Content>, Vec<Content>) {
        let mut system = None;
        let mut contents = Vec::with_capacity(messages.len());

        for msg in messages {
            match msg.role {
                MessageRole::System => system = Some(Content::text(None, &msg.content)),
                MessageRole::User => contents.push(Content::text(Some("user"), &msg.content)),
                MessageRole::Assistant if !msg.content.is_empty() => {
                    contents.push(Content::text(Some("model"), &msg.content));
                }
                MessageRole::Assistant => {}
            }
        }

        (system, contents)
    }

    fn build_body(&self, request: &CompletionRequest) -> GenerateRequest {
        let (system_instruction, contents) = Self::to_contents(&request.messages);
        GenerateRequest {
            contents,
            system_instruction,
            generation_config: SamplingConfig {
                temperature: request.temperature,
                top_p: request.top_p,
                top_k: request.top_k,
                max_output_tokens: request
                    .max_tokens
                    .unwrap_or(self.config.default_max_tokens),
                stop_sequences: request.stop.clone(),
            },
        }
    }

    async fn post(&self, model: &str, body: &GenerateRequest) -> Result<GenerateResponse> {
        // the key is a query parameter, so the URL itself is never logged
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, model, self.config.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout(self.config.timeout.as_millis() as u64)
                } else {
                    Error::Network(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Network(e.without_url().to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Gemini rejected request");
            return Err(classify_failure(status, &text));
        }

        serde_json::from_str(&text).map_err(|e| {
            Error::InvalidResponse(format!("{e}: {}", truncate_safe(&text, ERROR_BODY_LIMIT)))
        })
    }
}

#[async_trait::async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let model = if request.model.is_empty() {
            self.config.default_model.as_str()
        } else {
            request.model.as_str()
        };

        let body = self.build_body(&request);
        debug!(contents = body.contents.len(), "Sending generateContent");
        let response = self.post(model, &body).await?;

        let candidate = response
            .candidates
            .first()
            .ok_or_else(|| Error::InvalidResponse("no candidates returned".to_string()))?;

        let content = candidate.joined_text();
        if content.trim().is_empty() {
            // safety-blocked replies come back with no text
            return Err(Error::InvalidResponse(format!(
                "empty reply (finish reason {:?})",
                candidate.finish_reason
            )));
        }

        Ok(CompletionResponse {
            content,
            usage: response.usage_metadata.map(|u| TokenUsage {
                prompt_tokens: u.prompt_token_count,
                completion_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            }),
            finish_reason: candidate.finish_reason.clone(),
            model: model.to_string(),
        })
    }
}
