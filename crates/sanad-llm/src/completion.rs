//! Completion request and response types
//!
//! This module defines the types for LLM completion requests and responses,
//! plus the sampling settings the support session sends with every turn.

use crate::message::Message;
use serde::{Deserialize, Serialize};

/// Token usage information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt tokens
    pub prompt_tokens: u32,
    /// Completion tokens
    pub completion_tokens: u32,
    /// Total tokens
    pub total_tokens: u32,
}

/// Completion request
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    /// Model to use (provider-specific, empty = provider default)
    pub model: String,
    /// Messages in the conversation
    pub messages: Vec<Message>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Nucleus sampling probability mass
    pub top_p: Option<f32>,
    /// Top-k sampling cutoff
    pub top_k: Option<u32>,
    /// Stop sequences
    pub stop: Option<Vec<String>>,
}

impl CompletionRequest {
    /// Create a new completion request
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Add a message
    #[must_use]
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Add messages
    #[must_use]
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Set max tokens
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Apply a full set of sampling settings
    #[must_use]
    pub fn with_settings(mut self, settings: &GenerationSettings) -> Self {
        self.temperature = Some(settings.temperature);
        self.top_p = Some(settings.top_p);
        self.top_k = Some(settings.top_k);
        self.max_tokens = Some(settings.max_output_tokens);
        self
    }
}

/// Completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Generated content
    pub content: String,
    /// Token usage
    pub usage: Option<TokenUsage>,
    /// Finish reason
    pub finish_reason: Option<String>,
    /// Model used
    pub model: String,
}

/// Sampling parameters for therapeutic replies.
///
/// Defaults keep replies short (2-4 sentences) and moderately creative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Nucleus sampling probability mass
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    /// Top-k cutoff
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    /// Maximum output tokens
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.8
}

fn default_top_k() -> u32 {
    40
}

fn default_max_output_tokens() -> u32 {
    200
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = GenerationSettings::default();
        assert_eq!(settings.temperature, 0.7);
        assert_eq!(settings.top_p, 0.8);
        assert_eq!(settings.top_k, 40);
        assert_eq!(settings.max_output_tokens, 200);
    }

    #[test]
    fn test_with_settings_fills_every_field() {
        let request = CompletionRequest::new("")
            .with_message(Message::user("hello"))
            .with_settings(&GenerationSettings::default());

        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.top_p, Some(0.8));
        assert_eq!(request.top_k, Some(40));
        assert_eq!(request.max_tokens, Some(200));
        assert_eq!(request.messages.len(), 1);
    }

    #[test]
    fn test_partial_settings_deserialize() {
        let settings: GenerationSettings = serde_json::from_str(r#"{"temperature":0.2}"#).unwrap();
        assert_eq!(settings.temperature, 0.2);
        assert_eq!(settings.top_k, 40);
    }
}
