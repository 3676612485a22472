//! Sanad LLM - Generation Provider Abstraction
//!
//! This crate provides the generation collaborator used by the support
//! session:
//! - Provider: the `LlmProvider` trait every backend implements
//! - Gemini: Google Gemini provider (reqwest)
//! - Mock: queued/failing provider for tests and offline runs

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod completion;
pub mod error;
pub mod gemini;
pub mod message;
pub mod mock;
pub mod provider;
pub mod util;

pub use completion::{CompletionRequest, CompletionResponse, GenerationSettings, TokenUsage};
pub use error::{Error, Result};
pub use gemini::{GeminiConfig, GeminiProvider};
pub use message::{Message, MessageRole};
pub use mock::MockProvider;
pub use provider::LlmProvider;
