//! LLM provider trait

use crate::completion::{CompletionRequest, CompletionResponse};
use crate::error::Result;

/// A text generation backend
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Complete a conversation (text only)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;
}
