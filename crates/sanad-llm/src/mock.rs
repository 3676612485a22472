//! Mock LLM Provider for testing
//!
//! Returns queued replies (or a fixed default), can be switched into a
//! failing mode, and records every request it receives.

use crate::completion::{CompletionRequest, CompletionResponse};
use crate::error::{Error, Result};
use crate::provider::LlmProvider;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Reply used when the queue is empty
pub const DEFAULT_MOCK_REPLY: &str = "أفهم شعورك، خبرني أكثر عن اللي تمر فيه.";

/// A mock LLM provider that returns queued responses or a default one.
#[derive(Clone)]
pub struct MockProvider {
    responses: Arc<Mutex<VecDeque<String>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    failing: Arc<AtomicBool>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Create a new mock provider.
    #[must_use]
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a provider whose every call fails.
    #[must_use]
    pub fn failing() -> Self {
        let provider = Self::new();
        provider.set_failing(true);
        provider
    }

    /// Add a reply to the queue.
    pub fn add_response(&self, content: impl Into<String>) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(content.into());
    }

    /// Toggle failing mode.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of calls made to `complete`.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait::async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Network("mock provider set to fail".to_string()));
        }

        let content = self
            .responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| DEFAULT_MOCK_REPLY.to_string());

        Ok(CompletionResponse {
            content,
            usage: None,
            finish_reason: Some("stop".to_string()),
            model: "mock-model".to_string(),
        })
    }
}
