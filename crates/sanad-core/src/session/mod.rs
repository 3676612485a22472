//! Therapist session - per-user response arbitration
//!
//! Each turn runs one crisis check. A crisis short-circuits to the fixed
//! emergency script without calling the generator; otherwise the reply is
//! generated from the recent conversation, scored for cultural fit and
//! recorded. Generation failures never escape: the user gets the fallback
//! reply instead.

use crate::conversation::{
    ConversationHistory, ConversationTurn, PromptBuilder, ResponseType, FALLBACK_REPLY,
};
use crate::crisis::{CrisisDetector, DetectionResult, EMERGENCY_SCRIPT};
use crate::cultural::{CulturalValidator, ValidationContext, ValidationResult};
use crate::lexicon::Lexicon;
use sanad_llm::{CompletionRequest, GenerationSettings, LlmProvider};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Result of one turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// Text shown and spoken to the user
    pub reply: String,
    /// How the reply was produced
    pub response_type: ResponseType,
    /// Crisis check for the utterance
    pub detection: DetectionResult,
    /// Cultural score, present for generated replies only
    pub validation: Option<ValidationResult>,
}

/// Conversation state and collaborators for one user
pub struct TherapistSession {
    id: Uuid,
    detector: Arc<CrisisDetector>,
    validator: Arc<CulturalValidator>,
    provider: Arc<dyn LlmProvider>,
    settings: GenerationSettings,
    model: String,
    prompt: PromptBuilder,
    history: ConversationHistory,
}

impl TherapistSession {
    /// Create a session with detector and validator over `lexicon`
    #[must_use]
    pub fn new(lexicon: Arc<Lexicon>, provider: Arc<dyn LlmProvider>) -> Self {
        Self::from_parts(
            Arc::new(CrisisDetector::new(Arc::clone(&lexicon))),
            Arc::new(CulturalValidator::new(lexicon)),
            provider,
        )
    }

    /// Create a session from shared components
    #[must_use]
    pub fn from_parts(
        detector: Arc<CrisisDetector>,
        validator: Arc<CulturalValidator>,
        provider: Arc<dyn LlmProvider>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            detector,
            validator,
            provider,
            settings: GenerationSettings::default(),
            model: String::new(),
            prompt: PromptBuilder::default(),
            history: ConversationHistory::new(),
        }
    }

    /// Set sampling parameters
    #[must_use]
    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the model name (empty = provider default)
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set how many past turns go into each prompt
    #[must_use]
    pub fn with_history_window(mut self, window: usize) -> Self {
        self.prompt = PromptBuilder::new(window);
        self
    }

    /// Session identifier (for logs)
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Conversation so far
    #[must_use]
    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Forget the conversation
    pub fn clear_history(&mut self) {
        info!(session_id = %self.id, turns = self.history.len(), "Clearing conversation");
        self.history.clear();
    }

    /// Produce the reply for one utterance and record the turn
    #[instrument(skip(self, utterance), fields(session_id = %self.id))]
    pub async fn respond(&mut self, utterance: &str) -> TurnOutcome {
        let detection = self.detector.detect(utterance);

        let outcome = if detection.is_crisis {
            warn!(
                severity_score = detection.severity_score,
                "Diverting turn to emergency script"
            );
            TurnOutcome {
                reply: EMERGENCY_SCRIPT.to_string(),
                response_type: ResponseType::Crisis,
                detection,
                validation: None,
            }
        } else {
            self.generate(utterance, detection).await
        };

        self.history.push(ConversationTurn::new(
            utterance,
            outcome.reply.clone(),
            outcome.response_type,
        ));
        outcome
    }

    async fn generate(&self, utterance: &str, detection: DetectionResult) -> TurnOutcome {
        let request = CompletionRequest::new(self.model.clone())
            .with_messages(self.prompt.build(&self.history, utterance))
            .with_settings(&self.settings);

        match self.provider.complete(request).await {
            Ok(response) => {
                let reply = response.content.trim().to_string();
                let validation = self.validator.validate(&reply, &ValidationContext::General);
                debug!(
                    model = %response.model,
                    overall_score = validation.overall_score,
                    appropriate = validation.cultural_appropriateness,
                    "Generated reply scored"
                );
                TurnOutcome {
                    reply,
                    response_type: ResponseType::Normal,
                    detection,
                    validation: Some(validation),
                }
            }
            Err(e) => {
                error!(error = %e, provider = %self.provider.name(), "Generation failed, using fallback");
                TurnOutcome {
                    reply: FALLBACK_REPLY.to_string(),
                    response_type: ResponseType::Error,
                    detection,
                    validation: None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
