//! Speech-to-Text
//!
//! The `Transcriber` trait is the seam the voice controller talks to.
//! `WhisperTranscriber` calls the OpenAI Whisper API (requires
//! `OPENAI_API_KEY`).

use crate::config::VoiceConfig;
use crate::error::{Error, Result};
use crate::input::WavClip;
use async_openai::{
    config::OpenAIConfig,
    types::audio::{AudioInput, AudioResponseFormat, CreateTranscriptionRequestArgs},
    Client,
};
use tracing::{debug, info};

/// Outcome of transcribing one clip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transcription {
    /// Recognised text
    Text(String),
    /// Nothing intelligible in the clip
    NoMatch,
}

impl Transcription {
    /// Map raw STT output; blank output means nothing was recognised
    #[must_use]
    pub fn from_raw(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            Self::NoMatch
        } else {
            Self::Text(text.to_string())
        }
    }
}

/// A speech-to-text backend
#[async_trait::async_trait]
pub trait Transcriber: Send + Sync {
    /// Backend name
    fn name(&self) -> &str;

    /// Transcribe WAV bytes
    async fn transcribe(&self, wav: &[u8]) -> Result<Transcription>;
}

/// Whisper API transcriber
pub struct WhisperTranscriber {
    client: Client<OpenAIConfig>,
    model: String,
    language: String,
}

impl WhisperTranscriber {
    /// Create from environment (`OPENAI_API_KEY`)
    pub fn from_env(config: &VoiceConfig) -> Result<Self> {
        if !crate::stt_available() {
            return Err(Error::NotEnabled("STT requires OPENAI_API_KEY".to_string()));
        }

        info!(
            "STT initialized (language: {}, model: {})",
            config.language, config.stt_model
        );

        Ok(Self {
            client: Client::new(),
            model: config.stt_model.clone(),
            language: config.language.clone(),
        })
    }

    /// Get the configured language
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }
}

#[async_trait::async_trait]
impl Transcriber for WhisperTranscriber {
    fn name(&self) -> &str {
        "whisper-api"
    }

    async fn transcribe(&self, wav: &[u8]) -> Result<Transcription> {
        let clip = WavClip::from_bytes(wav)?;
        if clip.is_empty() {
            return Ok(Transcription::NoMatch);
        }

        debug!(
            bytes = wav.len(),
            duration_secs = clip.duration_secs(),
            "Transcribing via API"
        );

        let request = CreateTranscriptionRequestArgs::default()
            .file(AudioInput::from_vec_u8("audio.wav".to_string(), wav.to_vec()))
            .model(&self.model)
            .language(&self.language)
            .response_format(AudioResponseFormat::Text)
            .build()
            .map_err(|e| Error::Stt(format!("Failed to build request: {e}")))?;

        let response = self
            .client
            .audio()
            .transcription()
            .create(request)
            .await
            .map_err(|e| Error::Stt(format!("Transcription failed: {e}")))?;

        Ok(Transcription::from_raw(&response.text))
    }
}
