//! Sanad Audio - Speech Collaborators
//!
//! This crate turns a spoken WAV clip into a therapist reply and back:
//! - Speech-to-text (Whisper API via OpenAI)
//! - Text-to-speech (Edge TTS, no API key needed)
//! - Playback (rodio)
//! - `VoiceController`: one guarded turn from WAV bytes to reply audio
//!
//! # Usage
//!
//! ```rust,ignore
//! use sanad_audio::{VoiceConfig, VoiceController};
//!
//! let controller = VoiceController::from_config(&VoiceConfig::default(), session)?;
//! let turn = controller.run_turn(&wav_bytes).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod stt;
pub mod tts;

mod controller;

pub use config::VoiceConfig;
pub use controller::{VoiceController, VoiceTurn, RETRY_PROMPT};
pub use error::{Error, Result};
pub use input::WavClip;
pub use output::{AudioOutput, Playback};
pub use stt::{Transcriber, Transcription, WhisperTranscriber};
pub use tts::{EdgeTts, TtsBackend};

/// Check if STT is available (OPENAI_API_KEY set)
#[must_use]
pub fn stt_available() -> bool {
    std::env::var("OPENAI_API_KEY").is_ok_and(|key| !key.trim().is_empty())
}
