//! Error types for sanad-audio

use thiserror::Error;

/// Audio/voice error type
#[derive(Debug, Error)]
pub enum Error {
    /// Audio device error
    #[error("audio device error: {0}")]
    AudioDevice(String),

    /// Audio stream error
    #[error("audio stream error: {0}")]
    AudioStream(String),

    /// Input is not a usable WAV clip
    #[error("invalid audio: {0}")]
    InvalidAudio(String),

    /// Speech-to-text error
    #[error("STT error: {0}")]
    Stt(String),

    /// Text-to-speech error
    #[error("TTS error: {0}")]
    Tts(String),

    /// Feature not enabled (missing credentials)
    #[error("feature not enabled: {0}")]
    NotEnabled(String),

    /// A turn is already being processed
    #[error("a voice turn is already in progress")]
    Busy,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
