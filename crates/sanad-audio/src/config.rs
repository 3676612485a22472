//! Voice configuration

use serde::{Deserialize, Serialize};

/// Voice pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// Language hint for STT (ISO-639-1)
    #[serde(default = "default_language")]
    pub language: String,

    /// Locale used in synthesized speech
    #[serde(default = "default_locale")]
    pub locale: String,

    /// TTS voice name
    #[serde(default = "default_tts_voice")]
    pub tts_voice: String,

    /// Whisper model name
    #[serde(default = "default_stt_model")]
    pub stt_model: String,

    /// Play reply audio on the default output device
    #[serde(default = "default_playback")]
    pub playback: bool,

    /// TTS request timeout (seconds)
    #[serde(default = "default_tts_timeout")]
    pub tts_timeout_secs: u64,
}

fn default_language() -> String {
    "ar".to_string()
}

fn default_locale() -> String {
    "ar-OM".to_string()
}

fn default_tts_voice() -> String {
    "ar-OM-AyshaNeural".to_string()
}

fn default_stt_model() -> String {
    "whisper-1".to_string()
}

fn default_playback() -> bool {
    true
}

fn default_tts_timeout() -> u64 {
    30
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            locale: default_locale(),
            tts_voice: default_tts_voice(),
            stt_model: default_stt_model(),
            playback: default_playback(),
            tts_timeout_secs: default_tts_timeout(),
        }
    }
}

impl VoiceConfig {
    /// Set TTS voice
    #[must_use]
    pub fn with_tts_voice(mut self, voice: impl Into<String>) -> Self {
        self.tts_voice = voice.into();
        self
    }

    /// Enable or disable playback
    #[must_use]
    pub fn with_playback(mut self, playback: bool) -> Self {
        self.playback = playback;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_omani_arabic() {
        let config = VoiceConfig::default();
        assert_eq!(config.language, "ar");
        assert_eq!(config.locale, "ar-OM");
        assert_eq!(config.tts_voice, "ar-OM-AyshaNeural");
        assert!(config.playback);
    }

    #[test]
    fn test_builders() {
        let config = VoiceConfig::default()
            .with_tts_voice("ar-OM-AbdullahNeural")
            .with_playback(false);
        assert_eq!(config.tts_voice, "ar-OM-AbdullahNeural");
        assert!(!config.playback);
    }
}
