//! Application configuration
//!
//! Typed view of `config/default.toml` plus its overrides, and the helpers
//! that turn it into running components.

mod loader;
mod providers;

pub use loader::load_config;
pub use providers::{build_session, load_lexicon, resolve_llm_provider};

use sanad_audio::VoiceConfig;
use sanad_llm::GenerationSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub conversation: ConversationConfig,
    #[serde(default)]
    pub voice: VoiceSection,
    #[serde(default)]
    pub crisis: CrisisConfig,
    #[serde(default)]
    pub eval: EvalConfig,
}

/// Generation provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "gemini" or "mock"
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_provider() -> String {
    "gemini".to_string()
}
fn default_model() -> String {
    sanad_llm::gemini::DEFAULT_MODEL.to_string()
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
fn default_timeout_secs() -> u64 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    /// Sampling parameters for the session
    pub fn settings(&self) -> GenerationSettings {
        GenerationSettings {
            temperature: self.temperature,
            top_p: self.top_p,
            top_k: self.top_k,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

/// Conversation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationConfig {
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

fn default_history_window() -> usize {
    sanad_core::DEFAULT_HISTORY_WINDOW
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
        }
    }
}

/// `[voice]` section; the rest of `VoiceConfig` keeps its defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceSection {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_tts_voice")]
    pub tts_voice: String,
    #[serde(default = "default_true")]
    pub playback: bool,
}

fn default_language() -> String {
    VoiceConfig::default().language
}
fn default_tts_voice() -> String {
    VoiceConfig::default().tts_voice
}
fn default_true() -> bool {
    true
}

impl Default for VoiceSection {
    fn default() -> Self {
        Self {
            language: default_language(),
            tts_voice: default_tts_voice(),
            playback: true,
        }
    }
}

impl VoiceSection {
    /// Full voice pipeline configuration
    pub fn to_voice_config(&self) -> VoiceConfig {
        let mut config = VoiceConfig::default()
            .with_tts_voice(self.tts_voice.clone())
            .with_playback(self.playback);
        config.language = self.language.clone();
        config
    }
}

/// Crisis lexicon settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrisisConfig {
    /// TOML lexicon file; empty for the built-in one
    #[serde(default)]
    pub lexicon_path: String,
}

impl CrisisConfig {
    /// Configured lexicon file, if any
    pub fn lexicon_path(&self) -> Option<PathBuf> {
        let path = self.lexicon_path.trim();
        (!path.is_empty()).then(|| PathBuf::from(path))
    }
}

/// Evaluation harness settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,
    /// 0 means random
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_report_dir")]
    pub report_dir: String,
}

fn default_time_scale() -> f64 {
    1.0
}
fn default_report_dir() -> String {
    "reports".to_string()
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            time_scale: default_time_scale(),
            seed: 0,
            report_dir: default_report_dir(),
        }
    }
}

impl EvalConfig {
    /// Fixed seed, if configured
    pub fn seed(&self) -> Option<u64> {
        (self.seed != 0).then_some(self.seed)
    }
}
