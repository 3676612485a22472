//! Component wiring from configuration

use super::{AppConfig, CrisisConfig, LlmConfig};
use anyhow::{bail, Context, Result};
use sanad_core::{Lexicon, TherapistSession};
use sanad_llm::{GeminiConfig, GeminiProvider, LlmProvider, MockProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Built-in lexicon, or the file named by `crisis.lexicon_path`
pub fn load_lexicon(config: &CrisisConfig) -> Result<Arc<Lexicon>> {
    match config.lexicon_path() {
        Some(path) => {
            let lexicon = Lexicon::load(&path)
                .with_context(|| format!("Failed to load lexicon from {}", path.display()))?;
            Ok(Arc::new(lexicon))
        }
        None => Ok(Arc::new(Lexicon::omani())),
    }
}

/// Generation provider named by `llm.provider`
pub fn resolve_llm_provider(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>> {
    match config.provider.as_str() {
        "gemini" => {
            let gemini = GeminiConfig::from_env()
                .map_err(sanad_core::Error::from)?
                .with_model(config.model.clone())
                .with_max_tokens(config.max_output_tokens)
                .with_timeout(Duration::from_secs(config.timeout_secs));
            let provider = GeminiProvider::new(gemini).map_err(sanad_core::Error::from)?;
            info!(model = %config.model, "Registered Gemini provider");
            Ok(Arc::new(provider))
        }
        "mock" => {
            info!("Using offline mock provider");
            Ok(Arc::new(MockProvider::new()))
        }
        other => bail!("Unknown LLM provider '{}' (expected gemini or mock)", other),
    }
}

/// Therapist session with the configured lexicon, provider and sampling
pub fn build_session(config: &AppConfig) -> Result<TherapistSession> {
    let lexicon = load_lexicon(&config.crisis)?;
    let provider = resolve_llm_provider(&config.llm)?;

    let session = TherapistSession::new(lexicon, provider)
        .with_settings(config.llm.settings())
        .with_model(config.llm.model.clone())
        .with_history_window(config.conversation.history_window);

    info!(session_id = %session.id(), "Session ready");
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lexicon_by_default() {
        let lexicon = load_lexicon(&CrisisConfig::default()).unwrap();
        assert!(lexicon.crisis_keywords().iter().any(|k| k == "أريد أموت"));
    }

    #[test]
    fn test_missing_lexicon_file_is_an_error() {
        let config = CrisisConfig {
            lexicon_path: "/nonexistent/lexicon.toml".to_string(),
        };
        let err = load_lexicon(&config).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/lexicon.toml"));
    }

    #[test]
    fn test_unknown_provider() {
        let config = LlmConfig {
            provider: "carrier-pigeon".to_string(),
            ..LlmConfig::default()
        };
        assert!(resolve_llm_provider(&config).is_err());
    }

    #[test]
    fn test_mock_session() {
        let mut config = AppConfig::default();
        config.llm.provider = "mock".to_string();
        config.conversation.history_window = 1;

        assert!(build_session(&config).is_ok());
    }
}
