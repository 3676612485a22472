//! Error types for sanad-core
//!
//! This module provides error types and user-friendly error formatting.

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Lexicon failed to load or validate
    #[error("lexicon error: {0}")]
    Lexicon(String),

    /// LLM provider error
    #[error("llm error: {0}")]
    Llm(#[from] sanad_llm::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for user-friendly error messages
pub trait UserFriendlyError {
    /// Get a user-friendly error message
    fn user_message(&self) -> String;

    /// Get a suggestion for how to fix the error
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for Error {
    fn user_message(&self) -> String {
        match self {
            Error::Lexicon(msg) => format!("📖 Lexicon could not be used: {}", msg),
            Error::Llm(sanad_llm::Error::NotConfigured(msg)) => {
                format!("🔑 Generation provider is not configured: {}", msg)
            }
            Error::Llm(e) => format!("🤖 LLM error: {}", e),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            Error::Lexicon(_) => Some(
                "💡 Fix the file named by crisis.lexicon_path, or unset it to use the built-in lexicon."
                    .to_string(),
            ),
            Error::Llm(sanad_llm::Error::NotConfigured(_)) => {
                Some("💡 Set the GEMINI_API_KEY environment variable (or add it to .env).".to_string())
            }
            Error::Llm(sanad_llm::Error::RateLimit) => {
                Some("💡 Wait a moment or switch to a lighter model.".to_string())
            }
            Error::Llm(sanad_llm::Error::Network(_) | sanad_llm::Error::Timeout(_)) => {
                Some("💡 Check your internet connection and firewall settings.".to_string())
            }
            _ => None,
        }
    }
}

/// Format an error for display in the CLI
pub fn format_error_for_cli(error: &Error) -> String {
    let mut output = error.user_message();
    output.push('\n');

    if let Some(suggestion) = error.suggestion() {
        output.push('\n');
        output.push_str(&suggestion);
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_message() {
        let error = Error::from(sanad_llm::Error::NotConfigured(
            "GEMINI_API_KEY is not set".to_string(),
        ));

        assert!(error.user_message().contains("not configured"));
        assert!(error.suggestion().unwrap().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_lexicon_error_suggestion() {
        let error = Error::Lexicon("empty keyword list".to_string());
        let output = format_error_for_cli(&error);

        assert!(output.contains("empty keyword list"));
        assert!(output.contains("crisis.lexicon_path"));
    }

    #[test]
    fn test_api_error_has_no_suggestion() {
        let error = Error::from(sanad_llm::Error::Api("INVALID_ARGUMENT".to_string()));
        assert!(error.suggestion().is_none());
        assert!(error.user_message().contains("INVALID_ARGUMENT"));
    }
}
