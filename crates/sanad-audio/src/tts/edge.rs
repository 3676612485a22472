//! Edge TTS backend
//!
//! Posts SSML to the public Microsoft read-aloud endpoint and gets MP3
//! back. Omani voices (`ar-OM-*`) are available without credentials.

use super::backend::TtsBackend;
use crate::config::VoiceConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Edge TTS endpoint
const EDGE_TTS_ENDPOINT: &str =
    "https://speech.platform.bing.com/consumer/speech/synthesize/readaloud/voice/v1";

/// Edge TTS trusted client token (public)
const TRUSTED_CLIENT_TOKEN: &str = "6A5AA1D4EAFF4E9FB37E23D68491D6F4";

/// Edge TTS backend
pub struct EdgeTts {
    client: Client,
    locale: String,
}

impl EdgeTts {
    /// Create a backend speaking the configured locale
    pub fn new(config: &VoiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.tts_timeout_secs))
            .build()
            .map_err(|e| Error::Tts(format!("Failed to create HTTP client: {}", e)))?;

        info!("Edge TTS initialized (voice: {})", config.tts_voice);

        Ok(Self {
            client,
            locale: config.locale.clone(),
        })
    }

    fn ssml(&self, text: &str, voice: &str) -> String {
        format!(
            r#"<speak version="1.0" xmlns="http://www.w3.org/2001/10/synthesis" xml:lang="{}">
                <voice name="{}">{}</voice>
            </speak>"#,
            self.locale,
            voice,
            escape_xml(text)
        )
    }
}

/// Escape XML special characters
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[async_trait]
impl TtsBackend for EdgeTts {
    fn name(&self) -> &str {
        "edge-tts"
    }

    async fn synthesize(&self, text: &str, voice: &str) -> Result<Bytes> {
        if text.trim().is_empty() {
            return Ok(Bytes::new());
        }

        debug!(chars = text.chars().count(), voice, "Synthesizing");

        let url = format!(
            "{}?trustedclienttoken={}",
            EDGE_TTS_ENDPOINT, TRUSTED_CLIENT_TOKEN
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/ssml+xml")
            .header(
                "X-Microsoft-OutputFormat",
                "audio-24khz-48kbitrate-mono-mp3",
            )
            .body(self.ssml(text, voice))
            .send()
            .await
            .map_err(|e| Error::Tts(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Tts(format!("TTS API error: {}", response.status())));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| Error::Tts(format!("Failed to read response: {}", e)))?;

        debug!("Synthesized {} bytes of audio", audio.len());
        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_escape() {
        assert_eq!(escape_xml("Hello & World"), "Hello &amp; World");
        assert_eq!(escape_xml("<script>"), "&lt;script&gt;");
    }

    #[test]
    fn test_ssml_uses_locale_and_voice() {
        let tts = EdgeTts::new(&VoiceConfig::default()).unwrap();
        let ssml = tts.ssml("شلونك؟ <تمام>", "ar-OM-AyshaNeural");

        assert!(ssml.contains(r#"xml:lang="ar-OM""#));
        assert!(ssml.contains(r#"<voice name="ar-OM-AyshaNeural">"#));
        assert!(ssml.contains("شلونك؟ &lt;تمام&gt;"));
    }

    #[tokio::test]
    async fn test_blank_text_skips_request() {
        let tts = EdgeTts::new(&VoiceConfig::default()).unwrap();
        let audio = tts.synthesize("   ", "ar-OM-AyshaNeural").await.unwrap();
        assert!(audio.is_empty());
    }
}
