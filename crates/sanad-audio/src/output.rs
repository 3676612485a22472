//! Audio output (speaker playback)

use crate::error::{Error, Result};
use rodio::{Decoder, OutputStream, Sink};
use std::io::Cursor;
use tracing::debug;

/// Something that can play encoded audio
#[async_trait::async_trait]
pub trait Playback: Send + Sync {
    /// Play audio bytes (WAV, MP3) and wait for completion
    async fn play(&self, audio: &[u8]) -> Result<()>;
}

/// Playback on the default output device.
///
/// The rodio stream is opened per clip on a blocking thread, so the
/// handle never crosses an await point.
#[derive(Debug, Clone, Copy, Default)]
pub struct AudioOutput;

impl AudioOutput {
    /// Playback on the default device
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn play_blocking(audio: Vec<u8>) -> Result<()> {
        let (_stream, handle) = OutputStream::try_default()
            .map_err(|e| Error::AudioDevice(format!("Failed to get output device: {}", e)))?;

        let source = Decoder::new(Cursor::new(audio))
            .map_err(|e| Error::AudioStream(format!("Failed to decode audio: {}", e)))?;

        let sink = Sink::try_new(&handle)
            .map_err(|e| Error::AudioStream(format!("Failed to create sink: {}", e)))?;

        sink.append(source);
        sink.sleep_until_end();

        Ok(())
    }
}

#[async_trait::async_trait]
impl Playback for AudioOutput {
    async fn play(&self, audio: &[u8]) -> Result<()> {
        if audio.is_empty() {
            return Ok(());
        }

        let audio = audio.to_vec();
        tokio::task::spawn_blocking(move || Self::play_blocking(audio))
            .await
            .map_err(|e| Error::AudioStream(format!("Playback task failed: {e}")))??;

        debug!("Audio playback completed");
        Ok(())
    }
}
