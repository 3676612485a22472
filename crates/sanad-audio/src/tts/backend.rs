use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// A speech synthesis backend
#[async_trait]
pub trait TtsBackend: Send + Sync {
    /// Backend name
    fn name(&self) -> &str;

    /// Synthesize `text` with `voice`, returning encoded audio (MP3)
    async fn synthesize(&self, text: &str, voice: &str) -> Result<Bytes>;
}
