//! Voice Controller - one spoken turn, end to end
//!
//! WAV bytes in, transcribed, answered by the therapist session, synthesized
//! and played. Only one turn runs at a time; overlapping calls are rejected
//! with `Error::Busy`.

use crate::config::VoiceConfig;
use crate::error::{Error, Result};
use crate::output::{AudioOutput, Playback};
use crate::stt::{Transcriber, Transcription, WhisperTranscriber};
use crate::tts::{EdgeTts, TtsBackend};
use bytes::Bytes;
use sanad_core::{TherapistSession, TurnOutcome};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Shown when the clip could not be understood
pub const RETRY_PROMPT: &str = "لم أتمكن من فهم الصوت. حاول مرة أخرى بصوت أوضح.";

/// Result of one voice turn
#[derive(Debug, Clone)]
pub enum VoiceTurn {
    /// Speech was not recognised; nothing was recorded
    Unrecognized {
        /// Prompt asking the user to try again
        prompt: &'static str,
    },
    /// The session replied
    Replied {
        /// What the user said
        transcript: String,
        /// Session outcome
        outcome: TurnOutcome,
        /// Synthesized reply, absent if synthesis failed
        audio: Option<Bytes>,
    },
}

/// Clears the processing flag when a turn ends, however it ends
struct ProcessingGuard<'a>(&'a AtomicBool);

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Voice pipeline around one therapist session
pub struct VoiceController {
    transcriber: Arc<dyn Transcriber>,
    tts: Option<Arc<dyn TtsBackend>>,
    playback: Option<Arc<dyn Playback>>,
    voice: String,
    session: Mutex<TherapistSession>,
    processing: AtomicBool,
}

impl VoiceController {
    /// Create a controller with explicit collaborators
    #[must_use]
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        session: TherapistSession,
        voice: impl Into<String>,
    ) -> Self {
        Self {
            transcriber,
            tts: None,
            playback: None,
            voice: voice.into(),
            session: Mutex::new(session),
            processing: AtomicBool::new(false),
        }
    }

    /// Whisper STT, Edge TTS and (optionally) speaker playback
    pub fn from_config(config: &VoiceConfig, session: TherapistSession) -> Result<Self> {
        let transcriber = Arc::new(WhisperTranscriber::from_env(config)?);
        let mut controller = Self::new(transcriber, session, config.tts_voice.clone())
            .with_tts(Arc::new(EdgeTts::new(config)?));
        if config.playback {
            controller = controller.with_playback(Arc::new(AudioOutput::new()));
        }

        info!(
            voice = %config.tts_voice,
            playback = config.playback,
            "Voice controller ready"
        );
        Ok(controller)
    }

    /// Set the synthesis backend
    #[must_use]
    pub fn with_tts(mut self, tts: Arc<dyn TtsBackend>) -> Self {
        self.tts = Some(tts);
        self
    }

    /// Set the playback sink
    #[must_use]
    pub fn with_playback(mut self, playback: Arc<dyn Playback>) -> Self {
        self.playback = Some(playback);
        self
    }

    /// Whether a turn is in flight
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::Acquire)
    }

    /// Access the session (e.g. to read or clear history)
    pub async fn session(&self) -> tokio::sync::MutexGuard<'_, TherapistSession> {
        self.session.lock().await
    }

    /// Run one turn from WAV bytes
    pub async fn run_turn(&self, wav: &[u8]) -> Result<VoiceTurn> {
        if self
            .processing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Voice turn rejected, previous turn still in progress");
            return Err(Error::Busy);
        }
        let _guard = ProcessingGuard(&self.processing);

        let transcript = match self.transcriber.transcribe(wav).await {
            Ok(Transcription::Text(text)) => text,
            Ok(Transcription::NoMatch) => {
                warn!("Could not understand audio");
                return Ok(VoiceTurn::Unrecognized {
                    prompt: RETRY_PROMPT,
                });
            }
            Err(Error::Stt(e)) => {
                warn!(error = %e, backend = %self.transcriber.name(), "Speech recognition failed");
                return Ok(VoiceTurn::Unrecognized {
                    prompt: RETRY_PROMPT,
                });
            }
            Err(e) => return Err(e),
        };

        let outcome = self.session.lock().await.respond(&transcript).await;
        info!(response_type = outcome.response_type.as_str(), "Voice turn answered");

        let audio = self.synthesize(&outcome.reply).await;

        if let (Some(audio), Some(playback)) = (&audio, &self.playback) {
            if let Err(e) = playback.play(audio).await {
                warn!(error = %e, "Playback failed, skipping");
            }
        }

        Ok(VoiceTurn::Replied {
            transcript,
            outcome,
            audio,
        })
    }

    async fn synthesize(&self, text: &str) -> Option<Bytes> {
        let tts = self.tts.as_ref()?;
        match tts.synthesize(text, &self.voice).await {
            Ok(audio) if !audio.is_empty() => Some(audio),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, backend = %tts.name(), "Synthesis failed, replying without audio");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sanad_core::{Lexicon, ResponseType, EMERGENCY_SCRIPT};
    use sanad_llm::MockProvider;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    struct ScriptedTranscriber {
        result: Transcription,
        delay: Duration,
    }

    #[async_trait::async_trait]
    impl Transcriber for ScriptedTranscriber {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn transcribe(&self, _wav: &[u8]) -> Result<Transcription> {
            tokio::time::sleep(self.delay).await;
            Ok(self.result.clone())
        }
    }

    struct FailingStt;

    #[async_trait::async_trait]
    impl Transcriber for FailingStt {
        fn name(&self) -> &str {
            "failing"
        }

        async fn transcribe(&self, _wav: &[u8]) -> Result<Transcription> {
            Err(Error::Stt("service unavailable".to_string()))
        }
    }

    struct FakeTts {
        fail: bool,
    }

    #[async_trait::async_trait]
    impl TtsBackend for FakeTts {
        fn name(&self) -> &str {
            "fake"
        }

        async fn synthesize(&self, text: &str, _voice: &str) -> Result<Bytes> {
            if self.fail {
                Err(Error::Tts("offline".to_string()))
            } else {
                Ok(Bytes::from(text.as_bytes().to_vec()))
            }
        }
    }

    #[derive(Default)]
    struct CountingPlayback {
        plays: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Playback for CountingPlayback {
        async fn play(&self, _audio: &[u8]) -> Result<()> {
            self.plays.fetch_add(1, Ordering::SeqCst);
            Err(Error::AudioDevice("no speaker".to_string()))
        }
    }

    fn session(provider: MockProvider) -> TherapistSession {
        TherapistSession::new(Arc::new(Lexicon::omani()), Arc::new(provider))
    }

    fn says(text: &str) -> Arc<ScriptedTranscriber> {
        Arc::new(ScriptedTranscriber {
            result: Transcription::Text(text.to_string()),
            delay: Duration::ZERO,
        })
    }

    #[tokio::test]
    async fn test_no_match_returns_retry_prompt_without_history() {
        let stt = Arc::new(ScriptedTranscriber {
            result: Transcription::NoMatch,
            delay: Duration::ZERO,
        });
        let controller = VoiceController::new(stt, session(MockProvider::new()), "v");

        let turn = controller.run_turn(b"wav").await.unwrap();

        assert!(matches!(turn, VoiceTurn::Unrecognized { prompt } if prompt == RETRY_PROMPT));
        assert!(controller.session().await.history().is_empty());
        assert!(!controller.is_processing());
    }

    #[tokio::test]
    async fn test_stt_failure_is_treated_as_unrecognized() {
        let controller =
            VoiceController::new(Arc::new(FailingStt), session(MockProvider::new()), "v");

        let turn = controller.run_turn(b"wav").await.unwrap();
        assert!(matches!(turn, VoiceTurn::Unrecognized { .. }));
    }

    #[tokio::test]
    async fn test_reply_is_synthesized() {
        let provider = MockProvider::new();
        provider.add_response("ما عليك، شنو اللي مضايقك؟");
        let controller = VoiceController::new(says("شلونك؟"), session(provider), "v")
            .with_tts(Arc::new(FakeTts { fail: false }));

        let VoiceTurn::Replied {
            transcript,
            outcome,
            audio,
        } = controller.run_turn(b"wav").await.unwrap()
        else {
            panic!("expected a reply");
        };

        assert_eq!(transcript, "شلونك؟");
        assert_eq!(outcome.response_type, ResponseType::Normal);
        assert_eq!(audio.unwrap(), Bytes::from("ما عليك، شنو اللي مضايقك؟".as_bytes().to_vec()));
        assert_eq!(controller.session().await.history().len(), 1);
    }

    #[tokio::test]
    async fn test_tts_failure_still_returns_text() {
        let controller = VoiceController::new(says("أبي أموت"), session(MockProvider::new()), "v")
            .with_tts(Arc::new(FakeTts { fail: true }));

        let VoiceTurn::Replied { outcome, audio, .. } = controller.run_turn(b"wav").await.unwrap()
        else {
            panic!("expected a reply");
        };

        assert_eq!(outcome.response_type, ResponseType::Crisis);
        assert_eq!(outcome.reply, EMERGENCY_SCRIPT);
        assert!(audio.is_none());
    }

    #[tokio::test]
    async fn test_playback_failure_is_skipped() {
        let playback = Arc::new(CountingPlayback::default());
        let controller = VoiceController::new(says("شلونك؟"), session(MockProvider::new()), "v")
            .with_tts(Arc::new(FakeTts { fail: false }))
            .with_playback(playback.clone());

        let turn = controller.run_turn(b"wav").await;
        assert!(matches!(turn, Ok(VoiceTurn::Replied { .. })));
        assert_eq!(playback.plays.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_turn_is_busy() {
        let stt = Arc::new(ScriptedTranscriber {
            result: Transcription::Text("شلونك؟".to_string()),
            delay: Duration::from_secs(2),
        });
        let controller = VoiceController::new(stt, session(MockProvider::new()), "v");

        let (first, second) = tokio::join!(controller.run_turn(b"a"), controller.run_turn(b"b"));

        assert!(matches!(first, Ok(VoiceTurn::Replied { .. })));
        assert!(matches!(second, Err(Error::Busy)));
        assert!(!controller.is_processing());

        // the flag is released after the first turn
        assert!(controller.run_turn(b"c").await.is_ok());
    }
}
