//! Voice CLI command
//!
//! `sanad voice <file.wav>...` - each clip is one spoken turn: transcribed,
//! answered, synthesized and (optionally) played back.

use crate::config::{build_session, load_config};
use anyhow::{bail, Context, Result};
use sanad_audio::{VoiceController, VoiceTurn, WavClip};
use sanad_core::ResponseType;
use std::path::PathBuf;
use tracing::info;

/// Run one turn per WAV file, in order
pub async fn run(files: Vec<PathBuf>, no_playback: bool) -> Result<()> {
    if !sanad_audio::stt_available() {
        bail!("Voice recognition is not available. To enable: export OPENAI_API_KEY=\"sk-...\"");
    }

    let config = load_config()?;
    let session = build_session(&config)?;
    let mut voice = config.voice.to_voice_config();
    if no_playback {
        voice = voice.with_playback(false);
    }
    let controller = VoiceController::from_config(&voice, session)?;

    println!("\nSanad Voice");
    println!("{}", "-".repeat(40));
    println!("  Language: {}", voice.language);
    println!("  Voice:    {}", voice.tts_voice);
    println!("  Playback: {}", if voice.playback { "on" } else { "off" });
    println!();

    for path in files {
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let clip = WavClip::from_bytes(bytes)
            .with_context(|| format!("{} is not a usable WAV clip", path.display()))?;
        info!(
            file = %path.display(),
            duration_secs = clip.duration_secs(),
            sample_rate = clip.sample_rate(),
            channels = clip.channels(),
            "Processing clip"
        );

        match controller.run_turn(clip.as_bytes()).await? {
            VoiceTurn::Unrecognized { prompt } => {
                println!("[{}] {}\n", path.display(), prompt);
            }
            VoiceTurn::Replied {
                transcript,
                outcome,
                audio,
            } => {
                println!("[{}]", path.display());
                println!("أنت: {}", transcript);
                let marker = if outcome.response_type == ResponseType::Crisis {
                    "⚠️  "
                } else {
                    ""
                };
                println!("سند: {}{}", marker, outcome.reply);
                if audio.is_none() {
                    println!("(no audio)");
                }
                println!();
            }
        }
    }

    Ok(())
}
