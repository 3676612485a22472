//! WAV clip inspection
//!
//! Audio enters the pipeline as WAV bytes (a recorded file or an upload).
//! Clips are checked with `hound` before anything is sent to STT.

use crate::error::{Error, Result};
use std::io::Cursor;

/// Size of a canonical WAV header
const WAV_HEADER_LEN: usize = 44;

/// A validated WAV clip
#[derive(Debug, Clone)]
pub struct WavClip {
    bytes: Vec<u8>,
    spec: hound::WavSpec,
    frames: u32,
}

impl WavClip {
    /// Validate WAV bytes and read their format
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();

        if bytes.len() < WAV_HEADER_LEN {
            return Err(Error::InvalidAudio("Audio data too short".to_string()));
        }
        if &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
            return Err(Error::InvalidAudio("Invalid WAV format".to_string()));
        }

        let reader = hound::WavReader::new(Cursor::new(bytes.as_slice()))
            .map_err(|e| Error::InvalidAudio(format!("Failed to read WAV: {}", e)))?;
        let spec = reader.spec();
        let frames = reader.duration();

        Ok(Self {
            bytes,
            spec,
            frames,
        })
    }

    /// Raw WAV bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Sample rate (Hz)
    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.spec.sample_rate
    }

    /// Channel count
    #[must_use]
    pub fn channels(&self) -> u16 {
        self.spec.channels
    }

    /// Clip length in seconds
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        if self.spec.sample_rate == 0 {
            return 0.0;
        }
        f64::from(self.frames) / f64::from(self.spec.sample_rate)
    }

    /// Whether the clip holds no audio frames
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }
}

/// Encode mono samples (-1.0..=1.0) as 16-bit PCM WAV
#[cfg(test)]
pub(crate) fn samples_to_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| Error::AudioStream(format!("Failed to create WAV writer: {}", e)))?;

        for &sample in samples {
            let amplitude = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
            writer
                .write_sample(amplitude)
                .map_err(|e| Error::AudioStream(format!("Failed to write sample: {}", e)))?;
        }

        writer
            .finalize()
            .map_err(|e| Error::AudioStream(format!("Failed to finalize WAV: {}", e)))?;
    }

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_from_generated_wav() {
        let wav = samples_to_wav(&vec![0.0f32; 8000], 16000).unwrap();
        let clip = WavClip::from_bytes(wav).unwrap();

        assert_eq!(clip.sample_rate(), 16000);
        assert_eq!(clip.channels(), 1);
        assert!((clip.duration_secs() - 0.5).abs() < 1e-9);
        assert!(!clip.is_empty());
        assert_eq!(&clip.as_bytes()[0..4], b"RIFF");
    }

    #[test]
    fn test_rejects_short_input() {
        let err = WavClip::from_bytes(vec![0u8; 10]).unwrap_err();
        assert!(matches!(err, Error::InvalidAudio(_)));
    }

    #[test]
    fn test_rejects_non_wav() {
        let mut bytes = vec![0u8; 64];
        bytes[0..4].copy_from_slice(b"ID3\x03");
        assert!(matches!(
            WavClip::from_bytes(bytes),
            Err(Error::InvalidAudio(_))
        ));
    }

    #[test]
    fn test_empty_clip() {
        let wav = samples_to_wav(&[], 16000).unwrap();
        let clip = WavClip::from_bytes(wav).unwrap();
        assert!(clip.is_empty());
        assert_eq!(clip.duration_secs(), 0.0);
    }
}
