//! Audio playback and play serialization
//!
//! [`AudioPlayback`] drives the default output device; [`PlaybackGate`]
//! serializes concurrent play attempts and enforces a minimum gap between
//! consecutive plays so overlapping utterances stay intelligible.

use std::io::Cursor;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleRate, StreamConfig};

use crate::{Error, Result};

/// Sample rate for playback (matches common TTS output)
const PLAYBACK_SAMPLE_RATE: u32 = 24000;

/// Serializes audio plays with a minimum inter-play gap
///
/// The gate's mutex spans the whole check-and-play operation, so delay
/// accounting is race-free and at most one clip plays at a time. The
/// completion timestamp is updated even when playback fails, so a failed
/// play never wedges the gate.
pub struct PlaybackGate {
    min_gap: Duration,
    last_finished: tokio::sync::Mutex<Option<Instant>>,
}

impl PlaybackGate {
    /// Create a gate enforcing the given minimum gap between plays
    #[must_use]
    pub fn new(min_gap: Duration) -> Self {
        Self {
            min_gap,
            last_finished: tokio::sync::Mutex::new(None),
        }
    }

    /// Run a play closure under the gate
    ///
    /// Waits out the remainder of the minimum gap since the previous play
    /// completed, invokes `play` (expected to block for the clip's duration),
    /// then records the completion time.
    ///
    /// # Errors
    ///
    /// Returns the closure's error after updating the completion timestamp.
    pub async fn pace<T>(&self, play: impl FnOnce() -> Result<T>) -> Result<T> {
        let mut last_finished = self.last_finished.lock().await;

        if let Some(last) = *last_finished {
            let elapsed = last.elapsed();
            if elapsed < self.min_gap {
                let wait = self.min_gap - elapsed;
                tracing::debug!(?wait, "waiting before next playback");
                tokio::time::sleep(wait).await;
            }
        }

        let result = play();
        *last_finished = Some(Instant::now());
        result
    }
}

/// Plays audio to the default output device
pub struct AudioPlayback {
    #[allow(dead_code)]
    device: Device,
    config: StreamConfig,
}

impl AudioPlayback {
    /// Create a new audio playback instance
    ///
    /// # Errors
    ///
    /// Returns error if no output device or suitable config is available
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Audio("no output device available".to_string()))?;

        let supported_config = device
            .supported_output_configs()
            .map_err(|e| Error::Audio(e.to_string()))?
            .find(|c| {
                c.channels() == 1
                    && c.min_sample_rate() <= SampleRate(PLAYBACK_SAMPLE_RATE)
                    && c.max_sample_rate() >= SampleRate(PLAYBACK_SAMPLE_RATE)
            })
            .or_else(|| {
                // Fallback: try stereo
                device.supported_output_configs().ok()?.find(|c| {
                    c.channels() == 2
                        && c.min_sample_rate() <= SampleRate(PLAYBACK_SAMPLE_RATE)
                        && c.max_sample_rate() >= SampleRate(PLAYBACK_SAMPLE_RATE)
                })
            })
            .ok_or_else(|| Error::Audio("no suitable output config found".to_string()))?;

        let config = supported_config
            .with_sample_rate(SampleRate(PLAYBACK_SAMPLE_RATE))
            .config();

        tracing::debug!(
            device = device.name().unwrap_or_default(),
            sample_rate = PLAYBACK_SAMPLE_RATE,
            channels = config.channels,
            "audio playback initialized"
        );

        Ok(Self { device, config })
    }

    /// Decode MP3 bytes and play them, blocking until the clip drains
    ///
    /// # Errors
    ///
    /// Returns error if decoding or playback fails
    pub fn play_mp3(&self, mp3_data: &[u8]) -> Result<()> {
        let samples = decode_mp3(mp3_data)?;
        self.play_samples_blocking(samples)
    }

    /// Play samples in a blocking manner
    fn play_samples_blocking(&self, samples: Vec<f32>) -> Result<()> {
        if samples.is_empty() {
            return Ok(());
        }

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Audio("no output device".to_string()))?;

        let config = self.config.clone();
        let channels = config.channels as usize;

        let sample_count = samples.len();
        let samples = Arc::new(samples);
        let position = Arc::new(Mutex::new(0usize));
        let finished = Arc::new(Mutex::new(false));
        let finished_clone = Arc::clone(&finished);

        let samples_clone = Arc::clone(&samples);
        let position_clone = Arc::clone(&position);

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let mut pos = position_clone.lock().unwrap();

                    for frame in data.chunks_mut(channels) {
                        let sample = if *pos < samples_clone.len() {
                            samples_clone[*pos]
                        } else {
                            *finished_clone.lock().unwrap() = true;
                            0.0
                        };

                        for out in frame.iter_mut() {
                            *out = sample;
                        }

                        if *pos < samples_clone.len() {
                            *pos += 1;
                        }
                    }
                },
                |err| {
                    tracing::error!(error = %err, "audio playback error");
                },
                None,
            )
            .map_err(|e| Error::Audio(e.to_string()))?;

        stream.play().map_err(|e| Error::Audio(e.to_string()))?;

        // Wait for the stream to drain, with a timeout margin past the clip length
        let duration_ms = (sample_count as u64 * 1000) / u64::from(PLAYBACK_SAMPLE_RATE);
        let start = Instant::now();
        let timeout = Duration::from_millis(duration_ms + 500);

        while !*finished.lock().unwrap() {
            if start.elapsed() > timeout {
                break;
            }
            std::thread::sleep(Duration::from_millis(50));
        }

        std::thread::sleep(Duration::from_millis(100));

        drop(stream);
        tracing::debug!(samples = sample_count, "playback complete");

        Ok(())
    }
}

/// Decode MP3 bytes to f32 samples, averaging stereo down to mono
fn decode_mp3(mp3_data: &[u8]) -> Result<Vec<f32>> {
    let mut decoder = minimp3::Decoder::new(Cursor::new(mp3_data));
    let mut samples = Vec::new();

    loop {
        match decoder.next_frame() {
            Ok(frame) => {
                if frame.channels == 2 {
                    samples.extend(frame.data.chunks(2).map(|chunk| {
                        let left = f32::from(chunk[0]) / 32768.0;
                        let right = f32::from(chunk.get(1).copied().unwrap_or(chunk[0])) / 32768.0;
                        (left + right) / 2.0
                    }));
                } else {
                    samples.extend(frame.data.iter().map(|&s| f32::from(s) / 32768.0));
                }
            }
            Err(minimp3::Error::Eof) => break,
            Err(e) => return Err(Error::Audio(format!("MP3 decode error: {e}"))),
        }
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_rejects_garbage() {
        // minimp3 skips junk until it runs out of data; no samples, no panic
        let samples = decode_mp3(&[0xde, 0xad, 0xbe, 0xef]).unwrap();
        assert!(samples.is_empty());
    }
}
