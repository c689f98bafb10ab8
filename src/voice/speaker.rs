//! Speech output pipeline: synthesis fallback + gated playback

use crate::voice::playback::{AudioPlayback, PlaybackGate};
use crate::voice::tts::{Engine, Synthesizer};
use crate::Result;

/// Turns an utterance into audible speech
///
/// Owns the synthesis client, the output device, and the playback gate.
/// Shared across the per-message units via `Arc`.
pub struct Speaker {
    synthesizer: Synthesizer,
    playback: AudioPlayback,
    gate: PlaybackGate,
}

impl Speaker {
    /// Assemble the pipeline
    #[must_use]
    pub fn new(synthesizer: Synthesizer, playback: AudioPlayback, gate: PlaybackGate) -> Self {
        Self {
            synthesizer,
            playback,
            gate,
        }
    }

    /// Synthesize and play one utterance
    ///
    /// Attempts the standard engine tier first; on any failure retries exactly
    /// once with the neural tier. A second failure logs both causes and drops
    /// the utterance — stale speech is worse than no speech, so there is no
    /// backoff and no queueing for later.
    ///
    /// # Errors
    ///
    /// Returns error when both engine tiers fail or when playback fails; the
    /// playback gate's completion timestamp is updated either way.
    pub async fn speak(&self, text: &str, voice: &str) -> Result<()> {
        tracing::debug!(voice, text, "synthesizing");

        let audio = match self
            .synthesizer
            .synthesize(text, voice, Engine::Standard)
            .await
        {
            Ok(audio) => audio,
            Err(standard_err) => {
                tracing::warn!(
                    error = %standard_err,
                    voice,
                    "standard engine failed, retrying with neural"
                );
                match self.synthesizer.synthesize(text, voice, Engine::Neural).await {
                    Ok(audio) => audio,
                    Err(neural_err) => {
                        tracing::error!(
                            standard_error = %standard_err,
                            neural_error = %neural_err,
                            voice,
                            "synthesis failed on both engine tiers, utterance dropped"
                        );
                        return Err(neural_err);
                    }
                }
            }
        };

        tracing::debug!(bytes = audio.len(), "synthesis complete");
        // The clip blocks for its duration; keep the worker thread usable
        self.gate
            .pace(|| tokio::task::block_in_place(|| self.playback.play_mp3(&audio)))
            .await
    }
}
