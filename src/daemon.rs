//! Daemon - the main gateway service
//!
//! Orchestrates the chat stream listener, the operator console, and the
//! per-message synthesis/playback units.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::chat::{COMMAND_PREFIX, ChatListener, ChatMessage, SpeakCommand, utterance_text};
use crate::console::ConsoleListener;
use crate::voice::{AudioPlayback, PlaybackGate, Speaker, SpeechToggle, Synthesizer};
use crate::{Config, Result};

/// The Herald daemon - wires chat input to speech output
pub struct Daemon {
    config: Config,
    toggle: SpeechToggle,
    speaker: Arc<Speaker>,
}

impl Daemon {
    /// Create a new daemon instance
    ///
    /// # Errors
    ///
    /// Returns error if the synthesizer or the audio output device cannot be
    /// initialized.
    pub fn new(config: Config) -> Result<Self> {
        let synthesizer = Synthesizer::new(config.tts_url.clone(), config.tts_api_key.clone())?;
        let playback = AudioPlayback::new()?;
        let gate = PlaybackGate::new(config.playback_min_gap);

        let toggle = SpeechToggle::new(config.tts_enabled);
        let speaker = Arc::new(Speaker::new(synthesizer, playback, gate));

        Ok(Self {
            config,
            toggle,
            speaker,
        })
    }

    /// Run the daemon until interrupted
    ///
    /// The chat task may terminate on transport failure; the console keeps
    /// running and the process stays up until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns error if the shutdown signal cannot be installed.
    pub async fn run(self) -> Result<()> {
        tracing::info!(
            chatroom_id = self.config.chatroom_id,
            region = %self.config.region,
            tts = self.config.tts_enabled,
            "daemon running"
        );

        let console = ConsoleListener::new(self.toggle.clone());
        tokio::spawn(console.run());

        let (listener, rx) =
            ChatListener::with_receiver(self.config.ws_url.clone(), self.config.chatroom_id);
        tokio::spawn(async move {
            // Fatal to this task only; no reconnect
            if let Err(e) = listener.run().await {
                tracing::error!(error = %e, "chat stream terminated");
            }
        });

        let toggle = self.toggle.clone();
        let speaker = Arc::clone(&self.speaker);
        tokio::spawn(handle_chat_messages(rx, toggle, speaker));

        tokio::signal::ctrl_c().await?;
        tracing::info!("daemon stopped");
        Ok(())
    }
}

/// Handle incoming chat messages, spawning a speech unit per command
async fn handle_chat_messages(
    mut rx: mpsc::Receiver<ChatMessage>,
    toggle: SpeechToggle,
    speaker: Arc<Speaker>,
) {
    while let Some(msg) = rx.recv().await {
        // Read the toggle once per message so it cannot flip mid-processing
        let enabled = toggle.is_enabled();

        if enabled {
            tracing::info!(sender = %msg.sender, content = %msg.text, tts = true, "chat message");
        } else {
            tracing::warn!(sender = %msg.sender, content = %msg.text, tts = false, "chat message");
        }

        if !should_speak(enabled, &msg.text) {
            continue;
        }

        let command = SpeakCommand::parse(&msg.text);
        tracing::info!(voice = %command.voice, "speak command");

        let utterance = utterance_text(&msg.sender, &command.text);
        let speaker = Arc::clone(&speaker);
        // Fire-and-forget: concurrent units serialize at the playback gate
        tokio::spawn(async move {
            if let Err(e) = speaker.speak(&utterance, &command.voice).await {
                tracing::error!(error = %e, voice = %command.voice, "utterance dropped");
            }
        });
    }

    tracing::debug!("chat message channel closed");
}

/// Per-message decision: only command messages speak, and only while enabled
///
/// Messages failing either check are still received and logged above; they
/// just never reach synthesis.
fn should_speak(enabled: bool, text: &str) -> bool {
    enabled && text.starts_with(COMMAND_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_toggle_suppresses_commands() {
        // A command arriving while speech is off must not trigger synthesis
        assert!(!should_speak(false, "!m hello"));
        assert!(!should_speak(false, "!bob hi"));

        // Re-enabling lets the same command through
        assert!(should_speak(true, "!m hello"));
    }

    #[test]
    fn test_non_commands_never_speak() {
        assert!(!should_speak(true, "hello chat"));
        assert!(!should_speak(true, ""));
        assert!(!should_speak(false, "hello chat"));
    }

    #[test]
    fn test_toggle_is_read_once_per_message() {
        let toggle = SpeechToggle::new(true);

        // The decision uses the value captured at message arrival; a later
        // flip does not affect it
        let enabled = toggle.is_enabled();
        toggle.set_enabled(false);
        assert!(should_speak(enabled, "!m hello"));
    }
}
