//! Runtime speech toggle
//!
//! Single writer (the operator console), many readers (per-message chat
//! units). The chat path reads the flag once per incoming message.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared on/off flag gating chat-triggered speech
#[derive(Clone, Debug)]
pub struct SpeechToggle {
    enabled: Arc<AtomicBool>,
}

impl SpeechToggle {
    /// Create a toggle with the given initial state
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(enabled)),
        }
    }

    /// Set the toggle; idempotent
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Read the current state
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_roundtrip() {
        let toggle = SpeechToggle::new(true);
        assert!(toggle.is_enabled());

        toggle.set_enabled(false);
        assert!(!toggle.is_enabled());
    }

    #[test]
    fn set_is_idempotent() {
        let toggle = SpeechToggle::new(false);
        toggle.set_enabled(true);
        toggle.set_enabled(true);
        assert!(toggle.is_enabled());
    }

    #[test]
    fn clones_share_state() {
        let toggle = SpeechToggle::new(true);
        let reader = toggle.clone();

        toggle.set_enabled(false);
        assert!(!reader.is_enabled());
    }
}
