//! Operator console control surface
//!
//! Reads lines from stdin and flips the speech toggle. The toggle rule is an
//! exact match against a small accepted token set rather than substring
//! containment, with "off" taking precedence when a line carries both.

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::voice::SpeechToggle;

/// Parse a console line into a toggle request
///
/// Tokens are whitespace-split and lowercased, then matched exactly:
/// `off`/`disable` anywhere in the line disables, otherwise `on`/`enable`
/// enables. Lines with neither (including blank lines) request no change.
#[must_use]
pub fn parse_toggle(line: &str) -> Option<bool> {
    let mut enable = None;

    for token in line.split_whitespace() {
        match token.to_lowercase().as_str() {
            "off" | "disable" => return Some(false),
            "on" | "enable" => enable = Some(true),
            _ => {}
        }
    }

    enable
}

/// Consumes operator console lines until stdin closes
pub struct ConsoleListener {
    toggle: SpeechToggle,
}

impl ConsoleListener {
    /// Create a listener driving the given toggle
    #[must_use]
    pub fn new(toggle: SpeechToggle) -> Self {
        Self { toggle }
    }

    /// Read stdin line by line, applying toggle requests
    ///
    /// The blocking read suspends only this task; the chat path is never
    /// blocked and no lock is held across the read.
    pub async fn run(self) {
        tracing::info!(
            tts = self.toggle.is_enabled(),
            "console ready - type a line containing 'on' or 'off' to toggle speech"
        );

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => match parse_toggle(&line) {
                    Some(enabled) => {
                        self.toggle.set_enabled(enabled);
                        if enabled {
                            tracing::info!(tts = true, "speech enabled");
                        } else {
                            tracing::warn!(tts = false, "speech disabled");
                        }
                    }
                    None => {
                        if !line.trim().is_empty() {
                            tracing::debug!(line, "unrecognized console command");
                        }
                    }
                },
                Ok(None) => {
                    tracing::debug!("stdin closed, console listener stopping");
                    return;
                }
                Err(e) => {
                    tracing::error!(error = %e, "console read failed");
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_accepted_tokens() {
        assert_eq!(parse_toggle("on"), Some(true));
        assert_eq!(parse_toggle("OFF"), Some(false));
        assert_eq!(parse_toggle("enable"), Some(true));
        assert_eq!(parse_toggle("please disable now"), Some(false));
    }

    #[test]
    fn off_wins_when_both_appear() {
        assert_eq!(parse_toggle("turn on off"), Some(false));
        assert_eq!(parse_toggle("off on"), Some(false));
    }

    #[test]
    fn embedded_substrings_do_not_count() {
        // "only" contains "on" but is not a toggle request
        assert_eq!(parse_toggle("only kidding"), None);
        assert_eq!(parse_toggle("showoff"), None);
    }

    #[test]
    fn blank_lines_request_no_change() {
        assert_eq!(parse_toggle(""), None);
        assert_eq!(parse_toggle("   "), None);
    }

    #[test]
    fn natural_phrasing() {
        assert_eq!(parse_toggle("turn it off please"), Some(false));
        assert_eq!(parse_toggle("turn it on please"), Some(true));
    }
}
