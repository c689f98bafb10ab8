//! Speak-command parsing
//!
//! A chat line starting with [`COMMAND_PREFIX`] selects a voice and carries the
//! text to speak: `!bob hello there` speaks "hello there" as Bob, and the
//! single-letter alias `!m` resolves to the canonical default voice.

/// Prefix character marking a chat line as a speak command
pub const COMMAND_PREFIX: char = '!';

/// Canonical voice used when a command names none
pub const DEFAULT_VOICE: &str = "Mia";

/// A parsed speak command: which voice to use and what to say
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakCommand {
    /// Resolved voice name, normalized to `Xxxx` capitalization; never empty
    pub voice: String,

    /// Text to speak; empty when the command carried no remainder
    pub text: String,
}

impl SpeakCommand {
    /// Parse a raw chat line into a speak command
    ///
    /// Total over any input: the prefix alone, trailing whitespace, or unicode
    /// tokens all yield a valid command. The resolved voice is not validated
    /// against the provider's voice list; a bad name surfaces as a synthesis
    /// failure at runtime, not a parse error.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let content = raw.strip_prefix(COMMAND_PREFIX).unwrap_or(raw).trim();

        let mut parts = content.splitn(2, char::is_whitespace);
        let token = parts.next().unwrap_or_default();
        let remainder = parts.next().unwrap_or_default().trim();

        let voice = if token.is_empty() || token.eq_ignore_ascii_case("m") {
            DEFAULT_VOICE.to_string()
        } else {
            capitalize(token)
        };

        Self {
            voice,
            text: remainder.to_string(),
        }
    }
}

/// Build the utterance handed to synthesis: `"<sender> says <text>"`
#[must_use]
pub fn utterance_text(sender: &str, text: &str) -> String {
    format!("{sender} says {text}")
}

/// Lowercase a token, then uppercase its first character
fn capitalize(token: &str) -> String {
    let lower = token.to_lowercase();
    let mut chars = lower.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_voice_alias() {
        let cmd = SpeakCommand::parse("!m hello there");
        assert_eq!(cmd.voice, "Mia");
        assert_eq!(cmd.text, "hello there");
    }

    #[test]
    fn alias_is_case_insensitive() {
        let cmd = SpeakCommand::parse("!M");
        assert_eq!(cmd.voice, "Mia");
        assert_eq!(cmd.text, "");
    }

    #[test]
    fn named_voice_is_capitalized() {
        let cmd = SpeakCommand::parse("!bob hi");
        assert_eq!(cmd.voice, "Bob");
        assert_eq!(cmd.text, "hi");

        let cmd = SpeakCommand::parse("!BOB");
        assert_eq!(cmd.voice, "Bob");
        assert_eq!(cmd.text, "");
    }

    #[test]
    fn prefix_alone_falls_back() {
        let cmd = SpeakCommand::parse("!");
        assert_eq!(cmd.voice, "Mia");
        assert_eq!(cmd.text, "");

        let cmd = SpeakCommand::parse("!   ");
        assert_eq!(cmd.voice, "Mia");
        assert_eq!(cmd.text, "");
    }

    #[test]
    fn unicode_token_does_not_panic() {
        let cmd = SpeakCommand::parse("!émilie bonjour");
        assert_eq!(cmd.voice, "Émilie");
        assert_eq!(cmd.text, "bonjour");
    }

    #[test]
    fn utterance_template() {
        assert_eq!(utterance_text("alice", "hi"), "alice says hi");
        assert_eq!(utterance_text("Unknown", ""), "Unknown says ");
    }
}
