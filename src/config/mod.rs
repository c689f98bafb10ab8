//! Configuration management for the Herald gateway

pub mod file;

use std::time::Duration;

/// Default Kick chatroom to subscribe to when none is configured
pub const DEFAULT_CHATROOM_ID: u64 = 34_754_537;

/// Pusher websocket endpoint the chat feed is served from
pub const DEFAULT_WS_URL: &str =
    "wss://ws-us2.pusher.com/app/32cbd69e4b950bf97679?protocol=7&client=js&version=8.2.0&flash=false";

/// Synthesis endpoint template; `{region}` is substituted at load time
pub const DEFAULT_TTS_URL: &str = "https://tts.{region}.speechapi.dev/v1/speech";

/// Minimum gap between consecutive audio plays
pub const DEFAULT_MIN_GAP: Duration = Duration::from_secs(2);

/// Herald gateway configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether chat-triggered speech starts enabled
    pub tts_enabled: bool,

    /// Chatroom identifier embedded in the subscription channel name
    pub chatroom_id: u64,

    /// Websocket endpoint for the chat event stream
    pub ws_url: String,

    /// Cloud region for the synthesis endpoint
    pub region: String,

    /// Fully resolved synthesis endpoint URL
    pub tts_url: String,

    /// API key for the synthesis endpoint
    pub tts_api_key: String,

    /// Minimum gap between consecutive audio plays
    pub playback_min_gap: Duration,
}

impl Config {
    /// Load configuration with the initial toggle state from the CLI
    ///
    /// Priority per field: env > TOML file > default. A missing synthesis API
    /// key is not rejected here; `Synthesizer::new` refuses an empty key.
    #[must_use]
    pub fn load(tts_enabled: bool) -> Self {
        let fc = file::load_config_file();

        let chatroom_id = std::env::var("HERALD_CHATROOM_ID")
            .ok()
            .and_then(|s| s.parse().ok())
            .or(fc.chat.chatroom_id)
            .unwrap_or(DEFAULT_CHATROOM_ID);

        let ws_url = std::env::var("HERALD_WS_URL")
            .ok()
            .or(fc.chat.ws_url)
            .unwrap_or_else(|| DEFAULT_WS_URL.to_string());

        let region = std::env::var("HERALD_REGION")
            .ok()
            .or(fc.tts.region)
            .unwrap_or_else(|| "us-east-1".to_string());

        let tts_url = std::env::var("HERALD_TTS_URL")
            .ok()
            .or(fc.tts.url)
            .unwrap_or_else(|| DEFAULT_TTS_URL.to_string())
            .replace("{region}", &region);

        let tts_api_key = std::env::var("HERALD_TTS_API_KEY")
            .ok()
            .or(fc.tts.api_key)
            .unwrap_or_default();

        let playback_min_gap = std::env::var("HERALD_PLAYBACK_MIN_GAP")
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .or(fc.playback.min_gap_seconds)
            .filter(|s| s.is_finite() && *s >= 0.0)
            .map_or(DEFAULT_MIN_GAP, Duration::from_secs_f64);

        Self {
            tts_enabled,
            chatroom_id,
            ws_url,
            region,
            tts_url,
            tts_api_key,
            playback_min_gap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tts_url_region_substitution() {
        let url = DEFAULT_TTS_URL.replace("{region}", "eu-west-1");
        assert_eq!(url, "https://tts.eu-west-1.speechapi.dev/v1/speech");
    }
}
