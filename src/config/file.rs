//! TOML configuration file loading
//!
//! Supports `~/.config/herald/config.toml` as a persistent config source.
//! All fields are optional — the file is a partial overlay on top of defaults.

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct HeraldConfigFile {
    /// Chat stream configuration
    #[serde(default)]
    pub chat: ChatFileConfig,

    /// Speech synthesis configuration
    #[serde(default)]
    pub tts: TtsFileConfig,

    /// Playback configuration
    #[serde(default)]
    pub playback: PlaybackFileConfig,
}

/// Chat stream configuration
#[derive(Debug, Default, Deserialize)]
pub struct ChatFileConfig {
    /// Chatroom identifier to subscribe to
    pub chatroom_id: Option<u64>,

    /// Websocket endpoint override
    pub ws_url: Option<String>,
}

/// Speech synthesis configuration
#[derive(Debug, Default, Deserialize)]
pub struct TtsFileConfig {
    /// Cloud region the synthesis endpoint lives in
    pub region: Option<String>,

    /// Synthesis endpoint URL template (`{region}` is substituted)
    pub url: Option<String>,

    /// API key for the synthesis endpoint
    pub api_key: Option<String>,
}

/// Playback configuration
#[derive(Debug, Default, Deserialize)]
pub struct PlaybackFileConfig {
    /// Minimum gap between consecutive plays, in seconds
    pub min_gap_seconds: Option<f64>,
}

/// Load the TOML config file from the standard path
///
/// Returns `HeraldConfigFile::default()` if the file doesn't exist or can't be parsed.
pub fn load_config_file() -> HeraldConfigFile {
    let Some(path) = config_file_path() else {
        return HeraldConfigFile::default();
    };

    if !path.exists() {
        return HeraldConfigFile::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                HeraldConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            HeraldConfigFile::default()
        }
    }
}

/// Return the config file path: `~/.config/herald/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("herald").join("config.toml"))
}
