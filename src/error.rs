//! Error types for the Herald gateway

use thiserror::Error;

/// Result type alias for Herald operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the Herald gateway
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Chat stream error (transport or malformed payload)
    #[error("chat error: {0}")]
    Chat(String),

    /// Text-to-speech error
    #[error("TTS error: {0}")]
    Tts(String),

    /// Audio decode or playback error
    #[error("audio error: {0}")]
    Audio(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// WebSocket error
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
