//! Herald Gateway - Chat-to-speech gateway for live broadcast channels
//!
//! This library provides the core functionality for the Herald gateway:
//! - Chat event stream consumption (Pusher-protocol websocket)
//! - Speak-command parsing
//! - Cloud TTS synthesis with engine-tier fallback
//! - Serialized audio playback with a minimum inter-play gap
//! - Operator console toggle
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │                 Chat event stream                   │
//! │            (chatrooms.<id>.v2 channel)              │
//! └───────────────────────┬────────────────────────────┘
//!                         │
//! ┌───────────────────────▼────────────────────────────┐
//! │                 Herald Gateway                      │
//! │  Command parser │ Toggle │ Synthesis │ Playback    │
//! └───────────────────────┬────────────────────────────┘
//!                         │
//! ┌───────────────────────▼────────────────────────────┐
//! │        Speech provider  /  Audio output device      │
//! └────────────────────────────────────────────────────┘
//! ```
//!
//! The operator console (stdin) feeds the toggle that gates the chat path.

pub mod chat;
pub mod config;
pub mod console;
pub mod daemon;
pub mod error;
pub mod voice;

pub use chat::{ChatListener, ChatMessage, SpeakCommand, utterance_text};
pub use config::Config;
pub use console::{ConsoleListener, parse_toggle};
pub use daemon::Daemon;
pub use error::{Error, Result};
pub use voice::{
    AudioPlayback, Engine, FailureKind, PlaybackGate, Speaker, SpeechToggle, Synthesizer,
};
