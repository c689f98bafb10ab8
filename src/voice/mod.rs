//! Speech output: synthesis, playback serialization, and the runtime toggle

mod playback;
mod speaker;
mod toggle;
mod tts;

pub use playback::{AudioPlayback, PlaybackGate};
pub use speaker::Speaker;
pub use toggle::SpeechToggle;
pub use tts::{Engine, FailureKind, Synthesizer};
