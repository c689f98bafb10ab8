//! Chat event stream consumption
//!
//! Connects to the Pusher websocket endpoint serving the broadcast channel's
//! chat feed, subscribes to the chatroom channel, and forwards decoded chat
//! messages into an mpsc channel for the daemon to process.

mod command;

use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

pub use command::{COMMAND_PREFIX, SpeakCommand, utterance_text};

use crate::{Error, Result};

/// Pusher event name identifying a new chat message
const CHAT_MESSAGE_EVENT: &str = "App\\Events\\ChatMessageEvent";

/// Sender name used when the payload carries no username
const UNKNOWN_SENDER: &str = "Unknown";

/// A chat message received from the event stream
#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// Username of the sender, or `"Unknown"` when absent
    pub sender: String,

    /// Raw message text
    pub text: String,
}

/// Outer Pusher envelope; `data` is a doubly-encoded JSON string
#[derive(Debug, Deserialize)]
struct PusherEnvelope {
    event: String,
    data: Option<String>,
}

/// Chat message payload nested inside the envelope's `data` field
#[derive(Debug, Deserialize)]
struct ChatMessagePayload {
    #[serde(default)]
    content: String,
    #[serde(default)]
    sender: SenderPayload,
}

/// Sender record nested in the chat payload
#[derive(Debug, Default, Deserialize)]
struct SenderPayload {
    username: Option<String>,
}

/// Decode a raw websocket text frame into a chat message
///
/// Returns `Ok(None)` for frames that are not chat message events (connection
/// lifecycle events, subscription acks, unrelated channel events).
///
/// # Errors
///
/// Returns error if the frame or its nested payload is not valid JSON.
pub fn decode_chat_event(frame: &str) -> Result<Option<ChatMessage>> {
    let envelope: PusherEnvelope = serde_json::from_str(frame)?;

    if envelope.event != CHAT_MESSAGE_EVENT {
        return Ok(None);
    }

    let payload: ChatMessagePayload =
        serde_json::from_str(envelope.data.as_deref().unwrap_or("{}"))?;

    Ok(Some(ChatMessage {
        sender: payload
            .sender
            .username
            .unwrap_or_else(|| UNKNOWN_SENDER.to_string()),
        text: payload.content,
    }))
}

/// Consumes the chat event stream for one chatroom
pub struct ChatListener {
    ws_url: String,
    chatroom_id: u64,
    message_tx: mpsc::Sender<ChatMessage>,
}

impl ChatListener {
    /// Create a listener along with the receiving end of its message channel
    #[must_use]
    pub fn with_receiver(
        ws_url: String,
        chatroom_id: u64,
    ) -> (Self, mpsc::Receiver<ChatMessage>) {
        let (tx, rx) = mpsc::channel(64);
        (
            Self {
                ws_url,
                chatroom_id,
                message_tx: tx,
            },
            rx,
        )
    }

    /// Connect, subscribe, and consume the stream until it ends
    ///
    /// Malformed frames are logged and skipped. Runs until the connection
    /// closes or fails; there is no reconnection.
    ///
    /// # Errors
    ///
    /// Returns error if the connection cannot be established or the transport
    /// fails mid-stream.
    pub async fn run(self) -> Result<()> {
        let (ws_stream, _) = connect_async(self.ws_url.as_str()).await?;
        let (mut write, mut read) = ws_stream.split();

        let subscribe = serde_json::json!({
            "event": "pusher:subscribe",
            "data": {
                "auth": "",
                "channel": format!("chatrooms.{}.v2", self.chatroom_id),
            },
        });
        write.send(Message::Text(subscribe.to_string().into())).await?;

        tracing::info!(chatroom_id = self.chatroom_id, "subscribed to chat stream");

        while let Some(frame) = read.next().await {
            match frame? {
                Message::Text(text) => {
                    if is_pusher_ping(&text) {
                        let pong = serde_json::json!({ "event": "pusher:pong", "data": {} });
                        write.send(Message::Text(pong.to_string().into())).await?;
                        continue;
                    }

                    match decode_chat_event(&text) {
                        Ok(Some(msg)) => {
                            if self.message_tx.send(msg).await.is_err() {
                                tracing::debug!("message receiver dropped, stopping listener");
                                return Ok(());
                            }
                        }
                        Ok(None) => {}
                        Err(e) => {
                            tracing::error!(error = %e, "failed to parse chat frame");
                        }
                    }
                }
                Message::Close(frame) => {
                    return Err(Error::Chat(format!("stream closed: {frame:?}")));
                }
                // Transport-level pings are answered by tungstenite itself
                _ => {}
            }
        }

        Err(Error::Chat("stream ended".to_string()))
    }
}

/// Pusher-protocol keepalive check (application-level, not websocket ping)
fn is_pusher_ping(frame: &str) -> bool {
    serde_json::from_str::<PusherEnvelope>(frame).is_ok_and(|e| e.event == "pusher:ping")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_chat_message_event() {
        let frame = r#"{"event":"App\\Events\\ChatMessageEvent","data":"{\"content\":\"!m hi\",\"sender\":{\"username\":\"alice\"}}"}"#;
        let msg = decode_chat_event(frame).unwrap().unwrap();
        assert_eq!(msg.sender, "alice");
        assert_eq!(msg.text, "!m hi");
    }

    #[test]
    fn ignores_other_events() {
        let frame = r#"{"event":"pusher:connection_established","data":"{}"}"#;
        assert!(decode_chat_event(frame).unwrap().is_none());
    }

    #[test]
    fn missing_username_falls_back() {
        let frame = r#"{"event":"App\\Events\\ChatMessageEvent","data":"{\"content\":\"hey\"}"}"#;
        let msg = decode_chat_event(frame).unwrap().unwrap();
        assert_eq!(msg.sender, "Unknown");
        assert_eq!(msg.text, "hey");
    }

    #[test]
    fn malformed_payload_is_an_error() {
        let frame = r#"{"event":"App\\Events\\ChatMessageEvent","data":"not json"}"#;
        assert!(decode_chat_event(frame).is_err());
        assert!(decode_chat_event("not json at all").is_err());
    }

    #[test]
    fn recognizes_pusher_ping() {
        assert!(is_pusher_ping(r#"{"event":"pusher:ping","data":"{}"}"#));
        assert!(!is_pusher_ping(r#"{"event":"pusher:pong"}"#));
        assert!(!is_pusher_ping("garbage"));
    }
}
