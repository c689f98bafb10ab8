//! Chat pipeline integration tests
//!
//! Exercises command parsing and wire decoding without a live stream

use herald_gateway::chat::{SpeakCommand, decode_chat_event, utterance_text};

#[test]
fn test_parse_known_commands() {
    let cmd = SpeakCommand::parse("!m hello there");
    assert_eq!((cmd.voice.as_str(), cmd.text.as_str()), ("Mia", "hello there"));

    let cmd = SpeakCommand::parse("!M");
    assert_eq!((cmd.voice.as_str(), cmd.text.as_str()), ("Mia", ""));

    let cmd = SpeakCommand::parse("!bob hi");
    assert_eq!((cmd.voice.as_str(), cmd.text.as_str()), ("Bob", "hi"));

    let cmd = SpeakCommand::parse("!BOB");
    assert_eq!((cmd.voice.as_str(), cmd.text.as_str()), ("Bob", ""));
}

#[test]
fn test_voice_is_always_capitalized() {
    for raw in ["!bob hi", "!BOB", "!bOb hello", "!m", "!", "!   ", "!joanna long text here"] {
        let cmd = SpeakCommand::parse(raw);
        assert!(!cmd.voice.is_empty(), "voice empty for {raw:?}");

        let mut chars = cmd.voice.chars();
        let first = chars.next().unwrap();
        assert!(first.is_uppercase(), "voice not capitalized for {raw:?}");
        assert!(
            chars.all(|c| !c.is_alphabetic() || c.is_lowercase()),
            "voice tail not lowercase for {raw:?}"
        );
    }
}

#[test]
fn test_parser_is_total_over_degenerate_input() {
    // Prefix alone, whitespace, unicode — none of these may panic
    for raw in ["!", "! ", "!\t\t", "!ñandú", "!日本語 こんにちは", "!🎤 sing"] {
        let cmd = SpeakCommand::parse(raw);
        assert!(!cmd.voice.is_empty());
    }
}

#[test]
fn test_utterance_composition() {
    let cmd = SpeakCommand::parse("!bob good morning");
    assert_eq!(utterance_text("carol", &cmd.text), "carol says good morning");
}

#[test]
fn test_decode_chat_event_roundtrip() {
    let frame = r#"{"event":"App\\Events\\ChatMessageEvent","data":"{\"content\":\"!bob hi\",\"sender\":{\"username\":\"carol\"}}"}"#;
    let msg = decode_chat_event(frame).unwrap().unwrap();
    assert_eq!(msg.sender, "carol");
    assert_eq!(msg.text, "!bob hi");
}

#[test]
fn test_decode_skips_non_chat_events() {
    let frame = r#"{"event":"pusher_internal:subscription_succeeded","data":"{}"}"#;
    assert!(decode_chat_event(frame).unwrap().is_none());
}

#[test]
fn test_malformed_frame_is_error_not_panic() {
    // A bad frame must surface as an error the listener can log and skip
    assert!(decode_chat_event("{{{").is_err());
    assert!(
        decode_chat_event(r#"{"event":"App\\Events\\ChatMessageEvent","data":"[1,2"}"#).is_err()
    );

    // The next well-formed frame still decodes
    let frame = r#"{"event":"App\\Events\\ChatMessageEvent","data":"{\"content\":\"ok\",\"sender\":{\"username\":\"dave\"}}"}"#;
    assert!(decode_chat_event(frame).unwrap().is_some());
}
