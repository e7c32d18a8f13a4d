//! Tests for the VoiceXML content model and turns.
//!
//! Tests cover:
//! - Audio file construction and the single-address invariant
//! - Field-wise equality and hashing
//! - Property serialization for markup generation
//! - Resolution with alternates and content errors
//! - Event prefix matching

use parley_protocol::{DialogueError, DurationMs, ErrorDescription, FailureKind, OutputTurn};
use parley_voicexml::*;
use std::collections::HashSet;
use std::time::Duration;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Construction
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn from_location_sets_only_location() {
    let file = AudioFile::from_location("a.wav");
    assert_eq!(file.location(), Some("a.wav"));
    assert_eq!(file.expression(), None);
    assert_eq!(file.address(), &AudioAddress::Location("a.wav".into()));
    assert!(file.alternate().is_none());
    assert!(file.resource_fetch_configuration().is_none());
    assert_eq!(file.element_type(), "audioFile");
}

#[test]
fn from_expression_sets_only_expression() {
    let file = AudioFile::from_expression("expr");
    assert_eq!(file.expression(), Some("expr"));
    assert_eq!(file.location(), None);
}

#[test]
fn builders_keep_the_address() {
    let file = AudioFile::from_expression("application.greeting")
        .with_alternate("Hello")
        .with_resource_fetch_configuration(
            ResourceFetchConfiguration::default().with_fetch_hint(FetchHint::Safe),
        );
    assert_eq!(file.expression(), Some("application.greeting"));
    assert_eq!(file.location(), None);
    assert_eq!(file.alternate().map(SynthesisText::text), Some("Hello"));
    assert_eq!(
        file.resource_fetch_configuration().and_then(|c| c.fetch_hint),
        Some(FetchHint::Safe)
    );
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Equality and hashing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn full(location: &str, alternate: &str, timeout_ms: u64) -> AudioFile {
    AudioFile::from_location(location)
        .with_alternate(alternate)
        .with_resource_fetch_configuration(
            ResourceFetchConfiguration::default()
                .with_fetch_timeout(DurationMs::from_millis(timeout_ms)),
        )
}

#[test]
fn identical_files_are_equal_and_hash_alike() {
    let a = full("a.wav", "hi", 500);
    let b = full("a.wav", "hi", 500);
    assert_eq!(a, b);

    let set: HashSet<AudioFile> = [a, b].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn changing_any_field_breaks_equality() {
    let base = full("a.wav", "hi", 500);
    assert_ne!(base, full("b.wav", "hi", 500));
    assert_ne!(base, full("a.wav", "hello", 500));
    assert_ne!(base, full("a.wav", "hi", 501));
    assert_ne!(
        base,
        AudioFile::from_location("a.wav").with_alternate("hi")
    );
    assert_ne!(
        AudioFile::from_location("x"),
        AudioFile::from_expression("x")
    );
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Serialization
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn audio_file_serializes_only_present_properties() {
    let item = AudioItem::from(AudioFile::from_location("a.wav"));
    assert_eq!(
        serde_json::to_value(&item).unwrap(),
        serde_json::json!({"type": "audioFile", "location": "a.wav"})
    );
}

#[test]
fn audio_file_serializes_every_property() {
    let item = AudioItem::from(
        AudioFile::from_expression("prompts.welcome")
            .with_alternate("Welcome")
            .with_resource_fetch_configuration(
                ResourceFetchConfiguration::default()
                    .with_fetch_hint(FetchHint::Prefetch)
                    .with_max_age(Duration::from_secs(60)),
            ),
    );
    assert_eq!(
        serde_json::to_value(&item).unwrap(),
        serde_json::json!({
            "type": "audioFile",
            "expression": "prompts.welcome",
            "resourceFetchConfiguration": {"fetchHint": "prefetch", "maxAge": 60000},
            "alternate": {"text": "Welcome"}
        })
    );
}

#[test]
fn other_items_carry_their_type() {
    assert_eq!(
        serde_json::to_value(AudioItem::from(SynthesisText::new("Goodbye"))).unwrap(),
        serde_json::json!({"type": "synthesisText", "text": "Goodbye"})
    );
    assert_eq!(
        serde_json::to_value(AudioItem::pause(Duration::from_millis(750))).unwrap(),
        serde_json::json!({"type": "pause", "duration": 750})
    );
    assert_eq!(AudioItem::pause(DurationMs::ZERO).element_type(), "pause");
}

#[test]
fn message_serializes_with_camel_case_fields() {
    let message = Message::new("welcome", [AudioFile::from_location("w.wav")])
        .with_barge_in(false)
        .with_language("fr-CA");
    assert_eq!(message.name(), "welcome");
    assert_eq!(
        serde_json::to_value(&message).unwrap(),
        serde_json::json!({
            "name": "welcome",
            "audio": [{"type": "audioFile", "location": "w.wav"}],
            "bargeIn": false,
            "language": "fr-CA"
        })
    );
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Resolution
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Knows one file and one expression.
struct Store;

impl AudioResolver for Store {
    fn locate(&self, location: &str) -> Option<String> {
        (location == "known.wav").then(|| format!("http://media/{location}"))
    }

    fn evaluate(&self, expression: &str) -> Option<String> {
        (expression == "session.prompt").then(|| "http://media/dynamic.wav".to_string())
    }
}

#[test]
fn resolution_prefers_the_address() {
    let file = AudioFile::from_location("known.wav").with_alternate("fallback");
    assert_eq!(
        file.resolve(&Store).unwrap(),
        Rendition::Audio("http://media/known.wav".into())
    );
    assert_eq!(
        AudioFile::from_expression("session.prompt")
            .resolve(&Store)
            .unwrap(),
        Rendition::Audio("http://media/dynamic.wav".into())
    );
}

#[test]
fn resolution_falls_back_to_alternate() {
    let file = AudioFile::from_location("missing.wav").with_alternate("Please hold.");
    assert_eq!(
        file.resolve(&Store).unwrap(),
        Rendition::Speech(SynthesisText::new("Please hold."))
    );
}

#[test]
fn unresolvable_file_is_a_content_failure() {
    let message = Message::new(
        "menu",
        vec![
            AudioItem::from(SynthesisText::new("Main menu")),
            AudioItem::from(AudioFile::from_expression("nowhere")),
        ],
    );
    let err = message.resolve(&Store).unwrap_err();
    assert_eq!(
        err.to_string(),
        "audio file at expression nowhere is unavailable and has no alternate"
    );

    let description = ErrorDescription::from(DialogueError::from(err));
    assert_eq!(description.kind(), FailureKind::Content);
    assert_eq!(description.message(), "content resolution failed");
}

#[test]
fn whole_message_resolves_in_order() {
    let message = Message::new(
        "hold",
        vec![
            AudioItem::from(AudioFile::from_location("known.wav")),
            AudioItem::pause(DurationMs::from_millis(300)),
            AudioItem::from(SynthesisText::new("Thanks")),
        ],
    );
    assert_eq!(
        message.resolve(&Store).unwrap(),
        vec![
            Rendition::Audio("http://media/known.wav".into()),
            Rendition::Silence(DurationMs::from_millis(300)),
            Rendition::Speech(SynthesisText::new("Thanks")),
        ]
    );
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Input turns and events
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn event_matching_is_by_whole_tokens() {
    let hangup = VoiceXmlEvent::hangup();
    assert!(hangup.matches("connection.disconnect.hangup"));
    assert!(hangup.matches("connection.disconnect"));
    assert!(hangup.matches("connection."));
    assert!(hangup.matches(""));
    assert!(!hangup.matches("connection.dis"));
    assert!(!hangup.matches("error"));
}

#[test]
fn input_turn_reports_hangup() {
    let turn = VoiceXmlInputTurn::from_event(VoiceXmlEvent::hangup());
    assert!(turn.is_hangup());
    assert!(!VoiceXmlInputTurn::new().with_value("1234").is_hangup());
}

#[test]
fn input_turn_deserializes_from_interpreter_json() {
    let turn: VoiceXmlInputTurn = serde_json::from_str(
        r#"{
            "events": [{"name": "nomatch", "message": "no grammar matched"}],
            "recognition": {"utterance": "balance", "confidence": 0.42}
        }"#,
    )
    .unwrap();
    assert!(turn.has_event(VoiceXmlEvent::NO_MATCH));
    assert_eq!(turn.events()[0].message(), Some("no grammar matched"));
    let recognition = turn.recognition().unwrap();
    assert_eq!(recognition.utterance, "balance");
    assert_eq!(recognition.interpretation, None);
    assert_eq!(turn.value(), None);
}

#[test]
fn exit_carries_variables() {
    use parley_protocol::LastTurn;

    let exit = Exit::new("done").with_variable("status", "transferred");
    assert_eq!(LastTurn::name(&exit), "done");
    assert_eq!(exit.variables()["status"], "transferred");
}
