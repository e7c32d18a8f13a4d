//! End-to-end VoiceXML sessions without a real interpreter.
//!
//! A small banking dialogue runs on the executor against a scripted
//! platform that resolves every prompt the way an interpreter front end
//! would and answers with canned caller reactions.

use async_trait::async_trait;
use parley_channel::ChannelConfig;
use parley_executor::{DialogueExecutor, ExecutorConfig, drive};
use parley_protocol::{
    Dialogue, DialogueError, DialogueState, FailureKind, Platform, PlatformError, SessionId, Step,
    TurnExchange,
};
use parley_voicexml::{
    AudioFile, AudioItem, AudioResolver, Exit, Message, Recognition, Rendition, SynthesisText,
    VoiceXmlEvent, VoiceXmlInputTurn,
};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

/// The media store: only the welcome prompt is recorded.
struct Media;

impl AudioResolver for Media {
    fn locate(&self, location: &str) -> Option<String> {
        (location == "welcome.wav").then(|| format!("https://ivr.example/{location}"))
    }

    fn evaluate(&self, _expression: &str) -> Option<String> {
        None
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Dialogue
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Greets the caller, asks for an account number, retries once on
/// no-match, and exits with the account.
struct Banking {
    check_content: bool,
}

impl Banking {
    fn welcome() -> Message {
        Message::new(
            "welcome",
            [AudioFile::from_location("welcome.wav").with_alternate("Welcome.")],
        )
    }

    fn ask_account() -> Message {
        Message::new(
            "ask-account",
            vec![
                AudioItem::from(
                    AudioFile::from_location("ask-account.wav")
                        .with_alternate("Please say your account number."),
                ),
                AudioItem::pause(Duration::from_millis(200)),
            ],
        )
        .with_barge_in(true)
    }

    fn broken() -> Message {
        Message::new("broken", [AudioFile::from_expression("session.missing")])
    }
}

#[async_trait]
impl Dialogue for Banking {
    type Output = Message;
    type Input = VoiceXmlInputTurn;
    type Last = Exit;

    async fn run(
        &self,
        _first: VoiceXmlInputTurn,
        context: &mut dyn TurnExchange<Message, VoiceXmlInputTurn>,
    ) -> Result<Option<Exit>, DialogueError> {
        if self.check_content {
            Self::broken().resolve(&Media)?;
        }

        let answer = context.do_turn(Self::welcome()).await?;
        if answer.is_hangup() {
            return Ok(None);
        }

        for _ in 0..2 {
            let answer = context.do_turn(Self::ask_account()).await?;
            if answer.is_hangup() {
                return Ok(None);
            }
            if let Some(recognition) = answer.recognition() {
                return Ok(Some(
                    Exit::new("identified")
                        .with_variable("account", recognition.utterance.clone()),
                ));
            }
        }
        Err(DialogueError::Failed("caller could not be identified".into()))
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Platform
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Resolves each prompt and replays the caller's reactions in order.
struct ScriptedCaller {
    reactions: VecDeque<VoiceXmlInputTurn>,
    rendered: Vec<(String, Vec<Rendition>)>,
}

impl ScriptedCaller {
    fn new(reactions: impl IntoIterator<Item = VoiceXmlInputTurn>) -> Self {
        Self {
            reactions: reactions.into_iter().collect(),
            rendered: Vec::new(),
        }
    }
}

#[async_trait]
impl Platform for ScriptedCaller {
    type Output = Message;
    type Input = VoiceXmlInputTurn;

    async fn deliver(&mut self, turn: Message) -> Result<VoiceXmlInputTurn, PlatformError> {
        use parley_protocol::OutputTurn;

        let renditions = turn
            .resolve(&Media)
            .map_err(|err| PlatformError::Device(err.to_string()))?;
        self.rendered.push((turn.name().to_string(), renditions));
        self.reactions
            .pop_front()
            .ok_or_else(|| PlatformError::Disconnected("script exhausted".into()))
    }
}

fn said(utterance: &str) -> VoiceXmlInputTurn {
    VoiceXmlInputTurn::new().with_recognition(Recognition {
        utterance: utterance.into(),
        interpretation: None,
        confidence: 0.9,
    })
}

fn executor() -> DialogueExecutor {
    DialogueExecutor::new(
        ExecutorConfig::default()
            .with_channel(ChannelConfig::default().with_reply_timeout(Duration::from_secs(30))),
    )
}

fn ring() -> VoiceXmlInputTurn {
    VoiceXmlInputTurn::new()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Sessions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn caller_is_identified_after_a_no_match() {
    let dialogue = Arc::new(Banking {
        check_content: false,
    });
    let handle = executor().start(dialogue, SessionId::from("call-100"), ring());
    let mut caller = ScriptedCaller::new([
        VoiceXmlInputTurn::new(),
        VoiceXmlInputTurn::from_event(VoiceXmlEvent::no_match()),
        said("4 4 1 2"),
    ]);

    let terminal = drive(&handle, &mut caller).await.unwrap();

    let exit = match terminal {
        Step::Terminal(exit) => exit,
        other => panic!("expected an exit, got {other:?}"),
    };
    assert_eq!(exit.variables()["account"], "4 4 1 2");

    let names: Vec<&str> = caller.rendered.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["welcome", "ask-account", "ask-account"]);
    assert_eq!(
        caller.rendered[0].1,
        [Rendition::Audio("https://ivr.example/welcome.wav".into())]
    );
    assert_eq!(
        caller.rendered[1].1[0],
        Rendition::Speech(SynthesisText::new("Please say your account number."))
    );
    assert_eq!(handle.join().await, DialogueState::Completed);
}

#[tokio::test]
async fn hangup_ends_the_session_cleanly() {
    let dialogue = Arc::new(Banking {
        check_content: false,
    });
    let handle = executor().start(dialogue, SessionId::from("call-101"), ring());
    let mut caller = ScriptedCaller::new([VoiceXmlInputTurn::from_event(VoiceXmlEvent::hangup())]);

    let terminal = drive(&handle, &mut caller).await.unwrap();

    assert_eq!(terminal, Step::End);
    assert_eq!(handle.join().await, DialogueState::Completed);
}

#[tokio::test]
async fn two_failed_attempts_fail_the_session() {
    let dialogue = Arc::new(Banking {
        check_content: false,
    });
    let handle = executor().start(dialogue, SessionId::from("call-102"), ring());
    let mut caller = ScriptedCaller::new([
        VoiceXmlInputTurn::new(),
        VoiceXmlInputTurn::from_event(VoiceXmlEvent::no_input()),
        VoiceXmlInputTurn::from_event(VoiceXmlEvent::no_match()),
    ]);

    let terminal = drive(&handle, &mut caller).await.unwrap();

    let failure = terminal.failure().unwrap();
    assert_eq!(failure.kind(), FailureKind::Application);
    assert_eq!(
        failure.message(),
        "dialogue failed: caller could not be identified"
    );
    assert_eq!(handle.join().await, DialogueState::Failed);
}

#[tokio::test]
async fn unresolvable_prompt_fails_with_content_error() {
    let dialogue = Arc::new(Banking {
        check_content: true,
    });
    let handle = executor().start(dialogue, SessionId::from("call-103"), ring());
    let mut caller = ScriptedCaller::new([]);

    let terminal = drive(&handle, &mut caller).await.unwrap();

    let failure = terminal.failure().unwrap();
    assert_eq!(failure.kind(), FailureKind::Content);
    assert_eq!(
        failure.causes(),
        ["audio file at expression session.missing is unavailable and has no alternate".to_string()]
    );
    assert!(caller.rendered.is_empty());
}

#[tokio::test]
async fn script_running_out_aborts_with_cancellation() {
    let dialogue = Arc::new(Banking {
        check_content: false,
    });
    let handle = executor().start(dialogue, SessionId::from("call-104"), ring());
    let mut caller = ScriptedCaller::new([VoiceXmlInputTurn::new()]);

    let terminal = drive(&handle, &mut caller).await.unwrap();

    assert_eq!(terminal.failure().unwrap().kind(), FailureKind::Cancelled);
    assert_eq!(caller.rendered.len(), 2);
    assert_eq!(handle.join().await, DialogueState::Failed);
}
