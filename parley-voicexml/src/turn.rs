//! VoiceXML turns.

use crate::audio::AudioItem;
use crate::resolve::{AudioResolver, ContentError, Rendition};
use parley_protocol::{InputTurn, LastTurn, OutputTurn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Plays a prompt and collects the caller's reaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    name: String,
    audio: Vec<AudioItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    barge_in: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<String>,
}

impl Message {
    /// A message named `name` playing `audio` in order.
    pub fn new<A: Into<AudioItem>>(
        name: impl Into<String>,
        audio: impl IntoIterator<Item = A>,
    ) -> Self {
        Self {
            name: name.into(),
            audio: audio.into_iter().map(Into::into).collect(),
            barge_in: None,
            language: None,
        }
    }

    /// Whether the caller may interrupt the prompt.
    pub fn with_barge_in(mut self, barge_in: bool) -> Self {
        self.barge_in = Some(barge_in);
        self
    }

    /// The synthesis and recognition language, e.g. `en-US`.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// The prompt, in playback order.
    pub fn audio(&self) -> &[AudioItem] {
        &self.audio
    }

    /// Whether barge-in was set explicitly.
    pub fn barge_in(&self) -> Option<bool> {
        self.barge_in
    }

    /// The language, if set.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Resolve every audio item. Fails on the first item that cannot be
    /// rendered at all.
    pub fn resolve(&self, resolver: &dyn AudioResolver) -> Result<Vec<Rendition>, ContentError> {
        self.audio.iter().map(|item| item.resolve(resolver)).collect()
    }
}

impl OutputTurn for Message {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Ends the VoiceXML session, returning variables to the caller of the
/// application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exit {
    name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    variables: BTreeMap<String, String>,
}

impl Exit {
    /// An exit named `name` with no variables.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: BTreeMap::new(),
        }
    }

    /// Return `value` as `key`.
    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// The returned variables.
    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }
}

impl LastTurn for Exit {
    fn name(&self) -> &str {
        &self.name
    }
}

/// An event raised by the VoiceXML interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoiceXmlEvent {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl VoiceXmlEvent {
    /// The caller hung up.
    pub const HANGUP: &'static str = "connection.disconnect.hangup";
    /// The call was transferred away.
    pub const TRANSFER: &'static str = "connection.disconnect.transfer";
    /// The caller said nothing.
    pub const NO_INPUT: &'static str = "noinput";
    /// The caller said something the grammar did not match.
    pub const NO_MATCH: &'static str = "nomatch";
    /// Any interpreter error.
    pub const ERROR: &'static str = "error";

    /// An event named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: None,
        }
    }

    /// Attach the interpreter's message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The caller hung up.
    pub fn hangup() -> Self {
        Self::new(Self::HANGUP)
    }

    /// The caller said nothing.
    pub fn no_input() -> Self {
        Self::new(Self::NO_INPUT)
    }

    /// The caller was not understood.
    pub fn no_match() -> Self {
        Self::new(Self::NO_MATCH)
    }

    /// The dotted event name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The interpreter's message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// VoiceXML catch matching: `prefix` matches the event when it equals
    /// the name or is a whole-token prefix of it. `connection.disconnect`
    /// matches `connection.disconnect.hangup`; `connection.dis` does not.
    /// A trailing dot on `prefix` is ignored.
    pub fn matches(&self, prefix: &str) -> bool {
        let prefix = prefix.strip_suffix('.').unwrap_or(prefix);
        if prefix.is_empty() {
            return true;
        }
        match self.name.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('.'),
            None => false,
        }
    }
}

/// What the recognizer understood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recognition {
    /// The words heard.
    pub utterance: String,
    /// Semantic interpretation, as produced by the grammar.
    #[serde(default)]
    pub interpretation: Option<String>,
    /// Recognizer confidence in `0.0..=1.0`.
    pub confidence: f64,
}

/// The interpreter's answer to an output turn: events, recognition
/// results, or a plain value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VoiceXmlInputTurn {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    events: Vec<VoiceXmlEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recognition: Option<Recognition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

impl VoiceXmlInputTurn {
    /// An empty input turn.
    pub fn new() -> Self {
        Self::default()
    }

    /// An input turn carrying a single event.
    pub fn from_event(event: VoiceXmlEvent) -> Self {
        Self::new().with_event(event)
    }

    /// Add an event.
    pub fn with_event(mut self, event: VoiceXmlEvent) -> Self {
        self.events.push(event);
        self
    }

    /// Attach a recognition result.
    pub fn with_recognition(mut self, recognition: Recognition) -> Self {
        self.recognition = Some(recognition);
        self
    }

    /// Attach a plain value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Events in the order raised.
    pub fn events(&self) -> &[VoiceXmlEvent] {
        &self.events
    }

    /// The recognition result.
    pub fn recognition(&self) -> Option<&Recognition> {
        self.recognition.as_ref()
    }

    /// The plain value.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Whether any event matches `prefix`.
    pub fn has_event(&self, prefix: &str) -> bool {
        self.events.iter().any(|event| event.matches(prefix))
    }

    /// Whether the caller hung up.
    pub fn is_hangup(&self) -> bool {
        self.has_event(VoiceXmlEvent::HANGUP)
    }
}

impl InputTurn for VoiceXmlInputTurn {}
