//! Audio content: prerecorded files, synthesized text and pauses.

use crate::fetch::ResourceFetchConfiguration;
use parley_protocol::DurationMs;
use serde::Serialize;
use std::fmt;

/// Text rendered by the speech synthesizer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SynthesisText {
    text: String,
}

impl SynthesisText {
    /// Wrap `text` for synthesis.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The text to speak.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl From<&str> for SynthesisText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for SynthesisText {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Where an [`AudioFile`] comes from. A file has exactly one address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AudioAddress {
    /// A fixed URI.
    Location(String),
    /// An interpreter-side expression evaluating to a URI.
    Expression(String),
}

impl fmt::Display for AudioAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioAddress::Location(location) => write!(f, "location {location}"),
            AudioAddress::Expression(expression) => write!(f, "expression {expression}"),
        }
    }
}

/// A prerecorded audio file, addressed by location or by expression, with
/// an optional synthesized fallback.
///
/// ```
/// use parley_voicexml::AudioFile;
///
/// let prompt = AudioFile::from_location("prompts/welcome.wav")
///     .with_alternate("Welcome to the bank.");
/// assert_eq!(prompt.location(), Some("prompts/welcome.wav"));
/// assert_eq!(prompt.expression(), None);
/// ```
///
/// Serializes to the camelCase property set consumed by markup generation:
/// `location` or `expression`, then `resourceFetchConfiguration` and
/// `alternate` when present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioFile {
    #[serde(flatten)]
    address: AudioAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource_fetch_configuration: Option<ResourceFetchConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alternate: Option<SynthesisText>,
}

impl AudioFile {
    /// Element type name used by markup generation.
    pub const ELEMENT_TYPE: &'static str = "audioFile";

    /// A file at a fixed URI.
    pub fn from_location(location: impl Into<String>) -> Self {
        Self::at(AudioAddress::Location(location.into()))
    }

    /// A file whose URI is computed by the interpreter.
    pub fn from_expression(expression: impl Into<String>) -> Self {
        Self::at(AudioAddress::Expression(expression.into()))
    }

    fn at(address: AudioAddress) -> Self {
        Self {
            address,
            resource_fetch_configuration: None,
            alternate: None,
        }
    }

    /// Speak `alternate` when the file cannot be played.
    pub fn with_alternate(mut self, alternate: impl Into<SynthesisText>) -> Self {
        self.alternate = Some(alternate.into());
        self
    }

    /// Override how the file is fetched.
    pub fn with_resource_fetch_configuration(
        mut self,
        configuration: ResourceFetchConfiguration,
    ) -> Self {
        self.resource_fetch_configuration = Some(configuration);
        self
    }

    /// The file's address.
    pub fn address(&self) -> &AudioAddress {
        &self.address
    }

    /// The fixed URI, if addressed by location.
    pub fn location(&self) -> Option<&str> {
        match &self.address {
            AudioAddress::Location(location) => Some(location),
            AudioAddress::Expression(_) => None,
        }
    }

    /// The URI expression, if addressed by expression.
    pub fn expression(&self) -> Option<&str> {
        match &self.address {
            AudioAddress::Expression(expression) => Some(expression),
            AudioAddress::Location(_) => None,
        }
    }

    /// The synthesized fallback.
    pub fn alternate(&self) -> Option<&SynthesisText> {
        self.alternate.as_ref()
    }

    /// The fetch override.
    pub fn resource_fetch_configuration(&self) -> Option<&ResourceFetchConfiguration> {
        self.resource_fetch_configuration.as_ref()
    }

    /// Always [`AudioFile::ELEMENT_TYPE`].
    pub fn element_type(&self) -> &'static str {
        Self::ELEMENT_TYPE
    }
}

/// One piece of audio in a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AudioItem {
    /// A prerecorded file.
    AudioFile(AudioFile),
    /// Synthesized speech.
    SynthesisText(SynthesisText),
    /// Silence.
    Pause {
        /// Length of the silence.
        duration: DurationMs,
    },
}

impl AudioItem {
    /// A pause of `duration`.
    pub fn pause(duration: impl Into<DurationMs>) -> Self {
        AudioItem::Pause {
            duration: duration.into(),
        }
    }

    /// Element type name used by markup generation.
    pub fn element_type(&self) -> &'static str {
        match self {
            AudioItem::AudioFile(_) => AudioFile::ELEMENT_TYPE,
            AudioItem::SynthesisText(_) => "synthesisText",
            AudioItem::Pause { .. } => "pause",
        }
    }
}

impl From<AudioFile> for AudioItem {
    fn from(file: AudioFile) -> Self {
        AudioItem::AudioFile(file)
    }
}

impl From<SynthesisText> for AudioItem {
    fn from(text: SynthesisText) -> Self {
        AudioItem::SynthesisText(text)
    }
}
