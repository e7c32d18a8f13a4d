//! Turning audio items into something the device can play.

use crate::audio::{AudioAddress, AudioFile, AudioItem, SynthesisText};
use parley_protocol::{DialogueError, DurationMs};
use thiserror::Error;

/// Looks up playable URIs for audio addresses. Implemented by the
/// platform, which knows its media store and interpreter.
pub trait AudioResolver {
    /// The playable URI for a fixed location, if the file exists.
    fn locate(&self, location: &str) -> Option<String>;

    /// The playable URI an expression evaluates to, if any.
    fn evaluate(&self, expression: &str) -> Option<String>;
}

/// What the device should actually render for one audio item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendition {
    /// Play the file at this URI.
    Audio(String),
    /// Speak this text.
    Speech(SynthesisText),
    /// Stay silent.
    Silence(DurationMs),
}

/// Content that could not be turned into a rendition.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ContentError {
    /// Neither the address nor an alternate resolved.
    #[error("audio file at {0} is unavailable and has no alternate")]
    Unresolvable(AudioAddress),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl From<ContentError> for DialogueError {
    fn from(err: ContentError) -> Self {
        DialogueError::Content(Box::new(err))
    }
}

impl AudioFile {
    /// Resolve the address first, then fall back to the alternate text.
    pub fn resolve(&self, resolver: &dyn AudioResolver) -> Result<Rendition, ContentError> {
        let uri = match self.address() {
            AudioAddress::Location(location) => resolver.locate(location),
            AudioAddress::Expression(expression) => resolver.evaluate(expression),
        };
        match (uri, self.alternate()) {
            (Some(uri), _) => Ok(Rendition::Audio(uri)),
            (None, Some(alternate)) => Ok(Rendition::Speech(alternate.clone())),
            (None, None) => Err(ContentError::Unresolvable(self.address().clone())),
        }
    }
}

impl AudioItem {
    /// Resolve this item. Only audio files can fail.
    pub fn resolve(&self, resolver: &dyn AudioResolver) -> Result<Rendition, ContentError> {
        match self {
            AudioItem::AudioFile(file) => file.resolve(resolver),
            AudioItem::SynthesisText(text) => Ok(Rendition::Speech(text.clone())),
            AudioItem::Pause { duration } => Ok(Rendition::Silence(*duration)),
        }
    }
}
