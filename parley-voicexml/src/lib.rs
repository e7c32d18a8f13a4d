//! # parley-voicexml: VoiceXML turns and audio content
//!
//! Concrete turn types for dialogues driving a VoiceXML interpreter, plus
//! the audio content model their prompts are made of.
//!
//! | Piece | Types |
//! |-------|-------|
//! | Turns | [`Message`], [`Exit`], [`VoiceXmlInputTurn`], [`VoiceXmlEvent`], [`Recognition`] |
//! | Audio | [`AudioItem`], [`AudioFile`], [`AudioAddress`], [`SynthesisText`] |
//! | Fetching | [`ResourceFetchConfiguration`], [`FetchHint`] |
//! | Resolution | [`AudioResolver`], [`Rendition`], [`ContentError`] |
//!
//! Content values are immutable once built and serialize to the camelCase
//! property sets markup generation expects. Rendering the markup itself is
//! the platform's job.

#![deny(missing_docs)]

pub mod audio;
pub mod fetch;
pub mod resolve;
pub mod turn;

pub use audio::{AudioAddress, AudioFile, AudioItem, SynthesisText};
pub use fetch::{FetchHint, ResourceFetchConfiguration};
pub use resolve::{AudioResolver, ContentError, Rendition};
pub use turn::{Exit, Message, Recognition, VoiceXmlEvent, VoiceXmlInputTurn};
