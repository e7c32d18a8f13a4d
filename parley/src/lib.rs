#![deny(missing_docs)]
//! # parley: umbrella crate
//!
//! A single import surface for running dialogue logic against an
//! interaction platform. Re-exports the protocol and the implementation
//! crates behind feature flags, plus a `prelude` for the common path.

pub use parley_protocol as protocol;

#[cfg(feature = "channel")]
pub use parley_channel as channel;
#[cfg(feature = "executor")]
pub use parley_executor as executor;
#[cfg(feature = "voicexml")]
pub use parley_voicexml as voicexml;

/// Happy-path imports for writing dialogues and platforms.
pub mod prelude {
    pub use parley_protocol::{
        ChannelError, Dialogue, DialogueError, DialogueState, DurationMs, ErrorDescription,
        FailureKind, InputTurn, LastTurn, OutputTurn, Platform, PlatformError, SessionId, Step,
        StepKind, TurnExchange,
    };

    #[cfg(feature = "channel")]
    pub use parley_channel::{ChannelConfig, TurnChannel};

    #[cfg(feature = "executor")]
    pub use parley_executor::{DialogueExecutor, ExecutorConfig, SessionHandle, drive};

    #[cfg(feature = "voicexml")]
    pub use parley_voicexml::{
        AudioFile, AudioItem, AudioResolver, Exit, Message, SynthesisText, VoiceXmlEvent,
        VoiceXmlInputTurn,
    };
}
