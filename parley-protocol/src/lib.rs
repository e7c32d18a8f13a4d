//! # parley-protocol: Turn-exchange protocol for dialogue-driven platforms
//!
//! This crate defines the vocabulary shared by the two sides of a dialogue
//! session: the *dialogue* (business logic producing output turns) and the
//! *platform* (the I/O driver talking to the real interaction device).
//!
//! ## The Pieces
//!
//! | Piece | Types | What it does |
//! |-------|-------|-------------|
//! | Turn roles | [`OutputTurn`], [`InputTurn`], [`LastTurn`] | Capabilities a turn value must provide |
//! | Step | [`Step`], [`StepKind`] | The envelope crossing the channel |
//! | Failure | [`ErrorDescription`], [`FailureKind`] | Transportable description of an aborted dialogue |
//! | Errors | [`ChannelError`], [`DialogueError`], [`PlatformError`] | Per-concern error taxonomy |
//! | Seams | [`Dialogue`], [`TurnExchange`], [`Platform`] | What integrators implement |
//!
//! ## Step Discipline
//!
//! A session delivers any number of [`Step::Output`] steps followed by
//! exactly one terminal step ([`Step::Terminal`], [`Step::Failure`] or
//! [`Step::End`]). Nothing follows a terminal step. The channel that enforces
//! this lives in `parley-channel`; the executor that guarantees the terminal
//! step lives in `parley-executor`.
//!
//! ## Turn Content
//!
//! The protocol never looks inside a turn. Rendering a turn into markup,
//! fetching referenced media and encoding content for the wire all belong to
//! the platform. `parley-voicexml` provides a concrete content model.

#![deny(missing_docs)]

pub mod dialogue;
pub mod duration;
pub mod error;
pub mod id;
pub mod lifecycle;
pub mod platform;
pub mod step;
pub mod turn;

#[cfg(feature = "test-utils")]
pub mod test_utils;

// Re-exports for convenience
pub use dialogue::{Dialogue, TurnExchange};
pub use duration::DurationMs;
pub use error::{
    ChannelError, DialogueError, ErrorDescription, FailureKind, Operation, PlatformError,
};
pub use id::SessionId;
pub use lifecycle::DialogueState;
pub use platform::Platform;
pub use step::{Step, StepKind};
pub use turn::{InputTurn, LastTurn, OutputTurn};
