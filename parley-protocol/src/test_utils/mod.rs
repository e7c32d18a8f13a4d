//! In-memory turns, dialogues and a platform for testing.
//!
//! Available behind the `test-utils` feature flag. These are minimal
//! implementations that exercise every path of the protocol.

mod dialogues;
mod echo_platform;
mod text_turn;

pub use dialogues::{FailingDialogue, PanickingDialogue, ScriptedDialogue, StallingDialogue};
pub use echo_platform::EchoPlatform;
pub use text_turn::{TextInput, TextLast, TextOutput};
