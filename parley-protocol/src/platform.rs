//! The Platform interface: the device-facing side of a session.

use crate::error::PlatformError;
use crate::turn::{InputTurn, OutputTurn};
use async_trait::async_trait;

/// Renders output turns on the real device and collects the input turns
/// that answer them.
///
/// Implementations own all device I/O: markup generation, media fetching,
/// telephony signalling. A returned error ends the session; the driver
/// cancels the dialogue and collects its terminal step.
#[async_trait]
pub trait Platform: Send {
    /// Turns received from the dialogue.
    type Output: OutputTurn;
    /// Turns produced for the dialogue.
    type Input: InputTurn;

    /// Render `turn` and wait for the device's answer.
    async fn deliver(&mut self, turn: Self::Output) -> Result<Self::Input, PlatformError>;
}
