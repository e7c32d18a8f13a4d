//! EchoPlatform: answers every prompt with a canned reply.

use super::text_turn::{TextInput, TextOutput};
use crate::error::PlatformError;
use crate::platform::Platform;
use async_trait::async_trait;

/// A platform that answers each output turn with `"re: <prompt>"` and
/// records what it rendered. Optionally disconnects after a number of
/// deliveries.
#[derive(Debug, Default)]
pub struct EchoPlatform {
    delivered: Vec<TextOutput>,
    disconnect_after: Option<usize>,
}

impl EchoPlatform {
    /// Create a platform that never disconnects.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with [`PlatformError::Disconnected`] once `turns` turns have
    /// been delivered.
    pub fn disconnect_after(mut self, turns: usize) -> Self {
        self.disconnect_after = Some(turns);
        self
    }

    /// Every output turn rendered so far, in order.
    pub fn delivered(&self) -> &[TextOutput] {
        &self.delivered
    }
}

#[async_trait]
impl Platform for EchoPlatform {
    type Output = TextOutput;
    type Input = TextInput;

    async fn deliver(&mut self, turn: TextOutput) -> Result<TextInput, PlatformError> {
        if self.disconnect_after == Some(self.delivered.len()) {
            return Err(PlatformError::Disconnected("caller hung up".into()));
        }
        let reply = TextInput::new(format!("re: {}", turn.0));
        self.delivered.push(turn);
        Ok(reply)
    }
}
