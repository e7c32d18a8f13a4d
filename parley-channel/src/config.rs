//! Channel deadlines.

use parley_protocol::DurationMs;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Deadlines for the three blocking hand-offs. `None` waits forever.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// How long the dialogue waits for the platform to take a step.
    pub handoff_timeout: Option<DurationMs>,
    /// How long the dialogue waits for the input turn answering its output.
    pub reply_timeout: Option<DurationMs>,
    /// How long the platform waits for the next step.
    pub step_timeout: Option<DurationMs>,
}

impl ChannelConfig {
    /// Set the hand-off deadline.
    pub fn with_handoff_timeout(mut self, timeout: impl Into<DurationMs>) -> Self {
        self.handoff_timeout = Some(timeout.into());
        self
    }

    /// Set the reply deadline.
    pub fn with_reply_timeout(mut self, timeout: impl Into<DurationMs>) -> Self {
        self.reply_timeout = Some(timeout.into());
        self
    }

    /// Set the step deadline.
    pub fn with_step_timeout(mut self, timeout: impl Into<DurationMs>) -> Self {
        self.step_timeout = Some(timeout.into());
        self
    }

    pub(crate) fn handoff(&self) -> Option<Duration> {
        self.handoff_timeout.map(|d| d.to_std())
    }

    pub(crate) fn reply(&self) -> Option<Duration> {
        self.reply_timeout.map(|d| d.to_std())
    }

    pub(crate) fn step(&self) -> Option<Duration> {
        self.step_timeout.map(|d| d.to_std())
    }
}
