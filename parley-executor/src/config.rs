//! Executor configuration.

use parley_channel::ChannelConfig;
use parley_protocol::DurationMs;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How sessions started by a [`DialogueExecutor`](crate::DialogueExecutor)
/// behave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Deadlines for the channel hand-offs.
    pub channel: ChannelConfig,

    /// How long a cancelled dialogue may keep running before the executor
    /// gives up on it and delivers a cancellation failure itself. Zero cuts
    /// the dialogue off as soon as cancellation is requested.
    pub cancel_grace: DurationMs,

    /// How long the executor waits for the platform to pick up the terminal
    /// step. The step stays posted either way; expiry is only logged.
    pub terminal_timeout: Option<DurationMs>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            channel: ChannelConfig::default(),
            cancel_grace: DurationMs::from_secs(1),
            terminal_timeout: None,
        }
    }
}

impl ExecutorConfig {
    /// Replace the channel deadlines.
    pub fn with_channel(mut self, channel: ChannelConfig) -> Self {
        self.channel = channel;
        self
    }

    /// Set the cancellation grace period.
    pub fn with_cancel_grace(mut self, grace: impl Into<DurationMs>) -> Self {
        self.cancel_grace = grace.into();
        self
    }

    /// Set the terminal pick-up deadline.
    pub fn with_terminal_timeout(mut self, timeout: impl Into<DurationMs>) -> Self {
        self.terminal_timeout = Some(timeout.into());
        self
    }

    pub(crate) fn grace(&self) -> Option<Duration> {
        (!self.cancel_grace.is_zero()).then(|| self.cancel_grace.to_std())
    }

    pub(crate) fn terminal(&self) -> Option<Duration> {
        self.terminal_timeout.map(|d| d.to_std())
    }
}
