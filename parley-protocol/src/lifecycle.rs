//! Dialogue lifecycle states.

use crate::step::StepKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a dialogue is in its life.
///
/// `Running` moves to exactly one of the two final states, and only after
/// the terminal step has been handed to the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    /// Executing dialogue logic, possibly blocked on a hand-off.
    Running,
    /// Ended normally with a `Terminal` or `End` step.
    Completed,
    /// Ended with a `Failure` step.
    Failed,
}

impl DialogueState {
    /// Whether the dialogue has finished.
    pub fn is_final(self) -> bool {
        !matches!(self, DialogueState::Running)
    }

    /// The final state implied by a terminal step kind.
    pub fn after(kind: StepKind) -> Self {
        match kind {
            StepKind::Failure => DialogueState::Failed,
            StepKind::Terminal | StepKind::End => DialogueState::Completed,
            StepKind::Output => DialogueState::Running,
        }
    }
}

impl fmt::Display for DialogueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DialogueState::Running => "running",
            DialogueState::Completed => "completed",
            DialogueState::Failed => "failed",
        })
    }
}
