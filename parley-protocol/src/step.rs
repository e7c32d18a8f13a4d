//! The Step envelope: what crosses the channel.

use crate::error::ErrorDescription;
use crate::turn::{LastTurn, OutputTurn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One envelope handed from the dialogue to the platform.
///
/// The set of shapes is closed: consumers match on all four, and adding a
/// shape is a breaking protocol change. Only [`Step::Output`] may be
/// followed by another step. The three other shapes are terminal and at
/// most one of them is delivered per session.
#[derive(Debug, Clone, PartialEq)]
pub enum Step<O, L> {
    /// Content produced by the dialogue for the device. The dialogue waits
    /// for the matching input turn before producing anything else.
    Output(O),
    /// The dialogue ended normally and produced a final turn.
    Terminal(L),
    /// The dialogue was aborted. Always terminal.
    Failure(ErrorDescription),
    /// The dialogue ended normally without a final turn.
    End,
}

/// Payload-free discriminator of a [`Step`], for logs and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// See [`Step::Output`].
    Output,
    /// See [`Step::Terminal`].
    Terminal,
    /// See [`Step::Failure`].
    Failure,
    /// See [`Step::End`].
    End,
}

impl StepKind {
    /// Whether steps of this kind end the session.
    pub fn is_terminal(self) -> bool {
        !matches!(self, StepKind::Output)
    }

    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::Output => "output",
            StepKind::Terminal => "terminal",
            StepKind::Failure => "failure",
            StepKind::End => "end",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<O, L> Step<O, L> {
    /// The discriminator of this step.
    pub fn kind(&self) -> StepKind {
        match self {
            Step::Output(_) => StepKind::Output,
            Step::Terminal(_) => StepKind::Terminal,
            Step::Failure(_) => StepKind::Failure,
            Step::End => StepKind::End,
        }
    }

    /// Whether this step ends the session.
    pub fn is_terminal(&self) -> bool {
        self.kind().is_terminal()
    }

    /// The output turn, if this is an output step.
    pub fn into_output(self) -> Option<O> {
        match self {
            Step::Output(turn) => Some(turn),
            _ => None,
        }
    }

    /// The failure description, if this is a failure step.
    pub fn failure(&self) -> Option<&ErrorDescription> {
        match self {
            Step::Failure(description) => Some(description),
            _ => None,
        }
    }
}

impl<O: OutputTurn, L: LastTurn> fmt::Display for Step<O, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Output(turn) => write!(f, "Output: {}", turn.name()),
            Step::Terminal(turn) => write!(f, "Last: {}", turn.name()),
            Step::Failure(description) => write!(f, "Error: {description}"),
            Step::End => f.write_str("End"),
        }
    }
}
