//! Error types for each side of the protocol, and the failure description
//! carried by [`Step::Failure`](crate::Step::Failure).

use crate::duration::DurationMs;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Which blocking hand-off an error interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// The dialogue handing a step to the platform.
    Put,
    /// The platform waiting for the next step.
    Take,
    /// The dialogue waiting for the input turn answering its output.
    Reply,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Put => "put",
            Operation::Take => "take",
            Operation::Reply => "reply",
        })
    }
}

/// Channel hand-off errors.
///
/// None of these are retried by the channel. Retry policy, if any, belongs
/// to the platform driver.
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChannelError {
    /// The hand-off did not complete before its deadline. The channel is
    /// left usable for a terminal step.
    #[error("{operation} timed out after {after}")]
    Timeout {
        /// The interrupted hand-off.
        operation: Operation,
        /// The deadline that expired.
        after: DurationMs,
    },

    /// The session was cancelled while the hand-off was blocked.
    #[error("{operation} cancelled")]
    Cancelled {
        /// The interrupted hand-off.
        operation: Operation,
    },

    /// The strict put/take/reply alternation was broken. A programming
    /// defect: fatal, never retried.
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    /// The platform answered a turn the dialogue is no longer waiting for.
    #[error("the dialogue abandoned the pending turn")]
    Abandoned,

    /// The terminal step has already been consumed. Reaching a closed
    /// channel is a programming defect: fatal, never retried.
    #[error("channel closed")]
    Closed,
}

impl ChannelError {
    /// Protocol violations and use of a closed channel are fatal.
    /// Everything else is an expected, if unwelcome, outcome of a session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ChannelError::ProtocolViolation(_) | ChannelError::Closed)
    }

    /// Whether this is a deadline expiry.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ChannelError::Timeout { .. })
    }

    /// Whether this is a cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ChannelError::Cancelled { .. })
    }

    /// The failure kind this error becomes inside a [`Step::Failure`](crate::Step::Failure).
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            ChannelError::Timeout { .. } => FailureKind::Timeout,
            ChannelError::Cancelled { .. } => FailureKind::Cancelled,
            ChannelError::ProtocolViolation(_) | ChannelError::Closed => {
                FailureKind::ProtocolViolation
            }
            ChannelError::Abandoned => FailureKind::Abandoned,
        }
    }
}

/// Errors raised by dialogue logic.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DialogueError {
    /// A turn hand-off failed.
    #[error(transparent)]
    Channel(#[from] ChannelError),

    /// Output content could not be resolved.
    #[error("content resolution failed")]
    Content(#[source] Box<dyn Error + Send + Sync>),

    /// The dialogue gave up. Include context.
    #[error("dialogue failed: {0}")]
    Failed(String),

    /// Catch-all for errors the dialogue author did not anticipate.
    #[error(transparent)]
    Other(#[from] Box<dyn Error + Send + Sync>),
}

impl DialogueError {
    /// The failure kind this error becomes inside a [`Step::Failure`](crate::Step::Failure).
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            DialogueError::Channel(err) => err.failure_kind(),
            DialogueError::Content(_) => FailureKind::Content,
            DialogueError::Failed(_) | DialogueError::Other(_) => FailureKind::Application,
        }
    }
}

/// Errors raised by the platform while talking to the device.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The remote party went away.
    #[error("disconnected: {0}")]
    Disconnected(String),

    /// The device rejected or failed to render a turn.
    #[error("device error: {0}")]
    Device(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn Error + Send + Sync>),
}

/// Classification of a [`Step::Failure`](crate::Step::Failure).
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The dialogue logic returned an error.
    Application,
    /// A hand-off deadline expired.
    Timeout,
    /// The session was cancelled.
    Cancelled,
    /// The channel protocol was broken.
    ProtocolViolation,
    /// An answer arrived for a turn nobody was waiting on.
    Abandoned,
    /// Output content could not be resolved.
    Content,
    /// The dialogue logic panicked.
    Panic,
}

/// Description of the error that aborted a dialogue.
///
/// Carries a human-readable message, the messages of the cause chain, and
/// an opaque reference to the original error when one exists. Two
/// descriptions are equal when kind, message and causes match; the opaque
/// source is not compared.
#[derive(Debug, Clone)]
pub struct ErrorDescription {
    kind: FailureKind,
    message: String,
    causes: Vec<String>,
    source: Option<Arc<dyn Error + Send + Sync>>,
}

impl ErrorDescription {
    /// A description with no underlying error value.
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            causes: vec![],
            source: None,
        }
    }

    /// Describe `error`, keeping it as the opaque source.
    pub fn from_error<E>(kind: FailureKind, error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        let message = error.to_string();
        let mut causes = Vec::new();
        let mut next = error.source();
        while let Some(cause) = next {
            causes.push(cause.to_string());
            next = cause.source();
        }
        let source: Arc<dyn Error + Send + Sync> = Arc::new(error);
        Self {
            kind,
            message,
            causes,
            source: Some(source),
        }
    }

    /// Describe a panic payload caught at the executor boundary.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let detail = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_owned());
        Self::new(FailureKind::Panic, format!("dialogue panicked: {detail}"))
    }

    /// The failure classification.
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// The top-level message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Messages of the cause chain, outermost first.
    pub fn causes(&self) -> &[String] {
        &self.causes
    }

    /// The original error, if the failure came from one.
    pub fn source(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.source.as_deref()
    }
}

impl From<DialogueError> for ErrorDescription {
    fn from(error: DialogueError) -> Self {
        Self::from_error(error.failure_kind(), error)
    }
}

impl From<ChannelError> for ErrorDescription {
    fn from(error: ChannelError) -> Self {
        Self::from_error(error.failure_kind(), error)
    }
}

impl PartialEq for ErrorDescription {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.message == other.message && self.causes == other.causes
    }
}

impl fmt::Display for ErrorDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        for cause in &self.causes {
            write!(f, ": {cause}")?;
        }
        Ok(())
    }
}
