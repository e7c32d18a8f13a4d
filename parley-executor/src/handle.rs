//! The platform's handle on a running session.

use parley_channel::{PlatformSide, TurnChannel};
use parley_protocol::{ChannelError, DialogueState, SessionId, Step};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Handle returned by [`DialogueExecutor::start`](crate::DialogueExecutor::start).
///
/// Receives steps from the dialogue, answers output turns, and cancels the
/// session. Dropping the handle does not stop the dialogue task.
pub struct SessionHandle<O, L, I> {
    session: SessionId,
    platform: PlatformSide<O, L, I>,
    token: CancellationToken,
    state: watch::Receiver<DialogueState>,
    task: JoinHandle<()>,
}

impl<O, L, I> SessionHandle<O, L, I>
where
    O: Send,
    L: Send,
    I: Send,
{
    pub(crate) fn new(
        session: SessionId,
        channel: &TurnChannel<O, L, I>,
        token: CancellationToken,
        state: watch::Receiver<DialogueState>,
        task: JoinHandle<()>,
    ) -> Self {
        Self {
            session,
            platform: channel.platform_side(),
            token,
            state,
            task,
        }
    }

    /// The session this handle controls.
    pub fn session_id(&self) -> &SessionId {
        &self.session
    }

    /// The dialogue's lifecycle state. Becomes final once the terminal step
    /// has been handed over.
    pub fn state(&self) -> DialogueState {
        *self.state.borrow()
    }

    /// Wait for the next step with the configured step deadline.
    pub async fn next_step(&self) -> Result<Step<O, L>, ChannelError> {
        self.platform.take().await
    }

    /// Wait up to `timeout` for the next step.
    pub async fn next_step_within(
        &self,
        timeout: Option<Duration>,
    ) -> Result<Step<O, L>, ChannelError> {
        self.platform.take_within(timeout).await
    }

    /// Answer the output step received last.
    pub fn answer(&self, input: I) -> Result<(), ChannelError> {
        self.platform.answer(input)
    }

    /// Ask the dialogue to stop. Whichever side is blocked wakes up with a
    /// cancellation error; the dialogue still delivers its terminal step.
    pub fn cancel(&self) {
        tracing::debug!(session = %self.session, "parley.session.cancel_requested");
        self.token.cancel();
    }

    /// The token cancelling this session. Cancelling it is the same as
    /// calling [`cancel`](Self::cancel).
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.token
    }

    /// Cancel the session and wait up to `timeout` for its terminal step.
    ///
    /// Output steps the dialogue posts in the meantime are discarded. The
    /// executor delivers the terminal step within the configured
    /// cancellation grace, so `None` does not wait forever.
    pub async fn abort(&self, timeout: Option<Duration>) -> Result<Step<O, L>, ChannelError> {
        self.cancel();
        self.platform.take_terminal(timeout).await
    }

    /// Wait for the dialogue task to finish and return its final state.
    pub async fn join(self) -> DialogueState {
        if let Err(err) = self.task.await {
            tracing::error!(session = %self.session, error = %err, "parley.session.task_lost");
            return DialogueState::Failed;
        }
        *self.state.borrow()
    }
}
