//! The platform loop.

use crate::handle::SessionHandle;
use parley_protocol::{ChannelError, Platform, Step};

/// Run a session to its end against `platform`.
///
/// Each output step is delivered to the platform and the input turn it
/// produces is handed back to the dialogue. Returns the session's terminal
/// step.
///
/// When the platform fails, or the channel reports a timeout or protocol
/// violation, the session is aborted and the terminal step the dialogue
/// delivers in response is returned instead. An answer the dialogue no
/// longer waits for is dropped and the loop carries on.
pub async fn drive<O, L, I, P>(
    handle: &SessionHandle<O, L, I>,
    platform: &mut P,
) -> Result<Step<O, L>, ChannelError>
where
    O: Send,
    L: Send,
    I: Send,
    P: Platform<Output = O, Input = I> + ?Sized,
{
    let session = handle.session_id();
    loop {
        let turn = match handle.next_step().await {
            Ok(Step::Output(turn)) => turn,
            Ok(terminal) => {
                tracing::debug!(%session, step = %terminal.kind(), "parley.drive.terminal");
                return Ok(terminal);
            }
            Err(err) if err.is_fatal() => {
                tracing::error!(%session, error = %err, "parley.drive.take_failed");
                return handle.abort(None).await;
            }
            Err(err) => {
                tracing::warn!(%session, error = %err, "parley.drive.take_failed");
                return handle.abort(None).await;
            }
        };

        let input = match platform.deliver(turn).await {
            Ok(input) => input,
            Err(err) => {
                tracing::warn!(%session, error = %err, "parley.drive.platform_failed");
                return handle.abort(None).await;
            }
        };

        match handle.answer(input) {
            Ok(()) => {}
            Err(ChannelError::Abandoned) => {
                tracing::debug!(%session, "parley.drive.answer_abandoned");
            }
            Err(err) => {
                tracing::error!(%session, error = %err, "parley.drive.answer_failed");
                return handle.abort(None).await;
            }
        }
    }
}
