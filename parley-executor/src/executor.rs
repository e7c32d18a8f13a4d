//! Starting sessions and guaranteeing their terminal step.

use crate::config::ExecutorConfig;
use crate::context::DialogueContext;
use crate::handle::SessionHandle;
use futures::FutureExt;
use parley_channel::{DialogueSide, TurnChannel};
use parley_protocol::{
    ChannelError, Dialogue, DialogueError, DialogueState, DurationMs, ErrorDescription,
    FailureKind, SessionId, Step,
};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Starts dialogues on their own tokio task, one channel per session.
///
/// Whatever the dialogue does (return, fail, panic, ignore a cancellation)
/// the session ends with exactly one terminal step posted on its channel.
#[derive(Debug, Clone, Default)]
pub struct DialogueExecutor {
    config: ExecutorConfig,
}

impl DialogueExecutor {
    /// Create an executor.
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    /// The configuration applied to new sessions.
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Start `dialogue` with its first input turn and return the
    /// platform-facing handle. Must be called inside a tokio runtime.
    pub fn start<D>(
        &self,
        dialogue: Arc<D>,
        session: SessionId,
        first: D::Input,
    ) -> SessionHandle<D::Output, D::Last, D::Input>
    where
        D: Dialogue + 'static,
    {
        let cancel = CancellationToken::new();
        let channel = TurnChannel::with_cancellation(self.config.channel.clone(), cancel.clone());
        let context = DialogueContext::new(session.clone(), channel.dialogue_side());
        let (state_tx, state_rx) = watch::channel(DialogueState::Running);

        let span = tracing::info_span!("parley.session", session = %session);
        let task = tokio::spawn(
            run_session(
                dialogue,
                first,
                context,
                channel.dialogue_side(),
                self.config.clone(),
                cancel.clone(),
                state_tx,
            )
            .instrument(span),
        );

        SessionHandle::new(session, &channel, cancel, state_rx, task)
    }
}

/// How the dialogue's run future came to an end.
enum Exit<L> {
    Returned(Result<Option<L>, DialogueError>),
    Panicked(Box<dyn Any + Send>),
    Unresponsive,
}

async fn run_session<D>(
    dialogue: Arc<D>,
    first: D::Input,
    mut context: DialogueContext<D::Output, D::Last, D::Input>,
    side: DialogueSide<D::Output, D::Last, D::Input>,
    config: ExecutorConfig,
    cancel: CancellationToken,
    state: watch::Sender<DialogueState>,
) where
    D: Dialogue + 'static,
{
    tracing::info!("parley.session.started");
    let grace = config.grace();

    let exit = {
        let run = AssertUnwindSafe(dialogue.run(first, &mut context)).catch_unwind();
        tokio::pin!(run);
        tokio::select! {
            biased;
            result = &mut run => match result {
                Ok(returned) => Exit::Returned(returned),
                Err(payload) => Exit::Panicked(payload),
            },
            () = async {
                cancel.cancelled().await;
                if let Some(grace) = grace {
                    tokio::time::sleep(grace).await;
                }
            } => Exit::Unresponsive,
        }
    };

    let step = terminal_step(exit, context.latched_error(), config.cancel_grace);
    let kind = step.kind();
    let final_state = DialogueState::after(kind);

    match step.failure() {
        Some(failure) if failure.kind() == FailureKind::ProtocolViolation => {
            tracing::error!(failure = %failure, "parley.session.protocol_violation");
        }
        Some(failure) => {
            tracing::warn!(kind = ?failure.kind(), failure = %failure, "parley.session.failed");
        }
        None => {}
    }

    match side.put_within(step, config.terminal()).await {
        Ok(()) => {}
        Err(err) if err.is_timeout() => {
            tracing::warn!(error = %err, "parley.session.terminal_unclaimed");
        }
        Err(err) => {
            tracing::error!(error = %err, "parley.session.terminal_rejected");
        }
    }

    state.send_replace(final_state);
    tracing::info!(
        step = %kind,
        state = %final_state,
        turns = context.turns(),
        "parley.session.finished"
    );
}

/// The one terminal step for the way the dialogue ended.
fn terminal_step<O, L>(
    exit: Exit<L>,
    latched: Option<&ChannelError>,
    grace: DurationMs,
) -> Step<O, L> {
    match (exit, latched) {
        (Exit::Returned(Err(err)), _) => Step::Failure(ErrorDescription::from(err)),
        // A dialogue that swallowed a channel error still failed.
        (Exit::Returned(Ok(_)), Some(err)) => Step::Failure(ErrorDescription::from(err.clone())),
        (Exit::Returned(Ok(Some(last))), None) => Step::Terminal(last),
        (Exit::Returned(Ok(None)), None) => Step::End,
        (Exit::Panicked(payload), _) => Step::Failure(ErrorDescription::from_panic(&*payload)),
        (Exit::Unresponsive, _) => Step::Failure(ErrorDescription::new(
            FailureKind::Cancelled,
            format!("dialogue did not stop within {grace} of cancellation"),
        )),
    }
}
