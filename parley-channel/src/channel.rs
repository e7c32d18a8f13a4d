//! The rendezvous engine.

use crate::config::ChannelConfig;
use parley_protocol::{ChannelError, DurationMs, Operation, Step, StepKind};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Nothing in flight. The dialogue may offer a step.
    Idle,
    /// A step sits in the slot waiting for the platform.
    Offered,
    /// The platform took an output step and owes the dialogue an answer.
    AwaitingReply,
    /// The answer sits in the slot waiting for the dialogue.
    Answered,
    /// The terminal step was taken. Nothing more will cross.
    Closed,
}

struct Slot<O, L, I> {
    phase: Phase,
    step: Option<Step<O, L>>,
    reply: Option<I>,
    /// Sequence number of the last offered step.
    offered: u64,
    /// Sequence number of the last taken step.
    taken: u64,
}

impl<O, L, I> Slot<O, L, I> {
    fn new() -> Self {
        Self {
            phase: Phase::Idle,
            step: None,
            reply: None,
            offered: 0,
            taken: 0,
        }
    }

    fn offered_is_terminal(&self) -> bool {
        self.step.as_ref().is_some_and(Step::is_terminal)
    }

    /// Place `step` in the slot and return its sequence number.
    ///
    /// Output steps need an idle channel. A terminal step may also replace
    /// an output nobody took yet or cut short a pending reply, so the
    /// dialogue can always end the session.
    fn offer(&mut self, step: Step<O, L>) -> Result<u64, ChannelError> {
        let terminal = step.is_terminal();
        match self.phase {
            Phase::Closed => {
                return Err(ChannelError::ProtocolViolation(
                    "a terminal step was already delivered".into(),
                ));
            }
            Phase::Offered if !terminal || self.offered_is_terminal() => {
                return Err(ChannelError::ProtocolViolation(
                    "the previous step has not been taken yet".into(),
                ));
            }
            Phase::AwaitingReply | Phase::Answered if !terminal => {
                return Err(ChannelError::ProtocolViolation(
                    "the previous output turn has not been answered yet".into(),
                ));
            }
            Phase::Offered => {
                tracing::warn!(seq = self.offered, "parley.channel.output_replaced");
            }
            Phase::AwaitingReply | Phase::Answered => {
                tracing::debug!(seq = self.taken, "parley.channel.reply_abandoned");
            }
            Phase::Idle => {}
        }
        self.reply = None;
        self.step = Some(step);
        self.phase = Phase::Offered;
        self.offered += 1;
        Ok(self.offered)
    }

    fn take(&mut self) -> Option<Step<O, L>> {
        let step = self.step.take()?;
        self.taken = self.offered;
        self.phase = if step.is_terminal() {
            Phase::Closed
        } else {
            Phase::AwaitingReply
        };
        Some(step)
    }

    /// Pull back step `seq` if the platform has not taken it.
    fn withdraw(&mut self, seq: u64) -> bool {
        if self.phase == Phase::Offered && self.offered == seq && self.taken < seq {
            self.step = None;
            self.phase = Phase::Idle;
            true
        } else {
            false
        }
    }

    fn consume_reply(&mut self) -> Option<I> {
        if self.phase != Phase::Answered {
            return None;
        }
        self.phase = Phase::Idle;
        self.reply.take()
    }
}

struct Shared<O, L, I> {
    slot: Mutex<Slot<O, L, I>>,
    offered: Notify,
    taken: Notify,
    answered: Notify,
    cancel: CancellationToken,
    config: ChannelConfig,
}

enum Interrupt {
    TimedOut,
    Cancelled,
}

impl Interrupt {
    fn into_error(self, operation: Operation, timeout: Option<Duration>) -> ChannelError {
        match self {
            Interrupt::TimedOut => ChannelError::Timeout {
                operation,
                after: timeout.map(DurationMs::from).unwrap_or_default(),
            },
            Interrupt::Cancelled => ChannelError::Cancelled { operation },
        }
    }
}

async fn expire(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

impl<O, L, I> Shared<O, L, I> {
    fn lock(&self) -> MutexGuard<'_, Slot<O, L, I>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_slot<T>(&self, f: impl FnOnce(&mut Slot<O, L, I>) -> T) -> T {
        f(&mut *self.lock())
    }

    /// Re-run `poll` each time `signal` fires until it yields a value, the
    /// deadline passes, or (when `cancellable`) the session is cancelled.
    async fn wait_for<T>(
        &self,
        signal: &Notify,
        timeout: Option<Duration>,
        cancellable: bool,
        mut poll: impl FnMut(&mut Slot<O, L, I>) -> Option<T>,
    ) -> Result<T, Interrupt> {
        let deadline = timeout.map(|t| Instant::now() + t);
        loop {
            if let Some(value) = self.with_slot(&mut poll) {
                return Ok(value);
            }
            tokio::select! {
                biased;
                () = signal.notified() => {}
                () = self.cancel.cancelled(), if cancellable => return Err(Interrupt::Cancelled),
                () = expire(deadline) => return Err(Interrupt::TimedOut),
            }
        }
    }
}

/// A capacity-one rendezvous between a dialogue and its platform.
///
/// At most one [`Step`] is in flight at any time. The dialogue offers a
/// step and blocks until the platform takes it; after an output step it
/// blocks again until the platform answers with an input turn. Steps are
/// observed in the order they were offered, each exactly once.
///
/// Every blocking call takes an optional deadline. A deadline or a
/// cancellation never leaves the channel half-way through a hand-off: an
/// untaken output is withdrawn, an unanswered turn is abandoned, and a
/// terminal step can still be delivered afterwards.
///
/// The channel is split into a [`DialogueSide`] and a [`PlatformSide`].
/// Both are cheap handles onto the same slot.
pub struct TurnChannel<O, L, I> {
    shared: Arc<Shared<O, L, I>>,
}

impl<O, L, I> TurnChannel<O, L, I>
where
    O: Send,
    L: Send,
    I: Send,
{
    /// A channel with its own cancellation token.
    pub fn new(config: ChannelConfig) -> Self {
        Self::with_cancellation(config, CancellationToken::new())
    }

    /// A channel that is cancelled together with `cancel`.
    pub fn with_cancellation(config: ChannelConfig, cancel: CancellationToken) -> Self {
        Self {
            shared: Arc::new(Shared {
                slot: Mutex::new(Slot::new()),
                offered: Notify::new(),
                taken: Notify::new(),
                answered: Notify::new(),
                cancel,
                config,
            }),
        }
    }

    /// The dialogue's handle.
    pub fn dialogue_side(&self) -> DialogueSide<O, L, I> {
        DialogueSide {
            shared: Arc::clone(&self.shared),
        }
    }

    /// The platform's handle.
    pub fn platform_side(&self) -> PlatformSide<O, L, I> {
        PlatformSide {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Interrupt whichever side is blocked. Terminal hand-offs still go
    /// through.
    pub fn cancel(&self) {
        self.shared.cancel.cancel();
    }

    /// Whether the terminal step has been taken.
    pub fn is_closed(&self) -> bool {
        self.shared.lock().phase == Phase::Closed
    }
}

/// The dialogue's end of a [`TurnChannel`].
pub struct DialogueSide<O, L, I> {
    shared: Arc<Shared<O, L, I>>,
}

impl<O, L, I> Clone for DialogueSide<O, L, I> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<O, L, I> DialogueSide<O, L, I>
where
    O: Send,
    L: Send,
    I: Send,
{
    /// Offer `step` and wait for the platform to take it, using the
    /// configured hand-off deadline.
    pub async fn put(&self, step: Step<O, L>) -> Result<(), ChannelError> {
        self.put_within(step, self.shared.config.handoff()).await
    }

    /// Offer `step` and wait up to `timeout` for the platform to take it.
    ///
    /// An output step that is not taken in time, or whose wait is
    /// cancelled, is withdrawn and the error returned. A terminal step
    /// ignores cancellation and stays posted after a timeout, so a later
    /// take still receives it.
    pub async fn put_within(
        &self,
        step: Step<O, L>,
        timeout: Option<Duration>,
    ) -> Result<(), ChannelError> {
        let kind = step.kind();
        let terminal = kind.is_terminal();
        if !terminal && self.shared.cancel.is_cancelled() {
            return Err(ChannelError::Cancelled {
                operation: Operation::Put,
            });
        }

        let seq = self.shared.with_slot(|slot| slot.offer(step))?;
        tracing::debug!(seq, kind = %kind, "parley.channel.offered");
        self.shared.offered.notify_one();

        let waited = self
            .shared
            .wait_for(&self.shared.taken, timeout, !terminal, |slot| {
                (slot.taken >= seq).then_some(())
            })
            .await;

        match waited {
            Ok(()) => Ok(()),
            Err(interrupt) if terminal => {
                tracing::warn!(seq, kind = %kind, "parley.channel.terminal_pending");
                Err(interrupt.into_error(Operation::Put, timeout))
            }
            Err(interrupt) => {
                if self.shared.with_slot(|slot| slot.withdraw(seq)) {
                    tracing::warn!(seq, "parley.channel.withdrawn");
                    Err(interrupt.into_error(Operation::Put, timeout))
                } else {
                    // taken between the interrupt and the withdrawal
                    Ok(())
                }
            }
        }
    }

    /// Wait for the input turn answering the last output step, using the
    /// configured reply deadline.
    pub async fn receive_reply(&self) -> Result<I, ChannelError> {
        self.receive_reply_within(self.shared.config.reply()).await
    }

    /// Wait up to `timeout` for the input turn answering the last output
    /// step. On timeout or cancellation the pending turn is abandoned and
    /// a late answer from the platform is refused.
    pub async fn receive_reply_within(&self, timeout: Option<Duration>) -> Result<I, ChannelError> {
        self.shared.with_slot(|slot| match slot.phase {
            Phase::AwaitingReply | Phase::Answered => Ok(()),
            _ => Err(ChannelError::ProtocolViolation(
                "no output turn is waiting for a reply".into(),
            )),
        })?;

        let waited = self
            .shared
            .wait_for(&self.shared.answered, timeout, true, Slot::consume_reply)
            .await;

        match waited {
            Ok(reply) => Ok(reply),
            Err(interrupt) => self.shared.with_slot(|slot| {
                if let Some(reply) = slot.consume_reply() {
                    return Ok(reply);
                }
                if slot.phase == Phase::AwaitingReply {
                    slot.phase = Phase::Idle;
                }
                tracing::warn!(seq = slot.taken, "parley.channel.reply_abandoned");
                Err(interrupt.into_error(Operation::Reply, timeout))
            }),
        }
    }

    /// Hand an output turn to the platform and wait for its answer.
    pub async fn exchange(&self, turn: O) -> Result<I, ChannelError> {
        self.put(Step::Output(turn)).await?;
        self.receive_reply().await
    }

    /// Whether the session has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.shared.cancel.is_cancelled()
    }

    /// The token that cancels this channel.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.shared.cancel
    }
}

/// The platform's end of a [`TurnChannel`].
pub struct PlatformSide<O, L, I> {
    shared: Arc<Shared<O, L, I>>,
}

impl<O, L, I> Clone for PlatformSide<O, L, I> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<O, L, I> PlatformSide<O, L, I>
where
    O: Send,
    L: Send,
    I: Send,
{
    /// Wait for the next step, using the configured step deadline.
    pub async fn take(&self) -> Result<Step<O, L>, ChannelError> {
        self.take_within(self.shared.config.step()).await
    }

    /// Wait up to `timeout` for the next step.
    ///
    /// Returns [`ChannelError::Closed`] once the terminal step has been
    /// taken. Taking while the previous output is still unanswered would
    /// deadlock both sides and is rejected as a protocol violation.
    pub async fn take_within(&self, timeout: Option<Duration>) -> Result<Step<O, L>, ChannelError> {
        let taken = self
            .shared
            .wait_for(&self.shared.offered, timeout, true, |slot| match slot.phase {
                Phase::Offered => slot.take().map(Ok),
                Phase::Closed => Some(Err(ChannelError::Closed)),
                Phase::AwaitingReply => Some(Err(ChannelError::ProtocolViolation(
                    "the last output turn has not been answered".into(),
                ))),
                Phase::Idle | Phase::Answered => None,
            })
            .await
            .map_err(|interrupt| interrupt.into_error(Operation::Take, timeout))?;

        let step = taken?;
        self.after_take(&step);
        Ok(step)
    }

    /// Wait up to `timeout` for the terminal step, ignoring cancellation.
    ///
    /// Used after cancelling a session to collect its outcome. Output
    /// steps still in flight are discarded unanswered.
    pub async fn take_terminal(
        &self,
        timeout: Option<Duration>,
    ) -> Result<Step<O, L>, ChannelError> {
        loop {
            let taken = self
                .shared
                .wait_for(&self.shared.offered, timeout, false, |slot| match slot.phase {
                    Phase::Offered => slot.take().map(Ok),
                    Phase::Closed => Some(Err(ChannelError::Closed)),
                    Phase::Idle | Phase::AwaitingReply | Phase::Answered => None,
                })
                .await
                .map_err(|interrupt| interrupt.into_error(Operation::Take, timeout))?;

            let step = taken?;
            self.after_take(&step);
            if step.is_terminal() {
                return Ok(step);
            }
            tracing::debug!("parley.channel.output_discarded");
        }
    }

    /// Answer the output step taken last.
    ///
    /// Returns [`ChannelError::Abandoned`] when the dialogue stopped
    /// waiting (deadline, cancellation, or it moved on to a terminal step).
    pub fn answer(&self, reply: I) -> Result<(), ChannelError> {
        self.shared.with_slot(|slot| match slot.phase {
            Phase::AwaitingReply => {
                slot.reply = Some(reply);
                slot.phase = Phase::Answered;
                Ok(())
            }
            Phase::Answered => Err(ChannelError::ProtocolViolation(
                "the last output turn was already answered".into(),
            )),
            Phase::Idle | Phase::Offered | Phase::Closed => Err(ChannelError::Abandoned),
        })?;
        tracing::debug!("parley.channel.answered");
        self.shared.answered.notify_one();
        Ok(())
    }

    /// Whether the session has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.shared.cancel.is_cancelled()
    }

    fn after_take(&self, step: &Step<O, L>) {
        let kind: StepKind = step.kind();
        let seq = self.shared.lock().taken;
        tracing::debug!(seq, kind = %kind, "parley.channel.taken");
        self.shared.taken.notify_one();
    }
}
