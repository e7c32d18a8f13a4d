//! The [`TurnExchange`] handed to dialogue logic.

use async_trait::async_trait;
use parley_channel::DialogueSide;
use parley_protocol::{ChannelError, InputTurn, LastTurn, OutputTurn, SessionId, TurnExchange};

/// A dialogue's connection to its platform for the length of one session.
///
/// The first channel error is latched: every later [`do_turn`] returns it
/// again without touching the channel, and the executor turns it into the
/// session's failure even if the dialogue chose to ignore it.
///
/// [`do_turn`]: TurnExchange::do_turn
pub struct DialogueContext<O, L, I> {
    session: SessionId,
    side: DialogueSide<O, L, I>,
    latched: Option<ChannelError>,
    turns: u64,
}

impl<O, L, I> DialogueContext<O, L, I> {
    pub(crate) fn new(session: SessionId, side: DialogueSide<O, L, I>) -> Self {
        Self {
            session,
            side,
            latched: None,
            turns: 0,
        }
    }

    /// The channel error that ended the exchange, if any.
    pub fn latched_error(&self) -> Option<&ChannelError> {
        self.latched.as_ref()
    }

    /// Output turns answered so far.
    pub fn turns(&self) -> u64 {
        self.turns
    }
}

#[async_trait]
impl<O, L, I> TurnExchange<O, I> for DialogueContext<O, L, I>
where
    O: OutputTurn,
    L: LastTurn,
    I: InputTurn,
{
    async fn do_turn(&mut self, turn: O) -> Result<I, ChannelError> {
        if let Some(err) = &self.latched {
            return Err(err.clone());
        }

        tracing::debug!(turn = turn.name(), "parley.dialogue.turn");
        match self.side.exchange(turn).await {
            Ok(input) => {
                self.turns += 1;
                Ok(input)
            }
            Err(err) => {
                tracing::debug!(error = %err, turns = self.turns, "parley.dialogue.latched");
                self.latched = Some(err.clone());
                Err(err)
            }
        }
    }

    fn session(&self) -> &SessionId {
        &self.session
    }

    fn is_cancelled(&self) -> bool {
        self.side.is_cancelled()
    }
}
