//! The Dialogue protocol: what the application's interaction logic
//! implements.

use crate::error::{ChannelError, DialogueError};
use crate::id::SessionId;
use crate::turn::{InputTurn, LastTurn, OutputTurn};
use async_trait::async_trait;

/// The dialogue's view of the channel.
///
/// One method does the whole exchange: hand an output turn to the
/// platform and wait for the input turn that answers it. Deadlines come
/// from the executor's configuration.
#[async_trait]
pub trait TurnExchange<O: OutputTurn, I: InputTurn>: Send {
    /// Hand `turn` to the platform and wait for the answering input turn.
    ///
    /// Once this returns an error, every later call returns the same error
    /// without touching the channel. There is no retry.
    async fn do_turn(&mut self, turn: O) -> Result<I, ChannelError>;

    /// The session this dialogue runs in.
    fn session(&self) -> &SessionId;

    /// Whether the platform has asked for the session to stop.
    fn is_cancelled(&self) -> bool;
}

/// The application's turn-producing logic.
///
/// `run` receives the first input turn and a [`TurnExchange`], and returns
/// the last turn of the session:
///
/// - `Ok(Some(last))` is delivered as [`Step::Terminal`](crate::Step::Terminal),
/// - `Ok(None)` as [`Step::End`](crate::Step::End),
/// - `Err(_)` as [`Step::Failure`](crate::Step::Failure).
///
/// Panics are caught by the executor and also become a failure. The
/// dialogue author never has to deliver a terminal step by hand.
#[async_trait]
pub trait Dialogue: Send + Sync {
    /// Turns handed to the platform.
    type Output: OutputTurn;
    /// Turns received from the platform.
    type Input: InputTurn;
    /// The turn returned on normal completion.
    type Last: LastTurn;

    /// Run the dialogue to completion.
    async fn run(
        &self,
        first: Self::Input,
        context: &mut dyn TurnExchange<Self::Output, Self::Input>,
    ) -> Result<Option<Self::Last>, DialogueError>;
}
