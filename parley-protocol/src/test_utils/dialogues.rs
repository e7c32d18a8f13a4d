//! Dialogues with canned behavior.

use super::text_turn::{TextInput, TextLast, TextOutput};
use crate::dialogue::{Dialogue, TurnExchange};
use crate::error::DialogueError;
use async_trait::async_trait;
use std::time::Duration;

/// Plays a fixed list of prompts, then ends.
///
/// With a last turn configured, the dialogue returns a [`TextLast`] whose
/// text is the answers joined by `|`. Without one it returns `None`, which
/// the executor delivers as `End`.
pub struct ScriptedDialogue {
    prompts: Vec<String>,
    finish_with_last: bool,
}

impl ScriptedDialogue {
    /// Play `prompts` in order and finish with a last turn.
    pub fn new<S: Into<String>>(prompts: impl IntoIterator<Item = S>) -> Self {
        Self {
            prompts: prompts.into_iter().map(Into::into).collect(),
            finish_with_last: true,
        }
    }

    /// Finish without a last turn.
    pub fn without_last(mut self) -> Self {
        self.finish_with_last = false;
        self
    }
}

#[async_trait]
impl Dialogue for ScriptedDialogue {
    type Output = TextOutput;
    type Input = TextInput;
    type Last = TextLast;

    async fn run(
        &self,
        _first: TextInput,
        context: &mut dyn TurnExchange<TextOutput, TextInput>,
    ) -> Result<Option<TextLast>, DialogueError> {
        let mut answers = Vec::with_capacity(self.prompts.len());
        for prompt in &self.prompts {
            let answer = context.do_turn(TextOutput::new(prompt.clone())).await?;
            answers.push(answer.0);
        }
        Ok(self
            .finish_with_last
            .then(|| TextLast::new(answers.join("|"))))
    }
}

/// Completes `turns` exchanges, then returns an error.
pub struct FailingDialogue {
    turns: usize,
    message: String,
}

impl FailingDialogue {
    /// Fail with `message` after `turns` exchanges.
    pub fn new(turns: usize, message: impl Into<String>) -> Self {
        Self {
            turns,
            message: message.into(),
        }
    }
}

#[async_trait]
impl Dialogue for FailingDialogue {
    type Output = TextOutput;
    type Input = TextInput;
    type Last = TextLast;

    async fn run(
        &self,
        _first: TextInput,
        context: &mut dyn TurnExchange<TextOutput, TextInput>,
    ) -> Result<Option<TextLast>, DialogueError> {
        for n in 0..self.turns {
            context.do_turn(TextOutput::new(format!("turn-{n}"))).await?;
        }
        Err(DialogueError::Failed(self.message.clone()))
    }
}

/// Completes `turns` exchanges, then panics.
pub struct PanickingDialogue {
    turns: usize,
}

impl PanickingDialogue {
    /// Panic after `turns` exchanges.
    pub fn new(turns: usize) -> Self {
        Self { turns }
    }
}

#[async_trait]
impl Dialogue for PanickingDialogue {
    type Output = TextOutput;
    type Input = TextInput;
    type Last = TextLast;

    async fn run(
        &self,
        _first: TextInput,
        context: &mut dyn TurnExchange<TextOutput, TextInput>,
    ) -> Result<Option<TextLast>, DialogueError> {
        for n in 0..self.turns {
            context.do_turn(TextOutput::new(format!("turn-{n}"))).await?;
        }
        panic!("dialogue bug after {} turns", self.turns);
    }
}

/// Sleeps without touching the channel, ignoring cancellation.
pub struct StallingDialogue {
    stall: Duration,
}

impl StallingDialogue {
    /// Stall for `stall` before ending.
    pub fn new(stall: Duration) -> Self {
        Self { stall }
    }
}

#[async_trait]
impl Dialogue for StallingDialogue {
    type Output = TextOutput;
    type Input = TextInput;
    type Last = TextLast;

    async fn run(
        &self,
        _first: TextInput,
        _context: &mut dyn TurnExchange<TextOutput, TextInput>,
    ) -> Result<Option<TextLast>, DialogueError> {
        tokio::time::sleep(self.stall).await;
        Ok(Some(TextLast::new("stalled")))
    }
}
