//! Plain-text turn types.

use crate::turn::{InputTurn, LastTurn, OutputTurn};

/// An output turn that is just a prompt string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextOutput(pub String);

/// An input turn that is just an answer string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextInput(pub String);

/// A last turn that is just a result string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextLast(pub String);

impl TextOutput {
    /// Create from anything that converts to String.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl TextInput {
    /// Create from anything that converts to String.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl TextLast {
    /// Create from anything that converts to String.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl OutputTurn for TextOutput {
    fn name(&self) -> &str {
        &self.0
    }
}

impl InputTurn for TextInput {}

impl LastTurn for TextLast {
    fn name(&self) -> &str {
        &self.0
    }
}
