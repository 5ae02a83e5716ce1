//! `MoveRoute` — an ordered command list with looping flags.

use crate::MoveCommand;

/// A scripted sequence of [`MoveCommand`]s.
///
/// Routes are replaced wholesale; nothing edits a route in place once it has
/// been handed to an interpreter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveRoute {
    pub list: Vec<MoveCommand>,
    /// Start over from the first command after the last one.
    pub repeat: bool,
    /// Skip commands that fail instead of retrying them.
    pub skippable: bool,
}

impl MoveRoute {
    /// A one-shot route that retries failed commands.
    pub fn new(list: Vec<MoveCommand>) -> Self {
        Self { list, repeat: false, skippable: false }
    }

    pub fn repeating(list: Vec<MoveCommand>) -> Self {
        Self { list, repeat: true, skippable: false }
    }

    pub fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn with_skippable(mut self, skippable: bool) -> Self {
        self.skippable = skippable;
        self
    }

    pub fn push(&mut self, command: MoveCommand) {
        self.list.push(command);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&MoveCommand> {
        self.list.get(index)
    }
}

impl FromIterator<MoveCommand> for MoveRoute {
    fn from_iter<I: IntoIterator<Item = MoveCommand>>(iter: I) -> Self {
        MoveRoute::new(iter.into_iter().collect())
    }
}
