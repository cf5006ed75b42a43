//! Append-only record of a session's exchanges.

mod message;

pub use message::{Turn, TurnRole};

use serde::Serialize;

/// Chronological sequence of turns.
///
/// Turns are only ever added as a user/assistant pair and only ever removed
/// all at once.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user turn followed by its assistant reply.
    pub fn append_exchange(&mut self, user: Turn, assistant: Turn) {
        debug_assert_eq!(user.role(), TurnRole::User);
        debug_assert_eq!(assistant.role(), TurnRole::Assistant);
        self.turns.reserve(2);
        self.turns.push(user);
        self.turns.push(assistant);
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
