#[cfg(test)]
#[path = "transcript_test.rs"]
mod tests;

use super::Message;

/// Append-only record of one session's conversation. Turns are never edited
/// or removed once pushed, and the whole thing dies with the process.
#[derive(Default)]
pub struct Transcript {
    turns: Vec<Message>,
}

impl Transcript {
    pub fn push(&mut self, turn: Message) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Message] {
        return &self.turns;
    }

    pub fn len(&self) -> usize {
        return self.turns.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.turns.is_empty();
    }
}
