use std::fmt;

use serde_derive::Deserialize;
use serde_derive::Serialize;

/// Role attached to a turn. The display strings double as the wire-level
/// role names the local prompt flattening relies on, so they stay lowercase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Author {
    User,
    Assistant,
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Author::User => return write!(f, "user"),
            Author::Assistant => return write!(f, "assistant"),
        }
    }
}
