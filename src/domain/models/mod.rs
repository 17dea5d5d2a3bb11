mod action;
mod author;
mod backend;
mod event;
mod message;
mod transcript;

pub use action::*;
pub use author::*;
pub use backend::*;
pub use event::*;
pub use message::*;
pub use transcript::*;
