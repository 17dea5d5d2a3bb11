pub mod actions;
mod app_state;
mod comparison;
pub mod events;

pub use app_state::*;
pub use comparison::*;
