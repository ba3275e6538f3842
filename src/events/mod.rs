//! Input handling: actions and the keyboard handler that produces them.

mod action;
mod keyboard;

pub use action::Action;
pub use keyboard::handle_key_event;
