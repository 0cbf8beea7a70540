//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Commands are
//! applied the moment the key event arrives; auto-repeat comes from the
//! terminal itself, so there is no DAS/ARR timing here.

pub mod map;

pub use blockdrop_types as types;

pub use map::{handle_key_event, is_actionable, should_quit};
