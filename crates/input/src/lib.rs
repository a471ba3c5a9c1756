//! Terminal input module (engine-facing).
//!
//! Independent of any UI framework. It maps `crossterm` key events into
//! [`crate::types::GameAction`] and tracks held keys so a frame loop can keep
//! feeding movement to the engine while a key stays down (including terminals
//! without key-release events).

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::{HorizontalDirection, InputHandler};
pub use map::{action_for_code, handle_key_event, should_quit};
