//! Terminal input for Terra.
//!
//! Translates `crossterm` key events into [`crate::types::Command`] and
//! offers a non-blocking poll that the frame loop calls once per tick.

pub mod map;

pub use terra_types as types;

pub use map::{map_event, map_key, poll_command};
