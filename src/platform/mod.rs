//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key and pointer mapping)
//! - Animation-frame scheduling (`requestAnimationFrame` on web)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{Command, command_for_key, command_for_pointer};
