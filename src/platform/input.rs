//! Keyboard and pointer mapping
//!
//! Turns raw key codes and clicks into game commands for the current run
//! state. The session validates every command again, so a stale mapping is
//! harmless.

use crate::sim::RunState;

/// Player-facing game commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Jump,
    PauseToggle,
    Start,
    Restart,
}

/// Map a `KeyboardEvent.code` to a command
pub fn command_for_key(code: &str, state: RunState) -> Option<Command> {
    match (code, state) {
        ("Space" | "ArrowUp", RunState::Running) => Some(Command::Jump),
        ("Space", RunState::NotStarted) => Some(Command::Start),
        ("Space", RunState::Ended) => Some(Command::Restart),
        // Space is the explicit "continue" after a pause
        ("Space", RunState::Paused) => Some(Command::PauseToggle),
        ("Escape" | "KeyP", RunState::Running | RunState::Paused) => Some(Command::PauseToggle),
        _ => None,
    }
}

/// Map a click/tap on the canvas to a command
pub fn command_for_pointer(state: RunState) -> Option<Command> {
    match state {
        RunState::Running => Some(Command::Jump),
        RunState::Paused => Some(Command::PauseToggle),
        RunState::NotStarted | RunState::Ended => None,
    }
}
