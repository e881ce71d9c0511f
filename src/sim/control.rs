//! Input/Control
//!
//! Raw device input becomes a [`Command`]; commands are applied subject to
//! the session guards. Malformed input is dropped silently.

use glam::Vec2;

use super::state::GameState;
use super::weapon::{ShotOutcome, reload, shoot};

/// A player intent
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Fire { at: Vec2 },
    Reload,
    TogglePause,
    Start,
    ToggleAutopilot,
}

/// Map a `KeyboardEvent.key` value to a command
pub fn command_for_key(key: &str, pointer: Vec2) -> Option<Command> {
    match key {
        "r" | "R" => Some(Command::Reload),
        "p" | "P" => Some(Command::TogglePause),
        " " | "Spacebar" => Some(Command::Fire { at: pointer }),
        "i" | "I" => Some(Command::ToggleAutopilot),
        _ => None,
    }
}

/// Apply a command; returns the shot outcome for `Fire`
pub fn apply_command(state: &mut GameState, cmd: Command, now_ms: f64) -> Option<ShotOutcome> {
    match cmd {
        Command::Fire { at } => {
            let at = state.clamp_to_canvas(at);
            Some(shoot(state, at, now_ms))
        }
        Command::Reload => {
            reload(state, now_ms);
            None
        }
        Command::TogglePause => {
            state.toggle_pause(now_ms);
            None
        }
        Command::Start => {
            state.start(now_ms);
            None
        }
        Command::ToggleAutopilot => {
            state.autopilot = !state.autopilot;
            log::info!("Autopilot: {}", state.autopilot);
            None
        }
    }
}

/// Track the pointer, clamped to the canvas; non-finite coordinates are ignored
pub fn pointer_moved(state: &mut GameState, x: f32, y: f32) {
    if !x.is_finite() || !y.is_finite() {
        return;
    }
    state.pointer.pos = state.clamp_to_canvas(Vec2::new(x, y));
}

/// Pointer down: track it and fire while a session is live
pub fn pointer_pressed(state: &mut GameState, x: f32, y: f32, now_ms: f64) -> Option<ShotOutcome> {
    state.pointer.down = true;
    pointer_moved(state, x, y);
    if !state.is_live() {
        return None;
    }
    let at = state.pointer.pos;
    apply_command(state, Command::Fire { at }, now_ms)
}

pub fn pointer_released(state: &mut GameState) {
    state.pointer.down = false;
}
