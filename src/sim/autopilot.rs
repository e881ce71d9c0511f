//! Idle/demo mode - the game plays itself
//!
//! Aims at the target closest to the bottom edge, leading it by its descent
//! over the bullet flight time, and reloads when the magazine runs dry.

use glam::Vec2;

use super::control::{Command, apply_command};
use super::state::GameState;

/// What the autopilot would do this frame
pub fn autopilot_command(state: &GameState, now_ms: f64) -> Option<Command> {
    if !state.is_live() || state.is_reloading() {
        return None;
    }
    if state.ammo == 0 {
        return Some(Command::Reload);
    }
    if let Some(last) = state.autopilot_last_shot_ms {
        if now_ms - last < state.tuning.autopilot_fire_interval_ms {
            return None;
        }
    }

    let origin = state.weapon_origin();
    let target = state
        .targets
        .iter()
        .filter(|t| t.is_alive() && t.pos.y + t.radius > 0.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))?;

    let flight_secs = origin.distance(target.pos) / state.tuning.bullet_speed;
    let at = target.pos + Vec2::new(0.0, target.speed * flight_secs);
    Some(Command::Fire { at })
}

/// Let the autopilot act; returns the command it issued
pub fn run_autopilot(state: &mut GameState, now_ms: f64) -> Option<Command> {
    let cmd = autopilot_command(state, now_ms)?;
    if let Command::Fire { at } = cmd {
        state.pointer.pos = state.clamp_to_canvas(at);
        state.autopilot_last_shot_ms = Some(now_ms);
    }
    apply_command(state, cmd, now_ms);
    Some(cmd)
}
