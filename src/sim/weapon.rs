//! Fire control and magazine reloads
//!
//! Reload completion is a timestamp check polled each frame (and before
//! every shot) instead of a deferred callback, so a restart can never be
//! hit by a stale completion.

use glam::Vec2;

use super::spawn::{make_bullet, spawn_particles};
use super::state::{GameState, ReloadState, palette};
use crate::rand_range;

/// What a trigger pull did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// A bullet left the barrel
    Fired,
    /// Magazine empty; only the click puff was emitted
    Empty,
    /// Not running, paused or reloading
    Blocked,
}

/// Fire one round from the weapon origin toward `aim`
pub fn shoot(state: &mut GameState, aim: Vec2, now_ms: f64) -> ShotOutcome {
    if !state.is_live() {
        return ShotOutcome::Blocked;
    }
    poll_reload(state, now_ms);
    if state.is_reloading() {
        return ShotOutcome::Blocked;
    }

    if state.ammo == 0 {
        let at = state.empty_click_origin();
        let count = state.tuning.empty_burst;
        spawn_particles(state, at, count, palette::EMPTY_CLICK);
        return ShotOutcome::Empty;
    }

    let origin = state.weapon_origin();
    let bullet = make_bullet(
        origin,
        aim,
        state.tuning.bullet_speed,
        state.tuning.bullet_life_ms,
    );
    state.bullets.push(bullet);

    let jitter = state.tuning.muzzle_jitter;
    let dx = rand_range(&mut state.rng, -jitter, jitter);
    let count = state.tuning.muzzle_burst;
    spawn_particles(state, origin + Vec2::new(dx, -8.0), count, palette::MUZZLE);

    state.ammo -= 1;
    ShotOutcome::Fired
}

/// Start a reload unless one is running or the magazine is full
///
/// Returns true when a reload was started.
pub fn reload(state: &mut GameState, now_ms: f64) -> bool {
    poll_reload(state, now_ms);
    if state.is_reloading() || state.ammo >= state.tuning.mag_size {
        return false;
    }
    state.reload = ReloadState::Reloading {
        started_at_ms: now_ms,
    };
    log::debug!("Reloading ({} rounds left)", state.ammo);
    true
}

/// Finish a pending reload once its delay has elapsed
///
/// Returns true on the call that completes it.
pub fn poll_reload(state: &mut GameState, now_ms: f64) -> bool {
    match state.reload {
        ReloadState::Reloading { started_at_ms } if now_ms >= started_at_ms + state.tuning.reload_ms => {
            state.ammo = state.tuning.mag_size;
            state.reload = ReloadState::Ready;
            log::debug!("Reload complete");
            true
        }
        _ => false,
    }
}

/// Reload progress in `[0, 1]`, `None` when not reloading
pub fn reload_progress(state: &GameState, now_ms: f64) -> Option<f32> {
    match state.reload {
        ReloadState::Reloading { started_at_ms } => {
            let t = (now_ms - started_at_ms) / state.tuning.reload_ms;
            Some(t.clamp(0.0, 1.0) as f32)
        }
        ReloadState::Ready => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::state::SessionPhase;

    fn running_state() -> GameState {
        let mut state = GameState::new(99, Tuning::default());
        state.start(0.0);
        state
    }

    #[test]
    fn test_shoot_consumes_one_round() {
        let mut state = running_state();
        assert_eq!(shoot(&mut state, Vec2::new(400.0, 0.0), 0.0), ShotOutcome::Fired);
        assert_eq!(state.ammo, 29);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos, state.weapon_origin());
        assert_eq!(state.particles.len(), 8);
    }

    #[test]
    fn test_shoot_blocked_when_not_running() {
        let mut state = GameState::new(99, Tuning::default());
        assert_eq!(shoot(&mut state, Vec2::ZERO, 0.0), ShotOutcome::Blocked);
        state.start(0.0);
        state.toggle_pause(0.0);
        assert_eq!(shoot(&mut state, Vec2::ZERO, 0.0), ShotOutcome::Blocked);
        assert_eq!(state.ammo, 30);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_shoot_empty_clicks() {
        let mut state = running_state();
        state.ammo = 0;
        assert_eq!(shoot(&mut state, Vec2::ZERO, 0.0), ShotOutcome::Empty);
        assert_eq!(state.ammo, 0);
        assert!(state.bullets.is_empty());
        assert_eq!(state.particles.len(), 8);
        assert!(state.particles.iter().all(|p| p.color == palette::EMPTY_CLICK));
        assert!(state.particles.iter().all(|p| p.pos == state.empty_click_origin()));
    }

    #[test]
    fn test_shoot_blocked_while_reloading() {
        let mut state = running_state();
        state.ammo = 3;
        assert!(reload(&mut state, 100.0));
        assert_eq!(shoot(&mut state, Vec2::ZERO, 200.0), ShotOutcome::Blocked);
        assert_eq!(state.ammo, 3);
        // Once the delay has passed the shot goes through
        assert_eq!(shoot(&mut state, Vec2::ZERO, 1500.0), ShotOutcome::Fired);
        assert_eq!(state.ammo, 29);
    }

    #[test]
    fn test_reload_cycle() {
        let mut state = running_state();
        state.ammo = 7;
        assert!(reload(&mut state, 1000.0));
        assert!(state.is_reloading());
        assert!(!poll_reload(&mut state, 2399.0));
        assert_eq!(state.ammo, 7);
        assert!(poll_reload(&mut state, 2400.0));
        assert_eq!(state.ammo, 30);
        assert!(!state.is_reloading());
    }

    #[test]
    fn test_reload_while_reloading_is_noop() {
        let mut state = running_state();
        state.ammo = 0;
        assert!(reload(&mut state, 0.0));
        assert!(!reload(&mut state, 700.0));
        assert_eq!(
            state.reload,
            ReloadState::Reloading { started_at_ms: 0.0 }
        );
    }

    #[test]
    fn test_reload_full_magazine_is_noop() {
        let mut state = running_state();
        assert!(!reload(&mut state, 0.0));
        assert!(!state.is_reloading());
    }

    #[test]
    fn test_restart_discards_pending_reload() {
        let mut state = running_state();
        state.ammo = 4;
        reload(&mut state, 0.0);
        state.end();
        assert_eq!(state.phase, SessionPhase::Ended);
        state.start(500.0);
        assert!(!state.is_reloading());
        assert_eq!(state.ammo, 30);
        assert!(!poll_reload(&mut state, 5000.0));
    }

    #[test]
    fn test_reload_progress() {
        let mut state = running_state();
        assert_eq!(reload_progress(&state, 0.0), None);
        state.ammo = 1;
        reload(&mut state, 0.0);
        assert_eq!(reload_progress(&state, 700.0), Some(0.5));
        assert_eq!(reload_progress(&state, 9000.0), Some(1.0));
    }
}
