//! Per-frame simulation step
//!
//! Core game loop that advances the simulation by one clamped delta.

use glam::Vec2;

use super::autopilot::run_autopilot;
use super::collision::{first_hit, out_of_bounds};
use super::spawn::{spawn_particles, spawn_target};
use super::state::{Color, GameState, SessionPhase, palette};
use super::weapon::poll_reload;
use crate::consts::MAX_LEVEL;

/// A bullet-target contact resolved during a step
#[derive(Debug, Clone)]
struct Impact {
    /// Bullet position at contact
    at: Vec2,
    target_pos: Vec2,
    target_radius: f32,
    color: Color,
    destroyed: bool,
}

/// Drive one animation frame from a monotonic clock reading (ms)
///
/// Polls the reload, lets the autopilot act, then steps by the time since
/// the previous frame. Returns false when the session is not running.
pub fn advance_frame(state: &mut GameState, now_ms: f64) -> bool {
    if !state.is_live() {
        return false;
    }

    poll_reload(state, now_ms);

    let dt = match state.last_frame_ms {
        Some(last) => (now_ms - last).max(0.0) as f32,
        None => 0.0,
    };
    state.last_frame_ms = Some(now_ms);

    if state.autopilot {
        run_autopilot(state, now_ms);
    }

    step(state, dt);
    true
}

/// Advance the game state by `dt_ms`, clamped to the configured maximum
pub fn step(state: &mut GameState, dt_ms: f32) {
    if state.phase != SessionPhase::Running {
        return;
    }

    let dt = if dt_ms.is_finite() {
        dt_ms.max(0.0).min(state.tuning.max_step_ms.max(0.0))
    } else {
        0.0
    };
    state.elapsed_ms += dt;

    advance_difficulty(state);
    advance_spawner(state, dt);
    advance_targets(state, dt);
    advance_bullets(state, dt);
    advance_particles(state, dt);

    if let Some(limit) = state.tuning.miss_limit {
        if state.misses >= limit {
            log::info!("Miss limit {} reached", limit);
            state.end();
        }
    }
}

/// Raise the difficulty tier once the session clock passes its threshold
pub fn advance_difficulty(state: &mut GameState) {
    let mut level = state.level;
    while level < MAX_LEVEL && state.elapsed_ms > state.tuning.tier(level + 1).starts_after_ms {
        level += 1;
    }
    if level != state.level {
        state.level = level;
        state.spawn_interval_ms = state.tuning.tier(level).spawn_interval_ms;
        log::info!(
            "Level {} at {:.1}s (spawn every {}ms)",
            level,
            state.elapsed_ms / 1000.0,
            state.spawn_interval_ms
        );
    }
}

/// Spawn a target once the timer reaches the interval
///
/// The timer resets to zero rather than carrying the overshoot.
pub fn advance_spawner(state: &mut GameState, dt: f32) {
    state.spawn_timer_ms += dt;
    if state.spawn_timer_ms >= state.spawn_interval_ms {
        state.spawn_timer_ms = 0.0;
        spawn_target(state);
    }
}

/// Move targets; anything past the bottom edge counts as a miss
pub fn advance_targets(state: &mut GameState, dt: f32) {
    let secs = dt / 1000.0;
    let height = state.height;
    let rate = state.tuning.wobble_rate;
    let amplitude = state.tuning.wobble_amplitude;

    let mut missed = 0u32;
    state.targets.retain_mut(|t| {
        t.pos.y += t.speed * secs;
        t.wobble += rate * secs;
        t.pos.x += t.wobble.sin() * amplitude * secs;
        if t.is_below(height) {
            missed += 1;
            false
        } else {
            true
        }
    });

    if missed > 0 {
        state.misses += missed;
        let penalty = state.tuning.miss_penalty * missed as u64;
        state.score = state.score.saturating_sub(penalty);
        log::debug!("{} target(s) missed, misses={} score={}", missed, state.misses, state.score);
    }
}

/// Move bullets, cull expired ones and resolve hits
pub fn advance_bullets(state: &mut GameState, dt: f32) {
    let secs = dt / 1000.0;
    let (width, height) = (state.width, state.height);
    let margin = state.tuning.bullet_margin;

    // Newest bullets resolve first; spent bullets are marked by zero life
    let mut impacts = Vec::new();
    let targets = &mut state.targets;
    for b in state.bullets.iter_mut().rev() {
        b.pos += b.vel * secs;
        b.life_ms -= dt;
        if b.life_ms <= 0.0 || out_of_bounds(b.pos, width, height, margin) {
            b.life_ms = 0.0;
            continue;
        }
        if let Some(i) = first_hit(b.pos, targets) {
            let t = &mut targets[i];
            t.health -= 1;
            impacts.push(Impact {
                at: b.pos,
                target_pos: t.pos,
                target_radius: t.radius,
                color: t.color,
                destroyed: t.health == 0,
            });
            b.life_ms = 0.0;
        }
    }
    state.bullets.retain(|b| b.life_ms > 0.0);

    if impacts.is_empty() {
        return;
    }

    let level = state.level;
    let impact_burst = state.tuning.impact_burst;
    let kill_burst = state.tuning.kill_burst;
    for impact in impacts {
        state.hits += 1;
        spawn_particles(state, impact.at, impact_burst, impact.color);
        if impact.destroyed {
            state.score += state.tuning.kill_points(level, impact.target_radius);
            spawn_particles(state, impact.target_pos, kill_burst, palette::EXPLOSION);
        } else {
            state.score += state.tuning.graze_points;
        }
    }
    state.targets.retain(|t| t.is_alive());
}

/// Drift, damp and expire particles
pub fn advance_particles(state: &mut GameState, dt: f32) {
    let secs = dt / 1000.0;
    let gravity = state.tuning.particle_gravity;
    let damping = state.tuning.particle_damping;
    state.particles.retain_mut(|p| {
        p.pos += p.vel * secs;
        p.pos.y += gravity * secs;
        p.vel *= damping;
        p.life_ms -= dt;
        p.life_ms > 0.0
    });
}
