//! Entity factories
//!
//! Targets, bullets and particle bursts with randomized attributes drawn
//! from the state's seeded RNG.

use glam::Vec2;
use std::f32::consts::TAU;

use super::state::{Bullet, Color, GameState, Particle, Target};
use crate::rand_range;

/// Spawn one target just above the visible area
pub fn spawn_target(state: &mut GameState) -> u32 {
    let t = &state.tuning;
    let (r_min, r_max) = (t.target_radius_min, t.target_radius_max);
    let (speed_min, speed_max) = t.speed_range(state.level);

    let radius = rand_range(&mut state.rng, r_min, r_max);
    let x = rand_range(&mut state.rng, radius, state.width - radius);
    let speed = rand_range(&mut state.rng, speed_min, speed_max);
    let health = state.tuning.health_for_radius(radius);
    // Warm tones
    let hue = rand_range(&mut state.rng, 0.0, 60.0);
    let lightness = rand_range(&mut state.rng, 0.40, 0.55);
    let wobble = rand_range(&mut state.rng, 0.0, TAU);

    let id = state.next_entity_id();
    state.targets.push(Target {
        id,
        pos: Vec2::new(x, -radius),
        radius,
        speed,
        health,
        max_health: health,
        color: Color::from_hsl(hue, 0.7, lightness),
        wobble,
    });
    log::trace!("Spawned target {} r={:.1} speed={:.1} hp={}", id, radius, speed, health);
    id
}

/// A bullet travelling from `from` toward `toward` at `speed`
///
/// Aiming at the muzzle itself fires straight right, matching `atan2(0, 0)`.
pub fn make_bullet(from: Vec2, toward: Vec2, speed: f32, life_ms: f32) -> Bullet {
    let d = toward - from;
    let angle = d.y.atan2(d.x);
    Bullet {
        pos: from,
        vel: Vec2::new(angle.cos(), angle.sin()) * speed,
        life_ms,
    }
}

/// Emit `count` particles radiating from `pos`
///
/// Bursts are truncated once the live particle cap is reached.
pub fn spawn_particles(state: &mut GameState, pos: Vec2, count: usize, color: Color) {
    let room = state
        .tuning
        .max_particles
        .saturating_sub(state.particles.len());
    let t = &state.tuning;
    let (s_min, s_max) = (t.particle_speed_min, t.particle_speed_max);
    let (l_min, l_max) = (t.particle_life_min, t.particle_life_max);
    let (z_min, z_max) = (t.particle_size_min, t.particle_size_max);

    for _ in 0..count.min(room) {
        let a = rand_range(&mut state.rng, 0.0, TAU);
        let s = rand_range(&mut state.rng, s_min, s_max);
        let life_ms = rand_range(&mut state.rng, l_min, l_max);
        let size = rand_range(&mut state.rng, z_min, z_max);
        state.particles.push(Particle {
            pos,
            vel: Vec2::new(a.cos(), a.sin()) * s,
            life_ms,
            size,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::state::palette;

    #[test]
    fn test_spawn_target_attributes() {
        let mut state = GameState::new(42, Tuning::default());
        for _ in 0..200 {
            spawn_target(&mut state);
        }
        for t in &state.targets {
            assert!((18.0..36.0).contains(&t.radius));
            assert!(t.pos.x >= t.radius && t.pos.x <= state.width - t.radius);
            assert_eq!(t.pos.y, -t.radius);
            assert!((40.0..90.0).contains(&t.speed));
            assert_eq!(t.health, (t.radius / 12.0).ceil() as u32);
            assert_eq!(t.health, t.max_health);
        }
    }

    #[test]
    fn test_spawn_target_speed_scales_with_level() {
        let mut state = GameState::new(42, Tuning::default());
        state.level = 3;
        for _ in 0..100 {
            spawn_target(&mut state);
        }
        assert!(state.targets.iter().all(|t| (60.0..130.0).contains(&t.speed)));
    }

    #[test]
    fn test_make_bullet_direction() {
        let b = make_bullet(Vec2::new(400.0, 450.0), Vec2::new(400.0, 50.0), 700.0, 1200.0);
        assert!(b.vel.x.abs() < 1e-3);
        assert!((b.vel.y + 700.0).abs() < 1e-3);
        assert!((b.vel.length() - 700.0).abs() < 1e-2);
    }

    #[test]
    fn test_make_bullet_degenerate_aim() {
        let p = Vec2::new(10.0, 10.0);
        let b = make_bullet(p, p, 700.0, 1200.0);
        assert!((b.vel.x - 700.0).abs() < 1e-3);
    }

    #[test]
    fn test_particle_burst_ranges() {
        let mut state = GameState::new(3, Tuning::default());
        spawn_particles(&mut state, Vec2::new(5.0, 5.0), 50, palette::EXPLOSION);
        assert_eq!(state.particles.len(), 50);
        for p in &state.particles {
            let s = p.vel.length();
            assert!(s >= 39.9 && s < 260.1);
            assert!((400.0..900.0).contains(&p.life_ms));
            assert!((1.5..4.5).contains(&p.size));
        }
    }

    #[test]
    fn test_particle_cap() {
        let tuning = Tuning {
            max_particles: 10,
            ..Tuning::default()
        };
        let mut state = GameState::new(3, tuning);
        spawn_particles(&mut state, Vec2::ZERO, 8, palette::MUZZLE);
        spawn_particles(&mut state, Vec2::ZERO, 8, palette::MUZZLE);
        assert_eq!(state.particles.len(), 10);
    }
}
