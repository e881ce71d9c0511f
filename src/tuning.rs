//! Data-driven game balance
//!
//! Every gameplay constant lives here so a page can override them with a
//! JSON blob. Defaults reproduce the classic AK407 feel.

use serde::{Deserialize, Serialize};

/// One difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierTuning {
    /// Session time (ms) that must be exceeded before this tier applies
    pub starts_after_ms: f32,
    /// Time between spawns (ms)
    pub spawn_interval_ms: f32,
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Weapon ===
    /// Rounds per magazine
    pub mag_size: u32,
    /// Reload duration (ms)
    pub reload_ms: f64,
    /// Bullet speed (px/s)
    pub bullet_speed: f32,
    /// Bullet lifetime (ms)
    pub bullet_life_ms: f32,
    /// Bullets are culled this far outside the canvas
    pub bullet_margin: f32,
    /// Weapon origin sits this far above the bottom edge
    pub gun_offset: f32,
    /// Empty-click puff sits this far above the bottom edge
    pub empty_click_offset: f32,
    /// Horizontal jitter of the muzzle puff
    pub muzzle_jitter: f32,

    // === Clock ===
    /// Upper bound on a single step (ms)
    pub max_step_ms: f32,

    // === Difficulty ===
    pub tiers: [TierTuning; 3],

    // === Targets ===
    pub target_radius_min: f32,
    pub target_radius_max: f32,
    /// Health is `ceil(radius / health_divisor)`
    pub health_divisor: f32,
    /// Speed range is `[base_min + L * per_level_min, base_max + L * per_level_max)`
    pub speed_base_min: f32,
    pub speed_per_level_min: f32,
    pub speed_base_max: f32,
    pub speed_per_level_max: f32,
    /// Wobble phase advance (rad/s)
    pub wobble_rate: f32,
    /// Horizontal wobble velocity amplitude (px/s)
    pub wobble_amplitude: f32,

    // === Scoring ===
    pub miss_penalty: u64,
    pub graze_points: u64,
    /// Ends the session once this many targets got through
    pub miss_limit: Option<u32>,

    // === Particles ===
    pub particle_speed_min: f32,
    pub particle_speed_max: f32,
    pub particle_life_min: f32,
    pub particle_life_max: f32,
    pub particle_size_min: f32,
    pub particle_size_max: f32,
    /// Constant downward drift (px/s)
    pub particle_gravity: f32,
    /// Velocity multiplier applied every step
    pub particle_damping: f32,
    /// Hard cap on live particles
    pub max_particles: usize,
    pub muzzle_burst: usize,
    pub empty_burst: usize,
    pub impact_burst: usize,
    pub kill_burst: usize,

    // === Autopilot ===
    /// Minimum time between autopilot shots (ms)
    pub autopilot_fire_interval_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            mag_size: 30,
            reload_ms: 1400.0,
            bullet_speed: 700.0,
            bullet_life_ms: 1200.0,
            bullet_margin: 20.0,
            gun_offset: 50.0,
            empty_click_offset: 70.0,
            muzzle_jitter: 8.0,

            max_step_ms: 40.0,

            tiers: [
                TierTuning {
                    starts_after_ms: 0.0,
                    spawn_interval_ms: 1500.0,
                },
                TierTuning {
                    starts_after_ms: 15_000.0,
                    spawn_interval_ms: 1200.0,
                },
                TierTuning {
                    starts_after_ms: 45_000.0,
                    spawn_interval_ms: 900.0,
                },
            ],

            target_radius_min: 18.0,
            target_radius_max: 36.0,
            health_divisor: 12.0,
            speed_base_min: 30.0,
            speed_per_level_min: 10.0,
            speed_base_max: 70.0,
            speed_per_level_max: 20.0,
            wobble_rate: 6.0,
            wobble_amplitude: 6.0,

            miss_penalty: 5,
            graze_points: 2,
            miss_limit: None,

            particle_speed_min: 40.0,
            particle_speed_max: 260.0,
            particle_life_min: 400.0,
            particle_life_max: 900.0,
            particle_size_min: 1.5,
            particle_size_max: 4.5,
            particle_gravity: 40.0,
            particle_damping: 0.98,
            max_particles: 1024,
            muzzle_burst: 8,
            empty_burst: 8,
            impact_burst: 12,
            kill_burst: 18,

            autopilot_fire_interval_ms: 180.0,
        }
    }
}

impl Tuning {
    /// Parse overrides; missing fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(json).map(Self::normalized)
    }

    /// Replace values the simulation cannot run with by their defaults
    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();
        let positive = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };

        if !(self.max_step_ms.is_finite() && self.max_step_ms >= 0.0) {
            log::warn!("max_step_ms {} is invalid, using {}", self.max_step_ms, defaults.max_step_ms);
            self.max_step_ms = defaults.max_step_ms;
        }
        if !(self.reload_ms.is_finite() && self.reload_ms >= 0.0) {
            self.reload_ms = defaults.reload_ms;
        }
        self.bullet_speed = positive(self.bullet_speed, defaults.bullet_speed);
        self.bullet_life_ms = positive(self.bullet_life_ms, defaults.bullet_life_ms);
        self.health_divisor = positive(self.health_divisor, defaults.health_divisor);
        if !(0.0..=1.0).contains(&self.particle_damping) {
            self.particle_damping = defaults.particle_damping;
        }
        self
    }

    /// Tier settings for a 1-based level (clamped)
    pub fn tier(&self, level: u8) -> &TierTuning {
        let idx = (level.max(1) as usize - 1).min(self.tiers.len() - 1);
        &self.tiers[idx]
    }

    /// Descent speed range for a level
    pub fn speed_range(&self, level: u8) -> (f32, f32) {
        let l = level as f32;
        (
            self.speed_base_min + l * self.speed_per_level_min,
            self.speed_base_max + l * self.speed_per_level_max,
        )
    }

    /// Points for destroying a target of radius `r` at `level`
    pub fn kill_points(&self, level: u8, r: f32) -> u64 {
        (10.0 * (1.0 + level as f32 * 0.5) + r / 5.0).round() as u64
    }

    /// Health for a freshly spawned target of radius `r`
    pub fn health_for_radius(&self, r: f32) -> u32 {
        ((r / self.health_divisor).ceil() as u32).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_roundtrip_through_partial_json() {
        let tuning = Tuning::from_json(r#"{ "mag_size": 12, "miss_limit": 3 }"#).unwrap();
        assert_eq!(tuning.mag_size, 12);
        assert_eq!(tuning.miss_limit, Some(3));
        assert_eq!(tuning.reload_ms, 1400.0);
        assert_eq!(tuning.tiers, Tuning::default().tiers);
    }

    #[test]
    fn test_unusable_values_fall_back_to_defaults() {
        let tuning = Tuning::from_json(
            r#"{ "max_step_ms": -1, "bullet_speed": 0, "particle_damping": 3, "mag_size": 5 }"#,
        )
        .unwrap();
        let defaults = Tuning::default();
        assert_eq!(tuning.max_step_ms, defaults.max_step_ms);
        assert_eq!(tuning.bullet_speed, defaults.bullet_speed);
        assert_eq!(tuning.particle_damping, defaults.particle_damping);
        assert_eq!(tuning.mag_size, 5);

        let zero_step = Tuning::from_json(r#"{ "max_step_ms": 0 }"#).unwrap();
        assert_eq!(zero_step.max_step_ms, 0.0);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Tuning::from_json("{ mag_size: ").is_err());
    }

    #[test]
    fn test_kill_points() {
        let t = Tuning::default();
        // 10 * 1.5 + 20 / 5 = 19
        assert_eq!(t.kill_points(1, 20.0), 19);
        // 10 * 2.5 + 36 / 5 = 32.2
        assert_eq!(t.kill_points(3, 36.0), 32);
    }

    #[test]
    fn test_health_for_radius() {
        let t = Tuning::default();
        assert_eq!(t.health_for_radius(18.0), 2);
        assert_eq!(t.health_for_radius(24.0), 2);
        assert_eq!(t.health_for_radius(35.9), 3);
        assert_eq!(t.health_for_radius(1.0), 1);
    }

    #[test]
    fn test_tier_lookup_clamps() {
        let t = Tuning::default();
        assert_eq!(t.tier(0).spawn_interval_ms, 1500.0);
        assert_eq!(t.tier(2).spawn_interval_ms, 1200.0);
        assert_eq!(t.tier(9).spawn_interval_ms, 900.0);
    }

    #[test]
    fn test_speed_range() {
        let t = Tuning::default();
        assert_eq!(t.speed_range(1), (40.0, 90.0));
        assert_eq!(t.speed_range(3), (60.0, 130.0));
    }
}
