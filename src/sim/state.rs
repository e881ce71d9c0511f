//! Game state and core simulation types
//!
//! Everything a frame needs lives in [`GameState`]; the free functions in
//! the sibling modules mutate it explicitly.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Before the first start
    Idle,
    /// Active gameplay
    Running,
    /// Frozen; no steps or renders until resumed
    Paused,
    /// Session over, waiting for an explicit restart
    Ended,
}

/// Magazine reload progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ReloadState {
    Ready,
    /// Completes once the clock passes `started_at_ms + reload_ms`
    Reloading { started_at_ms: f64 },
}

/// An sRGB color with alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build from hue (degrees), saturation and lightness (0-1)
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let hp = h.rem_euclid(360.0) / 60.0;
        let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
        let (r1, g1, b1) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgb(to_u8(r1), to_u8(g1), to_u8(b1))
    }

    /// Same color with alpha multiplied by `alpha`
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (self.a * alpha).clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS `rgba()` string
    pub fn css(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// Named colors used by the simulation
pub mod palette {
    use super::Color;

    pub const MUZZLE: Color = Color::rgb(255, 165, 0); // orange
    pub const EMPTY_CLICK: Color = Color::rgb(128, 128, 128); // gray
    pub const EXPLOSION: Color = Color::rgb(220, 80, 40);
}

/// A descending target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Descent speed (px/s)
    pub speed: f32,
    /// Remaining hits; the target is removed at zero
    pub health: u32,
    /// Health at spawn, for the health bar
    pub max_health: u32,
    pub color: Color,
    /// Phase of the horizontal wobble (radians)
    pub wobble: f32,
}

impl Target {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Bullets are points: a hit is center distance strictly below the radius
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        crate::distance(self.pos, point) < self.radius
    }

    /// True once the whole circle is below `height`
    #[inline]
    pub fn is_below(&self, height: f32) -> bool {
        self.pos.y - self.radius > height
    }

    /// Health fraction for the health bar
    pub fn health_fraction(&self) -> f32 {
        if self.max_health == 0 {
            0.0
        } else {
            self.health as f32 / self.max_health as f32
        }
    }
}

/// A fired projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    /// Velocity (px/s)
    pub vel: Vec2,
    /// Remaining lifetime (ms)
    pub life_ms: f32,
}

/// A decorative particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining lifetime (ms)
    pub life_ms: f32,
    pub size: f32,
    pub color: Color,
}

/// Last known pointer position (canvas coordinates)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pointer {
    pub pos: Vec2,
    pub down: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance constants
    pub tuning: Tuning,
    /// Seed the RNG was created from
    pub seed: u64,
    /// Spawn and particle randomness
    pub rng: Pcg32,
    /// Play area size (CSS pixels)
    pub width: f32,
    pub height: f32,
    pub phase: SessionPhase,
    pub score: u64,
    pub hits: u32,
    pub misses: u32,
    /// Simulated session time (ms)
    pub elapsed_ms: f32,
    /// Difficulty tier, 1..=MAX_LEVEL
    pub level: u8,
    pub spawn_interval_ms: f32,
    pub spawn_timer_ms: f32,
    pub ammo: u32,
    pub reload: ReloadState,
    pub pointer: Pointer,
    pub targets: Vec<Target>,
    pub bullets: Vec<Bullet>,
    pub particles: Vec<Particle>,
    /// Clock reading of the previous frame; `None` right after start/resume
    pub last_frame_ms: Option<f64>,
    /// Idle/demo mode: the autopilot plays
    pub autopilot: bool,
    pub autopilot_last_shot_ms: Option<f64>,
    next_id: u32,
}

impl GameState {
    /// Create an idle game with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let ammo = tuning.mag_size;
        let spawn_interval_ms = tuning.tier(1).spawn_interval_ms;
        Self {
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            phase: SessionPhase::Idle,
            score: 0,
            hits: 0,
            misses: 0,
            elapsed_ms: 0.0,
            level: 1,
            spawn_interval_ms,
            spawn_timer_ms: 0.0,
            ammo,
            reload: ReloadState::Ready,
            pointer: Pointer {
                pos: Vec2::new(DEFAULT_WIDTH / 2.0, DEFAULT_HEIGHT / 2.0),
                down: false,
            },
            targets: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            last_frame_ms: None,
            autopilot: false,
            autopilot_last_shot_ms: None,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Resize the play area; the pointer is re-clamped
    pub fn set_canvas_size(&mut self, width: f32, height: f32) {
        self.width = width.max(1.0);
        self.height = height.max(1.0);
        self.pointer.pos = self.clamp_to_canvas(self.pointer.pos);
    }

    pub fn clamp_to_canvas(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(0.0, self.width), p.y.clamp(0.0, self.height))
    }

    /// Where bullets leave the barrel
    pub fn weapon_origin(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height - self.tuning.gun_offset)
    }

    /// Where the empty-magazine puff appears
    pub fn empty_click_origin(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height - self.tuning.empty_click_offset)
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn mag_size(&self) -> u32 {
        self.tuning.mag_size
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_reloading(&self) -> bool {
        matches!(self.reload, ReloadState::Reloading { .. })
    }

    /// Running and not paused
    pub fn is_live(&self) -> bool {
        self.phase == SessionPhase::Running
    }
}
