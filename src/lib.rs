//! AK407 Shooter - a canvas arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, collisions, scoring)
//! - `renderer`: Display list generation and the canvas 2D backend
//! - `tuning`: Data-driven game balance

pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Default play area (CSS pixels) before the first resize
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 500.0;

    /// Highest difficulty tier
    pub const MAX_LEVEL: u8 = 3;

    /// Nominal frame length used by the headless runner (ms)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}

/// Uniform sample from `[min, max)`; returns `min` for an empty range
#[inline]
pub fn rand_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}
