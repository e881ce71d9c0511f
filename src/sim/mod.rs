//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only arrives as explicit deltas and clock readings
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod control;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod weapon;

pub use autopilot::{autopilot_command, run_autopilot};
pub use collision::{first_hit, out_of_bounds};
pub use control::{Command, apply_command, command_for_key, pointer_moved, pointer_pressed, pointer_released};
pub use session::SessionSummary;
pub use spawn::{make_bullet, spawn_particles, spawn_target};
pub use state::{Bullet, Color, GameState, Particle, Pointer, ReloadState, SessionPhase, Target, palette};
pub use tick::{advance_frame, step};
pub use weapon::{ShotOutcome, poll_reload, reload, reload_progress, shoot};
