//! Display list generation for 2D primitives
//!
//! `build_frame` reads the game state and emits an ordered list of draw
//! commands. It never mutates state, so identical states produce identical
//! lists.

use glam::Vec2;

use crate::sim::reload_progress;
use crate::sim::state::{Bullet, Color, GameState, Particle, Pointer, SessionPhase, Target};

/// One drawing operation, in canvas (CSS pixel) coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear { size: Vec2 },
    FillRect { pos: Vec2, size: Vec2, color: Color },
    /// Linear gradient from the top edge to the bottom edge of the rect
    VerticalGradient {
        pos: Vec2,
        size: Vec2,
        top: Color,
        bottom: Color,
    },
    FillCircle { center: Vec2, radius: f32, color: Color },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Color,
    },
    FillEllipse { center: Vec2, radii: Vec2, color: Color },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    FillRoundRect {
        pos: Vec2,
        size: Vec2,
        radius: f32,
        color: Color,
    },
    /// Save the context, then translate and rotate
    PushTransform { translate: Vec2, rotate: f32 },
    PopTransform,
}

/// Colors for game elements
pub mod colors {
    use crate::sim::state::Color;

    pub const BACKGROUND: Color = Color::rgb(0xf7, 0xff, 0xf8);
    pub const SKY_TOP: Color = Color::rgb(0xea, 0xfa, 0xf1);
    pub const SKY_BOTTOM: Color = Color::rgb(0xf8, 0xff, 0xf9);
    pub const SHADOW: Color = Color::rgba(0, 0, 0, 0.12);
    pub const HIGHLIGHT: Color = Color::rgba(255, 255, 255, 0.18);
    pub const BAR_TRACK: Color = Color::rgba(0, 0, 0, 0.18);
    pub const BAR_FILL: Color = Color::rgba(11, 114, 59, 0.9);
    pub const BULLET: Color = Color::rgb(0x22, 0x22, 0x22);
    pub const RETICLE: Color = Color::rgba(11, 114, 59, 0.85);

    pub const BARREL: Color = Color::rgb(0x11, 0x11, 0x11);
    pub const BARREL_TIP: Color = Color::rgb(0x22, 0x22, 0x22);
    pub const RECEIVER: Color = Color::rgb(0x2b, 0x2b, 0x2b);
    pub const MAGAZINE: Color = Color::rgb(0x0b, 0x72, 0x3b);
    pub const STOCK: Color = Color::rgb(0x1b, 0x1b, 0x1b);
    pub const SIGHTS: Color = Color::rgb(0xf3, 0xf4, 0xf6);
}

/// Health bar geometry
const BAR_HEIGHT: f32 = 6.0;
const BAR_GAP: f32 = 14.0;
/// Bullet streak length, in seconds of travel
const BULLET_STREAK_SECS: f32 = 0.008;
/// Reload gauge geometry, below the weapon origin
const GAUGE_WIDTH: f32 = 60.0;
const GAUGE_HEIGHT: f32 = 4.0;
const GAUGE_DROP: f32 = 22.0;
/// Reticle ring radius, tightened while the trigger is held
const RETICLE_RADIUS: f32 = 10.0;
const RETICLE_RADIUS_HELD: f32 = 7.0;

/// Build the full frame for the current state
pub fn build_frame(state: &GameState) -> Vec<DrawCmd> {
    let mut cmds = Vec::with_capacity(
        8 + state.targets.len() * 5 + state.bullets.len() + state.particles.len() + 16,
    );
    let size = Vec2::new(state.width, state.height);

    background(&mut cmds, size);
    for t in &state.targets {
        target(&mut cmds, t);
    }
    for b in &state.bullets {
        bullet(&mut cmds, b);
    }
    let life_max = state.tuning.particle_life_max;
    for p in &state.particles {
        particle(&mut cmds, p, life_max);
    }
    gun(&mut cmds, state);
    reload_gauge(&mut cmds, state);
    reticle(&mut cmds, &state.pointer);

    cmds
}

/// Whether the frontend should draw after a command applied in `before`
///
/// Paused and ended sessions keep their last frame unless the command moved
/// the session to another phase.
pub fn frame_needed(before: SessionPhase, state: &GameState) -> bool {
    state.is_live() || state.phase() != before
}

fn background(cmds: &mut Vec<DrawCmd>, size: Vec2) {
    cmds.push(DrawCmd::Clear { size });
    cmds.push(DrawCmd::FillRect {
        pos: Vec2::ZERO,
        size,
        color: colors::BACKGROUND,
    });
    cmds.push(DrawCmd::VerticalGradient {
        pos: Vec2::ZERO,
        size,
        top: colors::SKY_TOP,
        bottom: colors::SKY_BOTTOM,
    });
}

/// Shadow, body, highlight and health bar
fn target(cmds: &mut Vec<DrawCmd>, t: &Target) {
    let r = t.radius;
    cmds.push(DrawCmd::FillEllipse {
        center: t.pos + Vec2::new(6.0, r + 8.0),
        radii: Vec2::new(r * 0.9, r * 0.35),
        color: colors::SHADOW,
    });
    cmds.push(DrawCmd::FillCircle {
        center: t.pos,
        radius: r,
        color: t.color,
    });
    cmds.push(DrawCmd::FillCircle {
        center: t.pos + Vec2::new(-r * 0.2, -r * 0.3),
        radius: r * 0.45,
        color: colors::HIGHLIGHT,
    });

    let bar_w = r * 1.6;
    let bar_pos = Vec2::new(t.pos.x - bar_w / 2.0, t.pos.y - r - BAR_GAP);
    cmds.push(DrawCmd::FillRect {
        pos: bar_pos,
        size: Vec2::new(bar_w, BAR_HEIGHT),
        color: colors::BAR_TRACK,
    });
    cmds.push(DrawCmd::FillRect {
        pos: bar_pos,
        size: Vec2::new(bar_w * t.health_fraction().max(0.0), BAR_HEIGHT),
        color: colors::BAR_FILL,
    });
}

fn bullet(cmds: &mut Vec<DrawCmd>, b: &Bullet) {
    cmds.push(DrawCmd::Line {
        from: b.pos - b.vel * BULLET_STREAK_SECS,
        to: b.pos,
        width: 2.0,
        color: colors::BULLET,
    });
}

fn particle(cmds: &mut Vec<DrawCmd>, p: &Particle, life_max: f32) {
    let alpha = if life_max > 0.0 {
        (p.life_ms / life_max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    cmds.push(DrawCmd::FillCircle {
        center: p.pos,
        radius: p.size,
        color: p.color.with_alpha(alpha),
    });
}

/// Rifle at the weapon origin, rotated toward the pointer, kicked back by recoil
fn gun(cmds: &mut Vec<DrawCmd>, state: &GameState) {
    let origin = state.weapon_origin();
    let aim = state.pointer.pos - origin;
    let angle = aim.y.atan2(aim.x);
    let mag = state.tuning.mag_size;
    let recoil = if state.ammo < mag {
        ((mag - state.ammo) as f32 * 0.12).min(8.0)
    } else {
        0.0
    };
    let barrel_kick = recoil * 0.4;
    let body_kick = recoil * 0.6;

    cmds.push(DrawCmd::PushTransform {
        translate: origin,
        rotate: angle,
    });
    let rect = |x: f32, y: f32, w: f32, h: f32, color: Color| DrawCmd::FillRect {
        pos: Vec2::new(x, y),
        size: Vec2::new(w, h),
        color,
    };
    let round = |x: f32, y: f32, w: f32, h: f32, radius: f32, color: Color| {
        DrawCmd::FillRoundRect {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            radius,
            color,
        }
    };
    cmds.extend([
        rect(8.0, -6.0 - barrel_kick, 120.0, 12.0, colors::BARREL),
        rect(120.0, -7.0 - barrel_kick, 18.0, 14.0, colors::BARREL_TIP),
        round(-36.0, -18.0 - body_kick, 90.0, 36.0, 8.0, colors::RECEIVER),
        rect(-12.0, 6.0 - body_kick, 18.0, 40.0, colors::MAGAZINE),
        round(-92.0, -10.0 - body_kick, 56.0, 20.0, 6.0, colors::STOCK),
        rect(32.0, -12.0 - barrel_kick, 6.0, 6.0, colors::SIGHTS),
        rect(12.0, -14.0 - barrel_kick, 4.0, 10.0, colors::SIGHTS),
    ]);
    cmds.push(DrawCmd::PopTransform);
}

/// Progress bar under the weapon, measured at the last frame time
fn reload_gauge(cmds: &mut Vec<DrawCmd>, state: &GameState) {
    let Some(now) = state.last_frame_ms else {
        return;
    };
    let Some(progress) = reload_progress(state, now) else {
        return;
    };
    let pos = state.weapon_origin() + Vec2::new(-GAUGE_WIDTH / 2.0, GAUGE_DROP);
    cmds.push(DrawCmd::FillRect {
        pos,
        size: Vec2::new(GAUGE_WIDTH, GAUGE_HEIGHT),
        color: colors::BAR_TRACK,
    });
    cmds.push(DrawCmd::FillRect {
        pos,
        size: Vec2::new(GAUGE_WIDTH * progress, GAUGE_HEIGHT),
        color: colors::BAR_FILL,
    });
}

fn reticle(cmds: &mut Vec<DrawCmd>, pointer: &Pointer) {
    let at = pointer.pos;
    cmds.push(DrawCmd::StrokeCircle {
        center: at,
        radius: if pointer.down { RETICLE_RADIUS_HELD } else { RETICLE_RADIUS },
        width: 2.0,
        color: colors::RETICLE,
    });
    cmds.push(DrawCmd::Line {
        from: at - Vec2::new(16.0, 0.0),
        to: at + Vec2::new(16.0, 0.0),
        width: 2.0,
        color: colors::RETICLE,
    });
    cmds.push(DrawCmd::Line {
        from: at - Vec2::new(0.0, 16.0),
        to: at + Vec2::new(0.0, 16.0),
        width: 2.0,
        color: colors::RETICLE,
    });
}
