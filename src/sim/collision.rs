//! Collision queries
//!
//! Bullets are points, targets are circles: a hit is plain circle
//! containment, no radius sum.

use glam::Vec2;

use super::state::Target;

/// Index of the target a point hits, if any
///
/// Scans newest-first (the target drawn on top wins) and skips targets
/// already destroyed earlier in the same step.
pub fn first_hit(point: Vec2, targets: &[Target]) -> Option<usize> {
    targets
        .iter()
        .enumerate()
        .rev()
        .find(|(_, t)| t.is_alive() && t.contains(point))
        .map(|(i, _)| i)
}

/// Whether a point has left the `[0, width] x [0, height]` box grown by `margin`
#[inline]
pub fn out_of_bounds(point: Vec2, width: f32, height: f32, margin: f32) -> bool {
    point.x < -margin || point.x > width + margin || point.y < -margin || point.y > height + margin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::palette;

    fn target(id: u32, x: f32, y: f32, r: f32, health: u32) -> Target {
        Target {
            id,
            pos: Vec2::new(x, y),
            radius: r,
            speed: 0.0,
            health,
            max_health: health.max(1),
            color: palette::EXPLOSION,
            wobble: 0.0,
        }
    }

    #[test]
    fn test_first_hit_none() {
        let targets = vec![target(1, 0.0, 0.0, 10.0, 1)];
        assert_eq!(first_hit(Vec2::new(50.0, 50.0), &targets), None);
    }

    #[test]
    fn test_first_hit_prefers_newest() {
        let targets = vec![target(1, 0.0, 0.0, 20.0, 1), target(2, 5.0, 0.0, 20.0, 1)];
        assert_eq!(first_hit(Vec2::new(2.0, 0.0), &targets), Some(1));
    }

    #[test]
    fn test_first_hit_skips_destroyed() {
        let targets = vec![target(1, 0.0, 0.0, 20.0, 1), target(2, 5.0, 0.0, 20.0, 0)];
        assert_eq!(first_hit(Vec2::new(2.0, 0.0), &targets), Some(0));
    }

    #[test]
    fn test_boundary_is_a_miss() {
        let targets = vec![target(1, 0.0, 0.0, 10.0, 1)];
        assert_eq!(first_hit(Vec2::new(10.0, 0.0), &targets), None);
        assert_eq!(first_hit(Vec2::new(9.99, 0.0), &targets), Some(0));
    }

    #[test]
    fn test_out_of_bounds_margin() {
        assert!(!out_of_bounds(Vec2::new(-19.0, 10.0), 800.0, 500.0, 20.0));
        assert!(out_of_bounds(Vec2::new(-21.0, 10.0), 800.0, 500.0, 20.0));
        assert!(out_of_bounds(Vec2::new(10.0, 521.0), 800.0, 500.0, 20.0));
        assert!(!out_of_bounds(Vec2::new(820.0, 520.0), 800.0, 500.0, 20.0));
    }
}
