//! Property tests for the simulation invariants

use std::collections::HashMap;

use ak407_shooter::Tuning;
use ak407_shooter::renderer::build_frame;
use ak407_shooter::sim::{
    Command, GameState, advance_frame, apply_command, poll_reload, reload, shoot, step,
};
use glam::Vec2;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Frame(f64),
    Fire(f32, f32),
    Reload,
    Pause,
    Restart,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0.0f64..40.0).prop_map(Op::Frame),
        4 => (0.0f32..800.0, 0.0f32..500.0).prop_map(|(x, y)| Op::Fire(x, y)),
        1 => Just(Op::Reload),
        1 => Just(Op::Pause),
        1 => Just(Op::Restart),
    ]
}

proptest! {
    #[test]
    fn ammo_stays_within_magazine(seed in any::<u64>(), ops in prop::collection::vec(op_strategy(), 1..300)) {
        let mut state = GameState::new(seed, Tuning::default());
        state.start(0.0);
        let mut now = 0.0;
        for op in ops {
            let before = state.ammo();
            match op {
                Op::Frame(dt) => {
                    now += dt;
                    advance_frame(&mut state, now);
                }
                Op::Fire(x, y) => {
                    let live = state.is_live();
                    poll_reload(&mut state, now);
                    let reloading = state.is_reloading();
                    let before = state.ammo();
                    apply_command(&mut state, Command::Fire { at: Vec2::new(x, y) }, now);
                    if live && !reloading && before > 0 {
                        prop_assert_eq!(state.ammo(), before - 1);
                    } else {
                        prop_assert_eq!(state.ammo(), before);
                    }
                }
                Op::Reload => {
                    apply_command(&mut state, Command::Reload, now);
                    prop_assert!(state.ammo() >= before);
                }
                Op::Pause => {
                    apply_command(&mut state, Command::TogglePause, now);
                }
                Op::Restart => {
                    apply_command(&mut state, Command::Start, now);
                    prop_assert_eq!(state.ammo(), state.mag_size());
                    prop_assert!(!state.is_reloading());
                }
            }
            prop_assert!(state.ammo() <= state.mag_size());
        }
    }

    #[test]
    fn health_never_increases_and_dead_targets_leave(
        seed in any::<u64>(),
        dts in prop::collection::vec(0.0f32..=40.0, 1..400),
        aims in prop::collection::vec((0.0f32..800.0, 0.0f32..400.0), 1..400),
    ) {
        let mut state = GameState::new(seed, Tuning::default());
        state.start(0.0);
        let mut now = 0.0;
        for (i, dt) in dts.iter().enumerate() {
            let (x, y) = aims[i % aims.len()];
            shoot(&mut state, Vec2::new(x, y), now);
            if state.ammo() == 0 {
                reload(&mut state, now);
            }
            poll_reload(&mut state, now);

            let before: HashMap<u32, u32> = state.targets.iter().map(|t| (t.id, t.health)).collect();
            step(&mut state, *dt);
            now += *dt as f64;

            for t in &state.targets {
                prop_assert!(t.health > 0);
                if let Some(h) = before.get(&t.id) {
                    prop_assert!(t.health <= *h);
                }
            }
        }
    }

    #[test]
    fn reload_always_refills(k in 0u32..30, start in 0.0f64..1e6) {
        let mut state = GameState::new(1, Tuning::default());
        state.start(start);
        state.ammo = k;
        prop_assert!(reload(&mut state, start));
        prop_assert!(state.is_reloading());
        prop_assert!(!reload(&mut state, start + 1.0));
        prop_assert!(!poll_reload(&mut state, start + 1_399.0));
        prop_assert!(poll_reload(&mut state, start + 1_400.0));
        prop_assert_eq!(state.ammo(), 30);
        prop_assert!(!state.is_reloading());
    }

    #[test]
    fn misses_at_zero_score_keep_score_zero(misses in 1usize..20) {
        let mut state = GameState::new(3, Tuning::default());
        state.start(0.0);
        for _ in 0..misses {
            let id = state.next_entity_id();
            state.targets.push(ak407_shooter::sim::Target {
                id,
                pos: Vec2::new(100.0, 600.0),
                radius: 20.0,
                speed: 0.0,
                health: 1,
                max_health: 1,
                color: ak407_shooter::sim::palette::EXPLOSION,
                wobble: 0.0,
            });
            step(&mut state, 1.0);
            prop_assert_eq!(state.score(), 0);
        }
        prop_assert_eq!(state.misses() as usize, misses);
    }

    #[test]
    fn rendering_does_not_depend_on_call_count(seed in any::<u64>(), frames in 0usize..200) {
        let mut state = GameState::new(seed, Tuning::default());
        state.autopilot = true;
        state.start(0.0);
        for i in 1..=frames {
            advance_frame(&mut state, i as f64 * 16.0);
        }
        let first = build_frame(&state);
        let second = build_frame(&state);
        prop_assert_eq!(first, second);
    }
}
