//! Session lifecycle: Idle -> Running <-> Paused -> Ended

use serde::{Deserialize, Serialize};

use super::state::{GameState, ReloadState, SessionPhase};

/// End-of-session numbers shown on the game over overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: u64,
    pub hits: u32,
    pub misses: u32,
    pub level: u8,
    pub elapsed_ms: f32,
}

impl GameState {
    /// Begin a fresh session from any phase
    ///
    /// Resets counters, collections, difficulty and any in-flight reload.
    pub fn start(&mut self, now_ms: f64) {
        self.phase = SessionPhase::Running;
        self.score = 0;
        self.hits = 0;
        self.misses = 0;
        self.elapsed_ms = 0.0;
        self.level = 1;
        self.spawn_interval_ms = self.tuning.tier(1).spawn_interval_ms;
        self.spawn_timer_ms = 0.0;
        self.targets.clear();
        self.bullets.clear();
        self.particles.clear();
        self.ammo = self.tuning.mag_size;
        self.reload = ReloadState::Ready;
        self.last_frame_ms = Some(now_ms);
        self.autopilot_last_shot_ms = None;
        log::info!("Session started (seed {})", self.seed);
    }

    /// Pause or resume; ignored outside Running/Paused
    ///
    /// Returns true when the game is paused afterwards.
    pub fn toggle_pause(&mut self, now_ms: f64) -> bool {
        match self.phase {
            SessionPhase::Running => {
                self.phase = SessionPhase::Paused;
                log::info!("Paused");
            }
            SessionPhase::Paused => {
                self.phase = SessionPhase::Running;
                // Do not simulate the time spent paused
                self.last_frame_ms = Some(now_ms);
                log::info!("Resumed");
            }
            SessionPhase::Idle | SessionPhase::Ended => {}
        }
        self.phase == SessionPhase::Paused
    }

    /// Stop the session and report its numbers
    pub fn end(&mut self) -> SessionSummary {
        if matches!(self.phase, SessionPhase::Running | SessionPhase::Paused) {
            self.phase = SessionPhase::Ended;
            self.last_frame_ms = None;
        }
        let summary = self.summary();
        match serde_json::to_string(&summary) {
            Ok(json) => log::info!("Session ended: {}", json),
            Err(e) => log::warn!("Session ended (summary not serializable: {})", e),
        }
        summary
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            score: self.score,
            hits: self.hits,
            misses: self.misses,
            level: self.level,
            elapsed_ms: self.elapsed_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::spawn::spawn_target;

    #[test]
    fn test_start_resets_everything() {
        let mut state = GameState::new(8, Tuning::default());
        state.start(0.0);
        spawn_target(&mut state);
        state.score = 50;
        state.hits = 3;
        state.misses = 2;
        state.ammo = 1;
        state.level = 3;
        state.spawn_interval_ms = 900.0;
        state.spawn_timer_ms = 300.0;
        state.elapsed_ms = 50_000.0;

        state.start(10.0);
        assert_eq!(state.phase, SessionPhase::Running);
        assert_eq!(state.summary(), SessionSummary {
            score: 0,
            hits: 0,
            misses: 0,
            level: 1,
            elapsed_ms: 0.0,
        });
        assert!(state.targets.is_empty());
        assert_eq!(state.ammo, 30);
        assert_eq!(state.spawn_interval_ms, 1500.0);
        assert_eq!(state.spawn_timer_ms, 0.0);
        assert_eq!(state.last_frame_ms, Some(10.0));
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = GameState::new(8, Tuning::default());
        // Before start: ignored
        assert!(!state.toggle_pause(0.0));
        assert_eq!(state.phase, SessionPhase::Idle);

        state.start(0.0);
        assert!(state.toggle_pause(100.0));
        assert_eq!(state.phase, SessionPhase::Paused);
        assert!(!state.toggle_pause(5_000.0));
        assert_eq!(state.phase, SessionPhase::Running);
        assert_eq!(state.last_frame_ms, Some(5_000.0));
    }

    #[test]
    fn test_end_reports_summary() {
        let mut state = GameState::new(8, Tuning::default());
        state.start(0.0);
        state.score = 42;
        state.hits = 5;
        state.misses = 1;
        let summary = state.end();
        assert_eq!(state.phase, SessionPhase::Ended);
        assert_eq!(summary.score, 42);
        assert_eq!(summary.hits, 5);
        assert_eq!(summary.misses, 1);
        // Ended games cannot be paused
        assert!(!state.toggle_pause(0.0));
        assert_eq!(state.phase, SessionPhase::Ended);
    }

    #[test]
    fn test_end_from_idle_stays_idle() {
        let mut state = GameState::new(8, Tuning::default());
        state.end();
        assert_eq!(state.phase, SessionPhase::Idle);
    }

    #[test]
    fn test_summary_json() {
        let summary = SessionSummary {
            score: 7,
            hits: 2,
            misses: 0,
            level: 1,
            elapsed_ms: 1500.0,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["score"], 7);
        assert_eq!(json["misses"], 0);
        assert_eq!(json["elapsed_ms"], 1500.0);
    }
}
