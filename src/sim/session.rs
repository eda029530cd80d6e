//! Session clock
//!
//! Tracks elapsed play time with all paused intervals removed, the difficulty
//! scalar derived from it, and the `Playing ⇄ Paused → GameOver` phase machine.
//! Timestamps are wall-clock milliseconds supplied by the frame driver.

use serde::{Deserialize, Serialize};

use crate::round_centis;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Updates suspended, clock frozen
    Paused,
    /// Run ended (terminal)
    GameOver,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    phase: GamePhase,
    start_ms: f64,
    /// Set while paused
    pause_started_ms: Option<f64>,
    total_paused_ms: f64,
    /// Set once the session has ended
    ended_at_ms: Option<f64>,
    /// Difficulty growth per elapsed second
    difficulty_per_sec: f64,
}

impl Session {
    /// Start a session at `now_ms`
    pub fn start(now_ms: f64, difficulty_per_sec: f64) -> Self {
        Self {
            phase: GamePhase::Playing,
            start_ms: now_ms,
            pause_started_ms: None,
            total_paused_ms: 0.0,
            ended_at_ms: None,
            difficulty_per_sec,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Total time spent paused so far (including an ongoing pause)
    pub fn paused_ms(&self, now_ms: f64) -> f64 {
        let ongoing = self
            .pause_started_ms
            .map(|started| (now_ms - started).max(0.0))
            .unwrap_or(0.0);
        self.total_paused_ms + ongoing
    }

    /// Elapsed unpaused time in milliseconds.
    ///
    /// Frozen while paused and after the session ends.
    pub fn elapsed_ms(&self, now_ms: f64) -> f64 {
        let reference = self
            .ended_at_ms
            .or(self.pause_started_ms)
            .unwrap_or(now_ms);
        (reference - self.start_ms - self.total_paused_ms).max(0.0)
    }

    pub fn elapsed_secs(&self, now_ms: f64) -> f64 {
        self.elapsed_ms(now_ms) / 1000.0
    }

    /// Difficulty scalar for a given elapsed time: `1 + secs * k`, unbounded above
    pub fn difficulty_at(&self, elapsed_ms: f64) -> f64 {
        1.0 + (elapsed_ms / 1000.0) * self.difficulty_per_sec
    }

    pub fn difficulty(&self, now_ms: f64) -> f64 {
        self.difficulty_at(self.elapsed_ms(now_ms))
    }

    pub fn pause(&mut self, now_ms: f64) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
            self.pause_started_ms = Some(now_ms);
            log::info!("Paused at {:.2}s", self.elapsed_secs(now_ms));
        }
    }

    pub fn resume(&mut self, now_ms: f64) {
        if self.phase == GamePhase::Paused {
            if let Some(started) = self.pause_started_ms.take() {
                self.total_paused_ms += (now_ms - started).max(0.0);
            }
            self.phase = GamePhase::Playing;
            log::info!("Resumed at {:.2}s", self.elapsed_secs(now_ms));
        }
    }

    /// Flip between Playing and Paused; no-op once ended
    pub fn toggle_pause(&mut self, now_ms: f64) {
        match self.phase {
            GamePhase::Playing => self.pause(now_ms),
            GamePhase::Paused => self.resume(now_ms),
            GamePhase::GameOver => {}
        }
    }

    /// Freeze the clock and mark the session over
    pub fn end(&mut self, now_ms: f64) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.resume(now_ms);
        self.ended_at_ms = Some(now_ms);
        self.phase = GamePhase::GameOver;
        log::info!("Session over after {:.2}s", self.elapsed_secs(now_ms));
    }

    /// Survival time in seconds at 2-decimal precision, once ended
    pub fn final_time_secs(&self) -> Option<f64> {
        self.ended_at_ms
            .map(|ended| round_centis(self.elapsed_ms(ended) / 1000.0))
    }
}
