//! Fixed-step tick scheduling
//!
//! Animation frames arrive at whatever rate the display runs. `FixedStep`
//! turns frame timestamps into a number of logical ticks to run. It only
//! decides how many movement steps happen; the session clock reads the frame
//! timestamp directly, so dropped steps never shorten the measured run.

use crate::consts::{MAX_SUBSTEPS, TICK_MS};

#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f64,
    last_ms: Option<f64>,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the timestamp of a new frame; returns how many ticks to run now.
    ///
    /// At most `MAX_SUBSTEPS` per frame. Backlog beyond that is dropped
    /// instead of replayed.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => TICK_MS,
        };
        self.last_ms = Some(now_ms);
        self.accumulator += dt;

        let due = (self.accumulator / TICK_MS).floor() as u32;
        let steps = due.min(MAX_SUBSTEPS);
        self.accumulator -= steps as f64 * TICK_MS;
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(TICK_MS);
        }
        steps
    }

    /// Forget pending backlog (new run)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_runs_one_tick() {
        let mut step = FixedStep::new();
        assert_eq!(step.advance(1234.0), 1);
    }

    #[test]
    fn test_steady_frames_run_one_tick_each() {
        let mut step = FixedStep::new();
        step.advance(0.0);
        let total: u32 = (1..=60).map(|i| step.advance(i as f64 * TICK_MS)).sum();
        assert!((59..=61).contains(&total), "ran {} ticks", total);
    }

    #[test]
    fn test_hitch_is_capped_and_backlog_dropped() {
        let mut step = FixedStep::new();
        step.advance(0.0);
        assert_eq!(step.advance(400.0), MAX_SUBSTEPS);
        // Backlog cut to at most one tick
        assert!(step.advance(400.0) <= 1);
    }

    #[test]
    fn test_clock_going_backwards_runs_nothing() {
        let mut step = FixedStep::new();
        step.advance(1000.0);
        assert_eq!(step.advance(900.0), 0);
    }
}
