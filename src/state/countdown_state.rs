//! Countdown state structure and elapsed-time tracking

use std::time::Instant;

use super::{DisplayFrame, TimeSpec};

/// Remaining time for one countdown, advanced from wall-clock deltas.
///
/// While running, `remaining_seconds` is recomputed from the instant and
/// value recorded when playback last started (the anchor), so scheduling
/// jitter between ticks never accumulates.
#[derive(Debug, Clone)]
pub struct CountdownState {
    remaining_seconds: f64,
    running: bool,
    anchor_wall_clock: Instant,
    anchor_remaining: f64,
    completion_signaled: bool,
}

impl CountdownState {
    /// Create a stopped countdown holding the full duration
    pub fn new(time: TimeSpec, now: Instant) -> Self {
        let total = time.total_seconds() as f64;
        Self {
            remaining_seconds: total,
            running: false,
            anchor_wall_clock: now,
            anchor_remaining: total,
            completion_signaled: false,
        }
    }

    pub fn remaining_seconds(&self) -> f64 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn completion_signaled(&self) -> bool {
        self.completion_signaled
    }

    /// Start (or re-anchor) playback at `now`
    pub fn start(&mut self, now: Instant) {
        self.anchor_wall_clock = now;
        self.anchor_remaining = self.remaining_seconds;
        self.running = true;
    }

    /// Pause playback; the remaining time freezes at its last computed value
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Alternate between `start` and `stop`, returning the new running flag
    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.running {
            self.stop();
        } else {
            self.start(now);
        }
        self.running
    }

    /// Reset to a new duration and clear the completion flag.
    ///
    /// The running flag is kept. A running countdown is re-anchored at
    /// `now` so it keeps counting down from the new total.
    pub fn load_duration(&mut self, time: TimeSpec, now: Instant) {
        self.remaining_seconds = time.total_seconds() as f64;
        self.completion_signaled = false;
        if self.running {
            self.start(now);
        }
    }

    /// Recompute the remaining time at `now`.
    ///
    /// Returns true on the single tick that reaches zero while running; the
    /// caller fires the completion action then. Later ticks at zero, pauses
    /// and restarts never return true again until `load_duration`.
    #[must_use]
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }

        let elapsed = now.saturating_duration_since(self.anchor_wall_clock).as_secs_f64();
        self.remaining_seconds = (self.anchor_remaining - elapsed).max(0.0);

        if self.remaining_seconds == 0.0 && !self.completion_signaled {
            self.completion_signaled = true;
            return true;
        }
        false
    }

    pub fn frame(&self, show_labels: bool) -> DisplayFrame {
        DisplayFrame::new(
            self.remaining_seconds,
            self.running,
            show_labels,
            self.completion_signaled,
        )
    }
}
