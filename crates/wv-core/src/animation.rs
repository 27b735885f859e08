//! Year animation driver
//!
//! Steps a year slider from its minimum to its maximum on a fixed period.
//! A run cannot be paused; starting while a run is active is a no-op.

use std::time::{Duration, Instant};

use crate::controls::YearSlider;

/// Trigger label while idle
pub const IDLE_LABEL: &str = "Play Animation";

/// Trigger label while a run is in progress
pub const PLAYING_LABEL: &str = "Playing...";

/// One tick of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationStep {
    /// Year the slider moves to
    pub year: i32,
    /// Set on the last tick of the run
    pub finished: bool,
}

#[derive(Debug, Clone, Copy)]
struct Run {
    next_year: i32,
    max: i32,
    step: i32,
    next_tick: Instant,
}

#[derive(Debug)]
pub struct YearAnimator {
    interval: Duration,
    run: Option<Run>,
}

impl YearAnimator {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            run: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// The trigger is usable only while idle
    pub fn trigger_enabled(&self) -> bool {
        !self.is_running()
    }

    pub fn trigger_label(&self) -> &'static str {
        if self.is_running() {
            PLAYING_LABEL
        } else {
            IDLE_LABEL
        }
    }

    /// Start a run over `slider`; returns false if one is already active
    pub fn play(&mut self, slider: &YearSlider, now: Instant) -> bool {
        if self.is_running() {
            tracing::debug!("Animation already running, ignoring play");
            return false;
        }

        self.run = Some(Run {
            next_year: slider.min,
            max: slider.max,
            step: slider.step.max(1),
            next_tick: now + self.interval,
        });
        tracing::info!("Animation started at {}", slider.min);
        true
    }

    /// Advance by at most one step if the next tick is due
    pub fn tick(&mut self, now: Instant) -> Option<AnimationStep> {
        let run = self.run.as_mut()?;
        if now < run.next_tick {
            return None;
        }

        let year = run.next_year;
        run.next_year += run.step;
        run.next_tick = now + self.interval;

        let finished = run.next_year > run.max;
        if finished {
            self.run = None;
            tracing::info!("Animation finished at {}", year);
        }

        Some(AnimationStep { year, finished })
    }

    /// When the next tick is due, for repaint scheduling
    pub fn next_due(&self) -> Option<Instant> {
        self.run.map(|run| run.next_tick)
    }
}
