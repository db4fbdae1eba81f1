//! Pause-aware elapsed-time tracking.
//!
//! Elapsed time is derived from clock readings (time since the last start or
//! resume, plus whatever was banked before), never from counting ticks, so
//! it can't drift no matter how often a host samples it.

use std::time::{Duration, Instant};

use crate::core::clock::Clock;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerState {
    Idle,
    Running { since: Instant },
    Paused,
    Stopped,
}

/// Stopwatch for active play time.
#[derive(Clone, Debug)]
pub struct Timer<C> {
    clock: C,
    banked: Duration,
    state: TimerState,
}

impl<C: Clock> Timer<C> {
    /// Create an idle timer reading zero.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            banked: Duration::ZERO,
            state: TimerState::Idle,
        }
    }

    /// The clock this timer reads.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Start from zero.
    pub fn start(&mut self) {
        self.banked = Duration::ZERO;
        self.state = TimerState::Running {
            since: self.clock.now(),
        };
    }

    /// Freeze accumulation. Returns `false` if the timer wasn't running.
    pub fn pause(&mut self) -> bool {
        if self.bank() {
            self.state = TimerState::Paused;
            true
        } else {
            false
        }
    }

    /// Continue from the frozen value. Returns `false` if the timer wasn't paused.
    pub fn resume(&mut self) -> bool {
        if self.state != TimerState::Paused {
            return false;
        }
        self.state = TimerState::Running {
            since: self.clock.now(),
        };
        true
    }

    /// Stop for good and return the final reading.
    pub fn stop(&mut self) -> Duration {
        self.bank();
        self.state = TimerState::Stopped;
        self.banked
    }

    /// Back to zero, not running.
    pub fn reset(&mut self) {
        self.banked = Duration::ZERO;
        self.state = TimerState::Idle;
    }

    /// Total accumulated running time.
    pub fn elapsed(&self) -> Duration {
        match self.state {
            TimerState::Running { since } => {
                self.banked + self.clock.now().saturating_duration_since(since)
            }
            _ => self.banked,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    pub fn is_paused(&self) -> bool {
        self.state == TimerState::Paused
    }

    // Fold the running interval into `banked`; false if not running.
    fn bank(&mut self) -> bool {
        if let TimerState::Running { since } = self.state {
            self.banked += self.clock.now().saturating_duration_since(since);
            true
        } else {
            false
        }
    }
}
