use serde::Serialize;
use shared::{domain::Step, error::CoreError};

pub const DEFAULT_TIMER_SECONDS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running; nothing changed.
    Ignored,
    Counting { remaining: u32 },
    /// Remaining time just reached zero. Reported once per run.
    Completed,
}

/// Countdown for a single step, in whole seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTimer {
    duration: u32,
    remaining: u32,
    state: TimerState,
}

impl StepTimer {
    pub fn new(duration: u32) -> Result<Self, CoreError> {
        if duration == 0 {
            return Err(CoreError::ZeroDuration);
        }
        Ok(Self {
            duration,
            remaining: duration,
            state: TimerState::Idle,
        })
    }

    /// Steps without a positive `timer_duration` fall back to `default_seconds`.
    pub fn for_step(step: &Step, default_seconds: u32) -> Result<Self, CoreError> {
        let duration = step
            .timer_duration
            .filter(|seconds| *seconds > 0)
            .unwrap_or(default_seconds);
        Self::new(duration)
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn start(&mut self) -> bool {
        match self.state {
            TimerState::Idle | TimerState::Paused => {
                self.state = TimerState::Running;
                true
            }
            TimerState::Running | TimerState::Completed => false,
        }
    }

    pub fn pause(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.state = TimerState::Paused;
        true
    }

    pub fn reset(&mut self) {
        self.remaining = self.duration;
        self.state = TimerState::Idle;
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.state != TimerState::Running {
            return TickOutcome::Ignored;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = TimerState::Completed;
            TickOutcome::Completed
        } else {
            TickOutcome::Counting {
                remaining: self.remaining,
            }
        }
    }

    pub fn percent_complete(&self) -> f64 {
        if self.duration == 0 {
            return 100.0;
        }
        f64::from(self.duration - self.remaining) / f64::from(self.duration) * 100.0
    }

    pub fn formatted(&self) -> String {
        format_seconds(self.remaining)
    }

    /// Whether a reset would change anything visible.
    pub fn can_reset(&self) -> bool {
        matches!(self.state, TimerState::Running | TimerState::Paused)
            || self.remaining < self.duration
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            state: self.state,
            duration: self.duration,
            remaining: self.remaining,
            percent_complete: self.percent_complete(),
            formatted: self.formatted(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub duration: u32,
    pub remaining: u32,
    pub percent_complete: f64,
    pub formatted: String,
}

/// `m:ss`, e.g. 65 seconds renders as `1:05`.
pub fn format_seconds(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
#[path = "tests/timer_tests.rs"]
mod tests;
