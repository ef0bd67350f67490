use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    Focus,
    Break,
}

impl TimerMode {
    /// The mode a completed session flips into.
    pub fn next(self) -> Self {
        match self {
            TimerMode::Focus => TimerMode::Break,
            TimerMode::Break => TimerMode::Focus,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimerMode::Focus => "Focus",
            TimerMode::Break => "Break",
        }
    }
}

/// Durations the focus/break cycle runs with.
///
/// A completed break always returns to `default_focus_minutes`, not to the
/// last quick-set length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSettings {
    pub default_focus_minutes: u32,
    pub break_minutes: u32,
    /// Pause between a completed session and the mode flip, so the finished
    /// state can be shown.
    pub completion_delay: Duration,
}

impl TimerSettings {
    /// Full length of a fresh session in `mode`, in minutes.
    pub fn minutes_for(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Focus => self.default_focus_minutes,
            TimerMode::Break => self.break_minutes,
        }
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            default_focus_minutes: 25,
            break_minutes: 5,
            completion_delay: Duration::from_millis(400),
        }
    }
}

/// Minutes to seconds without overflow.
pub fn minutes_to_secs(minutes: u32) -> u32 {
    minutes.saturating_mul(60)
}
