//! Focus/break timer state machine.
//!
//! The engine is pure: no threads, no clocks, no I/O. The caller delivers one
//! `tick()` per elapsed second while the timer runs, persists the
//! [`TimerState`] after each mutation and applies the pending mode flip after
//! the completion delay.
//!
//! ## State Transitions
//!
//! ```text
//! (Focus | Break) x (Running | Paused)
//!
//! Running --tick at 1s--> Paused (completed, flip pending)
//! flip pending --apply_pending_flip--> next mode, full duration, Paused
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(TimerSettings::default());
//! engine.start_pause();
//! // once per second:
//! if let Some(done) = engine.tick(&mut counters) {
//!     // show the finished state, wait `completion_delay`, then:
//!     engine.apply_pending_flip();
//! }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::schedule::{minutes_to_secs, TimerMode, TimerSettings};
use crate::counters::FocusCounters;
use crate::error::ValidationError;
use crate::events::Event;

/// Persisted timer snapshot.
///
/// Invariant: `0 <= time_left <= session_minutes * 60`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub mode: TimerMode,
    pub session_minutes: u32,
    /// Seconds remaining in the current session.
    pub time_left: u32,
    pub is_running: bool,
}

impl TimerState {
    /// Paused focus session of the default length.
    pub fn initial(settings: &TimerSettings) -> Self {
        let minutes = settings.default_focus_minutes;
        Self {
            mode: TimerMode::Focus,
            session_minutes: minutes,
            time_left: minutes_to_secs(minutes),
            is_running: false,
        }
    }

    pub fn full_secs(&self) -> u32 {
        minutes_to_secs(self.session_minutes)
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::initial(&TimerSettings::default())
    }
}

/// Leniently parsed snapshot: any missing field falls back on its own.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTimerState {
    #[serde(default)]
    pub mode: Option<TimerMode>,
    #[serde(default)]
    pub session_minutes: Option<u32>,
    #[serde(default)]
    pub time_left: Option<u32>,
    #[serde(default)]
    pub is_running: Option<bool>,
}

impl StoredTimerState {
    /// Fill gaps from `settings` and restore the `time_left` bound.
    pub fn resolve(self, settings: &TimerSettings) -> TimerState {
        let session_minutes = self
            .session_minutes
            .filter(|m| *m > 0)
            .unwrap_or(settings.default_focus_minutes);
        let full = minutes_to_secs(session_minutes);
        TimerState {
            mode: self.mode.unwrap_or(TimerMode::Focus),
            session_minutes,
            time_left: self.time_left.unwrap_or(full).min(full),
            is_running: self.is_running.unwrap_or(false),
        }
    }
}

/// Read-side progress for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub elapsed_secs: u32,
    pub total_secs: u32,
    /// 0.0 ..= 1.0
    pub fraction: f64,
}

impl Progress {
    pub fn percent(&self) -> u8 {
        (self.fraction * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

/// Core timer engine.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    state: TimerState,
    settings: TimerSettings,
    /// Set by a completion, cleared when the flip is applied.
    pending_flip: Option<TimerMode>,
}

impl TimerEngine {
    /// Paused focus session of the default length.
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            state: TimerState::initial(&settings),
            settings,
            pending_flip: None,
        }
    }

    /// Resume from a persisted snapshot, re-establishing the `time_left`
    /// bound.
    pub fn from_state(state: TimerState, settings: TimerSettings) -> Self {
        let stored = StoredTimerState {
            mode: Some(state.mode),
            session_minutes: Some(state.session_minutes),
            time_left: Some(state.time_left),
            is_running: Some(state.is_running),
        };
        Self {
            state: stored.resolve(&settings),
            settings,
            pending_flip: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    pub fn mode(&self) -> TimerMode {
        self.state.mode
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn time_left(&self) -> u32 {
        self.state.time_left
    }

    pub fn session_minutes(&self) -> u32 {
        self.state.session_minutes
    }

    pub fn pending_flip(&self) -> Option<TimerMode> {
        self.pending_flip
    }

    /// Full length of the current mode in seconds. Breaks always use the
    /// fixed break length.
    pub fn total_for_mode(&self) -> u32 {
        match self.state.mode {
            TimerMode::Focus => self.state.full_secs(),
            TimerMode::Break => minutes_to_secs(self.settings.break_minutes),
        }
    }

    pub fn progress(&self) -> Progress {
        let total = self.total_for_mode();
        if total == 0 {
            return Progress {
                elapsed_secs: 0,
                total_secs: 0,
                fraction: 0.0,
            };
        }
        let elapsed = total.saturating_sub(self.state.time_left);
        Progress {
            elapsed_secs: elapsed,
            total_secs: total,
            fraction: f64::from(elapsed) / f64::from(total),
        }
    }

    /// Remaining time as `MM:SS`.
    pub fn display(&self) -> String {
        let t = self.state.time_left;
        format!("{:02}:{:02}", t / 60, t % 60)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let progress = self.progress();
        Event::StateSnapshot {
            mode: self.state.mode,
            is_running: self.state.is_running,
            session_minutes: self.state.session_minutes,
            time_left_secs: self.state.time_left,
            total_secs: progress.total_secs,
            progress_pct: progress.percent(),
            display: self.display(),
            pending_flip: self.pending_flip,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Toggle running. A flip still pending from the last completion is
    /// applied first, so the next start runs the next mode.
    pub fn start_pause(&mut self) -> Event {
        if self.pending_flip.is_some() {
            self.apply_pending_flip();
        }
        self.state.is_running = !self.state.is_running;
        let (mode, time_left_secs, at) = (self.state.mode, self.state.time_left, Utc::now());
        if self.state.is_running {
            Event::TimerStarted {
                mode,
                time_left_secs,
                at,
            }
        } else {
            Event::TimerPaused {
                mode,
                time_left_secs,
                at,
            }
        }
    }

    /// Pause and refill the current mode. The mode itself is kept.
    pub fn reset(&mut self) -> Event {
        self.state.is_running = false;
        self.state.time_left = self.state.full_secs();
        Event::TimerReset {
            mode: self.state.mode,
            time_left_secs: self.state.time_left,
            at: Utc::now(),
        }
    }

    /// Paused focus session of `minutes`. Cancels a pending flip.
    ///
    /// # Errors
    /// Returns an error if `minutes` is zero; the state is left untouched.
    pub fn quick_set(&mut self, minutes: u32) -> Result<Event, ValidationError> {
        if minutes == 0 {
            return Err(ValidationError::InvalidDuration { minutes });
        }
        self.pending_flip = None;
        self.state = TimerState {
            mode: TimerMode::Focus,
            session_minutes: minutes,
            time_left: minutes_to_secs(minutes),
            is_running: false,
        };
        Ok(self.duration_event())
    }

    /// Change the session length without touching the mode.
    ///
    /// While paused the countdown refills to the new length. While running it
    /// keeps counting, shortened only if it would exceed the new length.
    ///
    /// # Errors
    /// Returns an error if `minutes` is zero; the state is left untouched.
    pub fn set_session_minutes(&mut self, minutes: u32) -> Result<Event, ValidationError> {
        if minutes == 0 {
            return Err(ValidationError::InvalidDuration { minutes });
        }
        self.state.session_minutes = minutes;
        let full = self.state.full_secs();
        if self.state.is_running {
            self.state.time_left = self.state.time_left.min(full);
        } else {
            self.state.time_left = full;
        }
        Ok(self.duration_event())
    }

    /// One elapsed second. Returns the completion event on the zero-crossing.
    pub fn tick(&mut self, counters: &mut FocusCounters) -> Option<Event> {
        if !self.state.is_running {
            return None;
        }
        if self.state.time_left <= 1 {
            self.state.time_left = 0;
            return self.complete(counters);
        }
        self.state.time_left -= 1;
        None
    }

    /// Finish the current session: stop, credit focus time and record the
    /// flip to apply after the completion delay.
    ///
    /// Returns `None` when a completion is already waiting for its flip.
    pub fn complete(&mut self, counters: &mut FocusCounters) -> Option<Event> {
        if self.pending_flip.is_some() {
            return None;
        }
        self.state.is_running = false;
        self.state.time_left = 0;

        let credited_minutes = match self.state.mode {
            TimerMode::Focus => {
                counters.record_session(self.state.session_minutes);
                Some(self.state.session_minutes)
            }
            TimerMode::Break => None,
        };
        self.pending_flip = Some(self.state.mode.next());

        Some(Event::TimerCompleted {
            mode: self.state.mode,
            credited_minutes,
            sessions_completed: counters.sessions_completed,
            total_focus_minutes: counters.total_focus_minutes,
            at: Utc::now(),
        })
    }

    /// Switch to the mode recorded by the last completion, refilled and
    /// paused.
    pub fn apply_pending_flip(&mut self) -> Option<Event> {
        let to = self.pending_flip.take()?;
        let from = self.state.mode;
        let minutes = self.settings.minutes_for(to);
        self.state = TimerState {
            mode: to,
            session_minutes: minutes,
            time_left: minutes_to_secs(minutes),
            is_running: false,
        };
        Some(Event::ModeSwitched {
            from,
            to,
            session_minutes: minutes,
            time_left_secs: self.state.time_left,
            at: Utc::now(),
        })
    }

    fn duration_event(&self) -> Event {
        Event::DurationSet {
            mode: self.state.mode,
            session_minutes: self.state.session_minutes,
            time_left_secs: self.state.time_left,
            at: Utc::now(),
        }
    }
}
