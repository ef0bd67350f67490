use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tasks::Priority;
use crate::theme::Theme;
use crate::timer::TimerMode;

/// Every state change in the system produces an Event.
/// Front ends print or forward them; nothing in the core consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: TimerMode,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: TimerMode,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: TimerMode,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    /// Session length changed by a quick-set or an explicit edit.
    DurationSet {
        mode: TimerMode,
        session_minutes: u32,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    /// A session reached zero. `credited_minutes` is set for focus sessions
    /// only.
    TimerCompleted {
        mode: TimerMode,
        credited_minutes: Option<u32>,
        sessions_completed: u64,
        total_focus_minutes: u64,
        at: DateTime<Utc>,
    },
    /// The pending flip after a completion was applied.
    ModeSwitched {
        from: TimerMode,
        to: TimerMode,
        session_minutes: u32,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    TaskAdded {
        id: i64,
        priority: Priority,
        at: DateTime<Utc>,
    },
    TaskToggled {
        id: i64,
        completed: bool,
        at: DateTime<Utc>,
    },
    TaskRemoved {
        id: i64,
        at: DateTime<Utc>,
    },
    NoteAdded {
        id: i64,
        at: DateTime<Utc>,
    },
    NoteRemoved {
        id: i64,
        at: DateTime<Utc>,
    },
    ThemeChanged {
        theme: Theme,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: TimerMode,
        is_running: bool,
        session_minutes: u32,
        time_left_secs: u32,
        total_secs: u32,
        progress_pct: u8,
        display: String,
        pending_flip: Option<TimerMode>,
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_tagged_by_type() {
        let event = Event::TaskRemoved {
            id: 7,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "TaskRemoved");
        assert_eq!(json["id"], 7);
    }
}
