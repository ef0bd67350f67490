mod engine;
mod focus_timer;
mod notifier;
mod schedule;
mod ticker;

pub use engine::{Progress, StoredTimerState, TimerEngine, TimerState};
pub use focus_timer::FocusTimer;
pub use notifier::{
    notify_completion, Capability, FeedbackPrefs, NoopNotifier, Notifier, TerminalBell,
    COMPLETION_PATTERN_MS,
};
pub use schedule::{minutes_to_secs, TimerMode, TimerSettings};
pub use ticker::{Ticker, TICK_PERIOD};
