//! Best-effort completion feedback.
//!
//! Devices differ in what they can do: a phone can vibrate, a terminal can
//! ring its bell, a headless test run can do neither. Callers ask
//! [`Notifier::supports`] first and every failure is swallowed by
//! [`notify_completion`]; feedback never blocks or fails a timer transition.

use std::fmt;
use std::io::Write;

use crate::error::NotifyError;
use crate::storage::NotificationsConfig;

/// Vibration pattern played on completion: on, off, on (milliseconds).
pub const COMPLETION_PATTERN_MS: [u64; 3] = [200, 100, 200];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Vibration,
    Sound,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Vibration => f.write_str("vibration"),
            Capability::Sound => f.write_str("sound"),
        }
    }
}

pub trait Notifier: Send {
    fn supports(&self, capability: Capability) -> bool;

    fn vibrate(&self, pattern_ms: &[u64]) -> Result<(), NotifyError>;

    fn play_cue(&self) -> Result<(), NotifyError>;
}

/// For environments with no feedback devices at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn supports(&self, _capability: Capability) -> bool {
        false
    }

    fn vibrate(&self, _pattern_ms: &[u64]) -> Result<(), NotifyError> {
        Err(NotifyError::Unsupported(Capability::Vibration))
    }

    fn play_cue(&self) -> Result<(), NotifyError> {
        Err(NotifyError::Unsupported(Capability::Sound))
    }
}

/// Rings the terminal bell on stderr. Terminals cannot vibrate.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl Notifier for TerminalBell {
    fn supports(&self, capability: Capability) -> bool {
        capability == Capability::Sound
    }

    fn vibrate(&self, _pattern_ms: &[u64]) -> Result<(), NotifyError> {
        Err(NotifyError::Unsupported(Capability::Vibration))
    }

    fn play_cue(&self) -> Result<(), NotifyError> {
        let mut stderr = std::io::stderr();
        stderr
            .write_all(b"\x07")
            .and_then(|_| stderr.flush())
            .map_err(|e| NotifyError::Failed(e.to_string()))
    }
}

/// Which feedback the user wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackPrefs {
    pub vibration: bool,
    pub sound: bool,
}

impl Default for FeedbackPrefs {
    fn default() -> Self {
        Self {
            vibration: true,
            sound: true,
        }
    }
}

impl From<&NotificationsConfig> for FeedbackPrefs {
    fn from(cfg: &NotificationsConfig) -> Self {
        Self {
            vibration: cfg.enabled && cfg.vibration,
            sound: cfg.enabled && cfg.sound,
        }
    }
}

/// Fire the completion pulse and cue. Unsupported or failing devices are
/// skipped.
pub fn notify_completion(notifier: &dyn Notifier, prefs: FeedbackPrefs) {
    if prefs.vibration && notifier.supports(Capability::Vibration) {
        if let Err(e) = notifier.vibrate(&COMPLETION_PATTERN_MS) {
            tracing::debug!(error = %e, "vibration failed");
        }
    }
    if prefs.sound && notifier.supports(Capability::Sound) {
        if let Err(e) = notifier.play_cue() {
            tracing::debug!(error = %e, "completion cue failed");
        }
    }
}
