use serde::{Deserialize, Serialize};

/// Cumulative focus totals. Only ever grow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusCounters {
    pub sessions_completed: u64,
    pub total_focus_minutes: u64,
}

impl FocusCounters {
    /// Credit one finished focus session of `minutes` configured length.
    pub fn record_session(&mut self, minutes: u32) {
        self.sessions_completed = self.sessions_completed.saturating_add(1);
        self.total_focus_minutes = self.total_focus_minutes.saturating_add(u64::from(minutes));
    }
}
