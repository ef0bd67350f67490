//! Productivity statistics
//!
//! Derives a read-only snapshot from the task list, the focus counters and
//! the note count. Nothing here is persisted; the snapshot is recomputed
//! whenever its inputs change.

use serde::{Deserialize, Serialize};

use crate::counters::FocusCounters;
use crate::tasks::{Priority, Task};

/// Days shown on the streak strip.
pub const STREAK_CAP: u64 = 7;

/// Coarse productivity label derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductivityTier {
    /// Score above 80
    Excellent,
    /// Score above 60
    Good,
    /// Score above 40
    Fair,
    Low,
}

impl ProductivityTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            81.. => ProductivityTier::Excellent,
            61..=80 => ProductivityTier::Good,
            41..=60 => ProductivityTier::Fair,
            _ => ProductivityTier::Low,
        }
    }
}

/// Dashboard figures for one moment in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Rounded completed/total, 0 when there are no tasks
    pub completion_percent: u8,
    pub high_priority_total: usize,
    pub high_priority_completed: usize,
    pub sessions_completed: u64,
    pub total_focus_minutes: u64,
    /// Rounded minutes per session, 0 before the first session
    pub average_session_minutes: u64,
    pub notes_count: usize,
    /// 0 to 100
    pub productivity_score: u8,
    pub tier: ProductivityTier,
    /// Sessions completed, capped at [`STREAK_CAP`]
    pub streak: u64,
}

impl StatsSnapshot {
    pub fn compute(
        tasks: &[Task],
        sessions_completed: u64,
        total_focus_minutes: u64,
        notes_count: usize,
    ) -> Self {
        let total_tasks = tasks.len();
        let completed_tasks = tasks.iter().filter(|t| t.completed).count();
        let high: Vec<&Task> = tasks
            .iter()
            .filter(|t| t.priority == Priority::High)
            .collect();
        let high_priority_completed = high.iter().filter(|t| t.completed).count();

        let completion_percent = percent(completed_tasks, total_tasks);
        let productivity_score = score(completion_percent, sessions_completed, notes_count);

        Self {
            total_tasks,
            completed_tasks,
            completion_percent,
            high_priority_total: high.len(),
            high_priority_completed,
            sessions_completed,
            total_focus_minutes,
            average_session_minutes: rounded_div(total_focus_minutes, sessions_completed),
            notes_count,
            productivity_score,
            tier: ProductivityTier::from_score(productivity_score),
            streak: sessions_completed.min(STREAK_CAP),
        }
    }

    pub fn from_parts(tasks: &[Task], counters: FocusCounters, notes_count: usize) -> Self {
        Self::compute(
            tasks,
            counters.sessions_completed,
            counters.total_focus_minutes,
            notes_count,
        )
    }

    /// Completed share of high-priority tasks, `None` without any.
    pub fn high_priority_ratio(&self) -> Option<f64> {
        (self.high_priority_total > 0)
            .then(|| self.high_priority_completed as f64 / self.high_priority_total as f64)
    }
}

fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    // part <= whole, so the result is at most 100
    let pct = (part as f64 / whole as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

/// Half-up integer division.
fn rounded_div(numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        return 0;
    }
    let (n, d) = (u128::from(numerator), u128::from(denominator));
    ((2 * n + d) / (2 * d)) as u64
}

fn score(completion_percent: u8, sessions: u64, notes: usize) -> u8 {
    let raw = f64::from(completion_percent) * 0.4 + sessions as f64 * 5.0 + notes as f64 * 2.0;
    raw.round().min(100.0) as u8
}
