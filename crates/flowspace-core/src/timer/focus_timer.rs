//! The timer as a component: engine, tick scheduler, completion feedback and
//! persistence wired together.
//!
//! Every command persists the snapshot under `timer_state_v2` and brings the
//! ticker in line with `is_running`, so a paused timer never has a live tick
//! task behind it.

use super::engine::{Progress, StoredTimerState, TimerEngine, TimerState};
use super::notifier::{notify_completion, FeedbackPrefs, Notifier};
use super::schedule::TimerSettings;
use super::ticker::Ticker;
use crate::app::AppContext;
use crate::error::ValidationError;
use crate::events::Event;
use crate::storage::keys;

pub struct FocusTimer {
    engine: TimerEngine,
    ticker: Ticker,
    notifier: Box<dyn Notifier>,
    feedback: FeedbackPrefs,
}

impl FocusTimer {
    /// Restore the persisted snapshot, or start from a paused default focus
    /// session.
    pub fn load(ctx: &AppContext, settings: TimerSettings, notifier: Box<dyn Notifier>) -> Self {
        let state = ctx
            .store()
            .load::<Option<StoredTimerState>>(keys::TIMER_STATE, None)
            .map(|stored| stored.resolve(&settings))
            .unwrap_or_else(|| TimerState::initial(&settings));

        let mut timer = Self {
            engine: TimerEngine::from_state(state, settings),
            ticker: Ticker::default(),
            notifier,
            feedback: FeedbackPrefs::default(),
        };
        timer.sync_ticker();
        timer
    }

    pub fn with_feedback(mut self, feedback: FeedbackPrefs) -> Self {
        self.feedback = feedback;
        self
    }

    pub fn with_ticker(mut self, ticker: Ticker) -> Self {
        self.ticker = ticker;
        self.sync_ticker();
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn state(&self) -> TimerState {
        self.engine.state()
    }

    pub fn progress(&self) -> Progress {
        self.engine.progress()
    }

    pub fn snapshot(&self) -> Event {
        self.engine.snapshot()
    }

    /// Whether a recurring tick is scheduled.
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_active()
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start_pause(&mut self, ctx: &AppContext) -> Event {
        let event = self.engine.start_pause();
        self.commit(ctx);
        event
    }

    pub fn reset(&mut self, ctx: &AppContext) -> Event {
        let event = self.engine.reset();
        self.commit(ctx);
        event
    }

    /// # Errors
    /// Returns an error if `minutes` is zero.
    pub fn quick_set(&mut self, ctx: &AppContext, minutes: u32) -> Result<Event, ValidationError> {
        let event = self.engine.quick_set(minutes)?;
        self.commit(ctx);
        Ok(event)
    }

    /// # Errors
    /// Returns an error if `minutes` is zero.
    pub fn set_session_minutes(
        &mut self,
        ctx: &AppContext,
        minutes: u32,
    ) -> Result<Event, ValidationError> {
        let event = self.engine.set_session_minutes(minutes)?;
        self.commit(ctx);
        Ok(event)
    }

    /// Deliver one elapsed second.
    pub fn tick(&mut self, ctx: &mut AppContext) -> Option<Event> {
        let engine = &mut self.engine;
        let completed = ctx.update_counters(|counters| engine.tick(counters));
        if let Some(event) = &completed {
            self.on_completed(event);
        }
        self.commit(ctx);
        completed
    }

    /// Finish the current session now.
    pub fn complete(&mut self, ctx: &mut AppContext) -> Option<Event> {
        let engine = &mut self.engine;
        let completed = ctx.update_counters(|counters| engine.complete(counters));
        if let Some(event) = &completed {
            self.on_completed(event);
        }
        self.commit(ctx);
        completed
    }

    pub fn apply_pending_flip(&mut self, ctx: &AppContext) -> Option<Event> {
        let event = self.engine.apply_pending_flip()?;
        self.commit(ctx);
        Some(event)
    }

    /// Drive the running session: one tick per period until it completes,
    /// then wait out the completion delay and flip the mode.
    ///
    /// `on_event` sees a snapshot after every tick, the completion and the
    /// mode switch. Returns the completion, or `None` if the timer was not
    /// running.
    pub async fn run_session(
        &mut self,
        ctx: &mut AppContext,
        mut on_event: impl FnMut(&Event),
    ) -> Option<Event> {
        while self.ticker.tick().await {
            match self.tick(ctx) {
                Some(completed) => {
                    on_event(&completed);
                    tokio::time::sleep(self.engine.settings().completion_delay).await;
                    if let Some(switched) = self.apply_pending_flip(ctx) {
                        on_event(&switched);
                    }
                    return Some(completed);
                }
                None => on_event(&self.engine.snapshot()),
            }
        }
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn on_completed(&self, event: &Event) {
        if let Event::TimerCompleted {
            mode,
            credited_minutes,
            ..
        } = event
        {
            tracing::info!(mode = mode.label(), ?credited_minutes, "session completed");
        }
        notify_completion(self.notifier.as_ref(), self.feedback);
    }

    fn commit(&mut self, ctx: &AppContext) {
        ctx.store().save(keys::TIMER_STATE, &self.engine.state());
        self.sync_ticker();
    }

    fn sync_ticker(&mut self) {
        match (self.engine.is_running(), self.ticker.is_active()) {
            (true, false) => self.ticker.start(),
            (false, true) => self.ticker.stop(),
            _ => {}
        }
    }
}

impl std::fmt::Debug for FocusTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusTimer")
            .field("engine", &self.engine)
            .field("ticker", &self.ticker)
            .field("feedback", &self.feedback)
            .finish_non_exhaustive()
    }
}
