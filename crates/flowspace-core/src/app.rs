//! Application-wide state passed explicitly to every component.
//!
//! Holds the store handle, the theme flag and the cumulative focus counters.
//! Components never reach for these through globals; they receive the
//! context by reference and go through its read and write methods.

use chrono::Utc;

use crate::counters::FocusCounters;
use crate::events::Event;
use crate::storage::{keys, Config, LocalStore};
use crate::theme::Theme;

#[derive(Debug)]
pub struct AppContext {
    store: LocalStore,
    theme: Theme,
    counters: FocusCounters,
}

impl AppContext {
    /// Load theme and counters from `store`. The theme falls back to the
    /// configured initial theme.
    pub fn load(store: LocalStore, config: &Config) -> Self {
        let theme = store.load(keys::THEME, Theme::from_dark_flag(config.ui.dark_mode));
        let counters = FocusCounters {
            sessions_completed: store.load(keys::SESSIONS_COMPLETED, 0),
            total_focus_minutes: store.load(keys::TOTAL_FOCUS_MINUTES, 0),
        };
        Self {
            store,
            theme,
            counters,
        }
    }

    // ── Read ─────────────────────────────────────────────────────────

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn counters(&self) -> FocusCounters {
        self.counters
    }

    // ── Write ────────────────────────────────────────────────────────

    pub fn toggle_theme(&mut self) -> Event {
        self.theme = self.theme.toggled();
        self.store.save(keys::THEME, &self.theme);
        Event::ThemeChanged {
            theme: self.theme,
            at: Utc::now(),
        }
    }

    /// Credit one finished focus session and persist both counters.
    pub fn record_focus_session(&mut self, minutes: u32) {
        self.update_counters(|c| c.record_session(minutes));
    }

    /// Run `f` against the counters, persisting them if it changed anything.
    pub fn update_counters<R>(&mut self, f: impl FnOnce(&mut FocusCounters) -> R) -> R {
        let before = self.counters;
        let result = f(&mut self.counters);
        if self.counters != before {
            self.store
                .save(keys::SESSIONS_COMPLETED, &self.counters.sessions_completed);
            self.store
                .save(keys::TOTAL_FOCUS_MINUTES, &self.counters.total_focus_minutes);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_store_uses_defaults() {
        let ctx = AppContext::load(LocalStore::in_memory(), &Config::default());
        assert_eq!(ctx.theme(), Theme::Dark);
        assert_eq!(ctx.counters(), FocusCounters::default());
    }

    #[test]
    fn theme_toggle_persists() {
        let store = LocalStore::in_memory();
        let mut ctx = AppContext::load(store.clone(), &Config::default());
        ctx.toggle_theme();
        assert_eq!(ctx.theme(), Theme::Light);

        let reloaded = AppContext::load(store, &Config::default());
        assert_eq!(reloaded.theme(), Theme::Light);
    }

    #[test]
    fn counters_persist_under_separate_keys() {
        let store = LocalStore::in_memory();
        let mut ctx = AppContext::load(store.clone(), &Config::default());
        ctx.record_focus_session(25);
        ctx.record_focus_session(50);

        assert_eq!(store.load_raw(keys::SESSIONS_COMPLETED).as_deref(), Some("2"));
        assert_eq!(store.load_raw(keys::TOTAL_FOCUS_MINUTES).as_deref(), Some("75"));

        let reloaded = AppContext::load(store, &Config::default());
        assert_eq!(reloaded.counters().sessions_completed, 2);
        assert_eq!(reloaded.counters().total_focus_minutes, 75);
    }

    #[test]
    fn unchanged_counters_are_not_written() {
        let store = LocalStore::in_memory();
        let mut ctx = AppContext::load(store.clone(), &Config::default());
        ctx.update_counters(|_| ());
        assert!(store.keys().is_empty());
    }

    #[test]
    fn corrupt_counter_falls_back_to_zero() {
        let store = LocalStore::in_memory();
        store.save(keys::SESSIONS_COMPLETED, &"lots");
        store.save(keys::TOTAL_FOCUS_MINUTES, &120u64);
        let ctx = AppContext::load(store, &Config::default());
        assert_eq!(ctx.counters().sessions_completed, 0);
        assert_eq!(ctx.counters().total_focus_minutes, 120);
    }
}
