//! # FlowSpace Core Library
//!
//! Business logic for FlowSpace, a personal productivity workspace: a task
//! list, a focus/break countdown timer, a notes scratchpad and a statistics
//! dashboard. Everything is persisted to a local key/value store so state
//! survives restarts. The `flowspace` CLI is a thin front end over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A pure state machine driven one second at a time by
//!   [`timer::Ticker`]. [`FocusTimer`] wires it to persistence and feedback.
//! - **Storage**: A JSON-valued key/value store with SQLite and in-memory
//!   backends, plus a TOML configuration file
//! - **Context**: [`AppContext`] carries the store, the theme and the focus
//!   counters, and is handed explicitly to every component
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Focus/break state machine
//! - [`TaskList`] and [`NotesStore`]: Persisted collections
//! - [`StatsSnapshot`]: Derived productivity figures
//! - [`LocalStore`]: Fault-tolerant persistence adapter
//! - [`Config`]: Application configuration management

pub mod app;
pub mod counters;
pub mod error;
pub mod events;
mod ids;
pub mod logging;
pub mod notes;
pub mod stats;
pub mod storage;
pub mod tasks;
pub mod theme;
pub mod timer;

pub use app::AppContext;
pub use counters::FocusCounters;
pub use error::{ConfigError, CoreError, NotifyError, StorageError, ValidationError};
pub use events::Event;
pub use notes::{AlwaysConfirm, Confirm, NeverConfirm, Note, NotesStore};
pub use stats::{ProductivityTier, StatsSnapshot};
pub use storage::{Config, LocalStore, MemoryBackend, SqliteBackend};
pub use tasks::{Priority, Task, TaskList};
pub use theme::Theme;
pub use timer::{FocusTimer, TimerEngine, TimerMode, TimerSettings, TimerState};
