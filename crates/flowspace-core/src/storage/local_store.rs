//! Persistent key-value store adapter.
//!
//! Every stateful component reads and writes its slice of state through a
//! [`LocalStore`]. Values are JSON documents stored under string keys.
//!
//! The adapter never fails toward its caller:
//! - `load` returns the supplied default when the key is absent, when the
//!   backend read fails, or when the stored JSON does not match the expected
//!   shape. The last two cases are logged.
//! - `save` logs serialization and write failures and returns normally, so the
//!   latest mutation may be lost but the application keeps running.
//!
//! There is no cross-process coordination: two processes writing the same key
//! are last-write-wins.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

/// Persisted key names. They are part of the on-disk format; a shape change
/// bumps the suffix instead of migrating.
pub mod keys {
    pub const TASKS: &str = "todos";
    pub const NOTES: &str = "notes_v2";
    pub const SESSIONS_COMPLETED: &str = "sessionsCompleted";
    pub const TOTAL_FOCUS_MINUTES: &str = "totalFocusMinutes";
    pub const TIMER_STATE: &str = "timer_state_v2";
    pub const THEME: &str = "theme";
}

/// Raw string storage underneath the adapter.
pub trait KvBackend: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// All stored keys, sorted.
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

/// Cloneable handle over a shared backend.
#[derive(Clone)]
pub struct LocalStore {
    backend: Arc<dyn KvBackend>,
}

impl LocalStore {
    pub fn new<B: KvBackend + 'static>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Store backed by process memory only.
    pub fn in_memory() -> Self {
        Self::new(super::MemoryBackend::new())
    }

    /// Open the SQLite-backed store in the data directory.
    ///
    /// # Errors
    /// Returns an error if the data directory or database cannot be opened.
    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self::new(super::SqliteBackend::open()?))
    }

    /// Deserialize the value under `key`, or return `default`.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read persisted value, using default");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to parse persisted value, using default");
                default
            }
        }
    }

    /// Serialize `value` and write it under `key`. Failures are logged only.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to serialize value, not saved");
                return;
            }
        };

        if let Err(e) = self.backend.set(key, &json) {
            tracing::warn!(key, error = %e, "failed to save value");
        }
    }

    /// Raw JSON text under `key`, if readable.
    pub fn load_raw(&self, key: &str) -> Option<String> {
        match self.backend.get(key) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read persisted value");
                None
            }
        }
    }

    pub fn remove(&self, key: &str) {
        if let Err(e) = self.backend.remove(key) {
            tracing::warn!(key, error = %e, "failed to remove value");
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.backend.keys().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to list keys");
            Vec::new()
        })
    }
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStore").finish_non_exhaustive()
    }
}
