mod config;
pub mod database;
pub mod local_store;
pub mod memory;

pub use config::{Config, NotificationsConfig, TimerConfig, UiConfig};
pub use database::SqliteBackend;
pub use local_store::{keys, KvBackend, LocalStore};
pub use memory::MemoryBackend;

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns the FlowSpace data directory, creating it if needed.
///
/// `FLOWSPACE_DATA_DIR` wins when set. Otherwise `~/.config/flowspace[-dev]/`
/// based on `FLOWSPACE_ENV` (`dev` selects the development directory).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("FLOWSPACE_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("FLOWSPACE_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("flowspace-dev")
            } else {
                base_dir.join("flowspace")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(StorageError::DataDir)?;
    Ok(dir)
}
