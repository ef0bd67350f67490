pub mod config;
pub mod note;
pub mod stats;
pub mod task;
pub mod theme;
pub mod timer;

use flowspace_core::error::Result as CoreResult;
use flowspace_core::{AppContext, Config, LocalStore};
use serde::Serialize;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Configuration plus the loaded application context.
pub struct Workspace {
    pub config: Config,
    pub ctx: AppContext,
}

/// Open the persisted store in the data directory.
pub fn open_workspace() -> CoreResult<Workspace> {
    let config = Config::load_or_default();
    let store = LocalStore::open_default()?;
    let ctx = AppContext::load(store, &config);
    Ok(Workspace { config, ctx })
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One compact JSON object per line, for streamed output.
pub fn print_json_line<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string(value) {
        Ok(line) => println!("{line}"),
        Err(e) => tracing::warn!(error = %e, "failed to serialize event"),
    }
}
