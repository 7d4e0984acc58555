// Application state module
// Immutable per-process state shared by all connection tasks

use std::sync::atomic::AtomicBool;

use crate::ai::ModelClient;

use super::types::Config;

/// Application state
///
/// Built once in `main` from the loaded configuration and passed explicitly
/// into every handler; nothing here mutates after startup except the cached
/// flag, which exists for lock-free reads on the hot path.
pub struct AppState {
    pub config: Config,
    pub ai: ModelClient,

    // Cached config value for fast access without locks
    pub cached_access_log: AtomicBool,
}

impl AppState {
    /// Create `AppState` from the loaded configuration
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let ai = ModelClient::new(&config.ai)?;
        let cached_access_log = AtomicBool::new(config.logging.access_log);

        Ok(Self {
            config,
            ai,
            cached_access_log,
        })
    }
}
