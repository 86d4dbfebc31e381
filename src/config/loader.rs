//! Settings loading from the file system.
//!
//! A missing file yields defaults silently; an unreadable or malformed file
//! yields defaults with a logged warning, so a typo in `settings.json` never
//! prevents the shell from starting.

use std::env;
use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use super::types::Settings;

/// Resolve the config directory: `INKPAD_CONFIG_DIR` if set, else
/// `~/.inkpad`, else a temp-dir fallback for homeless environments.
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = env::var("INKPAD_CONFIG_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    dirs::home_dir()
        .map(|h| h.join(".inkpad"))
        .unwrap_or_else(|| env::temp_dir().join("inkpad"))
}

/// Path of the settings file.
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Tests that mutate `INKPAD_CONFIG_DIR` must hold this guard; the process
/// environment is shared across test threads.
#[cfg(test)]
pub(crate) fn env_guard() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();
    LOCK.get_or_init(|| std::sync::Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Load settings, falling back to defaults on any failure.
pub fn load_settings() -> Settings {
    let path = settings_path();

    if !path.exists() {
        info!(path = %path.display(), "Settings file not found, using defaults");
        return Settings::default();
    }

    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read settings, using defaults");
            return Settings::default();
        }
    };

    match serde_json::from_slice::<Settings>(&bytes) {
        Ok(settings) => {
            info!(path = %path.display(), "Loaded settings");
            settings
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to parse settings, using defaults");
            Settings::default()
        }
    }
}
