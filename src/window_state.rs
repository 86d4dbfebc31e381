//! Main-window bounds persistence.
//!
//! Windowed position and size are saved to `window-state.json` in the config
//! directory on move/resize and restored at startup when they still describe
//! a sane window. Validation is geometric (minimum plausible size), not
//! display-id based, so unplugging a monitor degrades to defaults instead of
//! restoring into the void.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config;

/// Smallest width/height we are willing to restore. Anything below this is
/// treated as a corrupt state file.
const MIN_PLAUSIBLE_SIZE: f64 = 100.0;

/// Persisted bounds, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersistedBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PersistedBounds {
    pub fn plausible(&self) -> bool {
        self.width >= MIN_PLAUSIBLE_SIZE
            && self.height >= MIN_PLAUSIBLE_SIZE
            && self.x.is_finite()
            && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct WindowStateFile {
    main: Option<PersistedBounds>,
}

fn state_file_path() -> PathBuf {
    config::config_dir().join("window-state.json")
}

/// Load saved main-window bounds, if present and plausible.
pub fn load_main_bounds() -> Option<PersistedBounds> {
    let path = state_file_path();
    if !path.exists() {
        return None;
    }

    let contents = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read window state");
            return None;
        }
    };

    let state: WindowStateFile = match serde_json::from_str(&contents) {
        Ok(s) => s,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to parse window state");
            return None;
        }
    };

    state.main.filter(|b| {
        if !b.plausible() {
            warn!(?b, "Ignoring implausible saved window bounds");
            return false;
        }
        true
    })
}

/// Save main-window bounds (atomic write: temp file, then rename).
pub fn save_main_bounds(bounds: PersistedBounds) {
    let path = state_file_path();
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!(error = %e, "Failed to create window state directory");
            return;
        }
    }

    let state = WindowStateFile {
        main: Some(bounds),
    };
    let json = match serde_json::to_string_pretty(&state) {
        Ok(j) => j,
        Err(e) => {
            warn!(error = %e, "Failed to serialize window state");
            return;
        }
    };

    let tmp_path = path.with_extension("json.tmp");
    if let Err(e) = fs::write(&tmp_path, &json) {
        warn!(error = %e, "Failed to write window state temp file");
        return;
    }
    if let Err(e) = fs::rename(&tmp_path, &path) {
        warn!(error = %e, "Failed to move window state into place");
        let _ = fs::remove_file(&tmp_path);
        return;
    }

    debug!(
        x = bounds.x,
        y = bounds.y,
        width = bounds.width,
        height = bounds.height,
        "Saved window bounds"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_temp_config<T>(f: impl FnOnce() -> T) -> T {
        let _guard = crate::config::env_guard();
        let prev = std::env::var("INKPAD_CONFIG_DIR").ok();
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("INKPAD_CONFIG_DIR", dir.path());
        let out = f();
        match prev {
            Some(v) => std::env::set_var("INKPAD_CONFIG_DIR", v),
            None => std::env::remove_var("INKPAD_CONFIG_DIR"),
        }
        out
    }

    #[test]
    fn round_trips_bounds() {
        with_temp_config(|| {
            assert!(load_main_bounds().is_none());

            let bounds = PersistedBounds {
                x: 120.0,
                y: 80.0,
                width: 900.0,
                height: 600.0,
            };
            save_main_bounds(bounds);
            assert_eq!(load_main_bounds(), Some(bounds));
        });
    }

    #[test]
    fn implausible_bounds_are_ignored() {
        with_temp_config(|| {
            save_main_bounds(PersistedBounds {
                x: 0.0,
                y: 0.0,
                width: 3.0,
                height: 2.0,
            });
            assert!(load_main_bounds().is_none());
        });
    }

    #[test]
    fn corrupt_state_file_is_ignored() {
        with_temp_config(|| {
            let path = state_file_path();
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "][ nonsense").unwrap();
            assert!(load_main_bounds().is_none());
        });
    }
}
