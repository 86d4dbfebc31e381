//! Settings struct definitions.
//!
//! Every field has a serde default so a partial `settings.json` (or none at
//! all) resolves to a complete `Settings` value.

use serde::Deserialize;

use super::defaults::{
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH,
};

/// Top-level shell settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub keybindings: KeybindingsSettings,
    pub window: WindowSettings,
    /// URL the main webview loads. When absent a bundled placeholder page is
    /// used, which is only useful for development.
    pub ui_url: Option<String>,
}

/// User-configurable keyboard shortcuts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeybindingsSettings {
    /// System-wide accelerator that toggles main-window visibility, in
    /// Electron notation (e.g. `"CmdOrCtrl+Alt+N"`). Absent means no global
    /// shortcut is registered.
    pub global_toggle_window: Option<String>,
}

/// Main-window geometry preferences.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WindowSettings {
    pub width: f64,
    pub height: f64,
    pub min_width: f64,
    pub min_height: f64,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
            min_width: MIN_WINDOW_WIDTH,
            min_height: MIN_WINDOW_HEIGHT,
        }
    }
}
