//! Configuration module - shell settings and user preferences
//!
//! - `defaults` - default constant values
//! - `types` - settings struct definitions
//! - `loader` - file system loading and parsing
//!
//! Settings live in `settings.json` under the config directory
//! (`~/.inkpad`, overridable with `INKPAD_CONFIG_DIR`).

mod defaults;
mod loader;
mod types;

pub use defaults::{
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH,
    POST_LOAD_DELAY_MS, ZOOM_DEFAULT, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP,
};
pub use loader::{config_dir, load_settings, settings_path};

#[cfg(test)]
pub(crate) use loader::env_guard;
pub use types::{KeybindingsSettings, Settings, WindowSettings};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
