//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Default main-window size
pub const DEFAULT_WINDOW_WIDTH: f64 = 850.0;
pub const DEFAULT_WINDOW_HEIGHT: f64 = 525.0;

/// Minimum main-window size
pub const MIN_WINDOW_WIDTH: f64 = 685.0;
pub const MIN_WINDOW_HEIGHT: f64 = 425.0;

/// Webview zoom handling for the View menu actions
pub const ZOOM_DEFAULT: f64 = 1.0;
pub const ZOOM_STEP: f64 = 0.1;
pub const ZOOM_MIN: f64 = 0.3;
pub const ZOOM_MAX: f64 = 3.0;

/// Delay between the webview finishing its base load and the shell signalling
/// ready + registering the global shortcut. Gives the renderer skeleton a
/// chance to paint before heavier work runs.
pub const POST_LOAD_DELAY_MS: u64 = 500;
