//! Inkpad shell - the native window host for the Inkpad note-taking app.
//!
//! This library owns the main window and its webview, the flags-driven
//! application menu, the global show/hide shortcut, and the print-to-PDF
//! helper. The renderer UI is an external collaborator reached only through
//! the one-way message channel defined in [`protocol`].

pub mod config;
pub mod error;
pub mod events;
pub mod hotkey;
pub mod logging;
pub mod menu;
pub mod pdf;
pub mod platform;
pub mod protocol;
pub mod window;
pub mod window_state;
