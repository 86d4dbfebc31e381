//! Global show/hide shortcut.
//!
//! The accelerator comes from `settings.json` (`keybindings.globalToggleWindow`)
//! and is registered system-wide. Registration failure (the combination is
//! already claimed by another application, or the platform refuses it) is
//! logged and otherwise ignored; the shell runs fine without the shortcut.

use global_hotkey::hotkey::HotKey;
use global_hotkey::GlobalHotKeyManager;
use tracing::{info, warn};

/// What the toggle should do, given the window's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAction {
    /// Window is visible and focused: hide it.
    Hide,
    /// Window is hidden, unfocused, or minimized: bring it forward.
    Show {
        /// Un-minimize before showing.
        restore_first: bool,
    },
}

/// Pure toggle decision. Visible-and-focused hides; anything else shows,
/// restoring first when minimized.
pub fn toggle_action(visible: bool, focused: bool, minimized: bool) -> ToggleAction {
    if visible && focused {
        ToggleAction::Hide
    } else {
        ToggleAction::Show {
            restore_first: minimized,
        }
    }
}

/// Registered global shortcut, kept alive for the process lifetime.
///
/// The manager must outlive the registration; dropping it unregisters the
/// hotkey, so the controller owns this for as long as the window exists.
pub struct GlobalToggle {
    _manager: GlobalHotKeyManager,
    pub hotkey_id: u32,
}

/// Register the global toggle shortcut, if one is configured.
///
/// Returns `None` when no accelerator is configured, when it fails to parse,
/// or when the OS rejects the registration. Only the last two are logged.
pub fn register_global_toggle(accelerator: Option<&str>) -> Option<GlobalToggle> {
    let accelerator = accelerator?;

    let hotkey: HotKey = match accelerator.parse() {
        Ok(hk) => hk,
        Err(e) => {
            warn!(
                accelerator,
                error = %e,
                "Failed to parse global toggle shortcut"
            );
            return None;
        }
    };

    let manager = match GlobalHotKeyManager::new() {
        Ok(m) => m,
        Err(e) => {
            warn!(error = %e, "Failed to create global hotkey manager");
            return None;
        }
    };

    let hotkey_id = hotkey.id();
    if let Err(e) = manager.register(hotkey) {
        warn!(
            accelerator,
            error = %e,
            "Failed to register global toggle shortcut"
        );
        return None;
    }

    info!(accelerator, hotkey_id, "Registered global toggle shortcut");
    Some(GlobalToggle {
        _manager: manager,
        hotkey_id,
    })
}
