//! Platform glue that has no cross-platform crate equivalent.
//!
//! On macOS a handful of Edit-menu commands (paste-and-match-style, delete,
//! the Speech submenu) are first-responder actions with no muda role; they
//! are sent down the responder chain via `sendAction:to:from:`. Other
//! platforms omit those menu entries, so the fallbacks are unreachable and
//! exist only to keep call sites clean.

use crate::menu::ResponderAction;

#[cfg(target_os = "macos")]
pub fn perform_responder_action(action: ResponderAction) {
    use cocoa::appkit::NSApp;
    use cocoa::base::{id, nil};
    use objc::runtime::BOOL;
    use objc::{msg_send, sel, sel_impl};

    let selector = match action {
        ResponderAction::PasteAndMatchStyle => sel!(pasteAsPlainText:),
        ResponderAction::Delete => sel!(delete:),
        ResponderAction::StartSpeaking => sel!(startSpeaking:),
        ResponderAction::StopSpeaking => sel!(stopSpeaking:),
    };

    unsafe {
        let app: id = NSApp();
        let _: BOOL = msg_send![app, sendAction: selector to: nil from: nil];
    }
}

#[cfg(not(target_os = "macos"))]
pub fn perform_responder_action(action: ResponderAction) {
    tracing::warn!(?action, "Responder action invoked on a platform without a responder chain");
}
