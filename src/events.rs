//! User events injected into the tao event loop.
//!
//! Everything reactive in the shell funnels through this enum: muda menu
//! clicks, global hotkey presses, renderer IPC, and the print-job and load
//! milestones posted back from webview callbacks.

use crate::protocol::RendererRequest;

#[derive(Debug)]
pub enum AppEvent {
    /// A menu item was clicked.
    Menu(muda::MenuEvent),
    /// A registered global hotkey fired.
    HotKey(global_hotkey::GlobalHotKeyEvent),
    /// The renderer posted a message over the IPC bridge.
    Renderer(RendererRequest),
    /// A guarded navigation should open in the system default handler.
    OpenExternal(String),
    /// The main webview finished its base load.
    MainPageLoaded,
    /// Fires once, a fixed delay after [`AppEvent::MainPageLoaded`].
    FinishedLoading,
    /// A print job's hidden webview finished loading its content.
    PrintPageLoaded(u64),
}
