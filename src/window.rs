//! Main window controller.
//!
//! Owns the native window and its webview, the last-known state flags, and
//! the installed application menu. All mutation happens on the event-loop
//! thread; webview callbacks only post [`AppEvent`]s back through the proxy.

use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use tao::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use tao::event_loop::{EventLoopProxy, EventLoopWindowTarget};
use tao::window::{Window, WindowBuilder, WindowId};
use tracing::{debug, error, info, warn};
use wry::{PageLoadEvent, WebView, WebViewBuilder};

use crate::config::{Settings, ZOOM_DEFAULT, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};
use crate::error::ResultExt;
use crate::events::AppEvent;
use crate::hotkey::{toggle_action, ToggleAction};
use crate::menu::{
    self, InstalledMenu, MenuAction, MenuContext, MenuModel, Platform, PRODUCT_NAME,
};
use crate::platform;
use crate::protocol::{OutboundMessage, RendererRequest, StateFlags};
use crate::window_state::{self, PersistedBounds};

/// Bridge installed into every page; the renderer talks to the shell through
/// `window.__INKPAD__.send` and receives messages via `.on`/`.dispatch`.
const INIT_SCRIPT: &str = r#"
(function () {
  if (window.__INKPAD__) return;
  const listeners = {};
  window.__INKPAD__ = {
    on: function (channel, fn) {
      (listeners[channel] || (listeners[channel] = [])).push(fn);
    },
    dispatch: function (msg) {
      const subs = listeners[msg.channel] || [];
      for (const fn of subs) fn(msg.payload);
      window.dispatchEvent(new CustomEvent('inkpad:' + msg.channel, { detail: msg.payload }));
    },
    send: function (message) {
      window.ipc.postMessage(JSON.stringify(message));
    },
  };
})();
"#;

/// Shown when no renderer bundle is configured (`uiUrl` unset).
const PLACEHOLDER_HTML: &str = r#"<!doctype html>
<html>
  <head><meta charset="utf-8"><title>Inkpad</title></head>
  <body style="font-family: system-ui; display: flex; align-items: center; justify-content: center; height: 100vh; margin: 0;">
    <div style="text-align: center; color: #555;">
      <h1>Inkpad</h1>
      <p>No renderer configured. Set <code>uiUrl</code> in settings.json.</p>
    </div>
  </body>
</html>
"#;

/// Whether a requested navigation leaves the current document and must be
/// routed to the system default handler instead of the in-app webview.
pub fn should_open_externally(current_url: &str, requested: &str) -> bool {
    requested != current_url
}

/// Create a webview builder bound to a window. Linux goes through the gtk
/// vbox, everything else through the raw window handle.
pub fn new_webview_builder(window: &Window) -> WebViewBuilder<'_> {
    #[cfg(not(target_os = "linux"))]
    {
        WebViewBuilder::new(window)
    }
    #[cfg(target_os = "linux")]
    {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window
            .default_vbox()
            .expect("tao gtk windows always carry a default vbox");
        WebViewBuilder::new_gtk(vbox)
    }
}

pub struct WindowController {
    window: Window,
    webview: WebView,
    last_flags: Option<StateFlags>,
    installed_menu: Option<InstalledMenu>,
    always_on_top: bool,
    is_fullscreen: bool,
    zoom: f64,
}

impl WindowController {
    /// Create the main window, its webview, and install the baseline menu.
    pub fn new(
        target: &EventLoopWindowTarget<AppEvent>,
        proxy: EventLoopProxy<AppEvent>,
        settings: &Settings,
    ) -> Result<Self> {
        let mut builder = WindowBuilder::new()
            .with_title(PRODUCT_NAME)
            .with_inner_size(LogicalSize::new(
                settings.window.width,
                settings.window.height,
            ))
            .with_min_inner_size(LogicalSize::new(
                settings.window.min_width,
                settings.window.min_height,
            ));

        if let Some(saved) = window_state::load_main_bounds() {
            debug!(?saved, "Restoring saved window bounds");
            builder = builder
                .with_position(PhysicalPosition::new(saved.x as i32, saved.y as i32))
                .with_inner_size(PhysicalSize::new(saved.width as u32, saved.height as u32));
        }

        let window = builder.build(target).context("create main window")?;

        let webview = Self::build_main_webview(&window, proxy, settings)?;

        let mut controller = Self {
            window,
            webview,
            last_flags: None,
            installed_menu: None,
            always_on_top: false,
            is_fullscreen: false,
            zoom: ZOOM_DEFAULT,
        };
        controller.rebuild_menu();
        Ok(controller)
    }

    fn build_main_webview(
        window: &Window,
        proxy: EventLoopProxy<AppEvent>,
        settings: &Settings,
    ) -> Result<WebView> {
        // Updated by the page-load callback; read by the navigation guards.
        let current_url: Arc<Mutex<String>> = Arc::new(Mutex::new(String::new()));

        let ipc_proxy = proxy.clone();
        let load_proxy = proxy.clone();
        let nav_proxy = proxy.clone();
        let popup_proxy = proxy;
        let load_url = current_url.clone();
        let nav_url = current_url.clone();
        let popup_url = current_url;

        let builder = new_webview_builder(window)
            .with_devtools(true)
            .with_initialization_script(INIT_SCRIPT)
            .with_ipc_handler(move |request| {
                match serde_json::from_str::<RendererRequest>(request.body()) {
                    Ok(req) => {
                        ipc_proxy.send_event(AppEvent::Renderer(req)).warn_on_err();
                    }
                    Err(e) => warn!(error = %e, "Dropping malformed renderer message"),
                }
            })
            .with_on_page_load_handler(move |event, url| {
                if matches!(event, PageLoadEvent::Finished) {
                    *load_url.lock() = url;
                    load_proxy.send_event(AppEvent::MainPageLoaded).warn_on_err();
                }
            })
            .with_navigation_handler(move |url| {
                let current = nav_url.lock().clone();
                // The first load has no current document yet; let it through.
                if current.is_empty() || !should_open_externally(&current, &url) {
                    return true;
                }
                nav_proxy
                    .send_event(AppEvent::OpenExternal(url))
                    .warn_on_err();
                false
            })
            .with_new_window_req_handler(move |url| {
                let current = popup_url.lock().clone();
                if should_open_externally(&current, &url) {
                    popup_proxy
                        .send_event(AppEvent::OpenExternal(url))
                        .warn_on_err();
                }
                // The shell never opens renderer-spawned windows in-app.
                false
            });

        let builder = match &settings.ui_url {
            Some(url) => builder.with_url(url.clone()),
            None => builder.with_html(PLACEHOLDER_HTML),
        };

        builder.build().context("create main webview")
    }

    pub fn window_id(&self) -> WindowId {
        self.window.id()
    }

    // ------------------------------------------------------------------
    // Renderer channel
    // ------------------------------------------------------------------

    /// Forward a fire-and-forget message to the renderer.
    pub fn send(&self, message: &OutboundMessage) {
        debug!(channel = message.channel(), "Forwarding message to renderer");
        self.webview
            .evaluate_script(&message.to_dispatch_script())
            .warn_on_err();
    }

    /// Whole-record flags replacement; retains the snapshot and rebuilds the
    /// menu from it.
    pub fn update_flags(&mut self, flags: StateFlags) {
        self.last_flags = Some(flags);
        self.rebuild_menu();
    }

    /// Recompute the menu from the last-known flags and install it as the
    /// process-wide application menu, replacing the previous one.
    pub fn rebuild_menu(&mut self) {
        let ctx = MenuContext {
            platform: Platform::current(),
            always_on_top: self.always_on_top,
        };
        let model = MenuModel::compute(self.last_flags.as_ref(), &ctx);

        match menu::build(&model) {
            Ok(installed) => {
                let previous = self.installed_menu.as_ref().map(|m| &m.menu);
                if menu::install_application_menu(&installed.menu, previous, &self.window)
                    .log_err()
                    .is_some()
                {
                    self.installed_menu = Some(installed);
                }
            }
            Err(e) => error!(error = %e, "Failed to build application menu"),
        }
    }

    // ------------------------------------------------------------------
    // Menu dispatch
    // ------------------------------------------------------------------

    pub fn handle_menu_event(&mut self, event: &muda::MenuEvent) {
        let action = self
            .installed_menu
            .as_ref()
            .and_then(|m| m.actions.get(event.id()).cloned());
        match action {
            Some(action) => self.apply_menu_action(action),
            None => debug!(id = ?event.id(), "Menu event with no registered action"),
        }
    }

    fn apply_menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::Send(message) => self.send(&message),
            MenuAction::OpenExternal(url) => {
                open::that_detached(url).warn_on_err();
            }
            MenuAction::ToggleAlwaysOnTop => {
                self.always_on_top = !self.always_on_top;
                self.window.set_always_on_top(self.always_on_top);
            }
            MenuAction::ToggleDevtools => {
                if self.webview.is_devtools_open() {
                    self.webview.close_devtools();
                } else {
                    self.webview.open_devtools();
                }
            }
            MenuAction::ZoomIn => self.apply_zoom(self.zoom + ZOOM_STEP),
            MenuAction::ZoomOut => self.apply_zoom(self.zoom - ZOOM_STEP),
            MenuAction::ZoomReset => self.apply_zoom(ZOOM_DEFAULT),
            MenuAction::Responder(responder) => platform::perform_responder_action(responder),
        }
    }

    fn apply_zoom(&mut self, level: f64) {
        self.zoom = level.clamp(ZOOM_MIN, ZOOM_MAX);
        self.webview.zoom(self.zoom).warn_on_err();
    }

    // ------------------------------------------------------------------
    // Window lifecycle
    // ------------------------------------------------------------------

    /// Global-shortcut toggle: hide when visible and focused, otherwise
    /// restore (if minimized), show, and focus.
    pub fn toggle_visibility(&self) {
        let decision = toggle_action(
            self.window.is_visible(),
            self.window.is_focused(),
            self.window.is_minimized(),
        );
        match decision {
            ToggleAction::Hide => {
                info!("Global toggle: hiding window");
                self.persist_bounds();
                self.window.set_visible(false);
            }
            ToggleAction::Show { restore_first } => {
                info!(restore_first, "Global toggle: showing window");
                if restore_first {
                    self.window.set_minimized(false);
                }
                self.window.set_visible(true);
                self.window.set_focus();
            }
        }
    }

    /// Sample the fullscreen state and forward a change to the renderer.
    /// Called on resize events; tao has no dedicated fullscreen event.
    pub fn sync_fullscreen(&mut self) {
        let now = self.window.fullscreen().is_some();
        if now != self.is_fullscreen {
            self.is_fullscreen = now;
            self.send(&OutboundMessage::WindowFullscreenSet(now));
        }
    }

    /// Persist current windowed bounds (no-op while fullscreen/minimized).
    pub fn persist_bounds(&self) {
        if self.window.fullscreen().is_some() || self.window.is_minimized() {
            return;
        }
        let Ok(position) = self.window.outer_position() else {
            return;
        };
        let size = self.window.inner_size();
        window_state::save_main_bounds(PersistedBounds {
            x: position.x as f64,
            y: position.y as f64,
            width: size.width as f64,
            height: size.height as f64,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::should_open_externally;

    const APP_URL: &str = "http://localhost:3000/index.html";

    #[test]
    fn same_url_stays_in_app() {
        assert!(!should_open_externally(APP_URL, APP_URL));
    }

    #[test]
    fn different_url_goes_external() {
        assert!(should_open_externally(APP_URL, "https://example.com/docs"));
    }

    #[test]
    fn fragment_or_query_differences_count_as_external() {
        // The guard compares whole URLs, exactly like the product contract.
        assert!(should_open_externally(
            APP_URL,
            "http://localhost:3000/index.html?tab=1"
        ));
    }
}
