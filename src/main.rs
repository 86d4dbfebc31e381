//! Inkpad shell entry point.
//!
//! Wires the tao event loop: window events, muda menu events, global hotkey
//! presses, and renderer IPC all arrive here and are dispatched to the
//! window controller or the PDF helper. The loop is the single writer of
//! all shell state (installed menu, last-known flags, print-job registry).

use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use global_hotkey::HotKeyState;
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder};
use tracing::{error, info};

use inkpad_shell::config::{self, POST_LOAD_DELAY_MS};
use inkpad_shell::error::ResultExt;
use inkpad_shell::events::AppEvent;
use inkpad_shell::hotkey::{self, GlobalToggle};
use inkpad_shell::logging;
use inkpad_shell::pdf::{self, ActiveJob};
use inkpad_shell::protocol::RendererRequest;
use inkpad_shell::window::WindowController;

fn main() -> Result<()> {
    let _guard = logging::init();
    let settings = config::load_settings();

    let event_loop = EventLoopBuilder::<AppEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    // muda and global-hotkey deliver their events on their own channels;
    // forward both into the event loop so all dispatch happens in one place.
    {
        let proxy = proxy.clone();
        thread::spawn(move || {
            let receiver = muda::MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if proxy.send_event(AppEvent::Menu(event)).is_err() {
                    break;
                }
            }
        });
    }
    {
        let proxy = proxy.clone();
        thread::spawn(move || {
            let receiver = global_hotkey::GlobalHotKeyEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if proxy.send_event(AppEvent::HotKey(event)).is_err() {
                    break;
                }
            }
        });
    }

    let mut controller = WindowController::new(&event_loop, proxy.clone(), &settings)
        .context("create main window controller")?;

    let global_accelerator = settings.keybindings.global_toggle_window.clone();
    let mut global_toggle: Option<GlobalToggle> = None;
    let mut print_jobs: HashMap<u64, ActiveJob> = HashMap::new();
    let mut load_signaled = false;

    info!("Shell ready, entering event loop");

    event_loop.run(move |event, target, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                window_id, event, ..
            } => {
                if window_id != controller.window_id() {
                    return;
                }
                match event {
                    WindowEvent::CloseRequested => {
                        controller.persist_bounds();
                        *control_flow = ControlFlow::Exit;
                    }
                    // tao has no fullscreen-changed event; sample on resize.
                    WindowEvent::Resized(_) => controller.sync_fullscreen(),
                    WindowEvent::Focused(true) => {
                        // Rebuild from the retained snapshot; no fresh push
                        // is needed to get an identical menu back.
                        controller.rebuild_menu();
                    }
                    _ => {}
                }
            }

            Event::UserEvent(app_event) => match app_event {
                AppEvent::Menu(menu_event) => controller.handle_menu_event(&menu_event),

                AppEvent::HotKey(hotkey_event) => {
                    let is_toggle = global_toggle
                        .as_ref()
                        .is_some_and(|g| g.hotkey_id == hotkey_event.id());
                    if is_toggle && hotkey_event.state() == HotKeyState::Pressed {
                        controller.toggle_visibility();
                    }
                }

                AppEvent::Renderer(RendererRequest::FlagsUpdate { flags }) => {
                    controller.update_flags(flags);
                }

                AppEvent::Renderer(RendererRequest::PrintPdf(job)) => {
                    let proxy = proxy.clone();
                    match pdf::start(job, target, move |id| {
                        let _ = proxy.send_event(AppEvent::PrintPageLoaded(id));
                    }) {
                        Ok(active) => {
                            print_jobs.insert(active.id, active);
                        }
                        // Invalid jobs are reported here and nowhere else;
                        // the requester gets no failure signal.
                        Err(e) => error!(error = %e, "Print job rejected"),
                    }
                }

                AppEvent::PrintPageLoaded(job_id) => {
                    if let Some(job) = print_jobs.remove(&job_id) {
                        pdf::complete(job);
                    }
                }

                AppEvent::OpenExternal(url) => {
                    open::that_detached(&url).warn_on_err();
                }

                AppEvent::MainPageLoaded => {
                    if !load_signaled {
                        load_signaled = true;
                        let proxy = proxy.clone();
                        thread::spawn(move || {
                            thread::sleep(Duration::from_millis(POST_LOAD_DELAY_MS));
                            let _ = proxy.send_event(AppEvent::FinishedLoading);
                        });
                    }
                }

                AppEvent::FinishedLoading => {
                    global_toggle = hotkey::register_global_toggle(global_accelerator.as_deref());
                    info!("Finished loading");
                }
            },

            _ => {}
        }
    });
}
