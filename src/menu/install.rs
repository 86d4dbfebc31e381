//! Materialize a [`MenuModel`] as a muda menu and install it process-wide.
//!
//! The installed application menu is global to the process: one menu shared
//! by every window of this application, replaced wholesale on each rebuild.

use std::collections::HashMap;

use anyhow::{Context, Result};
use muda::accelerator::Accelerator;
use muda::{
    AboutMetadata, CheckMenuItem, Menu, MenuId, MenuItem, PredefinedMenuItem, Submenu,
};
use tracing::warn;

use super::model::{MenuAction, MenuEntry, MenuModel, NativeRole, SubmenuModel};
use super::PRODUCT_NAME;

/// A built menu plus the id -> action map used to dispatch its click events.
pub struct InstalledMenu {
    pub menu: Menu,
    pub actions: HashMap<MenuId, MenuAction>,
}

/// Build the muda tree for a model.
pub fn build(model: &MenuModel) -> Result<InstalledMenu> {
    let menu = Menu::new();
    let mut actions = HashMap::new();

    for group in &model.groups {
        let submenu = build_submenu(group, &mut actions)?;
        menu.append(&submenu)
            .with_context(|| format!("append top-level menu '{}'", group.label))?;
    }

    Ok(InstalledMenu { menu, actions })
}

fn build_submenu(
    model: &SubmenuModel,
    actions: &mut HashMap<MenuId, MenuAction>,
) -> Result<Submenu> {
    let submenu = Submenu::new(&model.label, model.enabled);

    for entry in &model.entries {
        match entry {
            MenuEntry::Separator => submenu
                .append(&PredefinedMenuItem::separator())
                .context("append separator")?,
            MenuEntry::Native(role) => submenu
                .append(&native_item(*role))
                .with_context(|| format!("append native item {:?}", role))?,
            MenuEntry::Action(item) => {
                let muda_item = MenuItem::with_id(
                    item.id,
                    &item.label,
                    item.enabled,
                    parse_accelerator(item.id, item.accelerator),
                );
                actions.insert(muda_item.id().clone(), item.action.clone());
                submenu
                    .append(&muda_item)
                    .with_context(|| format!("append item '{}'", item.id))?;
            }
            MenuEntry::Check(item) => {
                let muda_item =
                    CheckMenuItem::with_id(item.id, &item.label, true, item.checked, None);
                actions.insert(muda_item.id().clone(), item.action.clone());
                submenu
                    .append(&muda_item)
                    .with_context(|| format!("append check item '{}'", item.id))?;
            }
            MenuEntry::Submenu(sub) => {
                let child = build_submenu(sub, actions)?;
                submenu
                    .append(&child)
                    .with_context(|| format!("append submenu '{}'", sub.label))?;
            }
        }
    }

    Ok(submenu)
}

fn native_item(role: NativeRole) -> PredefinedMenuItem {
    match role {
        NativeRole::About => PredefinedMenuItem::about(
            Some(&format!("About {}", PRODUCT_NAME)),
            Some(AboutMetadata {
                name: Some(PRODUCT_NAME.into()),
                version: Some(env!("CARGO_PKG_VERSION").into()),
                website: Some(super::HOMEPAGE_URL.into()),
                ..Default::default()
            }),
        ),
        NativeRole::Services => PredefinedMenuItem::services(None),
        NativeRole::Hide => PredefinedMenuItem::hide(None),
        NativeRole::HideOthers => PredefinedMenuItem::hide_others(None),
        NativeRole::ShowAll => PredefinedMenuItem::show_all(None),
        NativeRole::Quit => PredefinedMenuItem::quit(None),
        NativeRole::Undo => PredefinedMenuItem::undo(None),
        NativeRole::Redo => PredefinedMenuItem::redo(None),
        NativeRole::Cut => PredefinedMenuItem::cut(None),
        NativeRole::Copy => PredefinedMenuItem::copy(None),
        NativeRole::Paste => PredefinedMenuItem::paste(None),
        NativeRole::SelectAll => PredefinedMenuItem::select_all(None),
        NativeRole::CloseWindow => PredefinedMenuItem::close_window(None),
        NativeRole::Minimize => PredefinedMenuItem::minimize(None),
        NativeRole::Maximize => PredefinedMenuItem::maximize(Some("Zoom")),
        NativeRole::Fullscreen => PredefinedMenuItem::fullscreen(None),
        NativeRole::BringAllToFront => PredefinedMenuItem::bring_all_to_front(None),
    }
}

fn parse_accelerator(id: &str, accel: Option<&str>) -> Option<Accelerator> {
    let accel = accel?;
    match accel.parse::<Accelerator>() {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(item = id, accelerator = accel, error = %e, "Invalid menu accelerator");
            None
        }
    }
}

/// Install a built menu as the process-wide application menu, replacing
/// `previous` if one was installed.
#[allow(unused_variables)]
pub fn install_application_menu(
    menu: &Menu,
    previous: Option<&Menu>,
    window: &tao::window::Window,
) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        menu.init_for_nsapp();
    }

    #[cfg(target_os = "windows")]
    {
        use tao::platform::windows::WindowExtWindows;
        let hwnd = window.hwnd() as isize;
        if let Some(previous) = previous {
            let _ = unsafe { previous.remove_for_hwnd(hwnd) };
        }
        unsafe { menu.init_for_hwnd(hwnd) }.context("install menu for hwnd")?;
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        use tao::platform::unix::WindowExtUnix;
        let gtk_window = window.gtk_window();
        if let Some(previous) = previous {
            let _ = previous.remove_for_gtk_window(gtk_window);
        }
        menu.init_for_gtk_window(gtk_window, window.default_vbox())
            .context("install menu for gtk window")?;
    }

    Ok(())
}
