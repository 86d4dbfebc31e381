//! Application menu: pure model + platform installation.
//!
//! The menu is computed as plain data from the last-known [`StateFlags`]
//! snapshot (`model`), then materialized as a `muda` tree and installed as
//! the process-wide application menu (`install`). The split keeps every
//! enabled/visible/label rule testable without a windowing system.

pub mod install;
pub mod model;

pub use install::{build, install_application_menu, InstalledMenu};
pub use model::{
    ActionItem, CheckItem, MenuAction, MenuContext, MenuEntry, MenuModel, NativeRole, Platform,
    ResponderAction, SubmenuModel,
};

/// Product links used by the Help menu.
pub const HOMEPAGE_URL: &str = "https://github.com/inkpad-app/inkpad";
pub const SUPPORT_URL: &str = "https://github.com/inkpad-app/inkpad/issues";
pub const CHANGELOG_URL: &str = "https://github.com/inkpad-app/inkpad/blob/master/CHANGELOG.md";
pub const LICENSE_URL: &str = "https://github.com/inkpad-app/inkpad/blob/master/LICENSE";

/// Product name shown in the app menu and About panel.
pub const PRODUCT_NAME: &str = "Inkpad";
