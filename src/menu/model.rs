//! Pure menu model computed from state flags.
//!
//! `MenuModel::compute` is a pure function: identical inputs always produce
//! an identical model. Items whose visibility predicate is false are omitted
//! from the model entirely (there is no hidden-but-present state), and
//! platform-conditional items are omitted on other platforms rather than
//! disabled. The boolean availability rules per item are the product's
//! keyboard-shortcut/menu contract; treat every expression here as load-bearing.

use crate::protocol::{OutboundMessage, StateFlags};

use super::{CHANGELOG_URL, HOMEPAGE_URL, LICENSE_URL, PRODUCT_NAME, SUPPORT_URL};

// ============================================================================
// Types
// ============================================================================

/// Target platform family, for platform-conditional menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOS,
    Windows,
    Linux,
}

impl Platform {
    pub fn current() -> Self {
        #[cfg(target_os = "macos")]
        {
            Platform::MacOS
        }
        #[cfg(target_os = "windows")]
        {
            Platform::Windows
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            Platform::Linux
        }
    }

    pub fn is_macos(self) -> bool {
        self == Platform::MacOS
    }
}

/// What a menu item does when clicked.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuAction {
    /// Forward a fire-and-forget message to the renderer.
    Send(OutboundMessage),
    /// Open a URL with the system default handler.
    OpenExternal(&'static str),
    /// Toggle the main window's always-on-top state.
    ToggleAlwaysOnTop,
    /// Toggle the webview devtools.
    ToggleDevtools,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    /// macOS first-responder action muda has no role for.
    Responder(ResponderAction),
}

/// Actions sent down the macOS responder chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponderAction {
    PasteAndMatchStyle,
    Delete,
    StartSpeaking,
    StopSpeaking,
}

/// Standard roles delegated to the platform menu implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeRole {
    About,
    Services,
    Hide,
    HideOthers,
    ShowAll,
    Quit,
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,
    CloseWindow,
    Minimize,
    /// macOS window "Zoom".
    Maximize,
    Fullscreen,
    BringAllToFront,
}

/// A clickable item dispatching a [`MenuAction`].
#[derive(Debug, Clone, PartialEq)]
pub struct ActionItem {
    /// Stable identifier, used as the muda menu id.
    pub id: &'static str,
    pub label: String,
    /// Electron-style accelerator string, parsed at install time.
    pub accelerator: Option<&'static str>,
    pub enabled: bool,
    pub action: MenuAction,
}

/// A checkbox item.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckItem {
    pub id: &'static str,
    pub label: String,
    pub checked: bool,
    pub action: MenuAction,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuEntry {
    Action(ActionItem),
    Check(CheckItem),
    Native(NativeRole),
    Separator,
    Submenu(SubmenuModel),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmenuModel {
    pub label: String,
    pub enabled: bool,
    pub entries: Vec<MenuEntry>,
}

impl SubmenuModel {
    fn new(label: impl Into<String>, entries: Vec<MenuEntry>) -> Self {
        Self {
            label: label.into(),
            enabled: true,
            entries,
        }
    }
}

/// The full application menu as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuModel {
    pub groups: Vec<SubmenuModel>,
}

/// Shell state the menu depends on besides the flags.
#[derive(Debug, Clone, Copy)]
pub struct MenuContext {
    pub platform: Platform,
    pub always_on_top: bool,
}

impl Default for MenuContext {
    fn default() -> Self {
        Self {
            platform: Platform::current(),
            always_on_top: false,
        }
    }
}

// ============================================================================
// Construction helpers
// ============================================================================

fn send(
    id: &'static str,
    label: impl Into<String>,
    accelerator: Option<&'static str>,
    enabled: bool,
    message: OutboundMessage,
) -> MenuEntry {
    MenuEntry::Action(ActionItem {
        id,
        label: label.into(),
        accelerator,
        enabled,
        action: MenuAction::Send(message),
    })
}

fn action(
    id: &'static str,
    label: impl Into<String>,
    accelerator: Option<&'static str>,
    action: MenuAction,
) -> MenuEntry {
    MenuEntry::Action(ActionItem {
        id,
        label: label.into(),
        accelerator,
        enabled: true,
        action,
    })
}

// ============================================================================
// Model computation
// ============================================================================

impl MenuModel {
    /// Compute the menu for the given flags snapshot.
    ///
    /// `flags` is `None` until the renderer has pushed its first
    /// `flags-update`; flag-dependent items are then disabled and
    /// flag-gated visibility resolves to hidden.
    pub fn compute(flags: Option<&StateFlags>, ctx: &MenuContext) -> Self {
        let have = flags.is_some();
        let f = flags.copied().unwrap_or_default();
        let macos = ctx.platform.is_macos();

        let groups = vec![
            Self::app_menu(have, &f, macos),
            Self::note_menu(have, &f, macos),
            Self::edit_menu(macos),
            Self::view_menu(),
            Self::window_menu(ctx, macos),
            Self::help_menu(),
        ];

        Self { groups }
    }

    fn app_menu(have: bool, f: &StateFlags, macos: bool) -> SubmenuModel {
        let mut entries = vec![
            MenuEntry::Native(NativeRole::About),
            MenuEntry::Separator,
            send("import", "Import...", None, true, OutboundMessage::Import),
            MenuEntry::Submenu(SubmenuModel {
                label: "Export".into(),
                enabled: have && (f.has_note || f.is_multi_editor_editing),
                entries: vec![
                    send("export-html", "HTML", None, true, OutboundMessage::ExportHtml),
                    send(
                        "export-markdown",
                        "Markdown",
                        None,
                        true,
                        OutboundMessage::ExportMarkdown,
                    ),
                    send("export-pdf", "PDF", None, true, OutboundMessage::ExportPdf),
                ],
            }),
            MenuEntry::Separator,
            send(
                "cwd-open-in-app",
                "Open Data Directory",
                None,
                true,
                OutboundMessage::CwdOpenInApp,
            ),
            send(
                "cwd-change",
                "Change Data Directory...",
                None,
                true,
                OutboundMessage::CwdChange,
            ),
        ];

        if macos {
            entries.extend([
                MenuEntry::Separator,
                MenuEntry::Native(NativeRole::Services),
                MenuEntry::Separator,
                MenuEntry::Native(NativeRole::Hide),
                MenuEntry::Native(NativeRole::HideOthers),
                MenuEntry::Native(NativeRole::ShowAll),
            ]);
        }

        entries.push(MenuEntry::Separator);
        entries.push(MenuEntry::Native(NativeRole::Quit));

        SubmenuModel::new(PRODUCT_NAME, entries)
    }

    fn note_menu(have: bool, f: &StateFlags, macos: bool) -> SubmenuModel {
        // Shorthand for the most common gate: a note is selected and we are
        // not in multi-note editing.
        let on_note = have && f.has_note && !f.is_multi_editor_editing;

        let mut entries = vec![send(
            "note-new",
            "New",
            Some("CmdOrCtrl+N"),
            have && !f.is_multi_editor_editing,
            OutboundMessage::NoteNew,
        )];

        if have && f.has_note && f.is_note_template {
            entries.push(send(
                "note-duplicate-template",
                "New from Template",
                Some("CmdOrCtrl+Alt+Shift+N"),
                on_note && f.is_note_template,
                OutboundMessage::NoteDuplicateTemplate,
            ));
        }

        entries.extend([
            send(
                "note-duplicate",
                "Duplicate",
                Some("CmdOrCtrl+Shift+N"),
                on_note,
                OutboundMessage::NoteDuplicate,
            ),
            MenuEntry::Separator,
            send(
                "note-open-in-app",
                "Open in Default App",
                Some("CmdOrCtrl+O"),
                on_note,
                OutboundMessage::NoteOpenInApp,
            ),
            send(
                "note-reveal",
                if macos {
                    "Reveal in Finder"
                } else {
                    "Reveal in Folder"
                },
                Some("CmdOrCtrl+Alt+R"),
                on_note,
                OutboundMessage::NoteReveal,
            ),
            MenuEntry::Separator,
            send(
                "note-edit-toggle",
                if have && f.has_note && f.is_editor_editing {
                    "Stop Editing"
                } else {
                    "Edit"
                },
                Some("CmdOrCtrl+E"),
                have && f.has_note && !f.is_editor_split_view && !f.is_multi_editor_editing,
                OutboundMessage::NoteEditToggle,
            ),
            send(
                "note-edit-tags-toggle",
                if have && f.has_note && f.is_tags_editing {
                    "Stop Editing Tags"
                } else {
                    "Edit Tags"
                },
                Some("CmdOrCtrl+Shift+T"),
                on_note,
                OutboundMessage::NoteEditTagsToggle,
            ),
            send(
                "note-edit-attachments-toggle",
                if have && f.has_note && f.is_attachments_editing {
                    "Stop Editing Attachments"
                } else {
                    "Edit Attachments"
                },
                Some("CmdOrCtrl+Shift+A"),
                on_note,
                OutboundMessage::NoteEditAttachmentsToggle,
            ),
            MenuEntry::Separator,
            send(
                "note-favorite-toggle",
                if have && f.has_note && f.is_note_favorited {
                    "Unfavorite"
                } else {
                    "Favorite"
                },
                Some("CmdOrCtrl+D"),
                on_note,
                OutboundMessage::NoteFavoriteToggle,
            ),
            send(
                "note-pin-toggle",
                if have && f.has_note && f.is_note_pinned {
                    "Unpin"
                } else {
                    "Pin"
                },
                Some("CmdOrCtrl+P"),
                on_note,
                OutboundMessage::NotePinToggle,
            ),
            MenuEntry::Separator,
        ]);

        // Two Move to Trash variants with different accelerators; the active
        // editing state selects which one is present, never both.
        let trash_enabled = on_note && !f.is_note_deleted;
        if have && f.has_note && !f.is_note_deleted && !f.is_editor_editing {
            entries.push(send(
                "note-move-to-trash",
                "Move to Trash",
                Some("CmdOrCtrl+Backspace"),
                trash_enabled,
                OutboundMessage::NoteMoveToTrash,
            ));
        }
        if have && f.has_note && !f.is_note_deleted && f.is_editor_editing {
            entries.push(send(
                "note-move-to-trash-editing",
                "Move to Trash",
                Some("CmdOrCtrl+Alt+Backspace"),
                trash_enabled,
                OutboundMessage::NoteMoveToTrash,
            ));
        }
        if have && f.has_note && f.is_note_deleted {
            entries.push(send(
                "note-restore",
                "Restore",
                Some("CmdOrCtrl+Shift+Backspace"),
                have && f.has_note && f.is_note_deleted && !f.is_multi_editor_editing,
                OutboundMessage::NoteRestore,
            ));
        }
        if have && f.has_note {
            entries.push(send(
                "note-permanently-delete",
                "Permanently Delete",
                Some("CmdOrCtrl+Alt+Shift+Backspace"),
                on_note,
                OutboundMessage::NotePermanentlyDelete,
            ));
        }

        SubmenuModel::new("Note", entries)
    }

    fn edit_menu(macos: bool) -> SubmenuModel {
        let mut entries = vec![
            MenuEntry::Native(NativeRole::Undo),
            MenuEntry::Native(NativeRole::Redo),
            MenuEntry::Separator,
            MenuEntry::Native(NativeRole::Cut),
            MenuEntry::Native(NativeRole::Copy),
            MenuEntry::Native(NativeRole::Paste),
        ];

        if macos {
            entries.push(action(
                "paste-and-match-style",
                "Paste and Match Style",
                Some("CmdOrCtrl+Shift+V"),
                MenuAction::Responder(ResponderAction::PasteAndMatchStyle),
            ));
            entries.push(action(
                "delete",
                "Delete",
                None,
                MenuAction::Responder(ResponderAction::Delete),
            ));
        }

        entries.extend([
            MenuEntry::Native(NativeRole::SelectAll),
            MenuEntry::Separator,
            send(
                "multi-editor-select-all",
                "Select Notes - All",
                Some("CmdOrCtrl+Alt+A"),
                true,
                OutboundMessage::MultiEditorSelectAll,
            ),
            send(
                "multi-editor-select-invert",
                "Select Notes - Invert",
                Some("CmdOrCtrl+Alt+I"),
                true,
                OutboundMessage::MultiEditorSelectInvert,
            ),
            send(
                "multi-editor-select-clear",
                "Select Notes - Clear",
                Some("CmdOrCtrl+Alt+C"),
                true,
                OutboundMessage::MultiEditorSelectClear,
            ),
            MenuEntry::Separator,
            send(
                "trash-empty",
                "Empty Trash",
                None,
                true,
                OutboundMessage::TrashEmpty,
            ),
        ]);

        if macos {
            entries.push(MenuEntry::Separator);
            entries.push(MenuEntry::Submenu(SubmenuModel::new(
                "Speech",
                vec![
                    action(
                        "speech-start",
                        "Start Speaking",
                        None,
                        MenuAction::Responder(ResponderAction::StartSpeaking),
                    ),
                    action(
                        "speech-stop",
                        "Stop Speaking",
                        None,
                        MenuAction::Responder(ResponderAction::StopSpeaking),
                    ),
                ],
            )));
        }

        SubmenuModel::new("Edit", entries)
    }

    fn view_menu() -> SubmenuModel {
        SubmenuModel::new(
            "View",
            vec![
                action(
                    "zoom-reset",
                    "Actual Size",
                    Some("CmdOrCtrl+0"),
                    MenuAction::ZoomReset,
                ),
                action("zoom-in", "Zoom In", Some("CmdOrCtrl+="), MenuAction::ZoomIn),
                action(
                    "zoom-out",
                    "Zoom Out",
                    Some("CmdOrCtrl+-"),
                    MenuAction::ZoomOut,
                ),
                MenuEntry::Separator,
                send(
                    "window-focus-toggle",
                    "Toggle Focus Mode",
                    Some("CmdOrCtrl+Alt+F"),
                    true,
                    OutboundMessage::WindowFocusToggle,
                ),
                send(
                    "editor-split-toggle",
                    "Toggle Split View Mode",
                    Some("CmdOrCtrl+Alt+S"),
                    true,
                    OutboundMessage::EditorSplitToggle,
                ),
                MenuEntry::Native(NativeRole::Fullscreen),
            ],
        )
    }

    fn window_menu(ctx: &MenuContext, macos: bool) -> SubmenuModel {
        let mut entries = vec![
            MenuEntry::Native(NativeRole::CloseWindow),
            MenuEntry::Native(NativeRole::Minimize),
        ];

        if macos {
            entries.push(MenuEntry::Native(NativeRole::Maximize));
        }

        entries.extend([
            MenuEntry::Separator,
            send(
                "search-focus",
                "Search",
                Some("CmdOrCtrl+F"),
                true,
                OutboundMessage::SearchFocus,
            ),
            MenuEntry::Separator,
            send(
                "tag-previous",
                "Previous Tag",
                Some("Control+Alt+Shift+Tab"),
                true,
                OutboundMessage::TagPrevious,
            ),
            send(
                "tag-next",
                "Next Tag",
                Some("Control+Alt+Tab"),
                true,
                OutboundMessage::TagNext,
            ),
            MenuEntry::Separator,
            send(
                "search-previous",
                "Previous Note",
                Some("Control+Shift+Tab"),
                true,
                OutboundMessage::SearchPrevious,
            ),
            send(
                "search-next",
                "Next Note",
                Some("Control+Tab"),
                true,
                OutboundMessage::SearchNext,
            ),
            MenuEntry::Separator,
            MenuEntry::Check(CheckItem {
                id: "float-on-top",
                label: "Float on Top".into(),
                checked: ctx.always_on_top,
                action: MenuAction::ToggleAlwaysOnTop,
            }),
        ]);

        if macos {
            entries.push(MenuEntry::Separator);
            entries.push(MenuEntry::Native(NativeRole::BringAllToFront));
        }

        SubmenuModel::new("Window", entries)
    }

    fn help_menu() -> SubmenuModel {
        SubmenuModel::new(
            "Help",
            vec![
                action(
                    "learn-more",
                    "Learn More",
                    None,
                    MenuAction::OpenExternal(HOMEPAGE_URL),
                ),
                send(
                    "tutorial-dialog",
                    "Tutorial",
                    None,
                    true,
                    OutboundMessage::TutorialDialog,
                ),
                action(
                    "support",
                    "Support",
                    None,
                    MenuAction::OpenExternal(SUPPORT_URL),
                ),
                MenuEntry::Separator,
                action(
                    "view-changelog",
                    "View Changelog",
                    None,
                    MenuAction::OpenExternal(CHANGELOG_URL),
                ),
                action(
                    "view-license",
                    "View License",
                    None,
                    MenuAction::OpenExternal(LICENSE_URL),
                ),
                MenuEntry::Separator,
                action(
                    "toggle-devtools",
                    "Toggle Developer Tools",
                    Some("CmdOrCtrl+Shift+I"),
                    MenuAction::ToggleDevtools,
                ),
            ],
        )
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
