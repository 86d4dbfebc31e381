//! Message contract between the shell and the renderer.
//!
//! The renderer (the webview content process) and the shell exchange one-way
//! fire-and-forget messages:
//!
//! - **Shell → renderer**: [`OutboundMessage`], delivered by evaluating
//!   `window.__INKPAD__.dispatch({channel, payload})` in the webview.
//! - **Renderer → shell**: [`RendererRequest`], posted over the webview IPC
//!   bridge as tagged JSON, one object per post:
//!
//! ```json
//! {"type": "flags-update", "flags": {"hasNote": true}}
//! {"type": "print-pdf", "html": "<h1>hi</h1>", "dst": "/tmp/out.pdf"}
//! ```
//!
//! No acknowledgments in either direction; ordering is FIFO per channel.

use std::path::PathBuf;

use serde::Deserialize;
use serde_json::{json, Value};

// ============================================================================
// State flags
// ============================================================================

/// Snapshot of renderer UI/editing state used to compute menu availability.
///
/// Received as a whole-record replacement; fields the renderer omits default
/// to `false`. The shell retains the last snapshot so the menu can be rebuilt
/// without a fresh push.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StateFlags {
    pub has_note: bool,
    pub is_note_template: bool,
    pub is_multi_editor_editing: bool,
    pub is_editor_editing: bool,
    pub is_editor_split_view: bool,
    pub is_tags_editing: bool,
    pub is_attachments_editing: bool,
    pub is_note_favorited: bool,
    pub is_note_pinned: bool,
    pub is_note_deleted: bool,
}

// ============================================================================
// Shell -> renderer
// ============================================================================

/// Messages the shell sends into the renderer.
///
/// Channel names are the product's wire contract; changing one breaks the
/// renderer side.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundMessage {
    Import,
    ExportHtml,
    ExportMarkdown,
    ExportPdf,
    CwdOpenInApp,
    CwdChange,
    NoteNew,
    NoteDuplicate,
    NoteDuplicateTemplate,
    NoteOpenInApp,
    NoteReveal,
    NoteEditToggle,
    NoteEditTagsToggle,
    NoteEditAttachmentsToggle,
    NoteFavoriteToggle,
    NotePinToggle,
    NoteMoveToTrash,
    NoteRestore,
    NotePermanentlyDelete,
    TrashEmpty,
    MultiEditorSelectAll,
    MultiEditorSelectInvert,
    MultiEditorSelectClear,
    WindowFocusToggle,
    EditorSplitToggle,
    SearchFocus,
    SearchPrevious,
    SearchNext,
    TagPrevious,
    TagNext,
    TutorialDialog,
    WindowFullscreenSet(bool),
}

impl OutboundMessage {
    /// The channel name on the wire.
    pub fn channel(&self) -> &'static str {
        use OutboundMessage::*;
        match self {
            Import => "import",
            ExportHtml => "export-html",
            ExportMarkdown => "export-markdown",
            ExportPdf => "export-pdf",
            CwdOpenInApp => "cwd-open-in-app",
            CwdChange => "cwd-change",
            NoteNew => "note-new",
            NoteDuplicate => "note-duplicate",
            NoteDuplicateTemplate => "note-duplicate-template",
            NoteOpenInApp => "note-open-in-app",
            NoteReveal => "note-reveal",
            NoteEditToggle => "note-edit-toggle",
            NoteEditTagsToggle => "note-edit-tags-toggle",
            NoteEditAttachmentsToggle => "note-edit-attachments-toggle",
            NoteFavoriteToggle => "note-favorite-toggle",
            NotePinToggle => "note-pin-toggle",
            NoteMoveToTrash => "note-move-to-trash",
            NoteRestore => "note-restore",
            NotePermanentlyDelete => "note-permanently-delete",
            TrashEmpty => "trash-empty",
            MultiEditorSelectAll => "multi-editor-select-all",
            MultiEditorSelectInvert => "multi-editor-select-invert",
            MultiEditorSelectClear => "multi-editor-select-clear",
            WindowFocusToggle => "window-focus-toggle",
            EditorSplitToggle => "editor-split-toggle",
            SearchFocus => "search-focus",
            SearchPrevious => "search-previous",
            SearchNext => "search-next",
            TagPrevious => "tag-previous",
            TagNext => "tag-next",
            TutorialDialog => "tutorial-dialog",
            WindowFullscreenSet(_) => "window-fullscreen-set",
        }
    }

    /// Payload as JSON (`null` for bare messages).
    pub fn payload(&self) -> Value {
        match self {
            OutboundMessage::WindowFullscreenSet(on) => json!(on),
            _ => Value::Null,
        }
    }

    /// The script evaluated in the webview to deliver this message.
    pub fn to_dispatch_script(&self) -> String {
        let envelope = json!({
            "channel": self.channel(),
            "payload": self.payload(),
        });
        format!("window.__INKPAD__ && window.__INKPAD__.dispatch({});", envelope)
    }
}

// ============================================================================
// Renderer -> shell
// ============================================================================

/// A one-shot request to render HTML or a file to a PDF at `dst`.
///
/// Exactly one of `html`/`src` must be present; the PDF helper validates this
/// (serde accepts any combination so a malformed request can be *reported*
/// rather than silently dropped at the parse layer).
#[derive(Debug, Clone, Deserialize)]
pub struct PrintJob {
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub src: Option<PathBuf>,
    pub dst: PathBuf,
}

/// Inbound messages posted by the renderer over the IPC bridge.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RendererRequest {
    /// Full replacement of the state flags; triggers a menu rebuild.
    FlagsUpdate { flags: StateFlags },
    /// Print request handled by the PDF helper.
    PrintPdf(PrintJob),
}

// ============================================================================
// Tests
// ============================================================================
