//! Tests for the flags-driven menu model.

use super::*;
use crate::protocol::StateFlags;

fn mac_ctx() -> MenuContext {
    MenuContext {
        platform: Platform::MacOS,
        always_on_top: false,
    }
}

fn linux_ctx() -> MenuContext {
    MenuContext {
        platform: Platform::Linux,
        always_on_top: false,
    }
}

fn flags(f: impl FnOnce(&mut StateFlags)) -> StateFlags {
    let mut flags = StateFlags::default();
    f(&mut flags);
    flags
}

fn walk_entries<'a>(entries: &'a [MenuEntry], out: &mut Vec<&'a MenuEntry>) {
    for entry in entries {
        out.push(entry);
        if let MenuEntry::Submenu(sub) = entry {
            walk_entries(&sub.entries, out);
        }
    }
}

fn all_entries(model: &MenuModel) -> Vec<&MenuEntry> {
    let mut out = Vec::new();
    for group in &model.groups {
        walk_entries(&group.entries, &mut out);
    }
    out
}

fn find_item<'a>(model: &'a MenuModel, id: &str) -> Option<&'a ActionItem> {
    all_entries(model).into_iter().find_map(|e| match e {
        MenuEntry::Action(item) if item.id == id => Some(item),
        _ => None,
    })
}

fn find_submenu<'a>(model: &'a MenuModel, label: &str) -> Option<&'a SubmenuModel> {
    all_entries(model)
        .into_iter()
        .find_map(|e| match e {
            MenuEntry::Submenu(sub) if sub.label == label => Some(sub),
            _ => None,
        })
        .or_else(|| model.groups.iter().find(|g| g.label == label))
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn identical_flags_yield_identical_models() {
    let f = flags(|f| {
        f.has_note = true;
        f.is_note_pinned = true;
        f.is_editor_editing = true;
    });
    let a = MenuModel::compute(Some(&f), &mac_ctx());
    let b = MenuModel::compute(Some(&f), &mac_ctx());
    assert_eq!(a, b);

    let none_a = MenuModel::compute(None, &mac_ctx());
    let none_b = MenuModel::compute(None, &mac_ctx());
    assert_eq!(none_a, none_b);
}

// ============================================================================
// Baseline (no flags ever received)
// ============================================================================

#[test]
fn without_flags_flag_dependent_items_are_disabled() {
    let model = MenuModel::compute(None, &mac_ctx());

    assert!(!find_submenu(&model, "Export").unwrap().enabled);
    assert!(!find_item(&model, "note-new").unwrap().enabled);
    assert!(!find_item(&model, "note-duplicate").unwrap().enabled);
    assert!(!find_item(&model, "note-edit-toggle").unwrap().enabled);
}

#[test]
fn without_flags_flag_gated_items_are_omitted() {
    let model = MenuModel::compute(None, &mac_ctx());

    assert!(find_item(&model, "note-duplicate-template").is_none());
    assert!(find_item(&model, "note-move-to-trash").is_none());
    assert!(find_item(&model, "note-move-to-trash-editing").is_none());
    assert!(find_item(&model, "note-restore").is_none());
    assert!(find_item(&model, "note-permanently-delete").is_none());
}

#[test]
fn flag_independent_items_stay_enabled_without_flags() {
    let model = MenuModel::compute(None, &mac_ctx());

    assert!(find_item(&model, "import").unwrap().enabled);
    assert!(find_item(&model, "trash-empty").unwrap().enabled);
    assert!(find_item(&model, "search-focus").unwrap().enabled);
    assert!(find_item(&model, "multi-editor-select-all").unwrap().enabled);
}

// ============================================================================
// Availability contract
// ============================================================================

#[test]
fn export_disabled_without_note() {
    let f = flags(|f| f.has_note = false);
    let model = MenuModel::compute(Some(&f), &mac_ctx());
    assert!(!find_submenu(&model, "Export").unwrap().enabled);
}

#[test]
fn export_and_new_enabled_with_note() {
    let f = flags(|f| f.has_note = true);
    let model = MenuModel::compute(Some(&f), &mac_ctx());
    assert!(find_submenu(&model, "Export").unwrap().enabled);
    assert!(find_item(&model, "note-new").unwrap().enabled);
}

#[test]
fn export_enabled_by_multi_editor_editing_alone() {
    let f = flags(|f| f.is_multi_editor_editing = true);
    let model = MenuModel::compute(Some(&f), &mac_ctx());
    assert!(find_submenu(&model, "Export").unwrap().enabled);
    // But "New" is blocked while multi-editing.
    assert!(!find_item(&model, "note-new").unwrap().enabled);
}

#[test]
fn deleted_note_shows_restore_and_hides_move_to_trash() {
    let f = flags(|f| {
        f.has_note = true;
        f.is_note_deleted = true;
    });
    let model = MenuModel::compute(Some(&f), &mac_ctx());

    let restore = find_item(&model, "note-restore").unwrap();
    assert!(restore.enabled);
    assert!(find_item(&model, "note-move-to-trash").is_none());
    assert!(find_item(&model, "note-move-to-trash-editing").is_none());
}

#[test]
fn move_to_trash_variants_are_mutually_exclusive_for_all_flags() {
    // Exhaust the four flags the variants depend on, mixed with the rest.
    for bits in 0u8..16 {
        let f = flags(|f| {
            f.has_note = bits & 1 != 0;
            f.is_note_deleted = bits & 2 != 0;
            f.is_editor_editing = bits & 4 != 0;
            f.is_multi_editor_editing = bits & 8 != 0;
        });
        let model = MenuModel::compute(Some(&f), &mac_ctx());
        let plain = find_item(&model, "note-move-to-trash").is_some();
        let editing = find_item(&model, "note-move-to-trash-editing").is_some();
        assert!(
            !(plain && editing),
            "both Move to Trash variants present for flags {:?}",
            f
        );
    }
}

#[test]
fn editor_editing_selects_the_alternate_trash_accelerator() {
    let f = flags(|f| {
        f.has_note = true;
        f.is_editor_editing = true;
    });
    let model = MenuModel::compute(Some(&f), &mac_ctx());
    let item = find_item(&model, "note-move-to-trash-editing").unwrap();
    assert_eq!(item.accelerator, Some("CmdOrCtrl+Alt+Backspace"));
    assert!(find_item(&model, "note-move-to-trash").is_none());
}

#[test]
fn split_view_blocks_edit_toggle_but_not_tags() {
    let f = flags(|f| {
        f.has_note = true;
        f.is_editor_split_view = true;
    });
    let model = MenuModel::compute(Some(&f), &mac_ctx());
    assert!(!find_item(&model, "note-edit-toggle").unwrap().enabled);
    assert!(find_item(&model, "note-edit-tags-toggle").unwrap().enabled);
}

#[test]
fn template_note_exposes_new_from_template() {
    let f = flags(|f| {
        f.has_note = true;
        f.is_note_template = true;
    });
    let model = MenuModel::compute(Some(&f), &mac_ctx());
    let item = find_item(&model, "note-duplicate-template").unwrap();
    assert!(item.enabled);

    let plain = flags(|f| f.has_note = true);
    let model = MenuModel::compute(Some(&plain), &mac_ctx());
    assert!(find_item(&model, "note-duplicate-template").is_none());
}

// ============================================================================
// Labels
// ============================================================================

#[test]
fn toggle_labels_follow_flags() {
    let f = flags(|f| {
        f.has_note = true;
        f.is_editor_editing = true;
        f.is_note_favorited = true;
        f.is_note_pinned = true;
        f.is_tags_editing = true;
    });
    let model = MenuModel::compute(Some(&f), &mac_ctx());
    assert_eq!(find_item(&model, "note-edit-toggle").unwrap().label, "Stop Editing");
    assert_eq!(
        find_item(&model, "note-edit-tags-toggle").unwrap().label,
        "Stop Editing Tags"
    );
    assert_eq!(find_item(&model, "note-favorite-toggle").unwrap().label, "Unfavorite");
    assert_eq!(find_item(&model, "note-pin-toggle").unwrap().label, "Unpin");

    let f = flags(|f| f.has_note = true);
    let model = MenuModel::compute(Some(&f), &mac_ctx());
    assert_eq!(find_item(&model, "note-edit-toggle").unwrap().label, "Edit");
    assert_eq!(find_item(&model, "note-favorite-toggle").unwrap().label, "Favorite");
    assert_eq!(find_item(&model, "note-pin-toggle").unwrap().label, "Pin");
}

// ============================================================================
// Platform conditioning
// ============================================================================

#[test]
fn macos_only_entries_are_omitted_elsewhere() {
    let mac = MenuModel::compute(None, &mac_ctx());
    let linux = MenuModel::compute(None, &linux_ctx());

    let mac_entries = all_entries(&mac);
    assert!(mac_entries
        .iter()
        .any(|e| matches!(e, MenuEntry::Native(NativeRole::Services))));
    assert!(mac_entries
        .iter()
        .any(|e| matches!(e, MenuEntry::Native(NativeRole::HideOthers))));
    assert!(find_submenu(&mac, "Speech").is_some());
    assert!(find_item(&mac, "paste-and-match-style").is_some());

    let linux_entries = all_entries(&linux);
    assert!(!linux_entries
        .iter()
        .any(|e| matches!(e, MenuEntry::Native(NativeRole::Services))));
    assert!(!linux_entries
        .iter()
        .any(|e| matches!(e, MenuEntry::Native(NativeRole::HideOthers))));
    assert!(!linux_entries
        .iter()
        .any(|e| matches!(e, MenuEntry::Native(NativeRole::BringAllToFront))));
    assert!(find_submenu(&linux, "Speech").is_none());
    assert!(find_item(&linux, "paste-and-match-style").is_none());
}

#[test]
fn reveal_label_is_platform_specific() {
    let mac = MenuModel::compute(None, &mac_ctx());
    let linux = MenuModel::compute(None, &linux_ctx());
    assert_eq!(find_item(&mac, "note-reveal").unwrap().label, "Reveal in Finder");
    assert_eq!(find_item(&linux, "note-reveal").unwrap().label, "Reveal in Folder");
}

// ============================================================================
// Window / misc
// ============================================================================

#[test]
fn float_on_top_reflects_context() {
    let ctx = MenuContext {
        platform: Platform::MacOS,
        always_on_top: true,
    };
    let model = MenuModel::compute(None, &ctx);
    let check = all_entries(&model)
        .into_iter()
        .find_map(|e| match e {
            MenuEntry::Check(c) if c.id == "float-on-top" => Some(c),
            _ => None,
        })
        .unwrap();
    assert!(check.checked);
}

#[test]
fn accelerators_match_product_bindings() {
    let f = flags(|f| f.has_note = true);
    let model = MenuModel::compute(Some(&f), &mac_ctx());
    let cases = [
        ("note-new", "CmdOrCtrl+N"),
        ("note-duplicate", "CmdOrCtrl+Shift+N"),
        ("note-open-in-app", "CmdOrCtrl+O"),
        ("note-reveal", "CmdOrCtrl+Alt+R"),
        ("note-edit-toggle", "CmdOrCtrl+E"),
        ("note-favorite-toggle", "CmdOrCtrl+D"),
        ("note-pin-toggle", "CmdOrCtrl+P"),
        ("note-move-to-trash", "CmdOrCtrl+Backspace"),
        ("note-permanently-delete", "CmdOrCtrl+Alt+Shift+Backspace"),
        ("multi-editor-select-all", "CmdOrCtrl+Alt+A"),
        ("window-focus-toggle", "CmdOrCtrl+Alt+F"),
        ("editor-split-toggle", "CmdOrCtrl+Alt+S"),
        ("search-focus", "CmdOrCtrl+F"),
        ("tag-previous", "Control+Alt+Shift+Tab"),
        ("tag-next", "Control+Alt+Tab"),
        ("search-previous", "Control+Shift+Tab"),
        ("search-next", "Control+Tab"),
    ];
    for (id, accel) in cases {
        assert_eq!(
            find_item(&model, id).unwrap().accelerator,
            Some(accel),
            "accelerator mismatch for {}",
            id
        );
    }
}

#[test]
fn menu_groups_are_in_product_order() {
    let model = MenuModel::compute(None, &mac_ctx());
    let labels: Vec<&str> = model.groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["Inkpad", "Note", "Edit", "View", "Window", "Help"]);
}
