//! Undo/Redo Integration Tests

use crate::helpers::{RecordingObserver, child_ids, pt, registered_editor, scenario_a_tree};
use sitecanvas::editor::CanvasEditor;
use sitecanvas::input::{InputEvent, Key, Modifiers};
use sitecanvas::placement::DropTarget;
use sitecanvas::scene::{NodeUpdate, traverse};
use sitecanvas::settings::EditorSettings;
use std::sync::Arc;

fn x_of(editor: &CanvasEditor, id: &str) -> f32 {
    traverse::find(editor.tree(), id).unwrap().position.unwrap().x
}

#[test]
fn test_undo_redo_delete_sequence() {
    let mut editor = registered_editor(scenario_a_tree());
    editor.delete_node("a");
    assert_eq!(child_ids(editor.tree()), vec!["b"]);

    assert!(editor.undo());
    assert_eq!(child_ids(editor.tree()), vec!["a", "b"]);
    assert!(editor.selection().index().contains("a"));

    assert!(editor.redo());
    assert_eq!(child_ids(editor.tree()), vec!["b"]);
    assert!(!editor.redo());
}

#[test]
fn test_undo_restores_exact_previous_tree() {
    let mut editor = registered_editor(scenario_a_tree());
    let original = Arc::clone(editor.tree());
    editor.update_node("a", &NodeUpdate::new().prop("title", "x"));
    editor.undo();
    assert!(Arc::ptr_eq(editor.tree(), &original));
}

#[test]
fn test_keyboard_moves_undo_one_step_each() {
    let mut editor = registered_editor(scenario_a_tree());
    editor.select("b", false);
    let right = InputEvent::KeyDown {
        key: Key::ArrowRight,
        modifiers: Modifiers::NONE,
    };
    editor.handle_event(right.clone());
    editor.handle_event(right);
    // 200 + 24 snaps to 216, then 216 + 24 lands on 240
    assert_eq!(x_of(&editor, "b"), 240.0);

    editor.undo();
    assert_eq!(x_of(&editor, "b"), 216.0);
    editor.undo();
    assert_eq!(x_of(&editor, "b"), 200.0);
    assert!(!editor.undo());
}

#[test]
fn test_new_mutation_clears_redo() {
    let mut editor = registered_editor(scenario_a_tree());
    editor.delete_node("a");
    editor.undo();
    assert!(editor.history().can_redo());
    editor.handle_drop("cta", pt(0.0, 0.0), DropTarget::root());
    assert!(!editor.history().can_redo());
}

#[test]
fn test_undo_prunes_selection_of_vanished_nodes() {
    let mut editor = registered_editor(scenario_a_tree());
    let id = editor.handle_drop("cta", pt(0.0, 0.0), DropTarget::root()).unwrap();
    editor.select(&id, false);
    let recorder = RecordingObserver::attach(&mut editor);

    editor.undo();
    assert!(editor.selected_ids().is_empty());
    assert_eq!(recorder.selections(), vec![Vec::<String>::new()]);
    assert_eq!(recorder.tree_changes(), 1);
}

#[test]
fn test_history_depth_follows_settings() {
    let settings = EditorSettings {
        max_history: 2,
        ..EditorSettings::default()
    };
    let mut editor = CanvasEditor::with_tree(scenario_a_tree(), settings);
    for i in 0..5 {
        editor.update_node("a", &NodeUpdate::new().prop("rev", i));
    }
    assert!(editor.undo());
    assert!(editor.undo());
    assert!(!editor.undo());
    let a = traverse::find(editor.tree(), "a").unwrap();
    assert_eq!(a.props.get("rev"), Some(&serde_json::json!(2)));
}
