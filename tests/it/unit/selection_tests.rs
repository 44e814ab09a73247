//! Unit tests for the selection manager.

use crate::helpers::{RecordingHost, TestTreeBuilder, pt, scenario_a_tree};
use sitecanvas::input::{Key, Modifiers};
use sitecanvas::selection::{Direction, GridConfig, SelectionManager, Shortcut};

fn manager_over(tree: &sitecanvas::SceneTree) -> (SelectionManager, RecordingHost) {
    let mut manager = SelectionManager::new();
    let mut host = RecordingHost::default();
    manager.sync_tree(tree, &mut host);
    (manager, host)
}

#[test]
fn test_select_twice_is_idempotent() {
    let (mut manager, mut host) = manager_over(&scenario_a_tree());
    manager.select("a", false, &mut host);
    let first = manager.selected_ids();
    manager.select("a", false, &mut host);
    assert_eq!(manager.selected_ids(), first);
    assert_eq!(first, vec!["a"]);
}

#[test]
fn test_every_change_reports_full_selection() {
    let (mut manager, mut host) = manager_over(&scenario_a_tree());
    manager.select("a", false, &mut host);
    manager.select("b", true, &mut host);
    manager.clear_selection(&mut host);
    assert_eq!(
        host.selections,
        vec![vec!["a".to_string()], vec!["a".to_string(), "b".to_string()], vec![]]
    );
    assert_eq!(manager.last_selected_id(), None);
}

#[test]
fn test_select_all_uses_index_only() {
    let tree = TestTreeBuilder::new()
        .with_block("a", "card", (0.0, 0.0, 10.0, 10.0))
        .with_loose("copy", "text")
        .build();
    let (mut manager, mut host) = manager_over(&tree);
    manager.select_all(&mut host);
    assert_eq!(manager.selected_ids(), vec!["a"]);
}

#[test]
fn test_marquee_touching_edge_selects() {
    let (mut manager, mut host) = manager_over(&scenario_a_tree());
    manager.start_selection_box(pt(100.0, 100.0));
    manager.update_selection_box(pt(150.0, 150.0), &mut host);
    assert_eq!(manager.selected_ids(), vec!["a"]);
}

#[test]
fn test_marquee_repeated_point_is_idempotent() {
    let (mut manager, mut host) = manager_over(&scenario_a_tree());
    manager.start_selection_box(pt(0.0, 0.0));
    manager.update_selection_box(pt(300.0, 300.0), &mut host);
    let notified = host.selections.len();
    manager.update_selection_box(pt(300.0, 300.0), &mut host);
    assert_eq!(host.selections.len(), notified);
    assert_eq!(manager.selected_ids(), vec!["a", "b"]);
}

#[test]
fn test_update_without_marquee_is_ignored() {
    let (mut manager, mut host) = manager_over(&scenario_a_tree());
    manager.update_selection_box(pt(300.0, 300.0), &mut host);
    assert!(manager.selected_ids().is_empty());
    assert!(host.selections.is_empty());
}

#[test]
fn test_moves_use_prior_positions() {
    let tree = TestTreeBuilder::new()
        .with_block("a", "card", (0.0, 0.0, 24.0, 24.0))
        .with_block("b", "card", (24.0, 0.0, 24.0, 24.0))
        .build();
    let (mut manager, mut host) = manager_over(&tree);
    manager.select_all(&mut host);
    manager.move_selection(Direction::Right, &mut host);

    let mut positions: Vec<(String, f32)> = host
        .updates
        .iter()
        .map(|(id, update)| (id.clone(), update.position.unwrap().x))
        .collect();
    positions.sort_by(|a, b| a.0.cmp(&b.0));
    assert_eq!(positions, vec![("a".to_string(), 24.0), ("b".to_string(), 48.0)]);
}

#[test]
fn test_move_without_snap_translates_exactly() {
    let tree = TestTreeBuilder::new()
        .with_block("a", "card", (10.0, 5.0, 24.0, 24.0))
        .build();
    let mut manager = SelectionManager::new().with_grid(GridConfig { size: 8.0, snap: false });
    let mut host = RecordingHost::default();
    manager.sync_tree(&tree, &mut host);
    manager.select("a", false, &mut host);
    manager.move_selection(Direction::Up, &mut host);
    assert_eq!(host.updates[0].1.position, Some(pt(10.0, -3.0)));
}

#[test]
fn test_key_chords_reach_shortcuts() {
    let (mut manager, mut host) = manager_over(&scenario_a_tree());
    let select_all = Shortcut::from_key(&Key::Character('a'), Modifiers::ctrl()).unwrap();
    assert!(manager.handle_shortcut(select_all, &mut host));
    assert_eq!(manager.selection_count(), 2);

    let deselect = Shortcut::from_key(&Key::Escape, Modifiers::NONE).unwrap();
    assert!(manager.handle_shortcut(deselect, &mut host));
    assert_eq!(manager.selection_count(), 0);
}

#[test]
fn test_replace_tree_clears_state() {
    let (mut manager, mut host) = manager_over(&scenario_a_tree());
    manager.select("a", false, &mut host);
    manager.start_selection_box(pt(0.0, 0.0));

    let other = TestTreeBuilder::new().with_block("z", "card", (0.0, 0.0, 5.0, 5.0)).build();
    manager.replace_tree(&other, &mut host);
    assert!(manager.selected_ids().is_empty());
    assert!(manager.marquee_box().is_none());
    assert!(manager.index().contains("z"));
}
