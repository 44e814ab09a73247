//! Unit tests for drop resolution and placement rules.

use crate::helpers::{TestTreeBuilder, child_ids, pt, test_catalog};
use sitecanvas::geometry::Rect;
use sitecanvas::placement::{DropRequest, DropResolver, DropTarget, PlacementRules};
use sitecanvas::scene::{PlacementPolicy, traverse};
use sitecanvas::selection::GridConfig;
use sitecanvas::viewport::ViewportManager;
use std::sync::Arc;

fn two_children() -> sitecanvas::SceneTree {
    TestTreeBuilder::new().with_loose("hero", "hero").with_loose("pricing", "pricing").build()
}

fn viewport() -> ViewportManager {
    let mut viewport = ViewportManager::new();
    viewport.register_canvas_rect(Rect::new(0.0, 0.0, 1280.0, 800.0));
    viewport
}

fn resolver() -> DropResolver {
    DropResolver::new(PlacementRules::default(), test_catalog())
}

fn drop_at(payload: &str, index: Option<usize>) -> DropRequest {
    DropRequest {
        payload: payload.to_string(),
        screen_position: pt(120.0, 90.0),
        target: DropTarget { parent: None, index },
    }
}

#[test]
fn test_footer_lands_last_for_any_index() {
    let tree = two_children();
    for index in [Some(0), Some(1), Some(2), None] {
        let resolved = resolver()
            .resolve(&tree, &drop_at("footer", index), &viewport(), GridConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(resolved.policy, PlacementPolicy::Last);
        assert_eq!(child_ids(&resolved.tree).len(), 3);
        assert_eq!(resolved.tree.children[2].id, resolved.node_id);
    }
}

#[test]
fn test_navbar_lands_first() {
    let resolved = resolver()
        .resolve(&two_children(), &drop_at("navbar", Some(2)), &viewport(), GridConfig::default())
        .unwrap()
        .unwrap();
    assert_eq!(resolved.tree.children[0].id, resolved.node_id);
}

#[test]
fn test_drop_point_converted_through_viewport_and_snapped() {
    // (120, 90) minus the 20px ruler is (100, 70) on canvas; snapped to 24 -> (96, 72)
    let resolved = resolver()
        .resolve(&two_children(), &drop_at("cta", Some(1)), &viewport(), GridConfig::default())
        .unwrap()
        .unwrap();
    let node = traverse::find(&resolved.tree, &resolved.node_id).unwrap();
    assert_eq!(node.position, Some(pt(96.0, 72.0)));
    assert_eq!(child_ids(&resolved.tree)[1], resolved.node_id);
}

#[test]
fn test_unknown_payload_never_mutates() {
    let tree = two_children();
    let outcome = resolver()
        .resolve(&tree, &drop_at("text/html", Some(0)), &viewport(), GridConfig::default())
        .unwrap();
    assert!(outcome.is_none());
    assert_eq!(Arc::strong_count(&tree), 1);
}

#[test]
fn test_custom_rules() {
    let rules = PlacementRules::new(vec!["banner".to_string()], vec!["legal".to_string()]);
    assert_eq!(rules.resolve("BANNER", &DropTarget::at(3)), PlacementPolicy::First);
    assert_eq!(rules.resolve("legal", &DropTarget::root()), PlacementPolicy::Last);
    assert_eq!(rules.resolve("footer", &DropTarget::at(1)), PlacementPolicy::at(1));
}

#[test]
fn test_drop_into_nested_parent() {
    let tree = TestTreeBuilder::new().with_loose("section", "section").build();
    let request = DropRequest {
        payload: "cta".to_string(),
        screen_position: pt(20.0, 20.0),
        target: DropTarget {
            parent: Some("section".to_string()),
            index: None,
        },
    };
    let resolved = resolver()
        .resolve(&tree, &request, &viewport(), GridConfig::default())
        .unwrap()
        .unwrap();
    let section = traverse::find(&resolved.tree, "section").unwrap();
    assert_eq!(section.children[0].id, resolved.node_id);
}
