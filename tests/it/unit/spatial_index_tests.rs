//! Unit tests for the bounding-box index.

use crate::helpers::{TestTreeBuilder, pt, scenario_a_tree};
use sitecanvas::geometry::Rect;
use sitecanvas::scene::SceneNode;
use sitecanvas::spatial_index::SpatialIndex;

#[test]
fn test_only_nodes_with_geometry_are_indexed() {
    let tree = TestTreeBuilder::new()
        .with_block("a", "card", (0.0, 0.0, 10.0, 10.0))
        .with_node(SceneNode::new("half", "text").with_position(5.0, 5.0))
        .with_loose("loose", "text")
        .build();
    let index = SpatialIndex::from_tree(&tree);
    assert_eq!(index.len(), 1);
    assert!(index.contains("a"));
    assert!(!index.contains("half"));
}

#[test]
fn test_nested_nodes_are_indexed() {
    let tree = TestTreeBuilder::new()
        .with_node(
            SceneNode::new("section", "section")
                .with_bounds(0.0, 0.0, 500.0, 500.0)
                .with_child(SceneNode::new("inner", "card").with_bounds(10.0, 10.0, 20.0, 20.0)),
        )
        .build();
    let index = SpatialIndex::from_tree(&tree);
    assert_eq!(index.ids(), vec!["section", "inner"]);
    assert_eq!(index.topmost_at(pt(15.0, 15.0)), Some("inner".to_string()));
    assert_eq!(index.query_point(pt(15.0, 15.0)), vec!["inner", "section"]);
}

#[test]
fn test_rect_query_closed_overlap() {
    let index = SpatialIndex::from_tree(&scenario_a_tree());
    assert_eq!(index.query_rect(&Rect::new(100.0, 100.0, 0.0, 0.0)), vec!["a"]);
    assert_eq!(index.query_rect(&Rect::new(101.0, 101.0, 98.0, 98.0)), Vec::<String>::new());
    assert_eq!(index.query_rect(&Rect::new(0.0, 0.0, 300.0, 300.0)), vec!["a", "b"]);
}

#[test]
fn test_content_bounds_and_clear() {
    let mut index = SpatialIndex::from_tree(&scenario_a_tree());
    assert_eq!(index.content_bounds(), Some(Rect::new(0.0, 0.0, 250.0, 250.0)));
    index.clear();
    assert!(index.is_empty());
    assert_eq!(index.content_bounds(), None);
}
