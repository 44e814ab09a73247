//! Snapshot tests for the scene-graph wire shape, plus boundary validation.
//!
//! To update snapshots after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```

use serde_json::json;
use sitecanvas::SceneError;
use sitecanvas::scene::{self, NodeUpdate, SceneNode};

fn landing_page() -> SceneNode {
    SceneNode::new("root", "page").with_child(
        SceneNode::new("hero", "hero")
            .with_prop("title", "Launch faster")
            .with_prop("variant", 2)
            .with_prop("dark", true),
    )
}

#[test]
fn snapshot_scene_node_without_geometry() {
    insta::assert_json_snapshot!(landing_page(), @r###"
    {
      "id": "root",
      "type": "page",
      "props": {},
      "children": [
        {
          "id": "hero",
          "type": "hero",
          "props": {
            "dark": true,
            "title": "Launch faster",
            "variant": 2
          },
          "children": []
        }
      ]
    }
    "###);
}

#[test]
fn snapshot_node_update_skips_absent_fields() {
    let update = NodeUpdate::new().prop("title", "Hello").node_type("hero-split");
    insta::assert_json_snapshot!(update, @r###"
    {
      "props": {
        "title": "Hello"
      },
      "type": "hero-split"
    }
    "###);
}

#[test]
fn test_load_snapshot_accepts_minimal_nodes() {
    let json = json!({
        "id": "root",
        "type": "page",
        "children": [
            { "id": "hero", "type": "hero", "position": { "x": 0, "y": 0 }, "size": { "width": 100, "height": 40 } },
            { "id": "copy", "type": "text" }
        ]
    });
    let tree = scene::load_snapshot(&json.to_string()).unwrap();
    assert_eq!(tree.children.len(), 2);
    assert!(tree.children[0].bounds().is_some());
    assert!(tree.children[1].props.is_empty());
}

#[test]
fn test_load_snapshot_rejects_duplicate_ids() {
    let json = json!({
        "id": "root",
        "type": "page",
        "children": [
            { "id": "dup", "type": "hero" },
            { "id": "wrap", "type": "section", "children": [{ "id": "dup", "type": "text" }] }
        ]
    });
    let err = scene::load_snapshot(&json.to_string()).unwrap_err();
    assert_eq!(err.to_string(), "Duplicate node id: dup");
}

#[test]
fn test_load_snapshot_rejects_empty_id_and_bad_json() {
    let empty = json!({ "id": "root", "type": "page", "children": [{ "id": "", "type": "cta" }] });
    assert!(matches!(
        scene::load_snapshot(&empty.to_string()),
        Err(SceneError::EmptyId { ref node_type }) if node_type == "cta"
    ));
    assert!(matches!(scene::load_snapshot("{ not json"), Err(SceneError::Json(_))));
}

#[test]
fn test_to_json_round_trips() {
    let original = landing_page().with_child(SceneNode::new("cta", "cta").with_bounds(10.0, 20.0, 30.0, 40.0));
    let json = scene::to_json(&original).unwrap();
    let restored = scene::load_snapshot(&json).unwrap();
    assert_eq!(*restored, original);
}
