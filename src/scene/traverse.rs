//! Read-only traversal over the generic node shape.
//!
//! The engine never dispatches on `node_type`; everything that needs to look
//! at the tree (indexing, rendering, validation) goes through these walkers.

use super::node::SceneNode;
use crate::geometry::Rect;
use std::sync::Arc;

/// Pre-order walk, calling `visit(node, depth)` with the root at depth 0.
pub fn walk<'a, F>(node: &'a SceneNode, visit: &mut F)
where
    F: FnMut(&'a SceneNode, usize),
{
    walk_at(node, 0, visit);
}

fn walk_at<'a, F>(node: &'a SceneNode, depth: usize, visit: &mut F)
where
    F: FnMut(&'a SceneNode, usize),
{
    visit(node, depth);
    for child in &node.children {
        walk_at(child, depth + 1, visit);
    }
}

/// Find the node with `id`, returning its shared handle.
pub fn find<'a>(node: &'a Arc<SceneNode>, id: &str) -> Option<&'a Arc<SceneNode>> {
    if node.id == id {
        return Some(node);
    }
    node.children.iter().find_map(|child| find(child, id))
}

/// Find the parent of `id` and the child's index within it.
pub fn find_parent<'a>(node: &'a Arc<SceneNode>, id: &str) -> Option<(&'a Arc<SceneNode>, usize)> {
    if let Some(index) = node.children.iter().position(|c| c.id == id) {
        return Some((node, index));
    }
    node.children.iter().find_map(|child| find_parent(child, id))
}

pub fn contains_id(node: &SceneNode, id: &str) -> bool {
    node.id == id || node.children.iter().any(|child| contains_id(child, id))
}

/// Every id in document order.
pub fn collect_ids(node: &SceneNode) -> Vec<String> {
    let mut ids = Vec::new();
    walk(node, &mut |n, _| ids.push(n.id.clone()));
    ids
}

/// `(id, box)` for every node carrying both position and size, in document order.
pub fn geometry_entries(node: &SceneNode) -> Vec<(String, Rect)> {
    let mut entries = Vec::new();
    walk(node, &mut |n, _| {
        if let Some(bounds) = n.bounds() {
            entries.push((n.id.clone(), bounds));
        }
    });
    entries
}

pub fn node_count(node: &SceneNode) -> usize {
    1 + node.children.iter().map(|c| node_count(c)).sum::<usize>()
}
