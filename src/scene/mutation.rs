//! Pure mutation of scene trees.
//!
//! Every function takes a tree by reference and returns a new tree. Subtrees
//! the mutation does not touch are shared with the input, so a previous tree
//! held by an undo stack stays valid without copying.

use super::node::{NodeUpdate, SceneNode, SceneTree};
use super::traverse;
use crate::error::{SceneError, SceneResult};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Where an inserted node lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementPolicy {
    /// Position 0 of the root's children
    First,
    /// Last position of the root's children
    Last,
    /// Ordinal index within `parent` (root when `None`); clamped to the end
    At { parent: Option<String>, index: usize },
    /// End of `parent`'s children (root when `None`)
    Append { parent: Option<String> },
}

impl PlacementPolicy {
    pub fn append() -> Self {
        Self::Append { parent: None }
    }

    pub fn at(index: usize) -> Self {
        Self::At {
            parent: None,
            index,
        }
    }
}

/// Apply `updates` to the node whose id is `target_id`.
///
/// Returns the input tree itself when no node matches.
pub fn update(tree: &SceneTree, target_id: &str, updates: &NodeUpdate) -> SceneTree {
    match update_in(tree, target_id, updates) {
        Some(updated) => updated,
        None => {
            debug!(target_id, "update target not found");
            Arc::clone(tree)
        }
    }
}

fn update_in(node: &Arc<SceneNode>, target_id: &str, updates: &NodeUpdate) -> Option<Arc<SceneNode>> {
    if node.id == target_id {
        return Some(Arc::new(updates.apply_to(node)));
    }
    replace_first_child(node, |child| update_in(child, target_id, updates))
}

/// Remove `target_id` and its whole subtree.
///
/// Returns `None` only when the root itself is the target.
pub fn delete(tree: &SceneTree, target_id: &str) -> Option<SceneTree> {
    if tree.id == target_id {
        return None;
    }
    Some(delete_in(tree, target_id).unwrap_or_else(|| Arc::clone(tree)))
}

fn delete_in(node: &Arc<SceneNode>, target_id: &str) -> Option<Arc<SceneNode>> {
    if let Some(index) = node.children.iter().position(|c| c.id == target_id) {
        let mut children = node.children.clone();
        children.remove(index);
        return Some(Arc::new(node.with_replaced_children(children)));
    }
    replace_first_child(node, |child| delete_in(child, target_id))
}

/// Insert `new_node` according to `placement`.
///
/// The node's id, and every id in its subtree, must be absent from `tree`.
pub fn insert(tree: &SceneTree, new_node: SceneNode, placement: &PlacementPolicy) -> SceneResult<SceneTree> {
    let duplicate = {
        let mut incoming = HashSet::new();
        let mut duplicate = None;
        traverse::walk(&new_node, &mut |n, _| {
            if duplicate.is_none() && (!incoming.insert(n.id.as_str()) || traverse::contains_id(tree, &n.id)) {
                duplicate = Some(n.id.clone());
            }
        });
        duplicate
    };
    if let Some(id) = duplicate {
        return Err(SceneError::DuplicateId(id));
    }
    insert_shared(tree, Arc::new(new_node), placement)
}

/// Move an existing node, keeping its id and subtree, by deleting it and
/// inserting the same node at `index` within `parent` (root when `None`).
///
/// `index` is interpreted against the parent's children after removal.
pub fn move_node(tree: &SceneTree, node_id: &str, parent: Option<&str>, index: usize) -> SceneResult<SceneTree> {
    let placement = PlacementPolicy::At {
        parent: parent.map(str::to_string),
        index,
    };
    relocate(tree, node_id, &placement)
}

/// Move an existing node to wherever `placement` says, keeping its id and
/// subtree. Slots are counted after the node has been removed.
pub fn relocate(tree: &SceneTree, node_id: &str, placement: &PlacementPolicy) -> SceneResult<SceneTree> {
    if tree.id == node_id {
        return Err(SceneError::RootImmovable);
    }
    let node = traverse::find(tree, node_id)
        .cloned()
        .ok_or_else(|| SceneError::NodeNotFound(node_id.to_string()))?;
    let without = delete(tree, node_id).ok_or(SceneError::RootImmovable)?;
    insert_shared(&without, node, placement)
}

fn insert_shared(tree: &SceneTree, node: Arc<SceneNode>, placement: &PlacementPolicy) -> SceneResult<SceneTree> {
    let (parent_id, slot) = match placement {
        PlacementPolicy::First => (tree.id.as_str(), Slot::Index(0)),
        PlacementPolicy::Last => (tree.id.as_str(), Slot::End),
        PlacementPolicy::At { parent, index } => (
            parent.as_deref().unwrap_or(tree.id.as_str()),
            Slot::Index(*index),
        ),
        PlacementPolicy::Append { parent } => (parent.as_deref().unwrap_or(tree.id.as_str()), Slot::End),
    };

    insert_in(tree, parent_id, &node, slot).ok_or_else(|| SceneError::ParentNotFound(parent_id.to_string()))
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Index(usize),
    End,
}

fn insert_in(node: &Arc<SceneNode>, parent_id: &str, new_node: &Arc<SceneNode>, slot: Slot) -> Option<Arc<SceneNode>> {
    if node.id == parent_id {
        let mut children = node.children.clone();
        let index = match slot {
            Slot::Index(index) if index <= children.len() => index,
            Slot::Index(index) => {
                debug!(index, len = children.len(), "insert index past end, appending");
                children.len()
            }
            Slot::End => children.len(),
        };
        children.insert(index, Arc::clone(new_node));
        return Some(Arc::new(node.with_replaced_children(children)));
    }
    replace_first_child(node, |child| insert_in(child, parent_id, new_node, slot))
}

/// Rebuild `node` around the first child for which `f` yields a replacement.
/// Ids are unique, so the search stops at the first hit.
fn replace_first_child<F>(node: &Arc<SceneNode>, mut f: F) -> Option<Arc<SceneNode>>
where
    F: FnMut(&Arc<SceneNode>) -> Option<Arc<SceneNode>>,
{
    for (index, child) in node.children.iter().enumerate() {
        if let Some(replacement) = f(child) {
            let mut children = node.children.clone();
            children[index] = replacement;
            return Some(Arc::new(node.with_replaced_children(children)));
        }
    }
    None
}
