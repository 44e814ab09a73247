//! Snapshot boundary: loading external trees and emitting them again.
//!
//! The editing operations assume a well-formed tree. Snapshots coming from
//! outside are checked once here and rejected with a descriptive error.

use super::node::{SceneNode, SceneTree};
use super::traverse;
use crate::constants::{ROOT_ID, ROOT_TYPE};
use crate::error::{SceneError, SceneResult};
use crate::perf::measure_and_log;
use std::collections::HashSet;
use tracing::info;

/// Parsing slower than this is reported
const SNAPSHOT_PARSE_BUDGET_MS: f64 = 50.0;

/// Parse and validate a JSON snapshot.
pub fn load_snapshot(json: &str) -> SceneResult<SceneTree> {
    let root: SceneNode = measure_and_log("parse_snapshot", SNAPSHOT_PARSE_BUDGET_MS, || serde_json::from_str(json))?;
    validate(&root)?;
    info!(
        root = %root.id,
        nodes = traverse::node_count(&root),
        "Loaded scene snapshot"
    );
    Ok(root.into_tree())
}

/// Check that every id is non-empty and unique across the tree.
///
/// Owned trees cannot contain cycles, so uniqueness is the only structural
/// property left to check.
pub fn validate(root: &SceneNode) -> SceneResult<()> {
    let mut seen = HashSet::new();
    let mut failure = None;
    traverse::walk(root, &mut |node, _| {
        if failure.is_some() {
            return;
        }
        if node.id.is_empty() {
            failure = Some(SceneError::EmptyId {
                node_type: node.node_type.clone(),
            });
        } else if !seen.insert(node.id.as_str()) {
            failure = Some(SceneError::DuplicateId(node.id.clone()));
        }
    });
    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

pub fn to_json(tree: &SceneNode) -> SceneResult<String> {
    Ok(serde_json::to_string_pretty(tree)?)
}

/// A document with only an empty root.
pub fn empty_document() -> SceneTree {
    SceneNode::new(ROOT_ID, ROOT_TYPE).into_tree()
}
