//! Undo/redo over immutable scene trees.
//!
//! Trees share unchanged subtrees, so each entry costs one `Arc` plus the
//! nodes that mutation actually rebuilt.

use crate::constants::MAX_HISTORY_STATES;
use crate::scene::SceneTree;
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<SceneTree>,
    redo: Vec<SceneTree>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(MAX_HISTORY_STATES)
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Shrinking drops the oldest entries first.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.trim();
    }

    /// Record the tree as it was before a mutation. Clears redo.
    pub fn push(&mut self, previous: SceneTree) {
        self.redo.clear();
        self.undo.push_back(previous);
        self.trim();
    }

    /// Step back from `current`, returning the tree to restore.
    pub fn undo(&mut self, current: &SceneTree) -> Option<SceneTree> {
        let previous = self.undo.pop_back()?;
        self.redo.push(Arc::clone(current));
        Some(previous)
    }

    /// Step forward from `current`, returning the tree to restore.
    pub fn redo(&mut self, current: &SceneTree) -> Option<SceneTree> {
        let next = self.redo.pop()?;
        self.undo.push_back(Arc::clone(current));
        self.trim();
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    fn trim(&mut self) {
        while self.undo.len() > self.capacity {
            self.undo.pop_front();
        }
    }
}
