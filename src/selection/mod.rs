//! Selection - selected-id set, marquee box and keyboard-driven movement.
//!
//! The manager owns the bounding-box index derived from the current tree but
//! never mutates the tree itself. Moves and deletions are requested through
//! a [`SelectionHost`], which also hears about every selection change.
//!
//! ## Marquee lifecycle
//!
//! ```text
//! start_selection_box(origin)   zero-size box at origin
//! update_selection_box(point)   box = span(origin, point); selection = overlap(box)
//! end_selection_box()           box discarded, selection kept
//! ```

mod keyboard;

pub use keyboard::{Direction, Shortcut};

use crate::constants::DEFAULT_GRID_SIZE;
use crate::geometry::{Point, Rect};
use crate::profile_scope;
use crate::scene::{NodeUpdate, SceneTree, traverse};
use crate::spatial_index::SpatialIndex;
use crate::viewport::snap_to_grid;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Receives the manager's outbound requests.
pub trait SelectionHost {
    /// Called with the full new selection after every change.
    fn selection_changed(&mut self, ids: &[String]);

    /// A selected node should take this update (keyboard movement).
    fn component_update(&mut self, _id: &str, _update: NodeUpdate) {}

    /// The user asked to delete these nodes.
    fn delete_components(&mut self, _ids: &[String]) {}
}

/// Host that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHost;

impl SelectionHost for NoopHost {
    fn selection_changed(&mut self, _ids: &[String]) {}
}

/// Rubber-band rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarqueeBox {
    pub start_point: Point,
    pub current_point: Point,
    pub bounding_box: Rect,
}

impl MarqueeBox {
    fn at(origin: Point) -> Self {
        Self {
            start_point: origin,
            current_point: origin,
            bounding_box: Rect::from_corners(origin, origin),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub selected_ids: BTreeSet<String>,
    pub last_selected_id: Option<String>,
    pub marquee_box: Option<MarqueeBox>,
}

/// Grid used by keyboard movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    pub size: f32,
    pub snap: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            snap: true,
        }
    }
}

#[derive(Default)]
pub struct SelectionManager {
    state: SelectionState,
    index: SpatialIndex,
    /// Tree the index was built from; compared by pointer
    indexed_tree: Option<SceneTree>,
    grid: GridConfig,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    pub fn set_grid(&mut self, grid: GridConfig) {
        self.grid = grid;
    }

    pub fn grid(&self) -> GridConfig {
        self.grid
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    /// Selected ids in sorted order.
    pub fn selected_ids(&self) -> Vec<String> {
        self.state.selected_ids.iter().cloned().collect()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.state.selected_ids.contains(id)
    }

    pub fn selection_count(&self) -> usize {
        self.state.selected_ids.len()
    }

    pub fn last_selected_id(&self) -> Option<&str> {
        self.state.last_selected_id.as_deref()
    }

    pub fn marquee_box(&self) -> Option<&MarqueeBox> {
        self.state.marquee_box.as_ref()
    }

    // ------------------------------------------------------------------------
    // Tree synchronisation
    // ------------------------------------------------------------------------

    /// Rebuild the index if `tree` is a different tree than last time.
    ///
    /// Ids that no longer exist are dropped from the selection. Returns
    /// whether a rebuild happened.
    pub fn sync_tree(&mut self, tree: &SceneTree, host: &mut dyn SelectionHost) -> bool {
        if self.indexed_tree.as_ref().is_some_and(|t| Arc::ptr_eq(t, tree)) {
            return false;
        }
        self.index.rebuild(tree);
        self.indexed_tree = Some(Arc::clone(tree));

        let live: HashSet<String> = traverse::collect_ids(tree).into_iter().collect();
        let before = self.state.selected_ids.len();
        self.state.selected_ids.retain(|id| live.contains(id));
        if self
            .state
            .last_selected_id
            .as_ref()
            .is_some_and(|id| !live.contains(id))
        {
            self.state.last_selected_id = None;
        }
        if self.state.selected_ids.len() != before {
            debug!(
                dropped = before - self.state.selected_ids.len(),
                "pruned selection after tree change"
            );
            self.notify(host);
        }
        true
    }

    /// Load a different document: index rebuilt, selection and marquee cleared.
    pub fn replace_tree(&mut self, tree: &SceneTree, host: &mut dyn SelectionHost) {
        self.index.rebuild(tree);
        self.indexed_tree = Some(Arc::clone(tree));
        let had_selection = !self.state.selected_ids.is_empty();
        self.state = SelectionState::default();
        if had_selection {
            self.notify(host);
        }
    }

    // ------------------------------------------------------------------------
    // Selection operations
    // ------------------------------------------------------------------------

    /// Without `multi_select` the selection becomes exactly `{id}`; with it,
    /// `id` is toggled.
    pub fn select(&mut self, id: &str, multi_select: bool, host: &mut dyn SelectionHost) {
        if self
            .indexed_tree
            .as_ref()
            .is_some_and(|tree| !traverse::contains_id(tree, id))
        {
            warn!(id, "selecting an id that is not in the current tree");
        }

        if multi_select {
            if !self.state.selected_ids.remove(id) {
                self.state.selected_ids.insert(id.to_string());
            }
        } else {
            self.state.selected_ids.clear();
            self.state.selected_ids.insert(id.to_string());
        }
        self.state.last_selected_id = Some(id.to_string());
        self.notify(host);
    }

    /// Replace the selection with `ids`; the last one becomes `last_selected_id`.
    pub fn select_multiple<I, S>(&mut self, ids: I, host: &mut dyn SelectionHost)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.selected_ids.clear();
        let mut last = None;
        for id in ids {
            let id = id.into();
            self.state.selected_ids.insert(id.clone());
            last = Some(id);
        }
        self.state.last_selected_id = last;
        self.notify(host);
    }

    /// Select every indexed node.
    pub fn select_all(&mut self, host: &mut dyn SelectionHost) {
        let ids = self.index.ids();
        self.state.last_selected_id = ids.last().cloned();
        self.state.selected_ids = ids.into_iter().collect();
        self.notify(host);
    }

    pub fn clear_selection(&mut self, host: &mut dyn SelectionHost) {
        self.state.selected_ids.clear();
        self.state.last_selected_id = None;
        self.notify(host);
    }

    // ------------------------------------------------------------------------
    // Marquee
    // ------------------------------------------------------------------------

    pub fn start_selection_box(&mut self, origin: Point) {
        self.state.marquee_box = Some(MarqueeBox::at(origin));
    }

    /// Stretch the marquee to `point` and recompute the selection live.
    ///
    /// The host hears `selection_changed` only when the set differs from the
    /// previous one. Ignored when no marquee is active.
    pub fn update_selection_box(&mut self, point: Point, host: &mut dyn SelectionHost) {
        profile_scope!("marquee_update");

        let Some(marquee) = self.state.marquee_box.as_mut() else {
            debug!("update_selection_box without an active marquee");
            return;
        };
        marquee.current_point = point;
        marquee.bounding_box = Rect::from_corners(marquee.start_point, point);
        let bounding_box = marquee.bounding_box;

        let hits = self.index.query_rect(&bounding_box);
        let next: BTreeSet<String> = hits.iter().cloned().collect();
        if next != self.state.selected_ids {
            self.state.selected_ids = next;
            self.state.last_selected_id = hits.last().cloned();
            self.notify(host);
        }
    }

    /// Drop the marquee, keeping whatever it selected.
    pub fn end_selection_box(&mut self) {
        self.state.marquee_box = None;
    }

    // ------------------------------------------------------------------------
    // Keyboard
    // ------------------------------------------------------------------------

    /// Run the action bound to `shortcut`. Returns whether it was handled.
    pub fn handle_shortcut(&mut self, shortcut: Shortcut, host: &mut dyn SelectionHost) -> bool {
        match shortcut {
            Shortcut::SelectAll => self.select_all(host),
            Shortcut::DeselectAll => self.clear_selection(host),
            Shortcut::DeleteSelected => self.delete_selected(host),
            Shortcut::Move(direction) => self.move_selection(direction, host),
            Shortcut::Extend(direction) => {
                debug!(shortcut = shortcut.id(), ?direction, "extend-selection shortcut is inert");
                return false;
            }
        }
        true
    }

    /// Ask the host to delete the selection, then clear it.
    pub fn delete_selected(&mut self, host: &mut dyn SelectionHost) {
        if self.state.selected_ids.is_empty() {
            return;
        }
        let ids = self.selected_ids();
        host.delete_components(&ids);
        self.clear_selection(host);
    }

    /// Translate every selected node by one grid unit in `direction`.
    ///
    /// Positions come from the tree, so a node with a position but no size
    /// still moves. Nodes without a position are skipped.
    ///
    /// Each node's target is computed from its own prior position, so the
    /// result does not depend on iteration order. With snapping on, each
    /// result is rounded to the grid independently.
    pub fn move_selection(&mut self, direction: Direction, host: &mut dyn SelectionHost) {
        let step = if self.grid.size > 0.0 { self.grid.size } else { 1.0 };
        let (dx, dy) = direction.unit();

        let Some(tree) = self.indexed_tree.as_ref() else {
            debug!("move requested before any tree was synced");
            return;
        };
        let moves: Vec<(String, Point)> = self
            .state
            .selected_ids
            .iter()
            .filter_map(|id| {
                let origin = traverse::find(tree, id).and_then(|node| node.position)?;
                Some((id.clone(), origin))
            })
            .map(|(id, origin)| {
                let moved = origin.offset(dx * step, dy * step);
                let target = if self.grid.snap { snap_to_grid(moved, self.grid.size) } else { moved };
                (id, target)
            })
            .collect();

        for (id, position) in moves {
            host.component_update(&id, NodeUpdate::new().position(position));
        }
    }

    fn notify(&self, host: &mut dyn SelectionHost) {
        host.selection_changed(&self.selected_ids());
    }
}
