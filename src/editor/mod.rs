//! The canvas editor - one explicit object owning all editing state.
//!
//! `CanvasEditor` holds the current scene tree, the viewport, the selection,
//! the interaction state, undo history and settings. Hosts construct it,
//! feed it input, subscribe observers, and call [`CanvasEditor::shutdown`]
//! when the canvas goes away.
//!
//! Every tree change goes through [`CanvasEditor::commit`]: the previous
//! tree is pushed to history, the selection index is resynchronized, and
//! observers hear `TreeChanged`.

mod events;
mod render;

pub use events::{EditorEvent, EditorObserver, ObserverId};
pub use render::NodeRenderer;

use events::{ObserverList, notify_all};

use crate::error::{SceneError, SceneResult};
use crate::geometry::{Point, Rect};
use crate::history::History;
use crate::input::InteractionState;
use crate::placement::{ComponentCatalog, DropRequest, DropResolver};
use crate::scene::{self, NodeUpdate, PlacementPolicy, SceneNode, SceneTree};
use crate::selection::{SelectionHost, SelectionManager, Shortcut};
use crate::settings::EditorSettings;
use crate::settings_watcher::{SettingsEvent, SettingsWatcher};
use crate::viewport::{Viewport, ViewportManager};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Receives emitted snapshots.
pub type SaveHandler = Box<dyn FnMut(&SceneTree)>;

// ============================================================================
// Selection hosts
// ============================================================================

/// Applies the selection manager's requests to the editor's tree.
struct TreeHost<'a> {
    tree: &'a mut SceneTree,
    observers: &'a mut ObserverList,
}

impl SelectionHost for TreeHost<'_> {
    fn selection_changed(&mut self, ids: &[String]) {
        notify_all(self.observers, &EditorEvent::SelectionChanged(ids.to_vec()));
    }

    fn component_update(&mut self, id: &str, update: NodeUpdate) {
        *self.tree = scene::update(self.tree, id, &update);
    }

    fn delete_components(&mut self, ids: &[String]) {
        for id in ids {
            match scene::delete(self.tree, id) {
                Some(next) => *self.tree = next,
                None => warn!(id = %id, "refusing to delete the root node"),
            }
        }
    }
}

/// Forwards selection changes only; used when the tree is already final.
struct ObserverHost<'a>(&'a mut ObserverList);

impl SelectionHost for ObserverHost<'_> {
    fn selection_changed(&mut self, ids: &[String]) {
        notify_all(self.0, &EditorEvent::SelectionChanged(ids.to_vec()));
    }
}

// ============================================================================
// Editor
// ============================================================================

pub struct CanvasEditor {
    pub(crate) tree: SceneTree,
    pub(crate) viewport: ViewportManager,
    pub(crate) selection: SelectionManager,
    pub(crate) interaction: InteractionState,
    pub(crate) settings: EditorSettings,
    resolver: DropResolver,
    history: History,
    observers: ObserverList,
    next_observer_id: u64,
    save_handler: Option<SaveHandler>,
}

impl Default for CanvasEditor {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl CanvasEditor {
    /// Editor over an empty document.
    pub fn new(settings: EditorSettings) -> Self {
        Self::with_tree(scene::empty_document(), settings)
    }

    pub fn with_tree(tree: SceneTree, settings: EditorSettings) -> Self {
        let mut editor = Self {
            tree: Arc::clone(&tree),
            viewport: ViewportManager::new(),
            selection: SelectionManager::new(),
            interaction: InteractionState::Idle,
            settings: EditorSettings::default(),
            resolver: DropResolver::default(),
            history: History::default(),
            observers: Vec::new(),
            next_observer_id: 0,
            save_handler: None,
        };
        editor.apply_settings(settings);
        editor.selection.replace_tree(&tree, &mut ObserverHost(&mut editor.observers));
        editor
    }

    /// Editor initialised from a JSON snapshot, validated at the boundary.
    pub fn from_snapshot_json(json: &str, settings: EditorSettings) -> SceneResult<Self> {
        let tree = scene::load_snapshot(json)?;
        Ok(Self::with_tree(tree, settings))
    }

    /// Tear down: observers and the save handler are dropped, transient
    /// interaction state is discarded.
    pub fn shutdown(&mut self) {
        self.observers.clear();
        self.save_handler = None;
        self.interaction.reset();
        self.selection.end_selection_box();
        debug!("canvas editor shut down");
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn tree(&self) -> &SceneTree {
        &self.tree
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport.viewport()
    }

    pub fn viewport_manager(&self) -> &ViewportManager {
        &self.viewport
    }

    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    pub fn selected_ids(&self) -> Vec<String> {
        self.selection.selected_ids()
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn resolver(&self) -> &DropResolver {
        &self.resolver
    }

    /// Component types accepted on drop.
    pub fn set_catalog(&mut self, catalog: ComponentCatalog) {
        self.resolver.set_catalog(catalog);
    }

    // ------------------------------------------------------------------------
    // Observers and persistence
    // ------------------------------------------------------------------------

    pub fn subscribe(&mut self, observer: impl EditorObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    pub fn set_save_handler(&mut self, handler: impl FnMut(&SceneTree) + 'static) {
        self.save_handler = Some(Box::new(handler));
    }

    /// Hand the current tree to the save handler. Returns whether one is set.
    pub fn save(&mut self) -> bool {
        match self.save_handler.as_mut() {
            Some(handler) => {
                handler(&self.tree);
                true
            }
            None => {
                debug!("save requested without a save handler");
                false
            }
        }
    }

    pub fn snapshot_json(&self) -> SceneResult<String> {
        scene::to_json(&self.tree)
    }

    // ------------------------------------------------------------------------
    // Document
    // ------------------------------------------------------------------------

    /// Replace the whole document. Selection, history and any gesture in
    /// progress are discarded.
    pub fn set_tree(&mut self, tree: SceneTree) {
        self.tree = Arc::clone(&tree);
        self.history.clear();
        self.selection.replace_tree(&tree, &mut ObserverHost(&mut self.observers));
        self.set_interaction(InteractionState::Idle);
        self.emit(EditorEvent::TreeChanged);
    }

    pub fn load_snapshot(&mut self, json: &str) -> SceneResult<()> {
        let tree = scene::load_snapshot(json)?;
        self.set_tree(tree);
        Ok(())
    }

    /// Shallow-merge `update` into node `id`. Returns whether the tree changed.
    pub fn update_node(&mut self, id: &str, update: &NodeUpdate) -> bool {
        if update.is_empty() {
            return false;
        }
        let before = Arc::clone(&self.tree);
        self.tree = scene::update(&before, id, update);
        self.commit(before)
    }

    /// Remove `id` and its subtree. The root cannot be deleted.
    pub fn delete_node(&mut self, id: &str) -> bool {
        let before = Arc::clone(&self.tree);
        match scene::delete(&before, id) {
            Some(next) => {
                self.tree = next;
                self.commit(before)
            }
            None => {
                warn!(id, "refusing to delete the root node");
                false
            }
        }
    }

    /// Insert `node` at `placement`. Pinned types go to their anchored root
    /// slot whatever `placement` asks for.
    pub fn insert_node(&mut self, node: SceneNode, placement: &PlacementPolicy) -> SceneResult<()> {
        let policy = self.resolver.rules().anchor(&node.node_type, placement.clone());
        let before = Arc::clone(&self.tree);
        self.tree = scene::insert(&before, node, &policy)?;
        self.commit(before);
        Ok(())
    }

    /// Reorder `id` to `index` within `parent` (root when `None`). A pinned
    /// type stays in its anchored root slot.
    pub fn move_node(&mut self, id: &str, parent: Option<&str>, index: usize) -> SceneResult<()> {
        let node_type = scene::traverse::find(&self.tree, id)
            .map(|node| node.node_type.clone())
            .ok_or_else(|| SceneError::NodeNotFound(id.to_string()))?;
        let requested = PlacementPolicy::At {
            parent: parent.map(str::to_string),
            index,
        };
        let policy = self.resolver.rules().anchor(&node_type, requested);
        if !matches!(policy, PlacementPolicy::At { .. }) {
            debug!(id, ?policy, "pinned type kept at its anchor");
        }
        let before = Arc::clone(&self.tree);
        self.tree = scene::relocate(&before, id, &policy)?;
        self.commit(before);
        Ok(())
    }

    /// Resolve a palette drop. `Ok(None)` for unrecognised payloads.
    pub fn drop_component(&mut self, request: &DropRequest) -> SceneResult<Option<String>> {
        let grid = self.selection.grid();
        let Some(resolved) = self.resolver.resolve(&self.tree, request, &self.viewport, grid)? else {
            return Ok(None);
        };
        let before = std::mem::replace(&mut self.tree, resolved.tree);
        self.commit(before);
        Ok(Some(resolved.node_id))
    }

    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.undo(&self.tree) else {
            return false;
        };
        self.tree = previous;
        self.after_tree_restored();
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(next) = self.history.redo(&self.tree) else {
            return false;
        };
        self.tree = next;
        self.after_tree_restored();
        true
    }

    /// Finish a mutation that replaced `self.tree`, given the tree it replaced.
    pub(crate) fn commit(&mut self, before: SceneTree) -> bool {
        if Arc::ptr_eq(&before, &self.tree) {
            return false;
        }
        self.history.push(before);
        self.sync_selection();
        self.emit(EditorEvent::TreeChanged);
        true
    }

    fn after_tree_restored(&mut self) {
        self.sync_selection();
        self.emit(EditorEvent::TreeChanged);
    }

    fn sync_selection(&mut self) {
        let tree = Arc::clone(&self.tree);
        self.selection.sync_tree(&tree, &mut ObserverHost(&mut self.observers));
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    /// Run `f` against the selection manager with a host that edits the
    /// tree, then commit whatever the host changed as one history step.
    pub(crate) fn with_selection<R>(
        &mut self,
        f: impl FnOnce(&mut SelectionManager, &mut dyn SelectionHost) -> R,
    ) -> R {
        let before = Arc::clone(&self.tree);
        let mut host = TreeHost {
            tree: &mut self.tree,
            observers: &mut self.observers,
        };
        let result = f(&mut self.selection, &mut host);
        self.commit(before);
        result
    }

    pub fn select(&mut self, id: &str, multi_select: bool) {
        self.with_selection(|selection, host| selection.select(id, multi_select, host));
    }

    pub fn select_multiple<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_selection(|selection, host| selection.select_multiple(ids, host));
    }

    pub fn select_all(&mut self) {
        self.with_selection(|selection, host| selection.select_all(host));
    }

    pub fn clear_selection(&mut self) {
        self.with_selection(|selection, host| selection.clear_selection(host));
    }

    /// Returns whether the shortcut did anything.
    pub fn handle_shortcut(&mut self, shortcut: Shortcut) -> bool {
        self.with_selection(|selection, host| selection.handle_shortcut(shortcut, host))
    }

    /// Topmost indexed node under a screen position.
    pub fn hit_test(&self, screen: Point) -> Option<String> {
        let point = self.viewport.screen_to_canvas(screen.x, screen.y);
        self.selection.index().topmost_at(point)
    }

    // ------------------------------------------------------------------------
    // Viewport
    // ------------------------------------------------------------------------

    pub fn register_canvas_rect(&mut self, rect: Rect) {
        self.viewport.register_canvas_rect(rect);
        self.viewport_changed();
    }

    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        self.viewport.screen_to_canvas(screen.x, screen.y)
    }

    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        self.viewport.canvas_to_screen(canvas)
    }

    pub fn zoom(&mut self, delta: f32, center: Option<Point>) -> bool {
        let changed = self.viewport.zoom(delta, center);
        if changed {
            self.viewport_changed();
        }
        changed
    }

    pub fn zoom_in(&mut self) -> bool {
        let changed = self.viewport.zoom_in();
        if changed {
            self.viewport_changed();
        }
        changed
    }

    pub fn zoom_out(&mut self) -> bool {
        let changed = self.viewport.zoom_out();
        if changed {
            self.viewport_changed();
        }
        changed
    }

    pub fn reset_zoom(&mut self) {
        self.viewport.reset_zoom();
        self.viewport_changed();
    }

    pub fn reset_viewport(&mut self) {
        self.viewport.reset();
        self.viewport_changed();
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        self.viewport.pan(dx, dy);
        self.viewport_changed();
    }

    /// Frame every indexed node. Returns false when nothing has geometry.
    pub fn fit_to_content(&mut self) -> bool {
        let Some(bounds) = self.selection.index().content_bounds() else {
            debug!("fit to content with no indexed nodes");
            return false;
        };
        self.viewport.fit_to_content(bounds, self.settings.fit_padding);
        self.viewport_changed();
        true
    }

    fn viewport_changed(&mut self) {
        let viewport = self.viewport.viewport();
        self.emit(EditorEvent::ViewportChanged(viewport));
    }

    // ------------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------------

    pub fn apply_settings(&mut self, settings: EditorSettings) {
        self.selection.set_grid(settings.grid());
        self.viewport.set_ruler_inset(settings.ruler_inset);
        self.resolver.set_rules(settings.placement_rules());
        self.history.set_capacity(settings.max_history);
        self.settings = settings;
    }

    /// Drain the watcher and reload once if the file was created or changed.
    /// Returns whether new settings were applied.
    pub fn check_settings_reload(&mut self, watcher: &mut SettingsWatcher) -> bool {
        let mut reload = false;
        while let Some(event) = watcher.poll() {
            match event {
                SettingsEvent::Created | SettingsEvent::Modified => reload = true,
                SettingsEvent::Deleted => warn!(path = %watcher.path().display(), "settings file deleted"),
                SettingsEvent::Error(e) => error!(error = %e, "settings watch error"),
            }
        }
        if !reload {
            return false;
        }

        match EditorSettings::load_from(watcher.path()) {
            Ok(settings) => {
                info!("Settings file changed, reloading");
                self.apply_settings(settings);
                true
            }
            Err(e) => {
                warn!(error = %e, "keeping previous settings");
                false
            }
        }
    }

    // ------------------------------------------------------------------------
    // Interaction
    // ------------------------------------------------------------------------

    pub(crate) fn set_interaction(&mut self, next: InteractionState) {
        let from = self.interaction.name();
        let to = next.name();
        self.interaction = next;
        if from != to {
            debug!(from, to, "interaction state changed");
            self.emit(EditorEvent::InteractionChanged { from, to });
        }
    }

    fn emit(&mut self, event: EditorEvent) {
        notify_all(&mut self.observers, &event);
    }
}
