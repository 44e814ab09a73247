//! Palette drag preview and drop.
//!
//! Nothing is mutated while the preview is active. Only a drop reaches the
//! resolver; a cancel just drops the transient state.

use super::InteractionState;
use crate::editor::CanvasEditor;
use crate::geometry::Point;
use crate::placement::{DropRequest, DropTarget};
use tracing::{debug, warn};

impl CanvasEditor {
    pub fn handle_drag_enter(&mut self, payload: Option<String>, position: Point) -> bool {
        if self.interaction.is_drag_preview() {
            self.interaction = InteractionState::drag_preview(payload, position);
            return true;
        }
        if !self.interaction.is_idle() {
            debug!(state = self.interaction.name(), "drag enter ignored");
            return false;
        }
        self.set_interaction(InteractionState::drag_preview(payload, position));
        true
    }

    pub fn handle_drag_over(&mut self, position: Point) -> bool {
        if !self.interaction.is_drag_preview() {
            return false;
        }
        self.interaction.set_drag_position(position);
        true
    }

    /// The drag left the canvas: cancel the preview.
    pub fn handle_drag_leave(&mut self) -> bool {
        if !self.interaction.is_drag_preview() {
            return false;
        }
        self.set_interaction(InteractionState::Idle);
        true
    }

    /// Resolve a drop and return the inserted node's id.
    ///
    /// Accepted from `DragPreview` and also from `Idle` for hosts that never
    /// report drag enter. Unknown payloads and rejected inserts leave the tree
    /// untouched.
    pub fn handle_drop(&mut self, payload: &str, position: Point, target: DropTarget) -> Option<String> {
        if !(self.interaction.is_idle() || self.interaction.is_drag_preview()) {
            debug!(state = self.interaction.name(), "drop ignored");
            return None;
        }

        let request = DropRequest {
            payload: payload.to_string(),
            screen_position: position,
            target,
        };
        let outcome = self.drop_component(&request);
        self.set_interaction(InteractionState::Idle);

        match outcome {
            Ok(node_id) => node_id,
            Err(e) => {
                warn!(error = %e, payload, "drop rejected");
                None
            }
        }
    }
}
