//! Pointer and wheel handling - click selection, marquee, pointer panning.

use super::{InteractionState, Modifiers, PanSource, PointerButton};
use crate::editor::CanvasEditor;
use crate::geometry::Point;
use tracing::debug;

impl CanvasEditor {
    /// `target` is the node under the pointer as hit-tested by the host.
    pub fn handle_pointer_down(
        &mut self,
        position: Point,
        button: PointerButton,
        modifiers: Modifiers,
        target: Option<&str>,
    ) -> bool {
        // Pan key held: the press starts a drag that pans.
        if self.interaction.pan_source() == Some(PanSource::Key) {
            self.interaction.set_last_pan_pos(Some(position));
            return true;
        }
        if !self.interaction.is_idle() {
            debug!(state = self.interaction.name(), "pointer down ignored");
            return false;
        }

        match button {
            PointerButton::Middle => {
                self.set_interaction(InteractionState::panning(PanSource::MiddleButton, Some(position)));
                true
            }
            PointerButton::Primary => {
                match target {
                    Some(id) => {
                        let multi = modifiers.is_multi_select();
                        self.with_selection(|selection, host| selection.select(id, multi, host));
                    }
                    None => self.start_marquee(position, modifiers),
                }
                true
            }
            PointerButton::Secondary => false,
        }
    }

    pub fn handle_pointer_move(&mut self, position: Point) -> bool {
        match self.interaction {
            InteractionState::MarqueeSelecting { .. } => {
                self.interaction.set_marquee_current(position);
                let point = self.viewport.screen_to_canvas(position.x, position.y);
                self.with_selection(|selection, host| selection.update_selection_box(point, host));
                true
            }
            InteractionState::Panning { .. } => {
                // Pointer not pressed
                let Some(last) = self.interaction.last_pan_pos() else {
                    return false;
                };
                self.interaction.set_last_pan_pos(Some(position));
                self.pan(position.x - last.x, position.y - last.y);
                true
            }
            InteractionState::DragPreview { .. } => {
                self.interaction.set_drag_position(position);
                true
            }
            _ => false,
        }
    }

    pub fn handle_pointer_up(&mut self, _position: Point, button: PointerButton) -> bool {
        if self.interaction.is_marquee_selecting() {
            self.selection.end_selection_box();
            self.set_interaction(InteractionState::Idle);
            return true;
        }

        match self.interaction.pan_source() {
            Some(PanSource::MiddleButton) if button == PointerButton::Middle => {
                self.set_interaction(InteractionState::Idle);
                true
            }
            Some(PanSource::Key) => {
                // Still panning until the key is released
                self.interaction.set_last_pan_pos(None);
                true
            }
            _ => false,
        }
    }

    /// Wheel zooms around the pointer.
    pub fn handle_wheel(&mut self, delta_y: f32, position: Point) -> bool {
        let delta = -delta_y * self.settings.wheel_zoom_scale;
        self.zoom(delta, Some(position))
    }

    fn start_marquee(&mut self, position: Point, modifiers: Modifiers) {
        if !modifiers.is_multi_select() && self.selection.selection_count() > 0 {
            self.with_selection(|selection, host| selection.clear_selection(host));
        }
        let origin = self.viewport.screen_to_canvas(position.x, position.y);
        self.selection.start_selection_box(origin);
        self.set_interaction(InteractionState::marquee(position));
    }
}
