//! Keyboard handling - the pan key, Escape cancellation and selection shortcuts.

use super::{InteractionState, Key, Modifiers, PanSource};
use crate::editor::CanvasEditor;
use crate::selection::Shortcut;
use tracing::debug;

impl CanvasEditor {
    pub fn handle_key_down(&mut self, key: &Key, modifiers: Modifiers) -> bool {
        if *key == self.settings.pan_key {
            if self.interaction.is_idle() {
                self.set_interaction(InteractionState::panning(PanSource::Key, None));
                return true;
            }
            // Auto-repeat while held
            if self.interaction.pan_source() == Some(PanSource::Key) {
                return true;
            }
        }

        if *key == Key::Escape {
            if self.interaction.is_drag_preview() {
                debug!(payload = ?self.interaction.drag_payload(), "drag preview cancelled");
                self.set_interaction(InteractionState::Idle);
                return true;
            }
            if self.interaction.is_marquee_selecting() {
                self.selection.end_selection_box();
                self.set_interaction(InteractionState::Idle);
                return true;
            }
        }

        if !self.interaction.is_idle() {
            return false;
        }
        let Some(shortcut) = Shortcut::from_key(key, modifiers) else {
            return false;
        };
        debug!(shortcut = shortcut.id(), "keyboard shortcut");
        self.handle_shortcut(shortcut)
    }

    pub fn handle_key_up(&mut self, key: &Key) -> bool {
        if *key == self.settings.pan_key && self.interaction.pan_source() == Some(PanSource::Key) {
            self.set_interaction(InteractionState::Idle);
            return true;
        }
        false
    }
}
