//! Input handling for the canvas editor.
//!
//! Hosts deliver pointer, keyboard, wheel and drag events one at a time
//! through [`InputEvent`]. The editor's [`InteractionState`] decides which
//! component handles each event: the viewport (pan, zoom), the selection
//! manager (click, marquee, shortcuts) or the drop resolver (palette drops).
//!
//! ## Modules
//!
//! - `event` - Host input port types
//! - `state` - Interaction state machine enum and helper methods
//! - `pointer` - Pointer down/move/up and wheel handling
//! - `keyboard` - Shortcuts and the pan key
//! - `drag_drop` - Palette drag preview and drop

mod drag_drop;
mod event;
mod keyboard;
mod pointer;
mod state;

pub use event::{InputEvent, Key, Modifiers, PointerButton};
pub use state::{InteractionState, PanSource};

use crate::editor::CanvasEditor;
use crate::perf::ScopedTimer;

impl CanvasEditor {
    /// Feed one host event through the state machine.
    ///
    /// Returns whether the event was consumed.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        let _timer = ScopedTimer::for_event("handle_event");

        match event {
            InputEvent::PointerDown {
                position,
                button,
                modifiers,
                target,
            } => self.handle_pointer_down(position, button, modifiers, target.as_deref()),
            InputEvent::PointerMove { position } => self.handle_pointer_move(position),
            InputEvent::PointerUp { position, button } => self.handle_pointer_up(position, button),
            InputEvent::KeyDown { key, modifiers } => self.handle_key_down(&key, modifiers),
            InputEvent::KeyUp { key } => self.handle_key_up(&key),
            InputEvent::Wheel { delta_y, position } => self.handle_wheel(delta_y, position),
            InputEvent::DragEnter { payload, position } => self.handle_drag_enter(payload, position),
            InputEvent::DragOver { position } => self.handle_drag_over(position),
            InputEvent::DragLeave => self.handle_drag_leave(),
            InputEvent::Drop {
                payload,
                position,
                target,
            } => self.handle_drop(&payload, position, target).is_some(),
        }
    }
}
