//! Host input port.
//!
//! The host translates its native pointer, keyboard, wheel and drag events
//! into these values and feeds them to [`crate::CanvasEditor::handle_event`]
//! one at a time. Positions are always in screen space.

use crate::geometry::Point;
use crate::placement::DropTarget;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    /// Command on macOS, Windows key elsewhere
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn ctrl() -> Self {
        Self {
            control: true,
            ..Self::NONE
        }
    }

    /// The platform shortcut modifier ("Mod"): Control or Command.
    pub fn is_mod(&self) -> bool {
        self.control || self.meta
    }

    /// Whether a click should toggle rather than replace the selection.
    pub fn is_multi_select(&self) -> bool {
        self.shift || self.is_mod()
    }
}

/// Keys the engine distinguishes. Anything else arrives as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Character(char),
    Space,
    Escape,
    Delete,
    Backspace,
    Enter,
    Tab,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Other(String),
}

impl Key {
    /// Parse a DOM-style key name (`"ArrowUp"`, `" "`, `"a"`).
    pub fn from_name(name: &str) -> Self {
        match name {
            " " | "Space" | "Spacebar" => Key::Space,
            "Escape" | "Esc" => Key::Escape,
            "Delete" | "Del" => Key::Delete,
            "Backspace" => Key::Backspace,
            "Enter" => Key::Enter,
            "Tab" => Key::Tab,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Character(c),
                    _ => Key::Other(other.to_string()),
                }
            }
        }
    }
}

/// One discrete input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// `target` is the node the host hit-tested under the pointer, if any
    PointerDown {
        position: Point,
        button: PointerButton,
        modifiers: Modifiers,
        target: Option<String>,
    },
    PointerMove {
        position: Point,
    },
    PointerUp {
        position: Point,
        button: PointerButton,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
    },
    KeyUp {
        key: Key,
    },
    Wheel {
        delta_y: f32,
        position: Point,
    },
    /// A palette drag entered the canvas; the payload may only be readable on drop
    DragEnter {
        payload: Option<String>,
        position: Point,
    },
    DragOver {
        position: Point,
    },
    /// The drag left the canvas entirely
    DragLeave,
    Drop {
        payload: String,
        position: Point,
        target: DropTarget,
    },
}
