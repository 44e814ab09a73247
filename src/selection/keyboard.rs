//! Keyboard shortcuts understood by the selection manager.
//!
//! | Chord                   | Shortcut          |
//! |-------------------------|-------------------|
//! | `Mod+A`                 | select-all        |
//! | `Escape`                | deselect-all      |
//! | `Delete` / `Backspace`  | delete-selected   |
//! | `Arrow*`                | move-*            |
//! | `Shift+Arrow*`          | extend-* (inert)  |

use crate::input::{Key, Modifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector in canvas space (y grows downward).
    pub fn unit(self) -> (f32, f32) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }

    fn from_arrow(key: &Key) -> Option<Self> {
        match key {
            Key::ArrowUp => Some(Direction::Up),
            Key::ArrowDown => Some(Direction::Down),
            Key::ArrowLeft => Some(Direction::Left),
            Key::ArrowRight => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shortcut {
    SelectAll,
    DeselectAll,
    DeleteSelected,
    Move(Direction),
    /// Reserved; has an identifier but no behaviour
    Extend(Direction),
}

impl Shortcut {
    /// Map a key chord to its shortcut.
    pub fn from_key(key: &Key, modifiers: Modifiers) -> Option<Self> {
        if let Some(direction) = Direction::from_arrow(key) {
            return Some(if modifiers.shift {
                Shortcut::Extend(direction)
            } else {
                Shortcut::Move(direction)
            });
        }

        match key {
            Key::Character(c) if c.eq_ignore_ascii_case(&'a') && modifiers.is_mod() => Some(Shortcut::SelectAll),
            Key::Escape => Some(Shortcut::DeselectAll),
            Key::Delete | Key::Backspace => Some(Shortcut::DeleteSelected),
            _ => None,
        }
    }

    /// Stable identifier for hosts that bind shortcuts by name.
    pub fn id(self) -> &'static str {
        match self {
            Shortcut::SelectAll => "select-all",
            Shortcut::DeselectAll => "deselect-all",
            Shortcut::DeleteSelected => "delete-selected",
            Shortcut::Move(Direction::Up) => "move-up",
            Shortcut::Move(Direction::Down) => "move-down",
            Shortcut::Move(Direction::Left) => "move-left",
            Shortcut::Move(Direction::Right) => "move-right",
            Shortcut::Extend(Direction::Up) => "extend-up",
            Shortcut::Extend(Direction::Down) => "extend-down",
            Shortcut::Extend(Direction::Left) => "extend-left",
            Shortcut::Extend(Direction::Right) => "extend-right",
        }
    }
}
