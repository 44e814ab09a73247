//! Interaction state machine - which component owns the current gesture.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> MarqueeSelecting     (primary pointer down on empty canvas)
//! Idle -> Panning              (pan key down, or middle pointer down)
//! Idle -> DragPreview          (palette drag enters the canvas)
//!
//! MarqueeSelecting -> Idle     (pointer up)
//! Panning -> Idle              (pan key up, or middle pointer up)
//! DragPreview -> Idle          (drop, Escape, or drag leaving the canvas)
//! ```
//!
//! A primary pointer down on a node selects it and stays in `Idle`.

use crate::geometry::Point;

/// What started a pan gesture; decides which release ends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanSource {
    Key,
    MiddleButton,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum InteractionState {
    /// No active gesture
    #[default]
    Idle,

    /// Rubber-band selection
    MarqueeSelecting {
        /// Screen position of the pointer down
        start: Point,
        /// Latest screen position
        current: Point,
    },

    /// Viewport panning
    Panning {
        source: PanSource,
        /// Last pointer position while the pointer is pressed
        last_pos: Option<Point>,
    },

    /// A palette item is being dragged over the canvas
    DragPreview {
        payload: Option<String>,
        /// Latest screen position of the drag
        position: Option<Point>,
    },
}

impl InteractionState {
    /// Upper-case state name, as used in logs and observer events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::MarqueeSelecting { .. } => "MARQUEE_SELECTING",
            Self::Panning { .. } => "PANNING",
            Self::DragPreview { .. } => "DRAG_PREVIEW",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_marquee_selecting(&self) -> bool {
        matches!(self, Self::MarqueeSelecting { .. })
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }

    pub fn is_drag_preview(&self) -> bool {
        matches!(self, Self::DragPreview { .. })
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }

    /// Marquee anchored at the pointer-down position.
    pub fn marquee(start: Point) -> Self {
        Self::MarqueeSelecting { start, current: start }
    }

    pub fn set_marquee_current(&mut self, position: Point) {
        if let Self::MarqueeSelecting { current, .. } = self {
            *current = position;
        }
    }

    pub fn panning(source: PanSource, last_pos: Option<Point>) -> Self {
        Self::Panning { source, last_pos }
    }

    pub fn pan_source(&self) -> Option<PanSource> {
        match self {
            Self::Panning { source, .. } => Some(*source),
            _ => None,
        }
    }

    pub fn last_pan_pos(&self) -> Option<Point> {
        match self {
            Self::Panning { last_pos, .. } => *last_pos,
            _ => None,
        }
    }

    pub fn set_last_pan_pos(&mut self, position: Option<Point>) {
        if let Self::Panning { last_pos, .. } = self {
            *last_pos = position;
        }
    }

    pub fn drag_preview(payload: Option<String>, position: Point) -> Self {
        Self::DragPreview {
            payload,
            position: Some(position),
        }
    }

    pub fn set_drag_position(&mut self, new_position: Point) {
        if let Self::DragPreview { position, .. } = self {
            *position = Some(new_position);
        }
    }

    pub fn drag_payload(&self) -> Option<&str> {
        match self {
            Self::DragPreview { payload, .. } => payload.as_deref(),
            _ => None,
        }
    }
}
