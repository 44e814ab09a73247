//! Viewport - pan/zoom state and screen <-> canvas coordinate conversion.
//!
//! Screen space is the host's pixel space. The canvas element occupies a
//! registered rectangle of it, with rulers eating `ruler_inset` pixels along
//! the top and left edges. Pan is expressed in the space just inside the
//! rulers ("relative" space):
//!
//! ```text
//! relative = screen - canvas_origin - ruler_inset
//! canvas   = (relative - pan) / zoom
//! screen   = canvas * zoom + pan + ruler_inset + canvas_origin
//! ```

use crate::constants::{DEFAULT_VIEWPORT_SIZE, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, RULER_INSET, ZOOM_STEP};
use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Pan/zoom transform plus the visible canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Pan offset in screen pixels
    pub x: f32,
    pub y: f32,
    /// Scale factor, always within [MIN_ZOOM, MAX_ZOOM]
    pub zoom: f32,
    /// Visible canvas size in screen pixels
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: DEFAULT_ZOOM,
            width: DEFAULT_VIEWPORT_SIZE.0,
            height: DEFAULT_VIEWPORT_SIZE.1,
        }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Zoom: {:.2}x | Pan: ({:.1}, {:.1})", self.zoom, self.x, self.y)
    }
}

/// Round each component to the nearest multiple of `grid_size`.
///
/// A non-positive grid leaves the point unchanged.
pub fn snap_to_grid(point: Point, grid_size: f32) -> Point {
    if grid_size <= 0.0 {
        return point;
    }
    Point::new(
        (point.x / grid_size).round() * grid_size,
        (point.y / grid_size).round() * grid_size,
    )
}

/// Owns the viewport and the registered canvas rectangle.
#[derive(Debug, Clone)]
pub struct ViewportManager {
    viewport: Viewport,
    /// Screen-space rectangle of the canvas element, once the host reports it
    canvas_rect: Option<Rect>,
    ruler_inset: f32,
}

impl Default for ViewportManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportManager {
    pub fn new() -> Self {
        Self {
            viewport: Viewport::default(),
            canvas_rect: None,
            ruler_inset: RULER_INSET,
        }
    }

    pub fn with_ruler_inset(mut self, inset: f32) -> Self {
        self.ruler_inset = inset.max(0.0);
        self
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn zoom_level(&self) -> f32 {
        self.viewport.zoom
    }

    pub fn ruler_inset(&self) -> f32 {
        self.ruler_inset
    }

    pub fn set_ruler_inset(&mut self, inset: f32) {
        self.ruler_inset = inset.max(0.0);
        if let Some(rect) = self.canvas_rect {
            self.apply_rect_size(rect);
        }
    }

    /// Record where the canvas element sits on screen. The visible size
    /// becomes the rect minus the rulers.
    pub fn register_canvas_rect(&mut self, rect: Rect) {
        debug!(?rect, "canvas rect registered");
        self.canvas_rect = Some(rect);
        self.apply_rect_size(rect);
    }

    pub fn canvas_rect(&self) -> Option<Rect> {
        self.canvas_rect
    }

    pub fn is_canvas_registered(&self) -> bool {
        self.canvas_rect.is_some()
    }

    fn apply_rect_size(&mut self, rect: Rect) {
        self.viewport.width = (rect.width - self.ruler_inset).max(0.0);
        self.viewport.height = (rect.height - self.ruler_inset).max(0.0);
    }

    /// Change zoom by `delta`, clamped to [MIN_ZOOM, MAX_ZOOM].
    ///
    /// With a screen-space `center`, pan is re-solved so the canvas point
    /// under `center` stays put. Returns whether the viewport changed.
    pub fn zoom(&mut self, delta: f32, center: Option<Point>) -> bool {
        let old_zoom = self.viewport.zoom;
        let new_zoom = (old_zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
        if delta == 0.0 || new_zoom == old_zoom {
            return false;
        }

        if let Some(center) = center {
            let anchor = self.screen_to_relative(center);
            let ratio = new_zoom / old_zoom;
            self.viewport.x = anchor.x - (anchor.x - self.viewport.x) * ratio;
            self.viewport.y = anchor.y - (anchor.y - self.viewport.y) * ratio;
        }
        self.viewport.zoom = new_zoom;
        true
    }

    pub fn zoom_in(&mut self) -> bool {
        self.zoom(ZOOM_STEP, None)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.zoom(-ZOOM_STEP, None)
    }

    /// Back to 100% without touching pan.
    pub fn reset_zoom(&mut self) {
        self.viewport.zoom = DEFAULT_ZOOM;
    }

    /// Back to 100% at the origin, keeping the visible size.
    pub fn reset(&mut self) {
        self.viewport.x = 0.0;
        self.viewport.y = 0.0;
        self.viewport.zoom = DEFAULT_ZOOM;
    }

    /// Unbounded pan by a screen-space delta.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.viewport.x += dx;
        self.viewport.y += dy;
    }

    /// Convert a screen position to canvas coordinates.
    ///
    /// Before a canvas rect is registered this logs a warning and returns the
    /// origin.
    pub fn screen_to_canvas(&self, screen_x: f32, screen_y: f32) -> Point {
        let Some(rect) = self.canvas_rect else {
            warn!(screen_x, screen_y, "screen_to_canvas called before the canvas rect was registered");
            return Point::ZERO;
        };
        let relative = Point::new(
            screen_x - rect.x - self.ruler_inset,
            screen_y - rect.y - self.ruler_inset,
        );
        Point::new(
            (relative.x - self.viewport.x) / self.viewport.zoom,
            (relative.y - self.viewport.y) / self.viewport.zoom,
        )
    }

    /// Exact inverse of [`Self::screen_to_canvas`].
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        let Some(rect) = self.canvas_rect else {
            warn!(x = canvas.x, y = canvas.y, "canvas_to_screen called before the canvas rect was registered");
            return Point::ZERO;
        };
        Point::new(
            canvas.x * self.viewport.zoom + self.viewport.x + self.ruler_inset + rect.x,
            canvas.y * self.viewport.zoom + self.viewport.y + self.ruler_inset + rect.y,
        )
    }

    /// Screen point expressed in pan space. Without a registered rect the
    /// point is taken as already relative.
    fn screen_to_relative(&self, screen: Point) -> Point {
        match self.canvas_rect {
            Some(rect) => Point::new(
                screen.x - rect.x - self.ruler_inset,
                screen.y - rect.y - self.ruler_inset,
            ),
            None => screen,
        }
    }

    /// Zoom and pan so `bounds` (canvas space) is centred with `padding`
    /// screen pixels kept free on every side.
    pub fn fit_to_content(&mut self, bounds: Rect, padding: f32) {
        let available_width = self.viewport.width - padding * 2.0;
        let available_height = self.viewport.height - padding * 2.0;

        let fit = |available: f32, extent: f32| {
            if extent > 0.0 { available / extent } else { f32::INFINITY }
        };
        let zoom = fit(available_width, bounds.width)
            .min(fit(available_height, bounds.height))
            .min(MAX_ZOOM)
            .max(MIN_ZOOM);

        self.viewport.zoom = zoom;
        self.viewport.x = (self.viewport.width - bounds.width * zoom) / 2.0 - bounds.x * zoom;
        self.viewport.y = (self.viewport.height - bounds.height * zoom) / 2.0 - bounds.y * zoom;
        debug!(zoom, x = self.viewport.x, y = self.viewport.y, "fit to content");
    }
}
