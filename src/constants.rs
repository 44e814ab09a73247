//! Engine-wide constants.
//!
//! Centralizes magic numbers so the viewport, selection and placement code
//! agree on the same limits and defaults.

// ============================================================================
// Zoom & Pan
// ============================================================================

/// Minimum zoom level
pub const MIN_ZOOM: f32 = 0.1;

/// Maximum zoom level
pub const MAX_ZOOM: f32 = 5.0;

/// Default zoom level
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Zoom step for zoom in / zoom out commands
pub const ZOOM_STEP: f32 = 0.1;

/// Multiplier applied to wheel delta before it becomes a zoom delta
pub const WHEEL_ZOOM_SCALE: f32 = 0.001;

// ============================================================================
// Canvas Layout
// ============================================================================

/// Width of the rulers drawn along the top and left canvas edges, in pixels
pub const RULER_INSET: f32 = 20.0;

/// Default visible canvas size before the host reports a real one
pub const DEFAULT_VIEWPORT_SIZE: (f32, f32) = (1280.0, 800.0);

/// Padding kept around content by fit-to-content, in pixels
pub const FIT_PADDING: f32 = 40.0;

// ============================================================================
// Grid
// ============================================================================

/// Default grid size in canvas units
pub const DEFAULT_GRID_SIZE: f32 = 24.0;

// ============================================================================
// History
// ============================================================================

/// Maximum undo history states to keep
pub const MAX_HISTORY_STATES: usize = 50;

// ============================================================================
// Placement
// ============================================================================

/// Block types pinned to the first root slot
pub const PINNED_FIRST_TYPES: &[&str] = &["navbar", "navigation", "header"];

/// Block types pinned to the last root slot
pub const PINNED_LAST_TYPES: &[&str] = &["footer"];

/// Id of the root node created for an empty document
pub const ROOT_ID: &str = "root";

/// Type tag of the root node created for an empty document
pub const ROOT_TYPE: &str = "page";
