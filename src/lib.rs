//! Canvas editing engine for a block-based website builder.
//!
//! A page is a tree of typed blocks ([`SceneNode`]). The engine keeps that
//! tree as an immutable value and layers editing on top of it: a pan/zoom
//! viewport, click and marquee selection over a bounding-box index,
//! keyboard shortcuts, palette drag/drop with type-anchored placement, and
//! undo. Rendering and persistence stay with the host, behind the
//! [`NodeRenderer`] port and the save handler.
//!
//! ## Modules
//!
//! - `scene` - node tree, pure mutations, snapshot validation
//! - `viewport` - pan/zoom and screen/canvas conversion
//! - `spatial_index` - R-tree over node bounding boxes
//! - `selection` - selection state, marquee, keyboard shortcuts
//! - `placement` - component catalog and drop resolution
//! - `input` - interaction state machine and host input port
//! - `editor` - `CanvasEditor`, the object hosts drive

pub mod constants;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod history;
pub mod input;
pub mod logging;
pub mod perf;
pub mod placement;
pub mod scene;
pub mod selection;
pub mod settings;
pub mod settings_watcher;
pub mod spatial_index;
pub mod viewport;

pub use editor::{CanvasEditor, EditorEvent, EditorObserver, NodeRenderer, ObserverId};
pub use error::{SceneError, SceneResult, SettingsError, SettingsResult};
pub use geometry::{Point, Rect, Size};
pub use input::{InputEvent, InteractionState, Key, Modifiers, PointerButton};
pub use scene::{NodeUpdate, PlacementPolicy, SceneNode, SceneTree};
pub use settings::EditorSettings;
