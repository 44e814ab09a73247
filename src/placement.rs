//! Drag/drop placement - turning a palette drop into a scene insertion.
//!
//! The palette puts a plain component-type string on the drag channel. On
//! drop the resolver looks it up in the [`ComponentCatalog`] passed in by the
//! host, converts the drop point to canvas space, optionally snaps it, and
//! inserts a fresh node where the [`PlacementRules`] say it belongs.
//! Unknown payloads are a logged no-op and never touch the tree.

use crate::constants::{PINNED_FIRST_TYPES, PINNED_LAST_TYPES};
use crate::error::SceneResult;
use crate::geometry::{Point, Size};
use crate::profile_scope;
use crate::scene::{self, PlacementPolicy, Props, SceneNode, SceneTree};
use crate::selection::GridConfig;
use crate::viewport::{ViewportManager, snap_to_grid};
use std::collections::HashMap;
use tracing::{debug, warn};
use uuid::Uuid;

// ============================================================================
// Placement rules
// ============================================================================

/// Type-based anchors for root-level blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRules {
    pinned_first: Vec<String>,
    pinned_last: Vec<String>,
}

impl Default for PlacementRules {
    fn default() -> Self {
        Self::new(
            PINNED_FIRST_TYPES.iter().map(|s| s.to_string()),
            PINNED_LAST_TYPES.iter().map(|s| s.to_string()),
        )
    }
}

impl PlacementRules {
    pub fn new<F, L>(pinned_first: F, pinned_last: L) -> Self
    where
        F: IntoIterator<Item = String>,
        L: IntoIterator<Item = String>,
    {
        Self {
            pinned_first: pinned_first.into_iter().collect(),
            pinned_last: pinned_last.into_iter().collect(),
        }
    }

    pub fn is_pinned_first(&self, node_type: &str) -> bool {
        self.pinned_first.iter().any(|t| t.eq_ignore_ascii_case(node_type))
    }

    pub fn is_pinned_last(&self, node_type: &str) -> bool {
        self.pinned_last.iter().any(|t| t.eq_ignore_ascii_case(node_type))
    }

    /// Pick the policy for a node of `node_type` dropped at `target`.
    /// Anchored types ignore the requested index.
    pub fn resolve(&self, node_type: &str, target: &DropTarget) -> PlacementPolicy {
        let requested = match target.index {
            Some(index) => PlacementPolicy::At {
                parent: target.parent.clone(),
                index,
            },
            None => PlacementPolicy::Append {
                parent: target.parent.clone(),
            },
        };
        self.anchor(node_type, requested)
    }

    /// `requested`, unless `node_type` is pinned to the first or last root
    /// slot, in which case the pin wins.
    pub fn anchor(&self, node_type: &str, requested: PlacementPolicy) -> PlacementPolicy {
        if self.is_pinned_first(node_type) {
            PlacementPolicy::First
        } else if self.is_pinned_last(node_type) {
            PlacementPolicy::Last
        } else {
            requested
        }
    }
}

// ============================================================================
// Component catalog
// ============================================================================

/// What the editor knows about one droppable component type.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub node_type: String,
    pub default_size: Option<Size>,
    pub default_props: Props,
}

impl CatalogEntry {
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            default_size: None,
            default_props: Props::new(),
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.default_size = Some(Size::new(width, height));
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.default_props.insert(key.into(), value.into());
        self
    }
}

/// Component types the host accepts on drop.
#[derive(Debug, Clone, Default)]
pub struct ComponentCatalog {
    entries: HashMap<String, CatalogEntry>,
}

impl ComponentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of bare types with no defaults.
    pub fn from_types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Self::new();
        for node_type in types {
            catalog.register(CatalogEntry::new(node_type));
        }
        catalog
    }

    pub fn register(&mut self, entry: CatalogEntry) {
        self.entries.insert(entry.node_type.clone(), entry);
    }

    pub fn with_entry(mut self, entry: CatalogEntry) -> Self {
        self.register(entry);
        self
    }

    pub fn get(&self, node_type: &str) -> Option<&CatalogEntry> {
        self.entries.get(node_type)
    }

    pub fn contains(&self, node_type: &str) -> bool {
        self.entries.contains_key(node_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Drop resolution
// ============================================================================

/// Where in the tree the host says the drop landed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropTarget {
    /// Parent container; root when `None`
    pub parent: Option<String>,
    /// Drop index within the parent; append when `None`
    pub index: Option<usize>,
}

impl DropTarget {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn at(index: usize) -> Self {
        Self {
            parent: None,
            index: Some(index),
        }
    }
}

/// A drop event as delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct DropRequest {
    /// Raw string read from the drag channel
    pub payload: String,
    pub screen_position: Point,
    pub target: DropTarget,
}

/// Result of a successful drop.
#[derive(Debug, Clone)]
pub struct ResolvedDrop {
    pub tree: SceneTree,
    pub node_id: String,
    pub policy: PlacementPolicy,
}

/// Id for a freshly dropped node: type name plus a random suffix.
pub fn generate_node_id(node_type: &str) -> String {
    format!("{}-{}", node_type, Uuid::new_v4().simple())
}

#[derive(Debug, Clone, Default)]
pub struct DropResolver {
    rules: PlacementRules,
    catalog: ComponentCatalog,
}

impl DropResolver {
    pub fn new(rules: PlacementRules, catalog: ComponentCatalog) -> Self {
        Self { rules, catalog }
    }

    pub fn rules(&self) -> &PlacementRules {
        &self.rules
    }

    pub fn set_rules(&mut self, rules: PlacementRules) {
        self.rules = rules;
    }

    pub fn catalog(&self) -> &ComponentCatalog {
        &self.catalog
    }

    pub fn set_catalog(&mut self, catalog: ComponentCatalog) {
        self.catalog = catalog;
    }

    /// Whether `payload` names a component this resolver can insert.
    pub fn recognizes(&self, payload: &str) -> bool {
        self.catalog.contains(payload.trim())
    }

    /// Resolve `request` against `tree`.
    ///
    /// `Ok(None)` means the payload was not recognised and nothing changed.
    pub fn resolve(
        &self,
        tree: &SceneTree,
        request: &DropRequest,
        viewport: &ViewportManager,
        grid: GridConfig,
    ) -> SceneResult<Option<ResolvedDrop>> {
        profile_scope!("resolve_drop");

        let node_type = request.payload.trim();
        let Some(entry) = self.catalog.get(node_type) else {
            warn!(payload = %request.payload, "ignoring drop with unrecognized component type");
            return Ok(None);
        };

        let canvas = viewport.screen_to_canvas(request.screen_position.x, request.screen_position.y);
        let position = if grid.snap { snap_to_grid(canvas, grid.size) } else { canvas };

        let node_id = generate_node_id(&entry.node_type);
        let mut node = SceneNode::new(node_id.clone(), entry.node_type.clone());
        node.props = entry.default_props.clone();
        node.position = Some(position);
        node.size = entry.default_size;

        let policy = self.rules.resolve(&entry.node_type, &request.target);
        debug!(node_id = %node_id, ?policy, x = position.x, y = position.y, "resolved drop");
        let tree = scene::insert(tree, node, &policy)?;

        Ok(Some(ResolvedDrop { tree, node_id, policy }))
    }
}
