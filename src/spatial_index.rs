//! Spatial Index Module
//!
//! Bounding-box index over scene nodes, backed by an R-tree. The index is
//! derived state: it is rebuilt from scratch whenever the tree changes and
//! only covers nodes carrying both a position and a size.

use crate::geometry::{Point, Rect};
use crate::profile_scope;
use crate::scene::{SceneNode, traverse};
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

/// A spatial entry representing one node's bounding box.
#[derive(Debug, Clone)]
pub struct SpatialEntry {
    pub node_id: String,
    pub bounds: Rect,
    /// Pre-order position in the tree; later entries draw on top
    pub order: usize,
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.min_x(), self.bounds.min_y()],
            [self.bounds.max_x(), self.bounds.max_y()],
        )
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.node_id == other.node_id
    }
}

/// Map from node id to bounding box with R-tree range queries.
#[derive(Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<String, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index covering every node of `root` that has geometry.
    pub fn from_tree(root: &SceneNode) -> Self {
        let mut index = Self::new();
        index.rebuild(root);
        index
    }

    pub fn rebuild(&mut self, root: &SceneNode) {
        profile_scope!("spatial_index_rebuild");

        let entries: Vec<SpatialEntry> = traverse::geometry_entries(root)
            .into_iter()
            .enumerate()
            .map(|(order, (node_id, bounds))| SpatialEntry {
                node_id,
                bounds,
                order,
            })
            .collect();

        self.entries = entries.iter().map(|e| (e.node_id.clone(), e.clone())).collect();
        self.tree = RTree::bulk_load(entries);
    }

    pub fn get(&self, node_id: &str) -> Option<Rect> {
        self.entries.get(node_id).map(|e| e.bounds)
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.entries.contains_key(node_id)
    }

    /// Every indexed id in document order.
    pub fn ids(&self) -> Vec<String> {
        let mut entries: Vec<&SpatialEntry> = self.entries.values().collect();
        entries.sort_by_key(|e| e.order);
        entries.into_iter().map(|e| e.node_id.clone()).collect()
    }

    /// Ids whose box overlaps `rect` (closed overlap), in document order.
    pub fn query_rect(&self, rect: &Rect) -> Vec<String> {
        let envelope = AABB::from_corners([rect.min_x(), rect.min_y()], [rect.max_x(), rect.max_y()]);

        let mut hits: Vec<&SpatialEntry> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.bounds.intersects(rect))
            .collect();
        hits.sort_by_key(|e| e.order);
        hits.into_iter().map(|e| e.node_id.clone()).collect()
    }

    /// Ids whose box contains `point`, topmost first.
    pub fn query_point(&self, point: Point) -> Vec<String> {
        let envelope = AABB::from_point([point.x, point.y]);

        let mut hits: Vec<&SpatialEntry> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.bounds.contains_point(point))
            .collect();
        hits.sort_by_key(|e| std::cmp::Reverse(e.order));
        hits.into_iter().map(|e| e.node_id.clone()).collect()
    }

    /// Topmost node under `point`.
    pub fn topmost_at(&self, point: Point) -> Option<String> {
        self.query_point(point).into_iter().next()
    }

    /// Union of every indexed box.
    pub fn content_bounds(&self) -> Option<Rect> {
        self.entries
            .values()
            .map(|e| e.bounds)
            .reduce(|acc, bounds| acc.union(&bounds))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree = RTree::new();
        self.entries.clear();
    }
}
