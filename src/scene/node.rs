//! Scene node and update types.

use crate::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Untyped property bag handed to node renderers.
pub type Props = Map<String, Value>;

/// A tree is an immutable root node; every mutation returns a new root and
/// shares unchanged subtrees with the previous one.
pub type SceneTree = Arc<SceneNode>;

/// One element of the document being edited.
///
/// The engine never interprets `node_type` or `props`; they are forwarded to
/// the renderer registered for the type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    /// Unique across the whole tree
    pub id: String,
    /// Tag identifying which renderer draws this node
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub props: Props,
    /// Canvas-space position; nodes without geometry are not spatially indexed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// Render order: left-to-right / top-to-bottom
    #[serde(default)]
    pub children: Vec<Arc<SceneNode>>,
}

impl SceneNode {
    pub fn new(id: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            props: Props::new(),
            position: None,
            size: None,
            children: Vec::new(),
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = Some(Point::new(x, y));
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }

    /// Set position and size in one call.
    pub fn with_bounds(self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.with_position(x, y).with_size(width, height)
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(Arc::new(child));
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = SceneNode>) -> Self {
        self.children.extend(children.into_iter().map(Arc::new));
        self
    }

    /// Bounding box of this node, if it has both a position and a size.
    pub fn bounds(&self) -> Option<Rect> {
        match (self.position, self.size) {
            (Some(origin), Some(size)) => Some(Rect::from_origin_size(origin, size)),
            _ => None,
        }
    }

    /// Copy of this node's own fields with a replacement children list.
    pub(crate) fn with_replaced_children(&self, children: Vec<Arc<SceneNode>>) -> SceneNode {
        SceneNode {
            id: self.id.clone(),
            node_type: self.node_type.clone(),
            props: self.props.clone(),
            position: self.position,
            size: self.size,
            children,
        }
    }

    pub fn into_tree(self) -> SceneTree {
        Arc::new(self)
    }
}

/// Partial update applied by [`crate::scene::update`].
///
/// `props` is shallow-merged into the existing map; every other present field
/// overwrites the node's value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Props>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
}

impl NodeUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn node_type(mut self, node_type: impl Into<String>) -> Self {
        self.node_type = Some(node_type.into());
        self
    }

    pub fn prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props
            .get_or_insert_with(Props::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_none()
            && self.node_type.is_none()
            && self.position.is_none()
            && self.size.is_none()
    }

    /// Apply this update to `node`, producing the replacement node.
    pub(crate) fn apply_to(&self, node: &SceneNode) -> SceneNode {
        let mut updated = node.clone();
        if let Some(ref props) = self.props {
            for (key, value) in props {
                updated.props.insert(key.clone(), value.clone());
            }
        }
        if let Some(ref node_type) = self.node_type {
            updated.node_type = node_type.clone();
        }
        if let Some(position) = self.position {
            updated.position = Some(position);
        }
        if let Some(size) = self.size {
            updated.size = Some(size);
        }
        updated
    }
}
