//! Node renderer port.
//!
//! The engine knows nothing about what a node type looks like. Hosts supply
//! a renderer and the editor walks the tree in paint order, calling it for
//! every node.

use super::CanvasEditor;
use crate::scene::{SceneNode, traverse};

pub trait NodeRenderer {
    type Output;

    /// Render one node. `depth` is 0 for the root.
    fn render(&mut self, node: &SceneNode, depth: usize) -> Self::Output;
}

impl CanvasEditor {
    /// Render every node, parents before children, siblings in order.
    pub fn render_with<R: NodeRenderer>(&self, renderer: &mut R) -> Vec<R::Output> {
        let mut out = Vec::new();
        traverse::walk(&self.tree, &mut |node, depth| out.push(renderer.render(node, depth)));
        out
    }
}
