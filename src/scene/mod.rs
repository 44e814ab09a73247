//! Scene model - the hierarchical node tree and its pure mutations.
//!
//! - `node` - `SceneNode`, `NodeUpdate` and the `SceneTree` handle
//! - `mutation` - update / delete / insert / move returning new trees
//! - `traverse` - visitor-style walks used instead of per-type dispatch
//! - `snapshot` - validation at the load boundary and JSON emission

mod mutation;
mod node;
mod snapshot;
pub mod traverse;

pub use mutation::{PlacementPolicy, delete, insert, move_node, relocate, update};
pub use node::{NodeUpdate, Props, SceneNode, SceneTree};
pub use snapshot::{empty_document, load_snapshot, to_json, validate};
