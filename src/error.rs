//! Error types for scene and settings operations.

use thiserror::Error;

/// Errors raised by scene-model mutation and snapshot loading.
#[derive(Error, Debug)]
pub enum SceneError {
    /// Snapshot could not be parsed
    #[error("Snapshot parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// An id appears more than once in a tree
    #[error("Duplicate node id: {0}")]
    DuplicateId(String),

    /// A node carries an empty id
    #[error("Node with type '{node_type}' has an empty id")]
    EmptyId { node_type: String },

    /// Insertion target does not exist
    #[error("Parent node not found: {0}")]
    ParentNotFound(String),

    /// Referenced node does not exist
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// Operation would drop the root
    #[error("The root node cannot be moved or replaced")]
    RootImmovable,
}

/// Result type alias for scene operations
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors raised while loading, saving or watching editor settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("Settings parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The platform has no configuration directory
    #[error("No configuration directory available on this platform")]
    NoConfigDir,

    /// File watcher could not be created
    #[error("Settings watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// Atomic write failed while persisting the temp file
    #[error("Could not persist settings: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Result type alias for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;
