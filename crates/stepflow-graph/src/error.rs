//! Errors raised while assembling a graph definition

use crate::ids::{EdgeId, NodeId};

/// Graph definition errors
///
/// Only identifier uniqueness is checked; edge endpoints are taken as
/// declared.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// A graph needs at least one step to reveal
    #[error("graph declares no steps")]
    EmptyGraph,

    /// Two steps share an id
    #[error("duplicate step id: {0}")]
    DuplicateStepId(NodeId),

    /// Two notes share an id
    #[error("duplicate note id: {0}")]
    DuplicateNoteId(NodeId),

    /// Two edges connect the same source and target
    #[error("duplicate edge id: {0}")]
    DuplicateEdgeId(EdgeId),

    /// A note reuses a step id
    #[error("note id collides with step id: {0}")]
    IdCollision(NodeId),

    /// Malformed JSON document
    #[error("invalid json graph: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed YAML document
    #[error("invalid yaml graph: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Graph file could not be read
    #[error("failed to read graph file: {0}")]
    Io(#[from] std::io::Error),

    /// File extension is neither JSON nor YAML
    #[error("unsupported graph format: {0}")]
    UnsupportedFormat(String),
}
