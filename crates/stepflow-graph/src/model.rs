//! Resolved steps, edges and notes

use crate::geometry::{Handle, Point};
use crate::ids::{EdgeId, NodeId};
use crate::theme::{step_style, ColorTag, NodeStyle, NoteTint, Phase};
use serde::Serialize;

/// A workflow step
///
/// `order_index` is the step's position in declaration order and is the
/// only input to reveal decisions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Unique id
    pub id: NodeId,
    /// Title shown on the node
    pub label: String,
    /// Secondary text
    pub description: String,
    /// Phase category
    pub phase: Phase,
    /// Agent responsible for the step, if any
    pub agent: Option<String>,
    /// Colour override
    pub color: Option<ColorTag>,
    /// 0-based declaration order
    pub order_index: usize,
    /// Layout position before any user move
    pub default_position: Point,
}

impl Step {
    /// Resolved colours and icon
    #[inline]
    #[must_use]
    pub fn style(&self) -> NodeStyle {
        step_style(self.phase, self.color)
    }
}

/// An edge declared in the graph definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeSpec {
    /// `e{source}-{target}`
    pub id: EdgeId,
    /// Step the edge leaves
    pub source: NodeId,
    /// Step the edge enters
    pub target: NodeId,
    /// Handle on the source step
    pub source_handle: Option<Handle>,
    /// Handle on the target step
    pub target_handle: Option<Handle>,
    /// Caption drawn on the edge
    pub label: Option<String>,
}

impl EdgeSpec {
    /// Create edge with its id derived from the endpoints
    #[must_use]
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            id: EdgeId::scripted(&source, &target),
            source,
            target,
            source_handle: None,
            target_handle: None,
            label: None,
        }
    }
}

/// An explanatory note that appears at a given reveal cursor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSpec {
    /// Unique id, distinct from every step id
    pub id: NodeId,
    /// Smallest reveal cursor at which the note shows
    pub appears_at: usize,
    /// Layout position before any user move
    pub default_position: Point,
    /// Paper colour
    pub tint: NoteTint,
    /// Preformatted text body
    pub content: String,
}
