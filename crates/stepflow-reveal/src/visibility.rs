//! Visibility derived from the reveal cursor
//!
//! [`compute_visibility`] is a pure function recomputed from scratch on
//! every state change. Direction and topology play no part: a declared
//! edge shows once both of its endpoints are revealed, so loop-back edges
//! appear exactly when the later of their two steps does.

use crate::cursor::RevealCursor;
use crate::edges::LiveEdge;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use stepflow_graph::{EdgeId, NodeId, NoteSpec, Step};

/// Display attributes of one edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDisplay {
    /// Drawn at full opacity
    pub visible: bool,
    /// Flow animation enabled; equal to `visible`
    pub animated: bool,
    /// Caption, present only while visible
    pub label: Option<String>,
}

/// What is shown at a given cursor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Visibility {
    /// Revealed steps, in declaration order
    pub visible_step_ids: IndexSet<NodeId>,
    /// Shown edges, in render order
    pub visible_edge_ids: IndexSet<EdgeId>,
    /// Shown notes, in declaration order
    pub visible_note_ids: IndexSet<NodeId>,
    /// Display attributes of every live edge, shown or not
    pub edge_display: IndexMap<EdgeId, EdgeDisplay>,
}

impl Visibility {
    /// Whether a step is revealed
    #[inline]
    #[must_use]
    pub fn is_step_visible(&self, id: &str) -> bool {
        self.visible_step_ids.contains(id)
    }

    /// Whether a note is shown
    #[inline]
    #[must_use]
    pub fn is_note_visible(&self, id: &str) -> bool {
        self.visible_note_ids.contains(id)
    }

    /// Whether an edge is shown
    #[inline]
    #[must_use]
    pub fn is_edge_visible(&self, id: &str) -> bool {
        self.visible_edge_ids.contains(id)
    }

    /// Display attributes of an edge
    #[inline]
    #[must_use]
    pub fn edge(&self, id: &str) -> Option<&EdgeDisplay> {
        self.edge_display.get(id)
    }
}

/// Derive visibility of every step, edge and note from the cursor
///
/// - step: `order_index < cursor`
/// - scripted edge: both endpoints revealed
/// - live edge: always
/// - note: `cursor >= appears_at`
///
/// Edges whose endpoint is not a step (unknown ids) are never revealed
/// unless they are live.
#[must_use]
pub fn compute_visibility<'a, E>(
    cursor: RevealCursor,
    steps: &[Step],
    edges: E,
    notes: &[NoteSpec],
) -> Visibility
where
    E: IntoIterator<Item = &'a LiveEdge>,
{
    let visible_step_ids: IndexSet<NodeId> = steps
        .iter()
        .filter(|s| cursor.reveals(s.order_index))
        .map(|s| s.id.clone())
        .collect();

    let mut visible_edge_ids = IndexSet::new();
    let mut edge_display = IndexMap::new();
    for edge in edges {
        let visible = !edge.is_scripted()
            || (visible_step_ids.contains(&edge.source) && visible_step_ids.contains(&edge.target));
        if visible {
            visible_edge_ids.insert(edge.id.clone());
        }
        edge_display.insert(
            edge.id.clone(),
            EdgeDisplay {
                visible,
                animated: visible,
                label: if visible { edge.label.clone() } else { None },
            },
        );
    }

    let visible_note_ids = notes
        .iter()
        .filter(|n| cursor.position() >= n.appears_at)
        .map(|n| n.id.clone())
        .collect();

    Visibility {
        visible_step_ids,
        visible_edge_ids,
        visible_note_ids,
        edge_display,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::{Connection, LiveEdgeSet};
    use stepflow_graph::{EdgeDef, GraphSpec, NoteDef, NoteTint, Phase, StepDef};

    fn spec() -> GraphSpec {
        GraphSpec::builder()
            .step(StepDef::new("a", "A", Phase::Entry))
            .step(StepDef::new("b", "B", Phase::Loop))
            .step(StepDef::new("c", "C", Phase::Decision))
            .edge(EdgeDef::new("a", "b"))
            .edge(EdgeDef::new("c", "a").label("again"))
            .note(NoteDef::new("n", 2, NoteTint::Amber, "hint"))
            .build()
            .unwrap()
    }

    fn at(spec: &GraphSpec, edges: &LiveEdgeSet, position: usize) -> Visibility {
        let cursor = RevealCursor::at(position, spec.step_count());
        compute_visibility(cursor, spec.steps(), edges, spec.notes())
    }

    #[test]
    fn first_cursor_shows_first_step_only() {
        let spec = spec();
        let edges = LiveEdgeSet::from_spec(&spec);
        let vis = at(&spec, &edges, 1);
        assert!(vis.is_step_visible("a"));
        assert!(!vis.is_step_visible("b"));
        assert!(vis.visible_edge_ids.is_empty());
        assert!(!vis.is_note_visible("n"));
    }

    #[test]
    fn note_appears_at_its_cursor() {
        let spec = spec();
        let edges = LiveEdgeSet::from_spec(&spec);
        assert!(at(&spec, &edges, 2).is_note_visible("n"));
    }

    #[test]
    fn back_edge_waits_for_both_ends() {
        let spec = spec();
        let edges = LiveEdgeSet::from_spec(&spec);

        let mid = at(&spec, &edges, 2);
        assert!(mid.is_edge_visible("ea-b"));
        assert!(!mid.is_edge_visible("ec-a"));
        assert_eq!(mid.edge("ec-a").unwrap().label, None);

        let end = at(&spec, &edges, 3);
        let back = end.edge("ec-a").unwrap();
        assert!(back.visible && back.animated);
        assert_eq!(back.label.as_deref(), Some("again"));
    }

    #[test]
    fn live_edges_ignore_cursor() {
        let spec = spec();
        let mut edges = LiveEdgeSet::from_spec(&spec);
        let id = edges.insert_live(Connection::new("b", "c"));

        let vis = at(&spec, &edges, 1);
        let display = vis.edge(id.as_str()).unwrap();
        assert!(display.visible);
        assert!(display.animated);
    }

    #[test]
    fn recomputation_is_idempotent() {
        let spec = spec();
        let edges = LiveEdgeSet::from_spec(&spec);
        assert_eq!(at(&spec, &edges, 2), at(&spec, &edges, 2));
    }
}
