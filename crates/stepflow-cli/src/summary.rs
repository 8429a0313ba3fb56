//! Plain-text summaries of reveal state

use std::fmt::Write;
use stepflow_graph::{EdgeId, GraphSpec, NodeId};
use stepflow_reveal::{GraphStateController, Projection, Visibility};

/// Items that became visible between two cursor positions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Revealed {
    /// Newly shown steps
    pub steps: Vec<NodeId>,
    /// Newly shown notes
    pub notes: Vec<NodeId>,
    /// Newly shown edges
    pub edges: Vec<EdgeId>,
}

impl Revealed {
    /// Difference from `before` to `after`
    #[must_use]
    pub fn between(before: &Visibility, after: &Visibility) -> Self {
        Self {
            steps: after
                .visible_step_ids
                .iter()
                .filter(|id| !before.visible_step_ids.contains(*id))
                .cloned()
                .collect(),
            notes: after
                .visible_note_ids
                .iter()
                .filter(|id| !before.visible_note_ids.contains(*id))
                .cloned()
                .collect(),
            edges: after
                .visible_edge_ids
                .iter()
                .filter(|id| !before.visible_edge_ids.contains(*id))
                .cloned()
                .collect(),
        }
    }
}

/// One line per revealed item for a `play` walkthrough
#[must_use]
pub fn describe_reveal(spec: &GraphSpec, revealed: &Revealed) -> String {
    let mut out = String::new();
    for id in &revealed.steps {
        if let Some(step) = spec.step(id.as_str()) {
            let _ = writeln!(out, "  + step {} {} {}", step.id, step.style().icon, step.label);
        }
    }
    for id in &revealed.notes {
        let _ = writeln!(out, "  + note {id}");
    }
    for id in &revealed.edges {
        let label = spec
            .edge(id.as_str())
            .and_then(|e| e.label.as_deref())
            .map(|l| format!(" \"{l}\""))
            .unwrap_or_default();
        let _ = writeln!(out, "  + edge {id}{label}");
    }
    out
}

/// Text rendering of a projection
#[must_use]
pub fn describe_projection(state: &GraphStateController, projection: &Projection) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", state.cursor());

    for node in &projection.nodes {
        let marker = if node.interactive { '*' } else { ' ' };
        let _ = writeln!(out, "{marker} {:<18} {}", node.id.as_str(), node.position);
    }
    for edge in &projection.edges {
        let marker = if edge.animated { '*' } else { ' ' };
        let label = edge.label.as_deref().unwrap_or("");
        let _ = writeln!(
            out,
            "{marker} {:<18} {} -> {} {label}",
            edge.id.as_str(),
            edge.source,
            edge.target
        );
    }
    out
}
