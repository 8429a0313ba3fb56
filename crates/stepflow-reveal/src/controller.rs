//! Graph state controller
//!
//! Owns the reveal cursor, the position overlay and the live edge set,
//! and is the only place any of them change. Every operation is
//! synchronous and total: out-of-range moves, duplicate connections and
//! unknown edge ids leave the state untouched.

use crate::cursor::RevealCursor;
use crate::edges::{Connection, LiveEdgeSet};
use crate::positions::PositionStore;
use crate::visibility::{compute_visibility, Visibility};
use std::sync::Arc;
use stepflow_graph::{EdgeId, GraphSpec, Point};

/// Outcome of an edge mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeChange {
    /// New live edge appended
    Added(EdgeId),
    /// Existing edge rerouted
    Reconnected(EdgeId),
    /// Edge taken off the canvas
    Removed(EdgeId),
    /// An edge already runs along the requested route
    DuplicateRoute,
    /// No edge has the referenced id
    UnknownEdge,
}

impl EdgeChange {
    /// Whether the edge set changed
    #[inline]
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(
            self,
            EdgeChange::Added(_) | EdgeChange::Reconnected(_) | EdgeChange::Removed(_)
        )
    }
}

/// Session state of one revealed graph
#[derive(Debug, Clone)]
pub struct GraphStateController {
    spec: Arc<GraphSpec>,
    cursor: RevealCursor,
    positions: PositionStore,
    edges: LiveEdgeSet,
}

impl GraphStateController {
    /// Create controller at the first step with default layout and edges
    #[must_use]
    pub fn new(spec: Arc<GraphSpec>) -> Self {
        Self {
            cursor: RevealCursor::start(spec.step_count()),
            positions: PositionStore::new(Arc::clone(&spec)),
            edges: LiveEdgeSet::from_spec(&spec),
            spec,
        }
    }

    /// The graph definition
    #[inline]
    #[must_use]
    pub fn spec(&self) -> &GraphSpec {
        &self.spec
    }

    /// Shared handle to the graph definition
    #[inline]
    #[must_use]
    pub fn shared_spec(&self) -> Arc<GraphSpec> {
        Arc::clone(&self.spec)
    }

    /// Current reveal cursor
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> RevealCursor {
        self.cursor
    }

    /// Position overlay
    #[inline]
    #[must_use]
    pub fn positions(&self) -> &PositionStore {
        &self.positions
    }

    /// Edges being rendered
    #[inline]
    #[must_use]
    pub fn edges(&self) -> &LiveEdgeSet {
        &self.edges
    }

    /// Visibility at the current cursor
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        compute_visibility(
            self.cursor,
            self.spec.steps(),
            &self.edges,
            self.spec.notes(),
        )
    }

    /// Reveal the next step; no-op on the last one
    pub fn advance(&mut self) -> bool {
        let moved = self.cursor.advance();
        if moved {
            tracing::debug!(cursor = self.cursor.position(), "advanced");
        } else {
            tracing::debug!(cursor = self.cursor.position(), "advance ignored at last step");
        }
        moved
    }

    /// Hide the most recent step; no-op on the first one
    pub fn retreat(&mut self) -> bool {
        let moved = self.cursor.retreat();
        if moved {
            tracing::debug!(cursor = self.cursor.position(), "retreated");
        } else {
            tracing::debug!("retreat ignored at first step");
        }
        moved
    }

    /// Jump to a cursor position, clamped to the valid range
    ///
    /// Only the cursor changes; positions and edges are kept.
    pub fn seek(&mut self, position: usize) {
        self.cursor = RevealCursor::at(position, self.spec.step_count());
        tracing::debug!(cursor = self.cursor.position(), "seeked");
    }

    /// Back to the first step, default layout and declared edges
    ///
    /// All three parts are restored before returning, so no projection
    /// can observe a partial reset.
    pub fn reset(&mut self) {
        let dropped_moves = self.positions.override_count();
        self.cursor = RevealCursor::start(self.spec.step_count());
        self.positions.reset_all();
        self.edges = LiveEdgeSet::from_spec(&self.spec);
        tracing::info!(dropped_moves, "reset to first step");
    }

    /// Append a user edge
    ///
    /// Rejected when an edge with the same source, target and handles
    /// already exists.
    pub fn add_edge(&mut self, connection: Connection) -> EdgeChange {
        if self.edges.has_route(&connection) {
            tracing::debug!(
                source = %connection.source,
                target = %connection.target,
                "connection ignored: route already exists"
            );
            return EdgeChange::DuplicateRoute;
        }
        let id = self.edges.insert_live(connection);
        tracing::debug!(edge = %id, "edge added");
        EdgeChange::Added(id)
    }

    /// Reroute an existing edge, keeping its id
    ///
    /// The edge becomes live: it stays visible regardless of the cursor
    /// until the next reset.
    pub fn reconnect_edge(&mut self, id: &str, connection: Connection) -> EdgeChange {
        if self.edges.reconnect(id, connection) {
            tracing::debug!(edge = %id, "edge reconnected");
            EdgeChange::Reconnected(EdgeId::new(id))
        } else {
            tracing::warn!(edge = %id, "reconnect ignored: unknown edge");
            EdgeChange::UnknownEdge
        }
    }

    /// Remove an edge; declared edges come back on reset
    pub fn remove_edge(&mut self, id: &str) -> EdgeChange {
        match self.edges.remove(id) {
            Some(edge) => {
                tracing::debug!(edge = %edge.id, "edge removed");
                EdgeChange::Removed(edge.id)
            }
            None => {
                tracing::warn!(edge = %id, "remove ignored: unknown edge");
                EdgeChange::UnknownEdge
            }
        }
    }

    /// Record a node move
    ///
    /// # Panics
    /// If `id` is neither a step nor a note (see [`PositionStore::set`]).
    #[track_caller]
    pub fn move_position(&mut self, id: &str, point: Point) {
        self.positions.set(id, point);
        tracing::trace!(node = %id, x = point.x, y = point.y, "node moved");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::EdgeOrigin;
    use stepflow_graph::{EdgeDef, Handle, Phase, StepDef};

    fn controller() -> GraphStateController {
        let spec = GraphSpec::builder()
            .step(StepDef::new("a", "A", Phase::Entry).at(0.0, 0.0))
            .step(StepDef::new("b", "B", Phase::Loop).at(0.0, 100.0))
            .step(StepDef::new("c", "C", Phase::Done).at(0.0, 200.0))
            .edge(EdgeDef::new("a", "b"))
            .edge(EdgeDef::new("b", "c"))
            .build()
            .unwrap();
        GraphStateController::new(Arc::new(spec))
    }

    #[test]
    fn advance_and_retreat_are_bounded() {
        let mut ctl = controller();
        assert!(!ctl.retreat());
        assert!(ctl.advance());
        assert!(ctl.advance());
        assert!(!ctl.advance());
        assert_eq!(ctl.cursor().position(), 3);
        assert!(ctl.retreat());
        assert_eq!(ctl.cursor().position(), 2);
    }

    #[test]
    fn duplicate_connection_is_rejected() {
        let mut ctl = controller();
        let conn = Connection::new("a", "c").handles(Handle::Right, Handle::Left);
        assert!(matches!(ctl.add_edge(conn.clone()), EdgeChange::Added(_)));
        assert_eq!(ctl.add_edge(conn), EdgeChange::DuplicateRoute);
        assert_eq!(ctl.edges().len(), 3);
    }

    #[test]
    fn connection_duplicating_a_declared_edge_is_rejected() {
        let mut ctl = controller();
        assert_eq!(ctl.add_edge(Connection::new("a", "b")), EdgeChange::DuplicateRoute);
    }

    #[test]
    fn reconnected_declared_edge_becomes_live() {
        let mut ctl = controller();
        let change = ctl.reconnect_edge("eb-c", Connection::new("c", "a"));
        assert_eq!(change, EdgeChange::Reconnected(EdgeId::new("eb-c")));

        let edge = ctl.edges().get("eb-c").unwrap();
        assert_eq!(edge.origin, EdgeOrigin::Live);
        assert!(ctl.visibility().is_edge_visible("eb-c"));
    }

    #[test]
    fn reconnect_unknown_edge_is_noop() {
        let mut ctl = controller();
        let before = ctl.edges().clone();
        assert_eq!(
            ctl.reconnect_edge("missing", Connection::new("a", "c")),
            EdgeChange::UnknownEdge
        );
        assert_eq!(ctl.edges(), &before);
    }

    #[test]
    fn removed_declared_edge_returns_on_reset() {
        let mut ctl = controller();
        assert!(ctl.remove_edge("ea-b").is_applied());
        assert!(ctl.edges().get("ea-b").is_none());
        assert_eq!(ctl.remove_edge("ea-b"), EdgeChange::UnknownEdge);

        ctl.reset();
        assert!(ctl.edges().get("ea-b").is_some());
    }

    #[test]
    fn reset_restores_everything() {
        let mut ctl = controller();
        ctl.advance();
        ctl.move_position("b", Point::new(9.0, 9.0));
        ctl.add_edge(Connection::new("c", "a"));
        ctl.reconnect_edge("ea-b", Connection::new("a", "c"));

        ctl.reset();

        assert_eq!(ctl.cursor().position(), 1);
        assert_eq!(ctl.positions().override_count(), 0);
        assert_eq!(ctl.edges(), &LiveEdgeSet::from_spec(ctl.spec()));
    }

    #[test]
    fn seek_clamps_and_keeps_moves() {
        let mut ctl = controller();
        ctl.move_position("a", Point::new(5.0, 5.0));
        ctl.seek(99);
        assert_eq!(ctl.cursor().position(), 3);
        ctl.seek(0);
        assert_eq!(ctl.cursor().position(), 1);
        assert_eq!(ctl.positions().get("a"), Point::new(5.0, 5.0));
    }
}
