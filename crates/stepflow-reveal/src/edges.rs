//! The live edge set
//!
//! Starts as the declared edges and absorbs user connections,
//! reconnections and removals. Insertion order is kept: declared edges
//! first, then user edges in the order they were drawn.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use stepflow_graph::{EdgeId, EdgeSpec, GraphSpec, Handle, NodeId};

/// How an edge's visibility is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeOrigin {
    /// Declared in the graph, revealed by the cursor
    Scripted,
    /// Drawn or rerouted by the user, always shown
    Live,
}

/// Endpoints of a connection gesture
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Source node
    pub source: NodeId,
    /// Target node
    pub target: NodeId,
    /// Handle on the source node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<Handle>,
    /// Handle on the target node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<Handle>,
}

impl Connection {
    /// Connection without handles
    #[must_use]
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }

    /// With source and target handles
    #[must_use]
    pub fn handles(mut self, source: Handle, target: Handle) -> Self {
        self.source_handle = Some(source);
        self.target_handle = Some(target);
        self
    }

    /// Id for a user edge along this route: `user-{source}{handle}-{target}{handle}`
    #[must_use]
    pub fn derived_id(&self) -> EdgeId {
        let handle = |h: Option<Handle>| h.map(Handle::as_str).unwrap_or_default();
        EdgeId::new(format!(
            "user-{}{}-{}{}",
            self.source,
            handle(self.source_handle),
            self.target,
            handle(self.target_handle),
        ))
    }
}

/// An edge currently on the canvas
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveEdge {
    /// Stable id; kept across reconnection
    pub id: EdgeId,
    /// Source node
    pub source: NodeId,
    /// Target node
    pub target: NodeId,
    /// Handle on the source node
    pub source_handle: Option<Handle>,
    /// Handle on the target node
    pub target_handle: Option<Handle>,
    /// Caption
    pub label: Option<String>,
    /// Visibility classification
    pub origin: EdgeOrigin,
}

impl LiveEdge {
    /// Whether this edge runs along exactly the given route
    #[must_use]
    pub fn follows(&self, connection: &Connection) -> bool {
        self.source == connection.source
            && self.target == connection.target
            && self.source_handle == connection.source_handle
            && self.target_handle == connection.target_handle
    }

    /// Whether the cursor decides this edge's visibility
    #[inline]
    #[must_use]
    pub fn is_scripted(&self) -> bool {
        self.origin == EdgeOrigin::Scripted
    }
}

impl From<&EdgeSpec> for LiveEdge {
    fn from(edge: &EdgeSpec) -> Self {
        Self {
            id: edge.id.clone(),
            source: edge.source.clone(),
            target: edge.target.clone(),
            source_handle: edge.source_handle,
            target_handle: edge.target_handle,
            label: edge.label.clone(),
            origin: EdgeOrigin::Scripted,
        }
    }
}

/// Ordered collection of the edges being rendered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveEdgeSet {
    edges: IndexMap<EdgeId, LiveEdge>,
}

impl LiveEdgeSet {
    /// Edge set holding exactly the declared edges
    #[must_use]
    pub fn from_spec(spec: &GraphSpec) -> Self {
        Self {
            edges: spec
                .edges()
                .iter()
                .map(|e| (e.id.clone(), LiveEdge::from(e)))
                .collect(),
        }
    }

    /// Whether some edge already runs along this route
    #[must_use]
    pub fn has_route(&self, connection: &Connection) -> bool {
        self.edges.values().any(|e| e.follows(connection))
    }

    /// Append a user edge and return its id
    ///
    /// Does not check for duplicate routes; see [`LiveEdgeSet::has_route`].
    pub(crate) fn insert_live(&mut self, connection: Connection) -> EdgeId {
        let id = self.unused_id(connection.derived_id());
        let edge = LiveEdge {
            id: id.clone(),
            source: connection.source,
            target: connection.target,
            source_handle: connection.source_handle,
            target_handle: connection.target_handle,
            label: None,
            origin: EdgeOrigin::Live,
        };
        self.edges.insert(id.clone(), edge);
        id
    }

    /// Replace an edge's endpoints in place and mark it live
    ///
    /// Returns false if no edge has this id.
    pub(crate) fn reconnect(&mut self, id: &str, connection: Connection) -> bool {
        let Some(edge) = self.edges.get_mut(id) else {
            return false;
        };
        edge.source = connection.source;
        edge.target = connection.target;
        edge.source_handle = connection.source_handle;
        edge.target_handle = connection.target_handle;
        edge.origin = EdgeOrigin::Live;
        true
    }

    /// Remove an edge, keeping the order of the rest
    pub(crate) fn remove(&mut self, id: &str) -> Option<LiveEdge> {
        self.edges.shift_remove(id)
    }

    /// Look up an edge
    #[inline]
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&LiveEdge> {
        self.edges.get(id)
    }

    /// Edges in render order
    pub fn iter(&self) -> impl Iterator<Item = &LiveEdge> {
        self.edges.values()
    }

    /// Number of edges
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the set is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    fn unused_id(&self, base: EdgeId) -> EdgeId {
        if !self.edges.contains_key(&base) {
            return base;
        }
        let mut n = 1usize;
        loop {
            let candidate = EdgeId::new(format!("{base}~{n}"));
            if !self.edges.contains_key(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

impl<'a> IntoIterator for &'a LiveEdgeSet {
    type Item = &'a LiveEdge;
    type IntoIter = indexmap::map::Values<'a, EdgeId, LiveEdge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepflow_graph::{EdgeDef, Phase, StepDef};

    fn spec() -> GraphSpec {
        GraphSpec::builder()
            .step(StepDef::new("a", "A", Phase::Entry))
            .step(StepDef::new("b", "B", Phase::Loop))
            .step(StepDef::new("c", "C", Phase::Done))
            .edge(EdgeDef::new("a", "b").handles(Handle::Bottom, Handle::Top))
            .build()
            .unwrap()
    }

    #[test]
    fn derived_id_includes_handles() {
        let conn = Connection::new("4", "12").handles(Handle::Right, Handle::Left);
        assert_eq!(conn.derived_id().as_str(), "user-4right-12left");
        assert_eq!(Connection::new("a", "b").derived_id().as_str(), "user-a-b");
    }

    #[test]
    fn from_spec_is_scripted() {
        let set = LiveEdgeSet::from_spec(&spec());
        assert_eq!(set.len(), 1);
        assert!(set.get("ea-b").unwrap().is_scripted());
    }

    #[test]
    fn route_match_requires_same_handles() {
        let set = LiveEdgeSet::from_spec(&spec());
        assert!(set.has_route(&Connection::new("a", "b").handles(Handle::Bottom, Handle::Top)));
        assert!(!set.has_route(&Connection::new("a", "b")));
    }

    #[test]
    fn colliding_user_id_gets_suffix() {
        let mut set = LiveEdgeSet::from_spec(&spec());
        let first = set.insert_live(Connection::new("a", "c"));
        // move the first edge away, freeing its route but not its id
        assert!(set.reconnect(first.as_str(), Connection::new("b", "c")));
        let second = set.insert_live(Connection::new("a", "c"));

        assert_eq!(first.as_str(), "user-a-c");
        assert_eq!(second.as_str(), "user-a-c~1");
    }

    #[test]
    fn reconnect_keeps_slot_and_id() {
        let mut set = LiveEdgeSet::from_spec(&spec());
        set.insert_live(Connection::new("b", "c"));
        assert!(set.reconnect("ea-b", Connection::new("c", "a")));

        let first = set.iter().next().unwrap();
        assert_eq!(first.id.as_str(), "ea-b");
        assert_eq!(first.source.as_str(), "c");
        assert_eq!(first.origin, EdgeOrigin::Live);
    }

    #[test]
    fn reconnect_unknown_is_rejected() {
        let mut set = LiveEdgeSet::from_spec(&spec());
        assert!(!set.reconnect("nope", Connection::new("a", "c")));
        assert_eq!(set, LiveEdgeSet::from_spec(&spec()));
    }
}
