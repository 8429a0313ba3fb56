//! Position overlay on top of the default layout
//!
//! Moves recorded here survive cursor changes; only
//! [`PositionStore::reset_all`] discards them.

use std::collections::HashMap;
use std::sync::Arc;
use stepflow_graph::{GraphSpec, NodeId, Point};

/// Per-node coordinate overrides seeded from the graph's layout
#[derive(Debug, Clone)]
pub struct PositionStore {
    spec: Arc<GraphSpec>,
    overlay: HashMap<NodeId, Point>,
}

impl PositionStore {
    /// Create store with no overrides
    #[inline]
    #[must_use]
    pub fn new(spec: Arc<GraphSpec>) -> Self {
        Self {
            spec,
            overlay: HashMap::new(),
        }
    }

    /// Current position of a step or note
    ///
    /// # Panics
    /// If `id` is neither a step nor a note of the graph.
    #[track_caller]
    #[must_use]
    pub fn get(&self, id: &str) -> Point {
        if let Some(point) = self.overlay.get(id) {
            return *point;
        }
        match self.spec.default_position(id) {
            Some(point) => point,
            None => panic!("position requested for unknown node `{id}`"),
        }
    }

    /// Record a position, replacing any earlier override
    ///
    /// # Panics
    /// If `id` is neither a step nor a note of the graph.
    #[track_caller]
    pub fn set(&mut self, id: &str, point: Point) {
        assert!(
            self.spec.contains_node(id),
            "position set for unknown node `{id}`"
        );
        match self.overlay.get_mut(id) {
            Some(slot) => *slot = point,
            None => {
                self.overlay.insert(NodeId::new(id), point);
            }
        }
    }

    /// Drop every override
    pub fn reset_all(&mut self) {
        self.overlay.clear();
    }

    /// Override for `id`, if one was recorded
    #[inline]
    #[must_use]
    pub fn override_for(&self, id: &str) -> Option<Point> {
        self.overlay.get(id).copied()
    }

    /// Whether `id` was moved away from its default
    #[inline]
    #[must_use]
    pub fn is_overridden(&self, id: &str) -> bool {
        self.overlay.contains_key(id)
    }

    /// Number of overridden nodes
    #[inline]
    #[must_use]
    pub fn override_count(&self) -> usize {
        self.overlay.len()
    }
}
