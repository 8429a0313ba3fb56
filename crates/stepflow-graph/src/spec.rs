//! The immutable graph definition
//!
//! [`GraphSpec`] is built once (from a [`GraphDocument`] or through
//! [`GraphSpecBuilder`]) and shared read-only for the rest of the session.

use crate::document::{EdgeDef, GraphDocument, NoteDef, StepDef};
use crate::error::SpecError;
use crate::geometry::Point;
use crate::ids::{EdgeId, NodeId};
use crate::model::{EdgeSpec, NoteSpec, Step};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Where a node id resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeSlot {
    Step(usize),
    Note(usize),
}

/// Static description of steps, edges and notes
#[derive(Debug, Clone)]
pub struct GraphSpec {
    steps: Vec<Step>,
    edges: Vec<EdgeSpec>,
    notes: Vec<NoteSpec>,
    index: HashMap<NodeId, NodeSlot>,
}

impl GraphSpec {
    /// Start a builder
    #[inline]
    #[must_use]
    pub fn builder() -> GraphSpecBuilder {
        GraphSpecBuilder::new()
    }

    /// Resolve a document into a spec
    ///
    /// Order indices follow the order of `document.steps`.
    ///
    /// # Errors
    /// Returns an error if there are no steps or any identifier repeats
    pub fn from_document(document: GraphDocument) -> Result<Self, SpecError> {
        if document.steps.is_empty() {
            return Err(SpecError::EmptyGraph);
        }

        let mut index = HashMap::with_capacity(document.steps.len() + document.notes.len());

        let mut steps = Vec::with_capacity(document.steps.len());
        for (order_index, def) in document.steps.into_iter().enumerate() {
            if index.contains_key(&def.id) {
                return Err(SpecError::DuplicateStepId(def.id));
            }
            index.insert(def.id.clone(), NodeSlot::Step(order_index));
            steps.push(Step {
                id: def.id,
                label: def.label,
                description: def.description,
                phase: def.phase,
                agent: def.agent,
                color: def.color,
                order_index,
                default_position: def.position,
            });
        }

        let mut notes = Vec::with_capacity(document.notes.len());
        for (slot, def) in document.notes.into_iter().enumerate() {
            match index.get(&def.id) {
                Some(NodeSlot::Step(_)) => return Err(SpecError::IdCollision(def.id)),
                Some(NodeSlot::Note(_)) => return Err(SpecError::DuplicateNoteId(def.id)),
                None => {}
            }
            index.insert(def.id.clone(), NodeSlot::Note(slot));
            notes.push(NoteSpec {
                id: def.id,
                appears_at: def.appears_at,
                default_position: def.position,
                tint: def.tint,
                content: def.content,
            });
        }

        let mut edge_ids = HashSet::with_capacity(document.edges.len());
        let mut edges = Vec::with_capacity(document.edges.len());
        for def in document.edges {
            let mut edge = EdgeSpec::new(def.source, def.target);
            edge.source_handle = def.source_handle;
            edge.target_handle = def.target_handle;
            edge.label = def.label;
            if !edge_ids.insert(edge.id.clone()) {
                return Err(SpecError::DuplicateEdgeId(edge.id));
            }
            edges.push(edge);
        }

        tracing::debug!(
            steps = steps.len(),
            edges = edges.len(),
            notes = notes.len(),
            "graph spec resolved"
        );

        Ok(Self {
            steps,
            edges,
            notes,
            index,
        })
    }

    /// Parse and resolve a JSON definition
    ///
    /// # Errors
    /// Returns an error on malformed JSON or repeated identifiers
    pub fn from_json_str(input: &str) -> Result<Self, SpecError> {
        Self::from_document(GraphDocument::from_json_str(input)?)
    }

    /// Parse and resolve a YAML definition
    ///
    /// # Errors
    /// Returns an error on malformed YAML or repeated identifiers
    pub fn from_yaml_str(input: &str) -> Result<Self, SpecError> {
        Self::from_document(GraphDocument::from_yaml_str(input)?)
    }

    /// Load and resolve a JSON or YAML definition file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or resolved
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SpecError> {
        let path = path.as_ref();
        let spec = Self::from_document(GraphDocument::from_path(path)?)?;
        tracing::info!(path = %path.display(), steps = spec.step_count(), "loaded graph spec");
        Ok(spec)
    }

    /// Steps in reveal order
    #[inline]
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Declared edges
    #[inline]
    #[must_use]
    pub fn edges(&self) -> &[EdgeSpec] {
        &self.edges
    }

    /// Notes
    #[inline]
    #[must_use]
    pub fn notes(&self) -> &[NoteSpec] {
        &self.notes
    }

    /// Number of steps; the largest reveal cursor
    #[inline]
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Look up a step
    #[must_use]
    pub fn step(&self, id: &str) -> Option<&Step> {
        match self.index.get(id) {
            Some(NodeSlot::Step(i)) => self.steps.get(*i),
            _ => None,
        }
    }

    /// Look up a note
    #[must_use]
    pub fn note(&self, id: &str) -> Option<&NoteSpec> {
        match self.index.get(id) {
            Some(NodeSlot::Note(i)) => self.notes.get(*i),
            _ => None,
        }
    }

    /// Look up a declared edge
    #[must_use]
    pub fn edge(&self, id: &str) -> Option<&EdgeSpec> {
        self.edges.iter().find(|e| e.id.as_str() == id)
    }

    /// Order index of a step
    #[inline]
    #[must_use]
    pub fn order_index(&self, id: &str) -> Option<usize> {
        self.step(id).map(|s| s.order_index)
    }

    /// Whether `id` names a step or a note
    #[inline]
    #[must_use]
    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Layout position of a step or note before any user move
    #[must_use]
    pub fn default_position(&self, id: &str) -> Option<Point> {
        match self.index.get(id)? {
            NodeSlot::Step(i) => self.steps.get(*i).map(|s| s.default_position),
            NodeSlot::Note(i) => self.notes.get(*i).map(|n| n.default_position),
        }
    }

    /// Declared edge whose target comes before its source in reveal order
    #[must_use]
    pub fn is_back_edge(&self, edge: &EdgeSpec) -> bool {
        matches!(
            (self.order_index(edge.source.as_str()), self.order_index(edge.target.as_str())),
            (Some(s), Some(t)) if t < s
        )
    }

    /// Ids of all declared edges
    pub fn edge_ids(&self) -> impl Iterator<Item = &EdgeId> {
        self.edges.iter().map(|e| &e.id)
    }

    /// Turn the graph back into a document
    #[must_use]
    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            steps: self
                .steps
                .iter()
                .map(|s| StepDef {
                    id: s.id.clone(),
                    label: s.label.clone(),
                    description: s.description.clone(),
                    phase: s.phase,
                    agent: s.agent.clone(),
                    color: s.color,
                    position: s.default_position,
                })
                .collect(),
            edges: self
                .edges
                .iter()
                .map(|e| EdgeDef {
                    source: e.source.clone(),
                    target: e.target.clone(),
                    source_handle: e.source_handle,
                    target_handle: e.target_handle,
                    label: e.label.clone(),
                })
                .collect(),
            notes: self
                .notes
                .iter()
                .map(|n| NoteDef {
                    id: n.id.clone(),
                    appears_at: n.appears_at,
                    position: n.default_position,
                    tint: n.tint,
                    content: n.content.clone(),
                })
                .collect(),
        }
    }
}

/// Incremental construction of a [`GraphSpec`]
#[derive(Debug, Clone, Default)]
pub struct GraphSpecBuilder {
    document: GraphDocument,
}

impl GraphSpecBuilder {
    /// Create empty builder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step; its order index is its position in the call sequence
    #[must_use]
    pub fn step(mut self, step: StepDef) -> Self {
        self.document.steps.push(step);
        self
    }

    /// Append an edge
    #[must_use]
    pub fn edge(mut self, edge: EdgeDef) -> Self {
        self.document.edges.push(edge);
        self
    }

    /// Append a note
    #[must_use]
    pub fn note(mut self, note: NoteDef) -> Self {
        self.document.notes.push(note);
        self
    }

    /// Resolve into a spec
    ///
    /// # Errors
    /// See [`GraphSpec::from_document`]
    pub fn build(self) -> Result<GraphSpec, SpecError> {
        GraphSpec::from_document(self.document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Handle;
    use crate::theme::{NoteTint, Phase};

    fn three_steps() -> GraphSpecBuilder {
        GraphSpec::builder()
            .step(StepDef::new("a", "A", Phase::Entry).at(0.0, 0.0))
            .step(StepDef::new("b", "B", Phase::Setup).at(0.0, 100.0))
            .step(StepDef::new("c", "C", Phase::Done).at(0.0, 200.0))
    }

    #[test]
    fn order_index_follows_declaration_order() {
        let spec = three_steps().build().unwrap();
        assert_eq!(spec.order_index("a"), Some(0));
        assert_eq!(spec.order_index("c"), Some(2));
        assert_eq!(spec.step_count(), 3);
    }

    #[test]
    fn rejects_empty_graph() {
        assert!(matches!(
            GraphSpec::builder().build(),
            Err(SpecError::EmptyGraph)
        ));
    }

    #[test]
    fn rejects_duplicate_step() {
        let result = three_steps()
            .step(StepDef::new("b", "again", Phase::Loop))
            .build();
        assert!(matches!(result, Err(SpecError::DuplicateStepId(id)) if id.as_str() == "b"));
    }

    #[test]
    fn rejects_note_reusing_step_id() {
        let result = three_steps()
            .note(NoteDef::new("a", 1, NoteTint::Pink, "clash"))
            .build();
        assert!(matches!(result, Err(SpecError::IdCollision(_))));
    }

    #[test]
    fn rejects_duplicate_note() {
        let result = three_steps()
            .note(NoteDef::new("n", 1, NoteTint::Pink, "one"))
            .note(NoteDef::new("n", 2, NoteTint::Amber, "two"))
            .build();
        assert!(matches!(result, Err(SpecError::DuplicateNoteId(_))));
    }

    #[test]
    fn rejects_parallel_declared_edges() {
        let result = three_steps()
            .edge(EdgeDef::new("a", "b").handles(Handle::Bottom, Handle::Top))
            .edge(EdgeDef::new("a", "b").handles(Handle::Right, Handle::Left))
            .build();
        assert!(matches!(result, Err(SpecError::DuplicateEdgeId(id)) if id.as_str() == "ea-b"));
    }

    #[test]
    fn default_positions_cover_steps_and_notes() {
        let spec = three_steps()
            .note(NoteDef::new("n", 2, NoteTint::Violet, "text").at(500.0, 20.0))
            .build()
            .unwrap();
        assert_eq!(spec.default_position("b"), Some(Point::new(0.0, 100.0)));
        assert_eq!(spec.default_position("n"), Some(Point::new(500.0, 20.0)));
        assert_eq!(spec.default_position("missing"), None);
        assert!(spec.note("n").is_some());
        assert!(spec.step("n").is_none());
    }

    #[test]
    fn back_edge_detection() {
        let spec = three_steps()
            .edge(EdgeDef::new("a", "b"))
            .edge(EdgeDef::new("c", "a").label("again"))
            .build()
            .unwrap();
        let forward = spec.edge("ea-b").unwrap();
        let back = spec.edge("ec-a").unwrap();
        assert!(!spec.is_back_edge(forward));
        assert!(spec.is_back_edge(back));
    }
}
