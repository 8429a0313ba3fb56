//! Projection into diagram-engine objects and routing of engine events
//!
//! [`RenderAdapter::project`] rebuilds every node and edge from the
//! controller on each call; nothing is cached between calls, so cursor
//! changes and moves can interleave freely.

use crate::config::RenderConfig;
use crate::controller::{EdgeChange, GraphStateController};
use crate::edges::{Connection, EdgeOrigin, LiveEdge};
use crate::visibility::{EdgeDisplay, Visibility};
use serde::{Deserialize, Serialize};
use stepflow_graph::{
    ColorTag, EdgeId, Handle, HandleRole, NodeId, NoteSpec, NoteTint, Phase, Point, Step,
};

/// Node flavour understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Workflow step
    Step,
    /// Explanatory note
    Note,
}

/// Whether a node receives pointer input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerEvents {
    /// Normal hit testing
    Auto,
    /// Click-through
    None,
}

/// Frame style of a node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeFrame {
    /// Fixed width, steps only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Fixed height, steps only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// 1 when shown, 0 when hidden
    pub opacity: f64,
    /// Fade transition
    pub transition: String,
    /// Hit testing
    pub pointer_events: PointerEvents,
    /// Fill colour
    pub background: &'static str,
    /// Border colour
    pub border: &'static str,
}

/// Content of a step node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepContent {
    /// Title
    pub title: String,
    /// Secondary text
    pub description: String,
    /// Phase category
    pub phase: Phase,
    /// Responsible agent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    /// Colour override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorTag>,
    /// Leading icon
    pub icon: &'static str,
}

/// Content of a note node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteContent {
    /// Preformatted text
    pub content: String,
    /// Paper colour
    pub tint: NoteTint,
}

/// Node payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeData {
    /// Step payload
    Step(StepContent),
    /// Note payload
    Note(NoteContent),
}

/// Connection point exposed by a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HandleSlot {
    /// Handle id
    pub id: Handle,
    /// Accepted direction
    pub role: HandleRole,
}

/// Node as consumed by the diagram engine
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    /// Node id
    pub id: NodeId,
    /// Flavour
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Current position
    pub position: Point,
    /// Payload
    pub data: NodeData,
    /// Frame style
    pub style: NodeFrame,
    /// Shown and accepting input
    pub interactive: bool,
    /// Can be dragged
    pub draggable: bool,
    /// Can be selected
    pub selectable: bool,
    /// Accepts new connections
    pub connectable: bool,
    /// Connection points
    pub handles: Vec<HandleSlot>,
}

/// Stroke style of an edge
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStroke {
    /// Line colour
    pub stroke: String,
    /// Line width
    pub stroke_width: f64,
    /// 1 when shown, 0 when hidden
    pub opacity: f64,
    /// Fade transition, declared edges only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,
}

/// Arrowhead shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarkerKind {
    /// Filled triangle
    #[serde(rename = "arrowclosed")]
    ArrowClosed,
}

/// Arrowhead at the target end
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// Shape
    #[serde(rename = "type")]
    pub kind: MarkerKind,
    /// Fill colour
    pub color: String,
}

/// Caption style of an edge
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelStyle {
    /// Text colour
    pub fill: String,
    /// Font weight
    pub font_weight: u16,
    /// Font size
    pub font_size: f64,
    /// Background padding, horizontal then vertical
    pub background_padding: [f64; 2],
    /// Background fill
    pub background_fill: String,
    /// Background border colour
    pub background_stroke: String,
    /// Background border width
    pub background_stroke_width: f64,
}

/// Edge as consumed by the diagram engine
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderEdge {
    /// Edge id
    pub id: EdgeId,
    /// Source node
    pub source: NodeId,
    /// Target node
    pub target: NodeId,
    /// Source handle
    pub source_handle: Option<Handle>,
    /// Target handle
    pub target_handle: Option<Handle>,
    /// Caption, omitted while hidden
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Stroke style
    pub style: EdgeStroke,
    /// Caption style, present when the edge has a caption
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_style: Option<LabelStyle>,
    /// Arrowhead
    pub marker_end: Marker,
    /// Flow animation
    pub animated: bool,
    /// Scripted or live
    pub origin: EdgeOrigin,
}

/// Everything the engine draws for one state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    /// Steps then notes
    pub nodes: Vec<RenderNode>,
    /// Live edges in render order
    pub edges: Vec<RenderEdge>,
}

impl Projection {
    /// Look up a projected node
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&RenderNode> {
        self.nodes.iter().find(|n| n.id.as_str() == id)
    }

    /// Look up a projected edge
    #[must_use]
    pub fn edge(&self, id: &str) -> Option<&RenderEdge> {
        self.edges.iter().find(|e| e.id.as_str() == id)
    }
}

/// Change reported by the diagram engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RenderEvent {
    /// A node was dragged
    PositionChanged {
        /// Node id
        id: NodeId,
        /// New position
        new_position: Point,
    },
    /// The user drew a new edge
    Connect {
        /// Source node
        source: NodeId,
        /// Target node
        target: NodeId,
        /// Source handle
        #[serde(default)]
        source_handle: Option<Handle>,
        /// Target handle
        #[serde(default)]
        target_handle: Option<Handle>,
    },
    /// The user dragged an edge end to another node
    Reconnect {
        /// Edge being rerouted
        old_edge_id: EdgeId,
        /// New source node
        new_source: NodeId,
        /// New target node
        new_target: NodeId,
        /// New source handle
        #[serde(default)]
        source_handle: Option<Handle>,
        /// New target handle
        #[serde(default)]
        target_handle: Option<Handle>,
    },
    /// The user deleted an edge
    RemoveEdge {
        /// Edge id
        id: EdgeId,
    },
}

/// Translates controller state into engine objects and engine events into
/// controller operations
#[derive(Debug, Clone, Default)]
pub struct RenderAdapter {
    config: RenderConfig,
}

impl RenderAdapter {
    /// Create adapter
    #[inline]
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Build render nodes and edges for the controller's current state
    #[must_use]
    pub fn project(&self, state: &GraphStateController) -> Projection {
        let visibility = state.visibility();
        let positions = state.positions();
        let spec = state.spec();

        let mut nodes = Vec::with_capacity(spec.steps().len() + spec.notes().len());
        for step in spec.steps() {
            let visible = visibility.is_step_visible(step.id.as_str());
            nodes.push(self.step_node(step, positions.get(step.id.as_str()), visible));
        }
        for note in spec.notes() {
            let visible = visibility.is_note_visible(note.id.as_str());
            nodes.push(self.note_node(note, positions.get(note.id.as_str()), visible));
        }

        let edges = state
            .edges()
            .iter()
            .map(|edge| self.render_edge(edge, &visibility))
            .collect();

        Projection { nodes, edges }
    }

    /// Route an engine event to the controller
    ///
    /// Returns the edge outcome for connection events.
    ///
    /// # Panics
    /// On a position change for a node the graph does not define.
    #[track_caller]
    pub fn apply(&self, state: &mut GraphStateController, event: RenderEvent) -> Option<EdgeChange> {
        match event {
            RenderEvent::PositionChanged { id, new_position } => {
                state.move_position(id.as_str(), new_position);
                None
            }
            RenderEvent::Connect {
                source,
                target,
                source_handle,
                target_handle,
            } => Some(state.add_edge(Connection {
                source,
                target,
                source_handle,
                target_handle,
            })),
            RenderEvent::Reconnect {
                old_edge_id,
                new_source,
                new_target,
                source_handle,
                target_handle,
            } => Some(state.reconnect_edge(
                old_edge_id.as_str(),
                Connection {
                    source: new_source,
                    target: new_target,
                    source_handle,
                    target_handle,
                },
            )),
            RenderEvent::RemoveEdge { id } => Some(state.remove_edge(id.as_str())),
        }
    }

    fn step_node(&self, step: &Step, position: Point, visible: bool) -> RenderNode {
        let style = step.style();
        RenderNode {
            id: step.id.clone(),
            kind: NodeKind::Step,
            position,
            data: NodeData::Step(StepContent {
                title: step.label.clone(),
                description: step.description.clone(),
                phase: step.phase,
                agent: step.agent.clone(),
                color: step.color,
                icon: style.icon,
            }),
            style: NodeFrame {
                width: Some(self.config.node_width),
                height: Some(self.config.node_height),
                opacity: opacity(visible),
                transition: self.config.fade_transition.clone(),
                pointer_events: pointer_events(visible),
                background: style.background,
                border: style.border,
            },
            interactive: visible,
            draggable: true,
            selectable: true,
            connectable: true,
            handles: Handle::ALL
                .iter()
                .map(|&h| HandleSlot {
                    id: h,
                    role: h.role(),
                })
                .collect(),
        }
    }

    fn note_node(&self, note: &NoteSpec, position: Point, visible: bool) -> RenderNode {
        let tint = note.tint.style();
        RenderNode {
            id: note.id.clone(),
            kind: NodeKind::Note,
            position,
            data: NodeData::Note(NoteContent {
                content: note.content.clone(),
                tint: note.tint,
            }),
            style: NodeFrame {
                width: None,
                height: None,
                opacity: opacity(visible),
                transition: self.config.fade_transition.clone(),
                pointer_events: pointer_events(visible),
                background: tint.background,
                border: tint.border,
            },
            interactive: visible,
            draggable: true,
            selectable: false,
            connectable: false,
            handles: Vec::new(),
        }
    }

    fn render_edge(&self, edge: &LiveEdge, visibility: &Visibility) -> RenderEdge {
        let display = visibility.edge(edge.id.as_str()).cloned().unwrap_or(EdgeDisplay {
            visible: false,
            animated: false,
            label: None,
        });
        let transition = match edge.origin {
            EdgeOrigin::Scripted => Some(self.config.fade_transition.clone()),
            EdgeOrigin::Live => None,
        };
        let label_style = display.label.as_ref().map(|_| self.label_style());

        RenderEdge {
            id: edge.id.clone(),
            source: edge.source.clone(),
            target: edge.target.clone(),
            source_handle: edge.source_handle,
            target_handle: edge.target_handle,
            label: display.label,
            style: EdgeStroke {
                stroke: self.config.edge_stroke.clone(),
                stroke_width: self.config.edge_stroke_width,
                opacity: opacity(display.visible),
                transition,
            },
            label_style,
            marker_end: Marker {
                kind: MarkerKind::ArrowClosed,
                color: self.config.edge_stroke.clone(),
            },
            animated: display.animated,
            origin: edge.origin,
        }
    }

    fn label_style(&self) -> LabelStyle {
        LabelStyle {
            fill: self.config.label_fill.clone(),
            font_weight: self.config.label_font_weight,
            font_size: self.config.label_font_size,
            background_padding: self.config.label_padding,
            background_fill: self.config.label_background.clone(),
            background_stroke: self.config.edge_stroke.clone(),
            background_stroke_width: self.config.label_border_width,
        }
    }
}

fn opacity(visible: bool) -> f64 {
    if visible {
        1.0
    } else {
        0.0
    }
}

fn pointer_events(visible: bool) -> PointerEvents {
    if visible {
        PointerEvents::Auto
    } else {
        PointerEvents::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use stepflow_graph::{EdgeDef, GraphSpec, NoteDef, StepDef};

    fn state() -> GraphStateController {
        let spec = GraphSpec::builder()
            .step(StepDef::new("a", "A", Phase::Entry).at(0.0, 0.0))
            .step(StepDef::new("b", "B", Phase::Agents).color(ColorTag::Red).at(0.0, 100.0))
            .edge(EdgeDef::new("a", "b").handles(Handle::Bottom, Handle::Top).label("next"))
            .note(NoteDef::new("n", 2, NoteTint::Pink, "hello").at(300.0, 0.0))
            .build()
            .unwrap();
        GraphStateController::new(Arc::new(spec))
    }

    #[test]
    fn hidden_nodes_do_not_take_input() {
        let projection = RenderAdapter::default().project(&state());

        let hidden = projection.node("b").unwrap();
        assert_eq!(hidden.style.opacity, 0.0);
        assert_eq!(hidden.style.pointer_events, PointerEvents::None);
        assert!(!hidden.interactive);

        let shown = projection.node("a").unwrap();
        assert_eq!(shown.style.opacity, 1.0);
        assert!(shown.interactive);
    }

    #[test]
    fn step_style_comes_from_theme() {
        let projection = RenderAdapter::default().project(&state());
        let node = projection.node("b").unwrap();
        assert_eq!(node.style.border, ColorTag::Red.tint().border);
        assert_eq!(node.style.width, Some(260.0));
        assert_eq!(node.handles.len(), 4);
    }

    #[test]
    fn notes_are_not_connectable() {
        let mut ctl = state();
        ctl.advance();
        let note = RenderAdapter::default().project(&ctl).node("n").cloned().unwrap();
        assert_eq!(note.kind, NodeKind::Note);
        assert!(note.interactive);
        assert!(note.draggable);
        assert!(!note.connectable);
        assert!(!note.selectable);
        assert!(note.handles.is_empty());
    }

    #[test]
    fn hidden_edge_has_no_label() {
        let adapter = RenderAdapter::default();
        let mut ctl = state();

        let hidden = adapter.project(&ctl).edge("ea-b").cloned().unwrap();
        assert_eq!(hidden.label, None);
        assert_eq!(hidden.label_style, None);
        assert!(!hidden.animated);

        ctl.advance();
        let shown = adapter.project(&ctl).edge("ea-b").cloned().unwrap();
        assert_eq!(shown.label.as_deref(), Some("next"));
        assert!(shown.label_style.is_some());
        assert!(shown.animated);
        assert_eq!(shown.marker_end.color, "#222");
    }

    #[test]
    fn events_route_to_controller() {
        let adapter = RenderAdapter::default();
        let mut ctl = state();

        let moved = RenderEvent::PositionChanged {
            id: NodeId::from("n"),
            new_position: Point::new(1.0, 2.0),
        };
        assert_eq!(adapter.apply(&mut ctl, moved), None);
        assert_eq!(ctl.positions().get("n"), Point::new(1.0, 2.0));

        let connect: RenderEvent = serde_json::from_str(
            r#"{"type":"connect","source":"b","target":"a","sourceHandle":"right","targetHandle":"left"}"#,
        )
        .unwrap();
        let change = adapter.apply(&mut ctl, connect).unwrap();
        assert!(matches!(change, EdgeChange::Added(id) if id.as_str() == "user-bright-aleft"));

        let reconnect: RenderEvent = serde_json::from_str(
            r#"{"type":"reconnect","oldEdgeId":"ea-b","newSource":"b","newTarget":"a"}"#,
        )
        .unwrap();
        assert!(adapter.apply(&mut ctl, reconnect).unwrap().is_applied());

        let remove: RenderEvent = serde_json::from_str(r#"{"type":"removeEdge","id":"ea-b"}"#).unwrap();
        assert!(adapter.apply(&mut ctl, remove).unwrap().is_applied());
        assert_eq!(ctl.edges().len(), 1);
    }

    #[test]
    fn projection_serializes_for_the_engine() {
        let projection = RenderAdapter::default().project(&state());
        let json = serde_json::to_value(&projection).unwrap();
        assert_eq!(json["nodes"][0]["type"], "step");
        assert_eq!(json["nodes"][0]["style"]["pointerEvents"], "auto");
        assert_eq!(json["edges"][0]["markerEnd"]["type"], "arrowclosed");
        assert_eq!(json["edges"][0]["sourceHandle"], "bottom");
    }
}
