//! Stepflow Reveal Engine
//!
//! Progressive, one-step-at-a-time disclosure of a workflow graph that stays
//! freely editable while it is being revealed.
//!
//! # Core Concepts
//!
//! - [`RevealCursor`]: Steps with `order_index < cursor` are shown
//! - [`compute_visibility`]: Pure map from cursor to shown steps, edges and notes
//! - [`PositionStore`]: Node moves layered over the default layout
//! - [`GraphStateController`]: Owns cursor, positions and live edges
//! - [`RenderAdapter`]: Projects state for the diagram engine and routes its events back
//!
//! # Example
//!
//! ```rust
//! use stepflow_reveal::{Connection, GraphStateController, RenderAdapter};
//!
//! let mut state = GraphStateController::new(stepflow_graph::sample::shared());
//! let adapter = RenderAdapter::default();
//!
//! state.advance();
//! state.add_edge(Connection::new("1", "3"));
//!
//! let projection = adapter.project(&state);
//! assert_eq!(projection.edges.len(), state.edges().len());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod config;
mod controller;
mod cursor;
mod edges;
mod positions;
mod render;
mod visibility;

pub use config::{ConfigError, RenderConfig};
pub use controller::{EdgeChange, GraphStateController};
pub use cursor::RevealCursor;
pub use edges::{Connection, EdgeOrigin, LiveEdge, LiveEdgeSet};
pub use positions::PositionStore;
pub use render::{
    EdgeStroke, HandleSlot, LabelStyle, Marker, MarkerKind, NodeData, NodeFrame, NodeKind,
    NoteContent, PointerEvents, Projection, RenderAdapter, RenderEdge, RenderEvent, RenderNode,
    StepContent,
};
pub use visibility::{compute_visibility, EdgeDisplay, Visibility};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
