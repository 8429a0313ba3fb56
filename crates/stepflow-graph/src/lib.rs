//! Stepflow Graph Definitions
//!
//! Immutable description of a multi-stage workflow: steps in reveal order,
//! dependency edges between them, and notes that appear part way through.
//!
//! # Core Concepts
//!
//! - [`GraphSpec`]: Resolved, read-only graph shared for a whole session
//! - [`Step`]: Workflow step; its `order_index` drives reveal decisions
//! - [`EdgeSpec`]: Declared edge, possibly pointing backwards (loops)
//! - [`NoteSpec`]: Explanatory note keyed to a reveal cursor
//! - [`GraphDocument`]: Serialized form loaded from JSON or YAML
//!
//! # Example
//!
//! ```rust
//! use stepflow_graph::{EdgeDef, GraphSpec, Phase, StepDef};
//!
//! let spec = GraphSpec::builder()
//!     .step(StepDef::new("start", "Start", Phase::Entry))
//!     .step(StepDef::new("end", "End", Phase::Done).at(0.0, 120.0))
//!     .edge(EdgeDef::new("start", "end"))
//!     .build()?;
//!
//! assert_eq!(spec.order_index("end"), Some(1));
//! # Ok::<(), stepflow_graph::SpecError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod document;
mod error;
mod geometry;
mod ids;
mod model;
mod spec;
mod theme;

pub mod sample;

pub use document::{EdgeDef, GraphDocument, NoteDef, StepDef};
pub use error::SpecError;
pub use geometry::{Handle, HandleRole, Point};
pub use ids::{EdgeId, NodeId};
pub use model::{EdgeSpec, NoteSpec, Step};
pub use spec::{GraphSpec, GraphSpecBuilder};
pub use theme::{step_style, ColorTag, NodeStyle, NoteTint, Phase, TintStyle};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
