//! Testing utilities for the Stepflow workspace
//!
//! Shared graph fixtures and proptest strategies.

#![allow(missing_docs)]

use proptest::prelude::*;
use std::sync::Arc;
use stepflow_graph::{EdgeDef, GraphSpec, NoteDef, NoteTint, Phase, StepDef};

/// Id of the `i`-th generated step
pub fn step_id(i: usize) -> String {
    format!("s{i}")
}

/// `count` steps in a vertical column, chained `s0 -> s1 -> ...`
pub fn linear_graph(count: usize) -> Arc<GraphSpec> {
    let builder = (0..count).fold(GraphSpec::builder(), |b, i| {
        b.step(StepDef::new(step_id(i), format!("Step {i}"), Phase::Loop).at(0.0, 100.0 * i as f64))
    });
    let builder = (1..count).fold(builder, |b, i| b.edge(EdgeDef::new(step_id(i - 1), step_id(i))));
    Arc::new(builder.build().unwrap())
}

/// Thirteen chained steps plus a loop back from `s11` to `s3`
///
/// The loop back is hidden while the cursor is at most 11 and shows at 12.
pub fn loop_back_graph() -> Arc<GraphSpec> {
    let builder = (0..13).fold(GraphSpec::builder(), |b, i| {
        b.step(StepDef::new(step_id(i), format!("Step {i}"), Phase::Loop).at(0.0, 100.0 * i as f64))
    });
    let builder = (1..13).fold(builder, |b, i| b.edge(EdgeDef::new(step_id(i - 1), step_id(i))));
    let spec = builder
        .edge(EdgeDef::new(step_id(11), step_id(3)).label("again"))
        .note(NoteDef::new("intro", 1, NoteTint::Amber, "always there").at(400.0, 0.0))
        .note(NoteDef::new("late", 10, NoteTint::Violet, "shows at ten").at(400.0, 900.0))
        .build()
        .unwrap();
    Arc::new(spec)
}

/// Graph with `count` steps and arbitrary edges between them, loops included
pub fn graph_with_edges(count: usize, edges: &[(usize, usize)]) -> Arc<GraphSpec> {
    let builder = (0..count).fold(GraphSpec::builder(), |b, i| {
        b.step(StepDef::new(step_id(i), format!("Step {i}"), Phase::Loop))
    });
    let mut seen = std::collections::HashSet::new();
    let builder = edges
        .iter()
        .filter(|(s, t)| *s < count && *t < count && seen.insert((*s, *t)))
        .fold(builder, |b, (s, t)| b.edge(EdgeDef::new(step_id(*s), step_id(*t))));
    Arc::new(builder.build().unwrap())
}

/// Step count with up to 40 random edges between those steps
pub fn arb_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1..20usize).prop_flat_map(|count| {
        (
            Just(count),
            proptest::collection::vec((0..count, 0..count), 0..40),
        )
    })
}
