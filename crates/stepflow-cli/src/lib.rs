//! Stepflow command-line driver
//!
//! Loads a graph definition (or the built-in sample), drives a
//! [`GraphStateController`] and prints what the diagram engine would draw.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod script;
pub mod summary;

use anyhow::Context;
use std::path::Path;
use std::sync::Arc;
use stepflow_graph::GraphSpec;
use stepflow_reveal::{GraphStateController, RenderConfig};

/// Load a graph from `path`, or the sample graph when no path is given
///
/// # Errors
/// Returns an error if the file cannot be read or resolved
pub fn load_spec(path: Option<&Path>) -> anyhow::Result<Arc<GraphSpec>> {
    match path {
        Some(path) => {
            let spec = GraphSpec::from_path(path)
                .with_context(|| format!("loading graph from {}", path.display()))?;
            Ok(Arc::new(spec))
        }
        None => Ok(stepflow_graph::sample::shared()),
    }
}

/// Load render settings from `path`, or defaults when no path is given
///
/// # Errors
/// Returns an error if the file cannot be read or parsed
pub fn load_config(path: Option<&Path>) -> anyhow::Result<RenderConfig> {
    match path {
        Some(path) => RenderConfig::from_path(path)
            .with_context(|| format!("loading render config from {}", path.display())),
        None => Ok(RenderConfig::default()),
    }
}

/// Walk the whole graph from the first step, one text block per cursor
#[must_use]
pub fn play(spec: Arc<GraphSpec>) -> String {
    let mut state = GraphStateController::new(spec);
    let mut out = String::new();

    let first = state.visibility();
    out.push_str(&format!("{}\n", state.cursor()));
    out.push_str(&summary::describe_reveal(
        state.spec(),
        &summary::Revealed::between(&Default::default(), &first),
    ));

    let mut before = first;
    while state.advance() {
        let after = state.visibility();
        out.push_str(&format!("{}\n", state.cursor()));
        out.push_str(&summary::describe_reveal(
            state.spec(),
            &summary::Revealed::between(&before, &after),
        ));
        before = after;
    }
    out
}
