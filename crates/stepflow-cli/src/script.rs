//! Scripted sessions
//!
//! A script is a JSON array of button presses (`next`, `prev`, `reset`)
//! and diagram-engine events, replayed in order against one controller.

use serde::Deserialize;
use stepflow_graph::NodeId;
use stepflow_reveal::{GraphStateController, RenderAdapter, RenderEvent};

/// Script errors
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The script is not a valid action list
    #[error("invalid script: {0}")]
    Parse(#[from] serde_json::Error),

    /// A move names a node the graph does not define
    #[error("action {index} moves unknown node `{id}`")]
    UnknownNode {
        /// Position of the action in the script
        index: usize,
        /// Offending node id
        id: NodeId,
    },
}

/// Button press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Control {
    /// Reveal the next step
    Next,
    /// Hide the last step
    Prev,
    /// Start over
    Reset,
}

/// One scripted action
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScriptAction {
    /// Button press
    Control(Control),
    /// Engine event
    Event(RenderEvent),
}

/// Tally of a replayed script
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptReport {
    /// Actions that changed state
    pub applied: usize,
    /// Actions that were no-ops
    pub ignored: usize,
}

/// Parse a JSON action list
///
/// # Errors
/// Returns [`ScriptError::Parse`] on malformed input
pub fn parse_script(input: &str) -> Result<Vec<ScriptAction>, ScriptError> {
    Ok(serde_json::from_str(input)?)
}

/// Apply every action in order
///
/// Moves of unknown nodes are rejected up front so a bad script cannot
/// trip the controller's precondition checks; nothing is applied in that
/// case.
///
/// # Errors
/// Returns [`ScriptError::UnknownNode`] if any move names an unknown node
pub fn run_script(
    state: &mut GraphStateController,
    adapter: &RenderAdapter,
    actions: Vec<ScriptAction>,
) -> Result<ScriptReport, ScriptError> {
    for (index, action) in actions.iter().enumerate() {
        if let ScriptAction::Event(RenderEvent::PositionChanged { id, .. }) = action {
            if !state.spec().contains_node(id.as_str()) {
                return Err(ScriptError::UnknownNode {
                    index,
                    id: id.clone(),
                });
            }
        }
    }

    let mut report = ScriptReport::default();
    for action in actions {
        let applied = match action {
            ScriptAction::Control(Control::Next) => state.advance(),
            ScriptAction::Control(Control::Prev) => state.retreat(),
            ScriptAction::Control(Control::Reset) => {
                state.reset();
                true
            }
            ScriptAction::Event(event) => adapter
                .apply(state, event)
                .map_or(true, |change| change.is_applied()),
        };
        if applied {
            report.applied += 1;
        } else {
            report.ignored += 1;
        }
    }

    tracing::info!(applied = report.applied, ignored = report.ignored, "script replayed");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepflow_graph::sample;

    #[test]
    fn parses_controls_and_events() {
        let actions = parse_script(
            r#"[
                {"type": "next"},
                {"type": "positionChanged", "id": "1", "newPosition": {"x": 5, "y": 6}},
                {"type": "reset"}
            ]"#,
        )
        .unwrap();

        assert_eq!(actions[0], ScriptAction::Control(Control::Next));
        assert!(matches!(
            actions[1],
            ScriptAction::Event(RenderEvent::PositionChanged { .. })
        ));
        assert_eq!(actions[2], ScriptAction::Control(Control::Reset));
    }

    #[test]
    fn counts_noops() {
        let mut state = GraphStateController::new(sample::shared());
        let actions = parse_script(r#"[{"type":"prev"},{"type":"next"},{"type":"removeEdge","id":"nope"}]"#).unwrap();

        let report = run_script(&mut state, &RenderAdapter::default(), actions).unwrap();
        assert_eq!(report, ScriptReport { applied: 1, ignored: 2 });
        assert_eq!(state.cursor().position(), 2);
    }

    #[test]
    fn rejects_unknown_move_before_applying_anything() {
        let mut state = GraphStateController::new(sample::shared());
        let actions = parse_script(
            r#"[{"type":"next"},{"type":"positionChanged","id":"ghost","newPosition":{"x":0,"y":0}}]"#,
        )
        .unwrap();

        let err = run_script(&mut state, &RenderAdapter::default(), actions).unwrap_err();
        assert!(matches!(err, ScriptError::UnknownNode { index: 1, .. }));
        assert_eq!(state.cursor().position(), 1);
    }
}
