use pretty_assertions::assert_eq;
use stepflow_graph::{sample, Handle, Point};
use stepflow_reveal::{
    Connection, EdgeChange, EdgeOrigin, GraphStateController, LiveEdgeSet, RenderAdapter,
    RenderConfig, RenderEvent,
};
use stepflow_test_utils::{linear_graph, loop_back_graph, step_id};

#[test]
fn advance_reaches_last_step_exactly() {
    let spec = linear_graph(13);
    let mut state = GraphStateController::new(spec);

    for _ in 0..12 {
        assert!(state.advance());
    }
    assert_eq!(state.cursor().position(), 13);
    assert!(state.cursor().is_complete());

    assert!(!state.advance());
    assert_eq!(state.cursor().position(), 13);
}

#[test]
fn retreat_at_first_step_is_noop() {
    let mut state = GraphStateController::new(linear_graph(4));
    assert!(!state.retreat());
    assert_eq!(state.cursor().position(), 1);
    assert_eq!(state.cursor().to_string(), "Step 1 of 4");
}

#[test]
fn loop_back_shows_once_cursor_passes_both_ends() {
    let mut state = GraphStateController::new(loop_back_graph());
    let back = format!("e{}-{}", step_id(11), step_id(3));

    for position in 1..=11 {
        state.seek(position);
        assert!(!state.visibility().is_edge_visible(&back), "visible at {position}");
    }

    state.seek(12);
    let visibility = state.visibility();
    assert!(visibility.is_edge_visible(&back));
    assert_eq!(visibility.edge(&back).unwrap().label.as_deref(), Some("again"));
}

#[test]
fn notes_follow_their_appearance_cursor() {
    let mut state = GraphStateController::new(loop_back_graph());
    assert!(state.visibility().is_note_visible("intro"));
    assert!(!state.visibility().is_note_visible("late"));

    state.seek(10);
    assert!(state.visibility().is_note_visible("late"));
}

#[test]
fn reset_discards_every_user_change() {
    let spec = sample::shared();
    let mut state = GraphStateController::new(spec.clone());

    state.seek(8);
    state.move_position("5a", Point::new(1.0, 2.0));
    state.move_position("note-agents", Point::new(3.0, 4.0));
    state.add_edge(Connection::new("3", "13").handles(Handle::Right, Handle::Left));
    state.reconnect_edge("e4-5a", Connection::new("4", "6"));
    state.remove_edge("e1-2");

    state.reset();

    assert_eq!(state.cursor().position(), 1);
    assert_eq!(state.positions().override_count(), 0);
    assert_eq!(state.positions().get("5a"), spec.default_position("5a").unwrap());
    assert_eq!(state.edges(), &LiveEdgeSet::from_spec(&spec));
    assert!(state.edges().iter().all(|e| e.origin == EdgeOrigin::Scripted));
}

#[test]
fn user_edge_is_visible_before_its_endpoints() {
    let mut state = GraphStateController::new(sample::shared());
    // declared 12 -> 13 uses handles, so the bare route is new
    let id = match state.add_edge(Connection::new("12", "13")) {
        EdgeChange::Added(id) => id,
        other => panic!("expected new edge, got {other:?}"),
    };

    let edge = RenderAdapter::default().project(&state).edge(id.as_str()).cloned().unwrap();
    assert!(edge.animated);
    assert_eq!(edge.origin, EdgeOrigin::Live);
    assert_eq!(edge.style.transition, None);
}

#[test]
fn reconnected_edge_stays_live_after_retreat() {
    let mut state = GraphStateController::new(sample::shared());
    state.seek(16);
    state.reconnect_edge("e12-13", Connection::new("12", "1"));

    state.seek(1);
    let visibility = state.visibility();
    assert!(visibility.is_edge_visible("e12-13"));
    assert!(!visibility.is_step_visible("12"));
}

#[test]
fn drag_stream_applies_last_position() {
    let adapter = RenderAdapter::new(RenderConfig::default());
    let mut state = GraphStateController::new(sample::shared());

    for i in 0..5 {
        let event = RenderEvent::PositionChanged {
            id: "1".into(),
            new_position: Point::new(f64::from(i) * 10.0, 0.0),
        };
        adapter.apply(&mut state, event);
    }

    assert_eq!(adapter.project(&state).node("1").unwrap().position, Point::new(40.0, 0.0));
}

#[test]
fn projection_is_stable_across_recomputation() {
    let adapter = RenderAdapter::default();
    let mut state = GraphStateController::new(sample::shared());
    state.seek(6);
    state.move_position("6", Point::new(900.0, 300.0));

    assert_eq!(adapter.project(&state), adapter.project(&state));
}

#[test]
fn render_config_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("render.toml");
    std::fs::write(&path, "node_width = 320.0\nedge_stroke = \"#444\"\n").unwrap();

    let adapter = RenderAdapter::new(RenderConfig::from_path(&path).unwrap());
    let state = GraphStateController::new(sample::shared());
    let projection = adapter.project(&state);

    assert_eq!(projection.node("1").unwrap().style.width, Some(320.0));
    assert_eq!(projection.edges[0].style.stroke, "#444");
    assert_eq!(projection.edges[0].marker_end.color, "#444");
}
