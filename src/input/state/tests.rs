use super::*;
use crate::draw::Shape;
use crate::draw::color::{BLACK, CANVAS_GRAY, RED};
use crate::input::params::ToolState;
use crate::input::region::Region;
use crate::input::tool::ToolKind;

// 900px wide window: left [0, 300), middle [300, 600), right [600, 900]
fn create_test_input_state() -> InputState {
    InputState::new(ToolState::default(), 900.0, 600.0)
}

fn segments(state: &InputState) -> Vec<(f64, f64, f64, f64)> {
    state
        .canvas
        .shapes
        .iter()
        .filter_map(|shape| match shape {
            Shape::Segment { x1, y1, x2, y2, .. } => Some((*x1, *y1, *x2, *y2)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_route_rejects_positions_outside_middle() {
    let state = create_test_input_state();
    for x in [0.0, 150.0, 299.99, 600.0, 750.0, 900.0, -10.0, 2000.0] {
        assert_ne!(state.region_at(x), Region::Middle);
        assert!(state.route(x, 100.0, true).is_none());
        assert!(state.route(x, 100.0, false).is_none());
    }
    assert!(state.route(300.0, 100.0, true).is_some());
}

#[test]
fn test_press_outside_middle_never_draws() {
    let mut state = create_test_input_state();
    state.tools.select_tool(ToolKind::Circle);

    state.on_pointer_press(100.0, 100.0);
    state.on_pointer_press(700.0, 100.0);
    assert!(state.canvas.is_empty());

    state.tools.select_tool(ToolKind::Brush);
    state.on_pointer_press(100.0, 100.0);
    state.on_pointer_motion(400.0, 100.0);
    state.on_pointer_motion(450.0, 120.0);
    assert!(matches!(state.state, DrawingState::Idle));
    assert!(state.canvas.is_empty());
}

#[test]
fn test_brush_stroke_draws_connected_segments() {
    let mut state = create_test_input_state();
    state.tools.set_color(RED);

    state.on_pointer_press(400.0, 100.0);
    assert!(state.is_stroking());
    assert!(state.canvas.is_empty());

    state.on_pointer_motion(410.0, 110.0);
    state.on_pointer_motion(420.0, 130.0);
    state.on_pointer_release();

    assert_eq!(
        segments(&state),
        vec![(400.0, 100.0, 410.0, 110.0), (410.0, 110.0, 420.0, 130.0)]
    );
    assert!(matches!(
        state.canvas.last(),
        Some(Shape::Segment { color, thick, .. }) if *color == RED && *thick == 3.0
    ));
    assert!(matches!(state.state, DrawingState::Idle));
}

#[test]
fn test_eraser_paints_background_with_its_own_thickness() {
    let mut state = create_test_input_state();
    state.tools.set_color(RED);
    state.tools.set_parameter(ToolKind::Eraser, 20.0);
    state.tools.select_tool(ToolKind::Eraser);

    state.on_pointer_press(350.0, 200.0);
    state.on_pointer_motion(360.0, 200.0);

    match state.canvas.last() {
        Some(Shape::Segment { color, thick, .. }) => {
            assert_eq!(*color, CANVAS_GRAY);
            assert_eq!(*thick, 20.0);
        }
        other => panic!("expected eraser segment, got {other:?}"),
    }
}

#[test]
fn test_parameter_edit_mid_stroke_applies_to_next_segment() {
    let mut state = create_test_input_state();

    state.on_pointer_press(400.0, 100.0);
    state.on_pointer_motion(410.0, 100.0);
    state.tools.set_parameter(ToolKind::Brush, 9.0);
    state.on_pointer_motion(420.0, 100.0);

    let thicknesses: Vec<f64> = state
        .canvas
        .shapes
        .iter()
        .filter_map(|shape| match shape {
            Shape::Segment { thick, .. } => Some(*thick),
            _ => None,
        })
        .collect();
    assert_eq!(thicknesses, vec![3.0, 9.0]);
}

#[test]
fn test_excursion_suspends_without_bridging_segment() {
    let mut state = create_test_input_state();

    state.on_pointer_press(400.0, 100.0);
    state.on_pointer_motion(500.0, 100.0);
    // Leave through the right divider and wander around the side panel
    state.on_pointer_motion(650.0, 150.0);
    state.on_pointer_motion(800.0, 300.0);
    assert!(matches!(
        state.state,
        DrawingState::Stroking {
            last_x,
            suspended: true,
            ..
        } if last_x == 500.0
    ));
    assert_eq!(state.canvas.len(), 1);

    // Re-entry only re-anchors; drawing resumes from there
    state.on_pointer_motion(550.0, 400.0);
    assert_eq!(state.canvas.len(), 1);
    state.on_pointer_motion(540.0, 420.0);

    assert_eq!(
        segments(&state),
        vec![(400.0, 100.0, 500.0, 100.0), (550.0, 400.0, 540.0, 420.0)]
    );
}

#[test]
fn test_release_outside_middle_ends_stroke() {
    let mut state = create_test_input_state();

    state.on_pointer_press(400.0, 100.0);
    state.on_pointer_motion(100.0, 100.0);
    state.on_pointer_release();
    assert!(matches!(state.state, DrawingState::Idle));

    // Motion after release does nothing, even back in the middle
    state.on_pointer_motion(450.0, 100.0);
    assert!(state.canvas.is_empty());
}

#[test]
fn test_shape_stamps_once_and_ignores_drag() {
    let mut state = create_test_input_state();
    state.tools.select_tool(ToolKind::Square);
    state.tools.set_parameter(ToolKind::Square, 70.0);

    state.on_pointer_press(450.0, 300.0);
    assert!(matches!(state.state, DrawingState::Idle));
    state.on_pointer_motion(470.0, 320.0);
    state.on_pointer_motion(490.0, 340.0);
    state.on_pointer_release();

    assert_eq!(state.canvas.len(), 1);
    assert_eq!(
        state.canvas.last(),
        Some(&Shape::Square {
            cx: 450.0,
            cy: 300.0,
            side: 70.0,
            color: BLACK,
            outline: DEFAULT_SHAPE_OUTLINE,
        })
    );
}

#[test]
fn test_each_shape_uses_shared_size_and_color() {
    let mut state = create_test_input_state();
    state.tools.set_color(RED);
    state.tools.set_parameter(ToolKind::Circle, 30.0);

    for kind in [ToolKind::Circle, ToolKind::Square, ToolKind::Triangle] {
        state.tools.select_tool(kind);
        state.on_pointer_press(400.0, 200.0);
        state.on_pointer_release();
    }

    assert_eq!(state.canvas.len(), 3);
    assert!(matches!(
        state.canvas.shapes[0],
        Shape::Circle { diameter, .. } if diameter == 30.0
    ));
    assert!(matches!(
        state.canvas.shapes[2],
        Shape::Triangle { size, .. } if size == 30.0
    ));
    assert!(state.canvas.shapes.iter().all(|shape| shape.color() == RED));
}

#[test]
fn test_shape_on_left_divider_belongs_to_middle() {
    let mut state = create_test_input_state();
    state.tools.select_tool(ToolKind::Circle);

    state.on_pointer_press(300.0, 100.0);
    state.on_pointer_press(600.0, 100.0);

    assert_eq!(state.canvas.len(), 1);
}

#[test]
fn test_resize_ends_stroke() {
    let mut state = create_test_input_state();
    state.on_pointer_press(400.0, 100.0);

    state.update_surface_size(1800.0, 600.0);
    assert!(matches!(state.state, DrawingState::Idle));
    assert_eq!(state.region_at(400.0), Region::Left);
}

#[test]
fn test_clear_canvas_keeps_tool_parameters() {
    let mut state = create_test_input_state();
    state.tools.set_parameter(ToolKind::Brush, 12.0);
    state.tools.select_tool(ToolKind::Triangle);
    state.on_pointer_press(400.0, 100.0);

    state.clear_canvas();

    assert!(state.canvas.is_empty());
    assert_eq!(state.tools.active(), ToolKind::Triangle);
    assert_eq!(state.tools.parameters().brush_thickness, 12);
}

#[test]
fn test_switching_to_shape_mid_stroke_ends_stroke() {
    let mut state = create_test_input_state();

    state.on_pointer_press(400.0, 100.0);
    state.on_pointer_motion(410.0, 100.0);
    state.tools.select_tool(ToolKind::Square);
    state.on_pointer_motion(420.0, 100.0);
    state.on_pointer_motion(430.0, 100.0);

    assert_eq!(segments(&state), vec![(400.0, 100.0, 410.0, 100.0)]);
    assert_eq!(state.canvas.len(), 1);
    assert!(matches!(state.state, DrawingState::Idle));

    state.tools.select_tool(ToolKind::Brush);
    state.on_pointer_motion(440.0, 100.0);
    assert_eq!(state.canvas.len(), 1);
}
