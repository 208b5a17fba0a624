use floorplan_editor::{
    from_document, parse_plan_document, to_document, write_plan_document, EditorTool, LinearUnit,
};
use floorplan_editor::{AppCommand, AppController, AppIntent, AppState, SelectionItem};
use glam::Vec2;

fn click(controller: &mut AppController, state: &mut AppState, x: f32, y: f32) {
    controller
        .handle_intent(
            state,
            AppIntent::PointerDown {
                world_pos: Vec2::new(x, y),
                additive: false,
            },
        )
        .expect("PointerDown sollte ohne Fehler durchlaufen");
}

fn set_tool(controller: &mut AppController, state: &mut AppState, tool: EditorTool) {
    controller
        .handle_intent(state, AppIntent::SetToolRequested { tool })
        .expect("SetToolRequested sollte ohne Fehler durchlaufen");
}

/// Zeichnet ein 4×4-Quadrat mit dem Wand-Werkzeug.
fn draw_square(controller: &mut AppController, state: &mut AppState) {
    set_tool(controller, state, EditorTool::Wall);
    for (x, y) in [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)] {
        click(controller, state, x, y);
    }
    controller
        .handle_intent(
            state,
            AppIntent::DoubleClick {
                world_pos: Vec2::ZERO,
            },
        )
        .expect("DoubleClick sollte ohne Fehler durchlaufen");
}

fn node_at(state: &AppState, pos: Vec2) -> floorplan_editor::NodeId {
    state
        .plan
        .nearest_node(pos)
        .filter(|m| m.distance < 1e-3)
        .map(|m| m.node_id)
        .expect("Knoten an der Position erwartet")
}

#[test]
fn test_save_requested_without_path_fails_but_logs_command() {
    let mut controller = AppController::new();
    let mut state = AppState::new();

    let result = controller.handle_intent(&mut state, AppIntent::SaveRequested);
    assert!(result.is_err(), "Ohne Pfad darf nicht gespeichert werden");

    let last = state
        .command_log
        .entries()
        .last()
        .expect("Es sollte ein Command geloggt sein");

    match last {
        AppCommand::SaveFile { path } => assert!(path.is_none()),
        other => panic!("Unerwarteter letzter Command: {other:?}"),
    }
}

#[test]
fn test_exit_requested_sets_exit_flag_and_logs_command() {
    let mut controller = AppController::new();
    let mut state = AppState::new();

    assert!(!state.should_exit);

    controller
        .handle_intent(&mut state, AppIntent::ExitRequested)
        .expect("ExitRequested sollte ohne Fehler durchlaufen");

    assert!(state.should_exit);
    assert!(matches!(
        state.command_log.entries().last(),
        Some(AppCommand::RequestExit)
    ));
}

#[test]
fn test_wall_tool_draws_closed_square() {
    let mut controller = AppController::new();
    let mut state = AppState::new();

    draw_square(&mut controller, &mut state);

    assert_eq!(state.wall_count(), 4);
    assert_eq!(state.node_count(), 4);
    // Ausgangszustand + eine Wand pro Klick
    assert_eq!(state.history.len(), 5);
    for node in state.plan.nodes().map(|(id, _)| id) {
        assert_eq!(state.plan.walls_at_node(node).len(), 2);
    }
    assert!(matches!(
        state.command_log.entries().last(),
        Some(AppCommand::ToolDoubleClick { .. })
    ));
}

#[test]
fn test_room_tool_creates_room_inside_square() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    draw_square(&mut controller, &mut state);

    set_tool(&mut controller, &mut state, EditorTool::Room);
    click(&mut controller, &mut state, 2.0, 2.0);

    assert_eq!(state.plan.room_count(), 1);
    let (_, room) = state.plan.rooms().next().expect("Raum erwartet");
    assert_eq!(room.name, "Raum 1");
    assert_eq!(room.walls.len(), 4);
    approx::assert_relative_eq!(room.area, 3.8 * 3.8, epsilon = 1e-3);

    // Zweiter Klick legt keinen weiteren Raum an
    click(&mut controller, &mut state, 2.0, 2.0);
    assert_eq!(state.plan.room_count(), 1);
}

#[test]
fn test_room_tool_outside_sets_status() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    draw_square(&mut controller, &mut state);
    let history_len = state.history.len();

    set_tool(&mut controller, &mut state, EditorTool::Room);
    click(&mut controller, &mut state, 10.0, 10.0);

    assert_eq!(state.plan.room_count(), 0);
    assert_eq!(state.history.len(), history_len);
    assert_eq!(
        state.ui.status_message.as_deref(),
        Some("Kein geschlossener Raum gefunden")
    );
}

#[test]
fn test_door_tool_places_door_on_wall() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    draw_square(&mut controller, &mut state);

    set_tool(&mut controller, &mut state, EditorTool::Door);
    click(&mut controller, &mut state, 2.0, 0.0);

    assert_eq!(state.plan.opening_count(), 1);
    let (id, opening) = state.plan.openings().next().expect("Öffnung erwartet");
    assert!(matches!(
        opening.kind,
        floorplan_editor::OpeningKind::Door { .. }
    ));
    let geometry = state.plan.opening_geometry(id).expect("Geometrie");
    approx::assert_relative_eq!(geometry.center.x, 2.0, epsilon = 1e-3);
    approx::assert_relative_eq!(geometry.center.y, 0.0, epsilon = 1e-3);
}

#[test]
fn test_node_drag_is_one_undo_step() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    draw_square(&mut controller, &mut state);
    set_tool(&mut controller, &mut state, EditorTool::Select);
    let corner = node_at(&state, Vec2::new(4.0, 4.0));
    let history_len = state.history.len();

    click(&mut controller, &mut state, 4.0, 4.0);
    assert!(state.history.in_transaction());
    assert!(state.selection.contains(SelectionItem::Node(corner)));

    for x in [4.5, 5.0, 5.5, 6.0] {
        controller
            .handle_intent(
                &mut state,
                AppIntent::PointerMoved {
                    world_pos: Vec2::new(x, 4.0),
                },
            )
            .expect("PointerMoved sollte ohne Fehler durchlaufen");
    }
    controller
        .handle_intent(
            &mut state,
            AppIntent::PointerUp {
                world_pos: Vec2::new(6.0, 4.0),
            },
        )
        .expect("PointerUp sollte ohne Fehler durchlaufen");

    assert!(!state.history.in_transaction());
    assert_eq!(state.history.len(), history_len + 1);
    let moved = state.plan.node(corner).expect("Knoten").position;
    approx::assert_relative_eq!(moved.x, 6.0, epsilon = 1e-3);

    controller
        .handle_intent(&mut state, AppIntent::UndoRequested)
        .expect("Undo sollte ohne Fehler durchlaufen");
    let restored = state.plan.node(corner).expect("Knoten").position;
    assert_eq!(restored, Vec2::new(4.0, 4.0));

    controller
        .handle_intent(&mut state, AppIntent::RedoRequested)
        .expect("Redo sollte ohne Fehler durchlaufen");
    let redone = state.plan.node(corner).expect("Knoten").position;
    approx::assert_relative_eq!(redone.x, 6.0, epsilon = 1e-3);
}

#[test]
fn test_escape_during_drag_restores_state() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    draw_square(&mut controller, &mut state);
    set_tool(&mut controller, &mut state, EditorTool::Select);
    let corner = node_at(&state, Vec2::new(4.0, 4.0));
    let history_len = state.history.len();
    let revision = state.history.revision();

    click(&mut controller, &mut state, 4.0, 4.0);
    controller
        .handle_intent(
            &mut state,
            AppIntent::PointerMoved {
                world_pos: Vec2::new(7.0, 7.0),
            },
        )
        .expect("PointerMoved sollte ohne Fehler durchlaufen");
    controller
        .handle_intent(&mut state, AppIntent::EscapePressed)
        .expect("Escape sollte ohne Fehler durchlaufen");

    assert!(!state.history.in_transaction());
    assert_eq!(state.history.len(), history_len);
    assert_eq!(state.history.revision(), revision);
    assert_eq!(
        state.plan.node(corner).map(|n| n.position),
        Some(Vec2::new(4.0, 4.0))
    );
    assert!(matches!(
        state.command_log.entries().last(),
        Some(AppCommand::ToolEscape)
    ));
}

#[test]
fn test_escape_leaves_wall_tool_then_clears_selection() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    draw_square(&mut controller, &mut state);

    controller
        .handle_intent(&mut state, AppIntent::EscapePressed)
        .expect("Escape sollte ohne Fehler durchlaufen");
    assert_eq!(state.editor.active_tool, EditorTool::Select);

    controller
        .handle_intent(&mut state, AppIntent::SelectAllRequested)
        .expect("SelectAll sollte ohne Fehler durchlaufen");
    assert!(!state.selection.is_empty());

    controller
        .handle_intent(&mut state, AppIntent::EscapePressed)
        .expect("Escape sollte ohne Fehler durchlaufen");
    assert!(state.selection.is_empty());
    assert!(matches!(
        state.command_log.entries().last(),
        Some(AppCommand::ClearSelection)
    ));
}

#[test]
fn test_delete_selected_node_removes_walls_and_undo_restores() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    draw_square(&mut controller, &mut state);
    set_tool(&mut controller, &mut state, EditorTool::Select);

    click(&mut controller, &mut state, 4.0, 4.0);
    controller
        .handle_intent(
            &mut state,
            AppIntent::PointerUp {
                world_pos: Vec2::new(4.0, 4.0),
            },
        )
        .expect("PointerUp sollte ohne Fehler durchlaufen");
    let history_len = state.history.len();

    controller
        .handle_intent(&mut state, AppIntent::DeletePressed)
        .expect("Delete sollte ohne Fehler durchlaufen");

    assert_eq!(state.node_count(), 3);
    assert_eq!(state.wall_count(), 2);
    assert!(state.selection.is_empty());
    assert_eq!(state.history.len(), history_len + 1);

    controller
        .handle_intent(&mut state, AppIntent::UndoRequested)
        .expect("Undo sollte ohne Fehler durchlaufen");
    assert_eq!(state.node_count(), 4);
    assert_eq!(state.wall_count(), 4);
}

#[test]
fn test_delete_with_empty_selection_does_nothing() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    draw_square(&mut controller, &mut state);
    let log_len = state.command_log.len();

    controller
        .handle_intent(&mut state, AppIntent::DeletePressed)
        .expect("Delete sollte ohne Fehler durchlaufen");

    assert_eq!(state.command_log.len(), log_len);
    assert_eq!(state.wall_count(), 4);
}

#[test]
fn test_new_plan_discards_history() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    draw_square(&mut controller, &mut state);
    assert!(state.can_undo());

    controller
        .handle_intent(&mut state, AppIntent::NewPlanRequested)
        .expect("NewPlan sollte ohne Fehler durchlaufen");

    assert_eq!(state.node_count(), 0);
    assert!(!state.can_undo());
    assert!(state.ui.current_file_path.is_none());
}

#[test]
fn test_zoom_to_fit_centers_plan() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    draw_square(&mut controller, &mut state);

    controller
        .handle_intent(
            &mut state,
            AppIntent::ViewportResized {
                size: [800.0, 600.0],
            },
        )
        .expect("ViewportResized sollte ohne Fehler durchlaufen");
    controller
        .handle_intent(&mut state, AppIntent::ZoomToFitRequested)
        .expect("ZoomToFit sollte ohne Fehler durchlaufen");

    let center = state.view.camera.world_to_screen(Vec2::new(2.0, 2.0));
    approx::assert_relative_eq!(center.x, 400.0, epsilon = 1e-2);
    approx::assert_relative_eq!(center.y, 300.0, epsilon = 1e-2);
}

#[test]
fn test_dragging_node_onto_neighbour_merges_and_reloads() {
    let mut controller = AppController::new();
    let mut state = AppState::new();
    set_tool(&mut controller, &mut state, EditorTool::Wall);
    for (x, y) in [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)] {
        click(&mut controller, &mut state, x, y);
    }
    controller
        .handle_intent(
            &mut state,
            AppIntent::DoubleClick {
                world_pos: Vec2::new(4.0, 4.0),
            },
        )
        .expect("DoubleClick sollte ohne Fehler durchlaufen");
    assert_eq!(state.plan.wall_count(), 2);

    set_tool(&mut controller, &mut state, EditorTool::Select);
    let neighbour = node_at(&state, Vec2::new(4.0, 0.0));
    let history_len = state.history.len();

    click(&mut controller, &mut state, 4.0, 4.0);
    controller
        .handle_intent(
            &mut state,
            AppIntent::PointerMoved {
                world_pos: Vec2::new(4.02, 0.03),
            },
        )
        .expect("PointerMoved sollte ohne Fehler durchlaufen");
    controller
        .handle_intent(
            &mut state,
            AppIntent::PointerUp {
                world_pos: Vec2::new(4.02, 0.03),
            },
        )
        .expect("PointerUp sollte ohne Fehler durchlaufen");

    assert!(!state.history.in_transaction());
    assert_eq!(state.history.len(), history_len + 1);
    assert_eq!(state.plan.node_count(), 2);
    assert_eq!(state.plan.wall_count(), 1);
    assert!(state.selection.contains(SelectionItem::Node(neighbour)));
    for (id, _) in state.plan.walls() {
        let (a, b) = state.plan.wall_endpoints(id).expect("Wand");
        assert!(a.distance(b) > 1.0);
    }

    let json = write_plan_document(&to_document(
        &state.plan,
        LinearUnit::Meters,
        &state.view.camera,
    ))
    .expect("Serialisierung");
    let document = parse_plan_document(&json).expect("Parsen");
    let reloaded = from_document(&document).expect("Zusammengeführter Plan muss ladbar sein");
    assert_eq!(reloaded, *state.plan);

    controller
        .handle_intent(&mut state, AppIntent::UndoRequested)
        .expect("Undo sollte ohne Fehler durchlaufen");
    assert_eq!(state.plan.node_count(), 3);
    assert_eq!(state.plan.wall_count(), 2);
}
