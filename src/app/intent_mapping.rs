//! Mapping von UI-Intents auf mutierende App-Commands.

use super::state::EditorTool;
use super::{AppCommand, AppIntent, AppState};

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::NewPlanRequested => vec![AppCommand::NewPlan],
        AppIntent::OpenFileRequested { path } => vec![AppCommand::LoadFile { path }],
        AppIntent::SaveRequested => vec![AppCommand::SaveFile { path: None }],
        AppIntent::SaveAsRequested { path } => vec![AppCommand::SaveFile { path: Some(path) }],
        AppIntent::ExitRequested => vec![AppCommand::RequestExit],

        AppIntent::ResetCameraRequested => vec![AppCommand::ResetCamera],
        AppIntent::ZoomInRequested => vec![AppCommand::ZoomIn],
        AppIntent::ZoomOutRequested => vec![AppCommand::ZoomOut],
        AppIntent::ZoomToFitRequested => vec![AppCommand::ZoomToFit],
        AppIntent::ViewportResized { size } => vec![AppCommand::SetViewportSize { size }],
        AppIntent::CameraPan { delta } => vec![AppCommand::PanCamera { delta }],
        AppIntent::CameraZoom {
            factor,
            focus_screen,
        } => vec![AppCommand::ZoomCamera {
            factor,
            focus_screen,
        }],

        AppIntent::PointerDown {
            world_pos,
            additive,
        } => vec![AppCommand::ToolPointerDown {
            world_pos,
            additive,
        }],
        AppIntent::PointerMoved { world_pos } => vec![AppCommand::ToolPointerMoved { world_pos }],
        AppIntent::PointerUp { world_pos } => vec![AppCommand::ToolPointerUp { world_pos }],
        AppIntent::DoubleClick { world_pos } => vec![AppCommand::ToolDoubleClick { world_pos }],
        AppIntent::EscapePressed => map_escape(state),
        AppIntent::DeletePressed => {
            if state.selection.is_empty() || state.history.in_transaction() {
                Vec::new()
            } else {
                vec![AppCommand::DeleteSelection]
            }
        }

        AppIntent::UndoRequested => {
            if state.history.in_transaction() {
                Vec::new()
            } else {
                vec![AppCommand::Undo]
            }
        }
        AppIntent::RedoRequested => {
            if state.history.in_transaction() {
                Vec::new()
            } else {
                vec![AppCommand::Redo]
            }
        }

        AppIntent::SetToolRequested { tool } => vec![AppCommand::SetEditorTool { tool }],
        AppIntent::AngleNudgeRequested { steps } => {
            if state.editor.active_tool == EditorTool::Wall {
                vec![AppCommand::NudgeWallAngle { steps }]
            } else {
                Vec::new()
            }
        }

        AppIntent::SelectAllRequested => vec![AppCommand::SelectAll],
        AppIntent::ClearSelectionRequested => vec![AppCommand::ClearSelection],

        AppIntent::AddLayerRequested { name } => vec![AppCommand::AddLayer { name }],
        AppIntent::LayerVisibilityToggled { layer } => match state.plan.layer(layer) {
            Some(l) => vec![AppCommand::SetLayerVisibility {
                layer,
                visible: !l.visible,
            }],
            None => Vec::new(),
        },
        AppIntent::LayerLockToggled { layer } => match state.plan.layer(layer) {
            Some(l) => vec![AppCommand::SetLayerLocked {
                layer,
                locked: !l.locked,
            }],
            None => Vec::new(),
        },
        AppIntent::SetActiveLayerRequested { layer } => {
            vec![AppCommand::SetActiveLayer { layer }]
        }

        AppIntent::ResyncRoomsRequested => vec![AppCommand::ResyncRooms],
        AppIntent::RenameRoomRequested { room, name } => {
            vec![AppCommand::RenameRoom { room, name }]
        }

        AppIntent::OptionsChanged { options } => vec![AppCommand::ApplyOptions { options }],
        AppIntent::ResetOptionsRequested => vec![AppCommand::ResetOptions],
    }
}

/// Stufenweise Escape-Logik: laufende Geste abbrechen, sonst zurück zum
/// Auswahl-Werkzeug, dort Selektion aufheben.
fn map_escape(state: &AppState) -> Vec<AppCommand> {
    let pending = state
        .editor
        .tool_manager
        .active_tool()
        .is_some_and(|t| t.has_pending_input());
    if pending || state.history.in_transaction() {
        return vec![AppCommand::ToolEscape];
    }
    if state.editor.active_tool != EditorTool::Select {
        return vec![AppCommand::SetEditorTool {
            tool: EditorTool::Select,
        }];
    }
    vec![AppCommand::ClearSelection]
}
