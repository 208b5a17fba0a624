//! Use-Case-Funktionen für das aktive Werkzeug.
//!
//! Baut den lesenden `ToolContext`, reicht das Event an das aktive Werkzeug
//! weiter und wendet dessen Antwort zentral an.

use super::editing::apply_tool_response;
use crate::app::state::EditorTool;
use crate::app::tools::{PlanTool, ToolContext, ToolResponse};
use crate::app::AppState;
use glam::Vec2;

fn dispatch(
    state: &mut AppState,
    event: impl FnOnce(&mut (dyn PlanTool + 'static), &ToolContext) -> ToolResponse,
) {
    let response = {
        let ctx = ToolContext {
            plan: &state.plan,
            camera: &state.view.camera,
            options: &state.options,
            active_layer: state.editor.active_layer,
        };
        let Some(tool) = state.editor.tool_manager.active_tool_mut() else {
            return;
        };
        event(tool, &ctx)
    };

    if response.is_empty() {
        return;
    }
    if let Some(outcome) = apply_tool_response(state, response) {
        if let Some(tool) = state.editor.tool_manager.active_tool_mut() {
            tool.on_applied(&outcome, &state.plan);
        }
    }
}

/// Pointer gedrückt.
pub fn pointer_down(state: &mut AppState, world_pos: Vec2, additive: bool) {
    state.view.cursor_world = Some(world_pos);
    dispatch(state, |tool, ctx| tool.on_pointer_down(world_pos, additive, ctx));
}

/// Pointer bewegt.
pub fn pointer_moved(state: &mut AppState, world_pos: Vec2) {
    state.view.cursor_world = Some(world_pos);
    dispatch(state, |tool, ctx| tool.on_pointer_moved(world_pos, ctx));
}

/// Pointer losgelassen.
pub fn pointer_up(state: &mut AppState, world_pos: Vec2) {
    dispatch(state, |tool, ctx| tool.on_pointer_up(world_pos, ctx));
}

/// Doppelklick.
pub fn double_click(state: &mut AppState, world_pos: Vec2) {
    dispatch(state, |tool, ctx| tool.on_double_click(world_pos, ctx));
}

/// Escape an das aktive Werkzeug; eine danach noch offene Transaktion wird
/// ebenfalls abgebrochen.
pub fn escape(state: &mut AppState) {
    dispatch(state, |tool, _| tool.on_escape());
    cancel_open_transaction(state);
}

/// Wechselt das aktive Werkzeug.
///
/// Eine laufende Geste wird abgebrochen und ihr Ausgangszustand wiederhergestellt.
pub fn set_tool(state: &mut AppState, tool: EditorTool) {
    cancel_open_transaction(state);
    if !state.editor.tool_manager.set_active(tool) {
        log::warn!("Werkzeug {:?} ist nicht registriert", tool);
        return;
    }
    state.editor.active_tool = tool;
    if let Some(active) = state.editor.tool_manager.active_tool() {
        state.ui.set_status(active.status_text());
    }
    log::info!("Werkzeug gewechselt: {:?}", tool);
}

/// Ändert den Winkel-Versatz des aktiven Werkzeugs.
pub fn nudge_angle(state: &mut AppState, steps: i32) {
    let Some(tool) = state.editor.tool_manager.active_tool_mut() else {
        return;
    };
    if !tool.nudge_angle(steps) {
        log::debug!("Werkzeug '{}' kennt keinen Winkel-Versatz", tool.name());
    }
}

/// Bricht eine offene Transaktion ab und setzt das aktive Werkzeug zurück,
/// damit keine Geste ohne Transaktion weiterläuft.
fn cancel_open_transaction(state: &mut AppState) {
    if let Some(before) = state.history.cancel_transaction() {
        before.apply_to(state);
        if let Some(tool) = state.editor.tool_manager.active_tool_mut() {
            tool.reset();
        }
        log::info!("Offene Geste abgebrochen");
    }
}
