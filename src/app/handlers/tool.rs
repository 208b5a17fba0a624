//! Handler für Werkzeug-Events.

use crate::app::state::EditorTool;
use crate::app::use_cases;
use crate::app::AppState;

/// Pointer gedrückt.
pub fn pointer_down(state: &mut AppState, world_pos: glam::Vec2, additive: bool) {
    use_cases::tool::pointer_down(state, world_pos, additive);
}

/// Pointer bewegt.
pub fn pointer_moved(state: &mut AppState, world_pos: glam::Vec2) {
    use_cases::tool::pointer_moved(state, world_pos);
}

/// Pointer losgelassen.
pub fn pointer_up(state: &mut AppState, world_pos: glam::Vec2) {
    use_cases::tool::pointer_up(state, world_pos);
}

/// Doppelklick.
pub fn double_click(state: &mut AppState, world_pos: glam::Vec2) {
    use_cases::tool::double_click(state, world_pos);
}

/// Laufende Geste abbrechen.
pub fn escape(state: &mut AppState) {
    use_cases::tool::escape(state);
}

/// Werkzeug wechseln.
pub fn set_tool(state: &mut AppState, tool: EditorTool) {
    use_cases::tool::set_tool(state, tool);
}

/// Winkel-Versatz ändern.
pub fn nudge_angle(state: &mut AppState, steps: i32) {
    use_cases::tool::nudge_angle(state, steps);
}
