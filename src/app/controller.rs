//! Application Controller für zentrale Event-Verarbeitung.

use super::tools::ToolPreview;
use super::{AppCommand, AppIntent, AppState};
use crate::format::PlanDocument;
use std::time::Instant;

/// Orchestriert UI-Events und Use-Cases auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Datei-I/O ===
            AppCommand::NewPlan => handlers::file_io::new_plan(state),
            AppCommand::LoadFile { path } => handlers::file_io::load(state, path)?,
            AppCommand::SaveFile { path } => handlers::file_io::save(state, path)?,
            AppCommand::RequestExit => handlers::file_io::request_exit(state),

            // === Kamera & Viewport ===
            AppCommand::ResetCamera => handlers::view::reset_camera(state),
            AppCommand::ZoomIn => handlers::view::zoom_in(state),
            AppCommand::ZoomOut => handlers::view::zoom_out(state),
            AppCommand::ZoomToFit => handlers::view::zoom_to_fit(state),
            AppCommand::SetViewportSize { size } => handlers::view::set_viewport_size(state, size),
            AppCommand::PanCamera { delta } => handlers::view::pan(state, delta),
            AppCommand::ZoomCamera {
                factor,
                focus_screen,
            } => handlers::view::zoom_towards(state, factor, focus_screen),

            // === Werkzeuge ===
            AppCommand::ToolPointerDown {
                world_pos,
                additive,
            } => handlers::tool::pointer_down(state, world_pos, additive),
            AppCommand::ToolPointerMoved { world_pos } => {
                handlers::tool::pointer_moved(state, world_pos)
            }
            AppCommand::ToolPointerUp { world_pos } => handlers::tool::pointer_up(state, world_pos),
            AppCommand::ToolDoubleClick { world_pos } => {
                handlers::tool::double_click(state, world_pos)
            }
            AppCommand::ToolEscape => handlers::tool::escape(state),
            AppCommand::SetEditorTool { tool } => handlers::tool::set_tool(state, tool),
            AppCommand::NudgeWallAngle { steps } => handlers::tool::nudge_angle(state, steps),

            // === Selektion & Editing ===
            AppCommand::DeleteSelection => handlers::editing::delete_selection(state),
            AppCommand::ClearSelection => handlers::selection::clear(state),
            AppCommand::SelectAll => handlers::selection::select_all(state),

            // === History ===
            AppCommand::Undo => handlers::history::undo(state),
            AppCommand::Redo => handlers::history::redo(state),

            // === Ebenen ===
            AppCommand::AddLayer { name } => handlers::editing::add_layer(state, &name),
            AppCommand::SetLayerVisibility { layer, visible } => {
                handlers::editing::set_layer_visibility(state, layer, visible)
            }
            AppCommand::SetLayerLocked { layer, locked } => {
                handlers::editing::set_layer_locked(state, layer, locked)
            }
            AppCommand::SetActiveLayer { layer } => {
                handlers::editing::set_active_layer(state, layer)
            }

            // === Räume ===
            AppCommand::ResyncRooms => handlers::editing::resync_rooms(state),
            AppCommand::RenameRoom { room, name } => {
                handlers::editing::rename_room(state, room, &name)
            }

            // === Optionen ===
            AppCommand::ApplyOptions { options } => {
                handlers::options::apply_options(state, *options)?
            }
            AppCommand::ResetOptions => handlers::options::reset_options(state)?,
        }

        Ok(())
    }

    /// Preview-Geometrie des aktiven Werkzeugs für das Rendering.
    pub fn tool_preview(&self, state: &AppState) -> ToolPreview {
        state
            .editor
            .tool_manager
            .active_tool()
            .map(|tool| tool.preview())
            .unwrap_or_default()
    }

    /// Fragt den entprellten Autosave ab (einmal pro Frame aufrufen).
    pub fn poll_autosave(&self, state: &mut AppState, now: Instant) -> Option<PlanDocument> {
        super::use_cases::file_io::poll_autosave(state, now)
    }
}
