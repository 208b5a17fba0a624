//! PlanTool-Trait — Schnittstelle für alle Werkzeuge.

use crate::core::FloorPlan;
use glam::Vec2;

use super::{EditOutcome, ToolContext, ToolPreview, ToolResponse};

/// Schnittstelle für alle Werkzeuge (Auswahl, Wand, Tür, Fenster, Raum).
///
/// Werkzeuge sind zustandsbehaftete Automaten über Pointer-Events. Sie lesen
/// den Grundriss über den `ToolContext` und beschreiben Änderungen als
/// `ToolResponse`; angewendet wird zentral.
pub trait PlanTool {
    /// Anzeigename für Toolbar
    fn name(&self) -> &str;

    /// Statustext für die Statusleiste (z.B. "Startpunkt wählen")
    fn status_text(&self) -> &str;

    /// Pointer gedrückt. `additive` = Modifier für additive Selektion.
    fn on_pointer_down(&mut self, pos: Vec2, additive: bool, ctx: &ToolContext) -> ToolResponse;

    /// Pointer bewegt.
    fn on_pointer_moved(&mut self, _pos: Vec2, _ctx: &ToolContext) -> ToolResponse {
        ToolResponse::none()
    }

    /// Pointer losgelassen.
    fn on_pointer_up(&mut self, _pos: Vec2, _ctx: &ToolContext) -> ToolResponse {
        ToolResponse::none()
    }

    /// Doppelklick (z.B. Wandzug beenden).
    fn on_double_click(&mut self, _pos: Vec2, _ctx: &ToolContext) -> ToolResponse {
        ToolResponse::none()
    }

    /// Escape: laufende Geste abbrechen.
    fn on_escape(&mut self) -> ToolResponse;

    /// Wird nach erfolgreicher Anwendung einer Antwort mit den erzeugten IDs aufgerufen.
    fn on_applied(&mut self, _outcome: &EditOutcome, _plan: &FloorPlan) {}

    /// Preview-Geometrie für den aktuellen Zustand.
    fn preview(&self) -> ToolPreview {
        ToolPreview::default()
    }

    /// Werkzeug-Zustand zurücksetzen (Tool-Wechsel, Datei geladen).
    fn reset(&mut self);

    /// Hat das Werkzeug angefangene Eingaben?
    fn has_pending_input(&self) -> bool {
        false
    }

    /// Winkel-Versatz um `steps` Stufen ändern. Gibt `false` zurück, wenn
    /// das Werkzeug keinen Versatz kennt.
    fn nudge_angle(&mut self, _steps: i32) -> bool {
        false
    }
}
