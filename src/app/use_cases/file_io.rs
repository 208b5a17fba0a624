//! Use-Case-Funktionen für Dateiaktionen.
//! Alle Dateisystem-Operationen (I/O) sind hier zentralisiert.

use crate::app::AppState;
use crate::core::{Camera2D, FloorPlan};
use crate::format::{
    from_document, parse_plan_document, to_document, write_plan_document, PlanDocument,
};
use anyhow::{bail, Context};
use std::time::Instant;

/// Beginnt einen leeren Grundriss; Verlauf und Dateipfad werden verworfen.
pub fn new_plan(state: &mut AppState) {
    state.replace_plan(FloorPlan::new(state.options.merge_threshold_world()));
    state.ui.current_file_path = None;
    state.view.camera = Camera2D::default();
    state.autosave.mark_saved(state.history.revision());
    log::info!("Neuer Grundriss");
}

/// Lädt einen Grundriss aus einer JSON-Datei in den AppState.
///
/// Einheit und Kamera werden aus dem Dokument übernommen.
pub fn load_file(state: &mut AppState, path: String) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("Datei konnte nicht gelesen werden: {path}"))?;
    let document = parse_plan_document(&json)
        .with_context(|| format!("Ungültiges Plan-Dokument: {path}"))?;
    let plan = from_document(&document)
        .with_context(|| format!("Grundriss konnte nicht aufgebaut werden: {path}"))?;

    log::info!(
        "Loaded FloorPlan: {} nodes, {} walls, {} openings, {} rooms",
        plan.node_count(),
        plan.wall_count(),
        plan.opening_count(),
        plan.room_count()
    );

    state.options.unit = document.unit;
    state.view.camera = document.camera;
    state.replace_plan(plan);
    state.ui.current_file_path = Some(path);
    state.ui.status_message = None;
    state.autosave.mark_saved(state.history.revision());
    Ok(())
}

/// Speichert den zuletzt bestätigten Zustand.
///
/// `None` speichert unter dem aktuell bekannten Pfad, `Some(p)` unter `p`
/// (der Pfad wird danach zum aktuellen Pfad).
pub fn save_file(state: &mut AppState, path: Option<String>) -> anyhow::Result<()> {
    let Some(path) = path.or_else(|| state.ui.current_file_path.clone()) else {
        bail!("Kein Speicherpfad bekannt");
    };

    let document = committed_document(state);
    let json = write_plan_document(&document)?;
    std::fs::write(&path, json)
        .with_context(|| format!("Datei konnte nicht geschrieben werden: {path}"))?;

    log::info!("File saved as: {}", path);
    state.ui.set_status(format!("Gespeichert: {path}"));
    state.ui.current_file_path = Some(path);
    state.autosave.mark_saved(state.history.revision());
    Ok(())
}

/// Fragt den Autosave-Scheduler ab. Liefert ein Dokument, wenn gespeichert
/// werden soll; den Transport übernimmt der Aufrufer.
pub fn poll_autosave(state: &mut AppState, now: Instant) -> Option<PlanDocument> {
    state
        .autosave
        .poll(&state.history, state.options.unit, &state.view.camera, now)
}

fn committed_document(state: &AppState) -> PlanDocument {
    to_document(
        &state.history.current().plan,
        state.options.unit,
        &state.view.camera,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WallSpec;
    use glam::Vec2;

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("floorplan_editor_{}_{}.json", name, std::process::id()))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn save_without_path_fails() {
        let mut state = AppState::new();
        assert!(save_file(&mut state, None).is_err());
    }

    #[test]
    fn save_and_load_round_trip() {
        let path = temp_path("roundtrip");
        let mut state = AppState::new();
        let plan = state.plan_mut();
        let a = plan.add_node(Vec2::new(0.0, 0.0)).expect("Knoten");
        let b = plan.add_node(Vec2::new(4.0, 0.0)).expect("Knoten");
        plan.add_wall(a, b, WallSpec::new(0.2)).expect("Wand");
        state.record_history();

        save_file(&mut state, Some(path.clone())).expect("Speichern");
        assert_eq!(state.ui.current_file_path.as_deref(), Some(path.as_str()));

        let mut loaded = AppState::new();
        load_file(&mut loaded, path.clone()).expect("Laden");
        assert_eq!(*loaded.plan, *state.plan);
        assert!(!loaded.can_undo());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_missing_file_keeps_state() {
        let mut state = AppState::new();
        state.plan_mut().add_node(Vec2::ZERO).expect("Knoten");

        assert!(load_file(&mut state, temp_path("does_not_exist")).is_err());
        assert_eq!(state.plan.node_count(), 1);
    }
}
