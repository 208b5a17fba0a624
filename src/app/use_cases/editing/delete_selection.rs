//! Use-Case: Selektion kaskadierend löschen.

use crate::app::tools::common::is_node_editable;
use crate::app::AppState;

/// Löscht alle selektierten Elemente in einem History-Schritt.
///
/// Reihenfolge: Räume, Öffnungen, Wände (mit ihren Öffnungen und verwaisten
/// Knoten), Knoten (mit allen angrenzenden Wänden). Elemente auf gesperrten
/// Ebenen bleiben erhalten. Gibt die Anzahl der direkt gelöschten Elemente zurück.
pub fn delete_selection(state: &mut AppState) -> usize {
    if state.selection.is_empty() {
        log::debug!("Nichts zum Löschen selektiert");
        return 0;
    }

    let selection = state.selection.clone();
    let mut removed = 0usize;
    let mut skipped = 0usize;
    let plan = state.plan_mut();

    for room in selection.rooms.iter() {
        if plan.remove_room(*room).is_ok() {
            removed += 1;
        }
    }

    for opening in selection.openings.iter() {
        let Some(wall) = plan.opening(*opening).map(|o| o.wall) else {
            continue;
        };
        if !plan.is_wall_editable(wall) {
            skipped += 1;
            continue;
        }
        if plan.remove_opening(*opening).is_ok() {
            removed += 1;
        }
    }

    for wall in selection.walls.iter() {
        if plan.wall(*wall).is_none() {
            continue;
        }
        if !plan.is_wall_editable(*wall) {
            skipped += 1;
            continue;
        }
        if plan.remove_wall(*wall).is_ok() {
            removed += 1;
        }
    }

    for node in selection.nodes.iter() {
        if plan.node(*node).is_none() {
            continue;
        }
        if !is_node_editable(plan, *node) {
            skipped += 1;
            continue;
        }
        if plan.remove_node(*node).is_ok() {
            removed += 1;
        }
    }

    state.selection.clear();
    if removed > 0 {
        state.record_history();
        log::info!("{} Elemente gelöscht", removed);
    }
    if skipped > 0 {
        log::warn!("{} Elemente auf gesperrten Ebenen nicht gelöscht", skipped);
        state
            .ui
            .set_status(format!("{skipped} Elemente liegen auf gesperrten Ebenen"));
    }
    removed
}
