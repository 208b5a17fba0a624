//! Use-Case: Räume umbenennen und mit der Wandgeometrie abgleichen.

use crate::app::AppState;
use crate::core::{resync_room, RoomId, RoomSync};

/// Ergebnis eines Re-Syncs über alle Räume.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResyncReport {
    /// Räume mit aktualisierter Geometrie
    pub updated: Vec<RoomId>,
    /// Räume, die sich nicht mehr ableiten lassen (Geometrie unverändert)
    pub lost: Vec<RoomId>,
}

/// Benennt einen Raum um.
pub fn rename_room(state: &mut AppState, room: RoomId, name: &str) {
    let name = name.trim();
    if name.is_empty() {
        state.ui.set_status("Raumname darf nicht leer sein");
        return;
    }
    if state.plan.room(room).is_some_and(|r| r.name == name) {
        return;
    }
    match state.plan_mut().rename_room(room, name) {
        Ok(()) => {
            state.record_history();
            log::info!("Raum {} umbenannt in '{}'", room, name);
        }
        Err(e) => log::warn!("Raum nicht umbenannt: {}", e),
    }
}

/// Gleicht alle Räume mit der aktuellen Wandgeometrie ab.
///
/// Geänderte Räume werden in einem History-Schritt aktualisiert. Räume,
/// die sich nicht mehr ableiten lassen, bleiben unverändert und werden in
/// der Statusnachricht genannt.
pub fn resync_rooms(state: &mut AppState) -> ResyncReport {
    let mut report = ResyncReport::default();
    let mut updates = Vec::new();
    for (id, room) in state.plan.rooms() {
        match resync_room(&state.plan, room) {
            RoomSync::Unchanged => {}
            RoomSync::Updated(draft) => updates.push((id, draft)),
            RoomSync::Lost(err) => {
                log::warn!("Raum '{}' nicht mehr ableitbar: {}", room.name, err);
                report.lost.push(id);
            }
        }
    }

    if !updates.is_empty() {
        let plan = state.plan_mut();
        for (id, draft) in updates {
            match plan.replace_room_geometry(id, draft) {
                Ok(()) => report.updated.push(id),
                Err(e) => {
                    log::warn!("Raum {} nicht aktualisiert: {}", id, e);
                    report.lost.push(id);
                }
            }
        }
        if !report.updated.is_empty() {
            state.record_history();
        }
    }

    if report.lost.is_empty() {
        state
            .ui
            .set_status(format!("{} Räume aktualisiert", report.updated.len()));
    } else {
        let names: Vec<&str> = report
            .lost
            .iter()
            .filter_map(|id| state.plan.room(*id).map(|r| r.name.as_str()))
            .collect();
        let message = format!("Räume nicht mehr geschlossen: {}", names.join(", "));
        state.ui.set_status(message);
    }
    log::info!(
        "Räume abgeglichen: {} aktualisiert, {} verloren",
        report.updated.len(),
        report.lost.len()
    );
    report
}
