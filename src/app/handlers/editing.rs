//! Handler für Grundriss-Bearbeitung (Löschen, Ebenen, Räume).

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::{LayerId, RoomId};

/// Löscht die Selektion kaskadierend.
pub fn delete_selection(state: &mut AppState) {
    use_cases::editing::delete_selection(state);
}

/// Legt eine Ebene an.
pub fn add_layer(state: &mut AppState, name: &str) {
    use_cases::editing::add_layer(state, name);
}

/// Setzt die Sichtbarkeit einer Ebene.
pub fn set_layer_visibility(state: &mut AppState, layer: LayerId, visible: bool) {
    use_cases::editing::set_layer_visibility(state, layer, visible);
}

/// Sperrt oder entsperrt eine Ebene.
pub fn set_layer_locked(state: &mut AppState, layer: LayerId, locked: bool) {
    use_cases::editing::set_layer_locked(state, layer, locked);
}

/// Wählt die Ebene für neue Wände.
pub fn set_active_layer(state: &mut AppState, layer: Option<LayerId>) {
    use_cases::editing::set_active_layer(state, layer);
}

/// Gleicht alle Räume neu ab.
pub fn resync_rooms(state: &mut AppState) {
    use_cases::editing::resync_rooms(state);
}

/// Benennt einen Raum um.
pub fn rename_room(state: &mut AppState, room: RoomId, name: &str) {
    use_cases::editing::rename_room(state, room, name);
}
