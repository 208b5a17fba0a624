//! Use-Case-Funktionen für die Grundriss-Bearbeitung.
//!
//! Aufgeteilt nach Operation:
//! - `apply_tool_response` — Werkzeug-Antworten anwenden (inkl. Transaktionen)
//! - `delete_selection` — Selektion kaskadierend löschen
//! - `layers` — Ebenen anlegen, ein-/ausblenden, sperren
//! - `rooms` — Räume umbenennen und neu abgleichen

mod apply_tool_response;
mod delete_selection;
mod layers;
mod rooms;

pub use apply_tool_response::apply_tool_response;
pub use delete_selection::delete_selection;
pub use layers::{add_layer, set_active_layer, set_layer_locked, set_layer_visibility};
pub use rooms::{rename_room, resync_rooms, ResyncReport};
