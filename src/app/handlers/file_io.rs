//! Handler für Datei-Operationen (Neu, Öffnen, Speichern).

use crate::app::use_cases;
use crate::app::AppState;

/// Beginnt einen leeren Grundriss.
pub fn new_plan(state: &mut AppState) {
    use_cases::file_io::new_plan(state);
}

/// Lädt einen Grundriss aus dem übergebenen Pfad.
pub fn load(state: &mut AppState, path: String) -> anyhow::Result<()> {
    use_cases::file_io::load_file(state, path)
}

/// Speichert den Grundriss.
///
/// `None` speichert unter dem aktuell bekannten Pfad.
/// `Some(p)` speichert explizit unter dem neuen Pfad `p`.
pub fn save(state: &mut AppState, path: Option<String>) -> anyhow::Result<()> {
    use_cases::file_io::save_file(state, path)
}

/// Markiert die Anwendung zum Beenden.
pub fn request_exit(state: &mut AppState) {
    state.should_exit = true;
}
