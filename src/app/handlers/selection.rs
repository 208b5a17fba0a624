//! Handler für Selektions-Operationen.

use crate::app::use_cases;
use crate::app::AppState;

/// Hebt die Selektion auf.
pub fn clear(state: &mut AppState) {
    use_cases::selection::clear_selection(state);
}

/// Selektiert alle sichtbaren Elemente.
pub fn select_all(state: &mut AppState) {
    use_cases::selection::select_all(state);
}
