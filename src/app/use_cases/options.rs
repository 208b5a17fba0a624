//! Use-Case-Funktionen für Laufzeit-Optionen.

use crate::app::AppState;
use crate::shared::EditorOptions;
use std::time::Duration;

/// Übernimmt neue Optionen in den AppState (ohne Persistenz).
///
/// Ein geänderter Fangradius wird in den Grundriss übernommen und als
/// eigener History-Schritt aufgezeichnet.
pub fn apply_options(state: &mut AppState, options: EditorOptions) {
    let threshold = options.merge_threshold_world();
    state.options = options;
    state
        .autosave
        .set_debounce(Duration::from_millis(state.options.autosave_debounce_ms));

    if (state.plan.merge_threshold() - threshold).abs() > f32::EPSILON {
        state.plan_mut().set_merge_threshold(threshold);
        state.record_history();
        log::info!("Fangradius geändert: {:.4}", threshold);
    }
}
