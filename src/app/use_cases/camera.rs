//! Use-Case-Funktionen für Kamera-Steuerung.

use crate::app::AppState;
use crate::core::Camera2D;
use glam::Vec2;

/// Rand in Pixeln beim Einpassen des Grundrisses.
const FIT_MARGIN_PX: f32 = 40.0;

/// Setzt die Kamera auf Default zurück.
pub fn reset_camera(state: &mut AppState) {
    state.view.camera = Camera2D::default();
}

/// Zoomt die Kamera stufenweise hinein (um die Viewport-Mitte).
pub fn zoom_in(state: &mut AppState) {
    let factor = state.options.camera_zoom_step;
    zoom_towards(state, factor, None);
}

/// Zoomt die Kamera stufenweise heraus (um die Viewport-Mitte).
pub fn zoom_out(state: &mut AppState) {
    let factor = 1.0 / state.options.camera_zoom_step;
    zoom_towards(state, factor, None);
}

/// Verschiebt die Kamera um ein Delta in Screen-Pixeln.
pub fn pan(state: &mut AppState, delta: Vec2) {
    state.view.camera.pan(delta);
}

/// Zoomt auf einen optionalen Fokuspunkt (Screen-Pixel) hin.
///
/// Ohne Fokuspunkt bleibt die Viewport-Mitte stabil.
pub fn zoom_towards(state: &mut AppState, factor: f32, focus_screen: Option<Vec2>) {
    let focus = focus_screen.unwrap_or_else(|| Vec2::from(state.view.viewport_size) * 0.5);
    state.view.camera.zoom_towards(factor, focus);
}

/// Passt die Kamera auf die Bounding-Box des Grundrisses ein.
///
/// Keine Operation, wenn der Grundriss leer oder der Viewport unbekannt ist.
pub fn zoom_to_fit(state: &mut AppState) {
    let Some((min, max)) = state.plan.bounds() else {
        log::debug!("Zoom to fit: Grundriss ist leer");
        return;
    };
    let viewport = Vec2::from(state.view.viewport_size);
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        log::debug!("Zoom to fit: Viewport-Größe unbekannt");
        return;
    }
    state
        .view
        .camera
        .fit_bounds(min, max, viewport, FIT_MARGIN_PX);

    log::info!(
        "Plan bounds: ({:.2}, {:.2}) to ({:.2}, {:.2}), zoom: {:.2}",
        min.x,
        min.y,
        max.x,
        max.y,
        state.view.camera.zoom
    );
}
